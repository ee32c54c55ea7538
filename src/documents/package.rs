//! `package.json`: an ordered key/value document. Only `name`,
//! `description` and `author` change. Their new values are spliced into
//! the original text, so every other byte of the file stays as it was.

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Value;

use super::{format_error, line_ending, read_document, write_document, JsonStyle};
use crate::error::Result;
use crate::metadata::ProjectMetadata;

/// Key holding the scaffold marker object.
pub const MARKER_KEY: &str = "next-gen";

#[derive(Debug, Clone)]
pub struct PackageManifest {
    source: String,
    fields: IndexMap<String, Value>,
    changed: Vec<String>,
    style: JsonStyle,
}

impl PackageManifest {
    /// # Errors
    /// * `Error::ConfigFormatError` if `content` is not a JSON object
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let fields: IndexMap<String, Value> =
            serde_json::from_str(content).map_err(|e| format_error(path, e))?;
        Ok(Self {
            source: content.to_string(),
            fields,
            changed: Vec::new(),
            style: JsonStyle::detect(content),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = read_document(path)?;
        Self::parse(&content, path)
    }

    pub fn apply(&mut self, metadata: &ProjectMetadata) {
        self.set("name", &metadata.name);
        self.set("description", &metadata.description);
        self.set("author", &metadata.author);
    }

    fn set(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        if !self.changed.iter().any(|k| k == key) {
            self.changed.push(key.to_string());
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// The `next-gen.id` value of a generated project.
    pub fn scaffold_id(&self) -> Option<&str> {
        self.fields.get(MARKER_KEY)?.get("id")?.as_str()
    }

    /// Renders the original text with the changed values replaced in place.
    /// Keys the document lacked are appended after its last member, using
    /// the detected indentation and line ending.
    pub fn render(&self, path: &Path) -> Result<String> {
        let layout = TopLevel::scan(&self.source)
            .ok_or_else(|| format_error(path, "unrecognized top-level object layout"))?;

        let mut edits: Vec<(Range<usize>, String)> = Vec::new();
        let mut missing = Vec::new();
        for key in &self.changed {
            let Some(value) = self.fields.get(key) else {
                continue;
            };
            let encoded = serde_json::to_string(value).map_err(|e| format_error(path, e))?;
            match layout.values.get(key) {
                Some(span) => edits.push((span.clone(), encoded)),
                None => {
                    let key = serde_json::to_string(key).map_err(|e| format_error(path, e))?;
                    missing.push((key, encoded));
                }
            }
        }

        if !missing.is_empty() {
            let newline = line_ending(&self.source);
            let members: Vec<String> = missing
                .iter()
                .map(|(key, value)| match &self.style {
                    JsonStyle::Compact { .. } => format!("{}:{}", key, value),
                    JsonStyle::Pretty { indent, .. } => {
                        format!("{}{}{}: {}", newline, indent, key, value)
                    }
                })
                .collect();
            let edit: (Range<usize>, String) = match layout.last_value_end {
                Some(end) => (end..end, members.iter().map(|m| format!(",{}", m)).collect()),
                None => {
                    let mut text = members.join(",");
                    if matches!(self.style, JsonStyle::Pretty { .. }) {
                        text.push_str(newline);
                    }
                    (layout.open..layout.open, text)
                }
            };
            edits.push(edit);
        }

        edits.sort_by_key(|(span, _)| span.start);
        let mut rendered = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for (span, text) in edits {
            rendered.push_str(&self.source[cursor..span.start]);
            rendered.push_str(&text);
            cursor = span.end;
        }
        rendered.push_str(&self.source[cursor..]);
        Ok(rendered)
    }

    /// Loads, patches and rewrites the manifest at `path`.
    pub fn update_file(path: &Path, metadata: &ProjectMetadata) -> Result<()> {
        let mut manifest = Self::load(path)?;
        manifest.apply(metadata);
        let content = manifest.render(path)?;
        write_document(path, &content)
    }
}

/// Byte spans of the members of a top-level JSON object.
struct TopLevel {
    /// Position right after the opening brace.
    open: usize,
    values: HashMap<String, Range<usize>>,
    last_value_end: Option<usize>,
}

impl TopLevel {
    /// Expects text serde_json already accepted as an object; returns
    /// `None` on anything else.
    fn scan(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        let mut pos = skip_whitespace(bytes, 0);
        if bytes.get(pos) != Some(&b'{') {
            return None;
        }
        pos += 1;
        let open = pos;
        let mut values = HashMap::new();
        let mut last_value_end = None;

        loop {
            pos = skip_whitespace(bytes, pos);
            match bytes.get(pos)? {
                b'}' => break,
                b',' => pos += 1,
                b'"' => {
                    let key_end = skip_string(bytes, pos)?;
                    let key: String = serde_json::from_str(&text[pos..key_end]).ok()?;
                    pos = skip_whitespace(bytes, key_end);
                    if bytes.get(pos)? != &b':' {
                        return None;
                    }
                    pos = skip_whitespace(bytes, pos + 1);
                    let value_end = skip_value(bytes, pos)?;
                    values.insert(key, pos..value_end);
                    last_value_end = Some(value_end);
                    pos = value_end;
                }
                _ => return None,
            }
        }

        Some(Self { open, values, last_value_end })
    }
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while matches!(bytes.get(pos), Some(b' ' | b'\t' | b'\n' | b'\r')) {
        pos += 1;
    }
    pos
}

/// `pos` is on an opening quote; returns the position past the closing one.
fn skip_string(bytes: &[u8], pos: usize) -> Option<usize> {
    let mut i = pos + 1;
    loop {
        match bytes.get(i)? {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
}

fn skip_value(bytes: &[u8], pos: usize) -> Option<usize> {
    match bytes.get(pos)? {
        b'"' => skip_string(bytes, pos),
        b'{' | b'[' => {
            let mut depth = 0usize;
            let mut i = pos;
            loop {
                match bytes.get(i)? {
                    b'"' => {
                        i = skip_string(bytes, i)?;
                        continue;
                    }
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return Some(i + 1);
                        }
                    }
                    _ => {}
                }
                i += 1;
            }
        }
        _ => {
            let mut i = pos;
            while let Some(b) = bytes.get(i) {
                if matches!(b, b',' | b'}' | b']' | b' ' | b'\t' | b'\n' | b'\r') {
                    break;
                }
                i += 1;
            }
            Some(i)
        }
    }
}
