//! Targeted rewrites of the project's configuration documents.
//!
//! Each document is loaded whole, patched through a view covering only
//! the fields that change, rendered back to text, and only then written
//! over the original file. Everything outside the targeted fields is
//! carried through untouched.

use std::fs;
use std::path::Path;

use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::constants::{APP_DESCRIPTOR, BUILD_MANIFEST, PACKAGE_MANIFEST};
use crate::error::{Error, Result};
use crate::metadata::ProjectMetadata;
use crate::output;

pub mod build;
pub mod descriptor;
pub mod package;

pub use build::BuildManifest;
pub use descriptor::AppDescriptor;
pub use package::PackageManifest;

/// Layout of a JSON document, detected from its text so a rewrite looks
/// like the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JsonStyle {
    Compact { trailing_newline: bool },
    Pretty { indent: String, trailing_newline: bool },
}

impl JsonStyle {
    pub fn detect(content: &str) -> Self {
        let trailing_newline = content.ends_with('\n');
        let indent = content
            .lines()
            .skip(1)
            .find(|line| line.starts_with([' ', '\t']))
            .map(|line| {
                line.chars()
                    .take_while(|c| *c == ' ' || *c == '\t')
                    .collect::<String>()
            });

        match indent {
            Some(indent) => JsonStyle::Pretty { indent, trailing_newline },
            None if content.trim_end().contains('\n') => JsonStyle::Pretty {
                indent: "  ".to_string(),
                trailing_newline,
            },
            None => JsonStyle::Compact { trailing_newline },
        }
    }

    /// Serializes `value` in this style.
    pub fn render<T: Serialize>(&self, value: &T) -> serde_json::Result<String> {
        let (mut text, trailing_newline) = match self {
            JsonStyle::Compact { trailing_newline } => {
                (serde_json::to_string(value)?, *trailing_newline)
            }
            JsonStyle::Pretty { indent, trailing_newline } => {
                let mut buf = Vec::new();
                let formatter = PrettyFormatter::with_indent(indent.as_bytes());
                let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
                value.serialize(&mut serializer)?;
                (String::from_utf8_lossy(&buf).into_owned(), *trailing_newline)
            }
        };
        if trailing_newline {
            text.push('\n');
        }
        Ok(text)
    }
}

/// `"\r\n"` if the document uses Windows line endings, `"\n"` otherwise.
pub fn line_ending(content: &str) -> &'static str {
    if content.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

/// Rebuilds every object in `updated` so its keys follow the order they
/// had in `original`. Keys only present in `updated` go last.
pub fn restore_json_order(original: &serde_json::Value, updated: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match (original, updated) {
        (Value::Object(before), Value::Object(mut after)) => {
            let mut ordered = serde_json::Map::with_capacity(after.len());
            for (key, old) in before {
                if let Some(new) = after.shift_remove(key) {
                    ordered.insert(key.clone(), restore_json_order(old, new));
                }
            }
            for (key, new) in after {
                ordered.insert(key, new);
            }
            Value::Object(ordered)
        }
        (Value::Array(before), Value::Array(after)) => Value::Array(
            after
                .into_iter()
                .enumerate()
                .map(|(i, new)| match before.get(i) {
                    Some(old) => restore_json_order(old, new),
                    None => new,
                })
                .collect(),
        ),
        (_, updated) => updated,
    }
}

/// TOML counterpart of [`restore_json_order`].
pub fn restore_toml_order(original: &toml::Table, mut updated: toml::Table) -> toml::Table {
    use toml::Value;

    let mut ordered = toml::Table::new();
    for (key, old) in original {
        if let Some(new) = updated.remove(key) {
            let new = match (old, new) {
                (Value::Table(old), Value::Table(new)) => Value::Table(restore_toml_order(old, new)),
                (_, new) => new,
            };
            ordered.insert(key.clone(), new);
        }
    }
    for (key, new) in updated {
        ordered.insert(key, new);
    }
    ordered
}

pub(crate) fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::FileError {
        path: path.display().to_string(),
        source,
    })
}

pub(crate) fn write_document(path: &Path, content: &str) -> Result<()> {
    debug!("Writing {} bytes to '{}'.", content.len(), path.display());
    fs::write(path, content).map_err(|source| Error::FileError {
        path: path.display().to_string(),
        source,
    })
}

pub(crate) fn format_error(path: &Path, reason: impl ToString) -> Error {
    Error::ConfigFormatError {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Rewrites the package manifest, app descriptor and build manifest under
/// `project_root`, in that order. The first failure stops the sequence.
pub fn customize(project_root: &Path, metadata: &ProjectMetadata) -> Result<()> {
    let package_path = project_root.join(PACKAGE_MANIFEST);
    output::info(&format!("Updating {}", PACKAGE_MANIFEST));
    PackageManifest::update_file(&package_path, metadata)?;
    output::success(&format!("Modified {}", PACKAGE_MANIFEST));

    let descriptor_path = project_root.join(APP_DESCRIPTOR);
    output::info(&format!("Updating {}", APP_DESCRIPTOR));
    AppDescriptor::update_file(&descriptor_path, metadata)?;
    output::success(&format!("Successfully modified {}", APP_DESCRIPTOR));

    let build_path = project_root.join(BUILD_MANIFEST);
    output::info(&format!("Updating {}", BUILD_MANIFEST));
    BuildManifest::update_file(&build_path, metadata)?;
    output::success(&format!("Successfully modified {}", BUILD_MANIFEST));

    Ok(())
}
