//! `src-tauri/Cargo.toml`: the desktop shell's build manifest.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{format_error, read_document, restore_toml_order, write_document};
use crate::error::Result;
use crate::metadata::ProjectMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildManifest {
    pub package: BuildPackage,
    #[serde(flatten)]
    pub rest: toml::Table,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildPackage {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(flatten)]
    pub rest: toml::Table,
}

impl BuildManifest {
    /// # Errors
    /// * `Error::ConfigFormatError` if the TOML is invalid or `[package]` is
    ///   missing or malformed
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| format_error(path, e))
    }

    pub fn apply(&mut self, metadata: &ProjectMetadata) {
        self.package.name = metadata.name.clone();
        self.package.description = Some(metadata.description.clone());
        self.package.authors = vec![metadata.author.clone()];
    }

    /// Serializes the manifest, keeping the table order of `original`.
    pub fn render(&self, original: &str, path: &Path) -> Result<String> {
        let before: toml::Table = toml::from_str(original).map_err(|e| format_error(path, e))?;
        let after = match toml::Value::try_from(self).map_err(|e| format_error(path, e))? {
            toml::Value::Table(table) => table,
            other => return Err(format_error(path, format!("expected a table, got {}", other.type_str()))),
        };
        toml::to_string(&restore_toml_order(&before, after)).map_err(|e| format_error(path, e))
    }

    /// Loads, patches and rewrites the manifest at `path`.
    pub fn update_file(path: &Path, metadata: &ProjectMetadata) -> Result<()> {
        let content = read_document(path)?;
        let mut manifest = Self::parse(&content, path)?;
        manifest.apply(metadata);
        let rendered = manifest.render(&content, path)?;
        write_document(path, &rendered)
    }
}
