//! `src-tauri/tauri.conf.json`: the desktop application descriptor.
//!
//! Only the fields below are modeled. Everything else in each section is
//! captured by the flattened `rest` maps and written back as it was.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{format_error, line_ending, read_document, restore_json_order, write_document, JsonStyle};
use crate::error::Result;
use crate::metadata::ProjectMetadata;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub package: PackageInfo,
    pub tauri: TauriSection,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TauriSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    pub windows: Vec<WindowConfig>,
    pub bundle: BundleConfig,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl AppDescriptor {
    /// # Errors
    /// * `Error::ConfigFormatError` if `package`, `tauri`, `tauri.windows` or
    ///   `tauri.bundle` are missing, or there is no window to title
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let descriptor: Self = serde_json::from_str(content).map_err(|e| format_error(path, e))?;
        if descriptor.tauri.windows.is_empty() {
            return Err(format_error(path, "tauri.windows must contain at least one window"));
        }
        Ok(descriptor)
    }

    pub fn apply(&mut self, metadata: &ProjectMetadata) {
        if let Some(window) = self.tauri.windows.first_mut() {
            window.title = Some(metadata.pretty_name.clone());
        }
        self.tauri.identifier = Some(metadata.id.clone());
        self.tauri.bundle.identifier = Some(metadata.id.clone());
        self.package.product_name = Some(metadata.name.clone());
    }

    /// Serializes the descriptor with the key order and layout of `original`.
    pub fn render(&self, original: &str, path: &Path) -> Result<String> {
        let before: Value = serde_json::from_str(original).map_err(|e| format_error(path, e))?;
        let after = serde_json::to_value(self).map_err(|e| format_error(path, e))?;
        let ordered = restore_json_order(&before, after);
        let rendered = JsonStyle::detect(original)
            .render(&ordered)
            .map_err(|e| format_error(path, e))?;
        Ok(match line_ending(original) {
            "\n" => rendered,
            newline => rendered.replace('\n', newline),
        })
    }

    /// Loads, patches and rewrites the descriptor at `path`.
    pub fn update_file(path: &Path, metadata: &ProjectMetadata) -> Result<()> {
        let content = read_document(path)?;
        let mut descriptor = Self::parse(&content, path)?;
        descriptor.apply(metadata);
        let rendered = descriptor.render(&content, path)?;
        write_document(path, &rendered)
    }
}
