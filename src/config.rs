//! Runtime settings for next-gen.
//! Every fixed name and download heuristic lives here so it can be
//! overridden from the environment and replaced in tests.

use crate::constants::{
    ARCHIVE_FILE, MAX_RETRIES, MIN_ARCHIVE_SIZE, PACKAGE_MANAGER, RELEASE_REPO,
    SCAFFOLD_MARKER, STAGING_DIR, TEMPLATE_ROOT, TEMPLATE_URL,
};
use crate::error::{Error, Result};
use log::debug;
use url::Url;

/// Environment variable overriding the template archive URL
pub const ENV_TEMPLATE_URL: &str = "NEXT_GEN_TEMPLATE_URL";
/// Environment variable overriding the minimum archive size
pub const ENV_MIN_ARCHIVE_SIZE: &str = "NEXT_GEN_MIN_ARCHIVE_SIZE";
/// Environment variable overriding the retry cap
pub const ENV_MAX_RETRIES: &str = "NEXT_GEN_MAX_RETRIES";
/// Environment variable overriding the package manager program
pub const ENV_PACKAGE_MANAGER: &str = "NEXT_GEN_PACKAGE_MANAGER";

#[derive(Debug, Clone)]
pub struct Settings {
    pub template_url: Url,
    pub archive_name: String,
    pub staging_dir: String,
    /// Directory inside the archive whose contents become the project
    pub template_root: String,
    pub min_archive_size: u64,
    pub max_retries: u32,
    pub scaffold_marker: String,
    pub package_manager: String,
    pub release_repo: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template_url: Url::parse(TEMPLATE_URL).expect("built-in template URL is valid"),
            archive_name: ARCHIVE_FILE.to_string(),
            staging_dir: STAGING_DIR.to_string(),
            template_root: TEMPLATE_ROOT.to_string(),
            min_archive_size: MIN_ARCHIVE_SIZE,
            max_retries: MAX_RETRIES,
            scaffold_marker: SCAFFOLD_MARKER.to_string(),
            package_manager: PACKAGE_MANAGER.to_string(),
            release_repo: RELEASE_REPO.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from defaults plus whatever `lookup` returns for the
    /// `NEXT_GEN_*` keys.
    ///
    /// # Errors
    /// * `Error::SettingsError` if an override cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(raw) = lookup(ENV_TEMPLATE_URL) {
            debug!("Template URL overridden: {}", raw);
            settings.template_url = Url::parse(&raw).map_err(|e| {
                Error::SettingsError(format!("{} is not a valid URL: {}", ENV_TEMPLATE_URL, e))
            })?;
        }
        if let Some(raw) = lookup(ENV_MIN_ARCHIVE_SIZE) {
            settings.min_archive_size = raw.trim().parse().map_err(|_| {
                Error::SettingsError(format!("{} must be a byte count, got '{}'", ENV_MIN_ARCHIVE_SIZE, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_MAX_RETRIES) {
            settings.max_retries = raw.trim().parse().map_err(|_| {
                Error::SettingsError(format!("{} must be a number, got '{}'", ENV_MAX_RETRIES, raw))
            })?;
        }
        if let Some(raw) = lookup(ENV_PACKAGE_MANAGER) {
            if raw.trim().is_empty() {
                return Err(Error::SettingsError(format!("{} must not be empty", ENV_PACKAGE_MANAGER)));
            }
            settings.package_manager = raw.trim().to_string();
        }

        Ok(settings)
    }
}
