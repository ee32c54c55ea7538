//! Release feed check run at startup.
//!
//! The check only reports; a failure to reach the feed or parse its answer
//! downgrades to `UpdateStatus::Unknown` and never stops the run.

use std::time::Duration;

use log::debug;
use reqwest::blocking::Client;
use semver::Version;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Latest published release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: Version,
    /// Download URL of the asset built for this platform, if one exists
    pub asset_url: Option<String>,
}

/// Where the latest release is looked up.
pub trait UpdateFeed {
    fn latest(&self) -> Result<Option<Release>>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    Available(Release),
    Unknown(String),
}

#[derive(Deserialize)]
struct GitHubRelease {
    tag_name: String,
    #[serde(default)]
    assets: Vec<GitHubAsset>,
}

#[derive(Deserialize)]
struct GitHubAsset {
    name: String,
    browser_download_url: String,
}

/// Reads the latest release of a GitHub repository.
pub struct GitHubReleaseFeed {
    client: Client,
    repo: String,
}

impl GitHubReleaseFeed {
    pub fn new(repo: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("next-gen/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::RequestError {
                url: String::new(),
                reason: format!("failed to create HTTP client: {}", e),
            })?;
        Ok(Self { client, repo: repo.into() })
    }
}

impl UpdateFeed for GitHubReleaseFeed {
    fn latest(&self) -> Result<Option<Release>> {
        let url = format!("https://api.github.com/repos/{}/releases/latest", self.repo);
        let request_error = |e: reqwest::Error| Error::RequestError {
            url: url.clone(),
            reason: e.to_string(),
        };

        let response = self.client.get(&url).send().map_err(request_error)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Error::BadStatus { status: response.status().as_u16() });
        }
        let release: GitHubRelease = response.json().map_err(request_error)?;

        let tag = release.tag_name.strip_prefix('v').unwrap_or(&release.tag_name);
        let version = match Version::parse(tag) {
            Ok(version) => version,
            Err(e) => {
                debug!("Ignoring release tag '{}': {}", release.tag_name, e);
                return Ok(None);
            }
        };
        let asset_url = release
            .assets
            .into_iter()
            .find(|asset| asset.name.to_lowercase().contains(std::env::consts::OS))
            .map(|asset| asset.browser_download_url);

        Ok(Some(Release { version, asset_url }))
    }
}

/// Compares the feed's latest release with `current`.
pub fn check_for_update(feed: &dyn UpdateFeed, current: &str) -> UpdateStatus {
    let current = match Version::parse(current) {
        Ok(version) => version,
        Err(e) => return UpdateStatus::Unknown(format!("invalid current version: {}", e)),
    };

    match feed.latest() {
        Ok(Some(release)) if release.version > current => UpdateStatus::Available(release),
        Ok(Some(_)) => UpdateStatus::UpToDate,
        Ok(None) => UpdateStatus::Unknown("latest version could not be found".to_string()),
        Err(e) => UpdateStatus::Unknown(e.to_string()),
    }
}
