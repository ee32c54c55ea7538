//! Classification of the destination directory.

use std::fs;
use std::path::Path;

use log::debug;

use crate::constants::PACKAGE_MANIFEST;
use crate::documents::PackageManifest;
use crate::error::{Error, Result};

/// What the destination directory currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Nothing at all; the template can be fetched into it.
    Empty,
    /// A project previously generated by next-gen.
    Scaffold,
    /// Anything else.
    Foreign,
}

/// Inspects `dir` and decides which route the pipeline takes.
///
/// A directory counts as a scaffold when its package manifest carries
/// `next-gen.id == marker`. A manifest that cannot be read or parsed is
/// treated as foreign.
pub fn inspect_destination(dir: &Path, marker: &str) -> Result<Destination> {
    let mut entries = fs::read_dir(dir).map_err(|source| Error::FileError {
        path: dir.display().to_string(),
        source,
    })?;
    if entries.next().is_none() {
        return Ok(Destination::Empty);
    }

    let manifest_path = dir.join(PACKAGE_MANIFEST);
    if !manifest_path.is_file() {
        debug!("'{}' has no {}.", dir.display(), PACKAGE_MANIFEST);
        return Ok(Destination::Foreign);
    }

    match PackageManifest::load(&manifest_path) {
        Ok(manifest) if manifest.scaffold_id() == Some(marker) => Ok(Destination::Scaffold),
        Ok(_) => {
            debug!("{} has no matching scaffold marker.", PACKAGE_MANIFEST);
            Ok(Destination::Foreign)
        }
        Err(e) => {
            debug!("Could not read {}: {}", PACKAGE_MANIFEST, e);
            Ok(Destination::Foreign)
        }
    }
}
