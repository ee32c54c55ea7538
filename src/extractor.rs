//! Zip extraction into the staging directory.
//! Every entry must pass the zip crate's `enclosed_name` check and resolve
//! strictly beneath the staging root before anything is written; one
//! escaping entry aborts the whole extraction.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use log::debug;
use zip::ZipArchive;

use crate::error::{Error, Result};

/// Resolves an archive entry to its destination under `root`.
///
/// `enclosed` is the entry's [`zip::read::ZipFile::enclosed_name`], which is
/// `None` for absolute names and names climbing above the archive root.
///
/// # Errors
/// * `Error::IllegalArchivePath` if `enclosed` is `None`, the name has a
///   `..` segment, or it does not resolve to a path strictly beneath `root`
pub fn resolve_entry_path(root: &Path, entry_name: &str, enclosed: Option<&Path>) -> Result<PathBuf> {
    let illegal = || Error::IllegalArchivePath { entry: entry_name.to_string() };

    let enclosed = enclosed.ok_or_else(illegal)?;
    if entry_name.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(illegal());
    }

    let relative: PathBuf = enclosed
        .components()
        .filter(|component| matches!(component, Component::Normal(_)))
        .collect();
    let target = root.join(&relative);

    if relative.as_os_str().is_empty() || !target.starts_with(root) {
        return Err(illegal());
    }
    Ok(target)
}

/// Unpacks `archive_path` into `dest_root`, returning the number of files
/// written.
pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(archive_path: P, dest_root: Q) -> Result<usize> {
    let archive_path = archive_path.as_ref();
    let dest_root = dest_root.as_ref();

    let file = File::open(archive_path).map_err(|source| Error::FileError {
        path: archive_path.display().to_string(),
        source,
    })?;
    let mut archive = ZipArchive::new(file)?;
    debug!("Extracting {} entries into '{}'.", archive.len(), dest_root.display());

    let mut files = 0;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let target = resolve_entry_path(dest_root, entry.name(), entry.enclosed_name())?;

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(|source| file_error(&target, source))?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| file_error(parent, source))?;
        }

        let mut out = File::create(&target).map_err(|source| file_error(&target, source))?;
        io::copy(&mut entry, &mut out).map_err(|source| file_error(&target, source))?;
        drop(out);

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&target, fs::Permissions::from_mode(mode & 0o7777))
                .map_err(|source| file_error(&target, source))?;
        }

        files += 1;
    }

    Ok(files)
}

fn file_error(path: &Path, source: io::Error) -> Error {
    Error::FileError { path: path.display().to_string(), source }
}
