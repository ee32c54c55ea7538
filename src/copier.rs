use std::fs;
use std::path::Path;

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Recursively copies the contents of `src` into `dst`, overwriting files
/// that already exist. Returns the number of files copied.
///
/// # Errors
/// * `Error::CopyError` if `src` is missing or any entry cannot be copied
pub fn copy_tree<P: AsRef<Path>, Q: AsRef<Path>>(src: P, dst: Q) -> Result<usize> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    if !src.is_dir() {
        return Err(Error::CopyError(format!("'{}' is not a directory", src.display())));
    }
    fs::create_dir_all(dst).map_err(|e| copy_error(dst, e))?;

    let mut copied = 0;
    for dir_entry in WalkDir::new(src).min_depth(1) {
        let entry = dir_entry.map_err(|e| Error::CopyError(e.to_string()))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::CopyError(e.to_string()))?;
        let target = dst.join(relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(|e| copy_error(&target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| copy_error(parent, e))?;
            }
            debug!("Copying file: {}", target.display());
            fs::copy(entry.path(), &target).map_err(|e| copy_error(&target, e))?;
            copied += 1;
        }
    }

    Ok(copied)
}

fn copy_error(path: &Path, e: std::io::Error) -> Error {
    Error::CopyError(format!("'{}': {}", path.display(), e))
}
