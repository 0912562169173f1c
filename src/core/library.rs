//! core/library.rs
//! Folder scan: a single pass over one directory, no recursion.

use std::path::{Path, PathBuf};

use log::debug;

use super::error::{Error, Result};

/// List the `.mp3` files directly inside `dir`, sorted by path.
pub fn scan_mp3s(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(Error::NotAFolder(dir.to_path_buf()));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;

    let mut out = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();

        if path.is_file() && is_mp3(&path) {
            out.push(path);
        }
    }

    out.sort();
    debug!("found {} mp3 files in {}", out.len(), dir.display());
    Ok(out)
}

pub(crate) fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}
