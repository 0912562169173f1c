//! core/mod.rs
//!
//! Everything that isn't UI:
//! - discover MP3 paths in a folder (single pass, no recursion)
//! - read ID3 tags and cover art
//! - the play queue (sequential / shuffle bag / repeat)
//! - the playback engine thread
//!
//! The scan pipeline is explicit:
//!   (A) discover paths -> Vec<PathBuf>
//!   (B) read tags -> Vec<TrackRow>

pub mod error;
pub mod library;
pub mod playback;
pub mod queue;
pub mod tags;
pub mod types;

use std::path::{Path, PathBuf};

use log::info;

use error::Result;
use types::TrackRow;

/// Read tags for already-discovered paths.
///
/// Never fails per file: unreadable tags give an untagged row.
/// Returns (rows, tag_failures).
pub fn read_tracks(paths: Vec<PathBuf>) -> (Vec<TrackRow>, usize) {
    let mut rows: Vec<TrackRow> = Vec::with_capacity(paths.len());
    let mut tag_failures: usize = 0;

    for path in paths {
        let (mut row, failed) = tags::read_track_row(path);
        if failed {
            tag_failures += 1;
        }
        if row.duration_ms.is_none() {
            row.duration_ms = playback::probe_duration_ms(&row.path);
        }
        rows.push(row);
    }

    (rows, tag_failures)
}

/// Scan one folder and read every track in it.
pub fn scan_folder(dir: &Path) -> Result<(Vec<TrackRow>, usize)> {
    let paths = library::scan_mp3s(dir)?;
    let (rows, failures) = read_tracks(paths);
    info!(
        "scanned {}: {} tracks, {} without tags",
        dir.display(),
        rows.len(),
        failures
    );
    Ok((rows, failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn scan_folder_counts_tag_failures() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.mp3"), vec![0u8; 200]).unwrap();
        fs::write(tmp.path().join("b.mp3"), vec![0u8; 200]).unwrap();

        let (rows, failures) = scan_folder(tmp.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(failures, 2);
        assert_eq!(rows[0].path, tmp.path().join("a.mp3"));
        assert_eq!(rows[0].duration_ms, None);
    }

    #[test]
    fn scan_folder_propagates_missing_folder() {
        let tmp = TempDir::new().unwrap();
        assert!(scan_folder(&tmp.path().join("gone")).is_err());
    }
}
