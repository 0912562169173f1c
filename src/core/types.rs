//! Core data types shared between core logic and the UI.
//!
//! These are plain bags of data: no GUI code, no filesystem code, no tag
//! parsing. `TrackRow` is one MP3 file on disk plus the metadata we show.

use std::path::PathBuf;

/// One row of the file list.
///
/// Metadata is optional: files may have no tag, a partial tag, or a tag we
/// failed to read, and the UI shows placeholders for the gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackRow {
    /// Full file path. The only field we always have.
    pub path: PathBuf,

    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,

    /// Length in milliseconds (TLEN frame, else probed from the stream).
    pub duration_ms: Option<u64>,
}

impl TrackRow {
    /// A row with nothing but the path.
    pub fn untagged(path: PathBuf) -> Self {
        Self {
            path,
            title: None,
            artist: None,
            album: None,
            year: None,
            duration_ms: None,
        }
    }

    /// Title for display: the tag title, else the file name without `.mp3`.
    pub fn display_title(&self) -> String {
        self.title.clone().unwrap_or_else(|| self.file_stem())
    }

    pub fn file_stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Unknown Title".to_string())
    }
}
