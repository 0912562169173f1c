//! core/tags/read.rs
//! Read ID3 tags from an MP3 and convert them into a `TrackRow`.
//!
//! ID3v2 first; the ID3v1 trailer fills whatever v2 left empty (or everything,
//! when the file has no v2 tag at all).

use std::path::{Path, PathBuf};

use id3::frame::Content;
use id3::{ErrorKind, Tag, TagLike, v1};
use log::{debug, warn};

use super::super::types::TrackRow;

/// Returns `(row, failed)`. `failed` is true when neither tag version could be
/// read; the row then carries only the path.
pub fn read_track_row(path: PathBuf) -> (TrackRow, bool) {
    let v2 = match Tag::read_from_path(&path) {
        Ok(tag) => Some(tag),
        Err(e) => {
            debug!("no ID3v2 tag in {}: {e}", path.display());
            None
        }
    };

    let v1 = read_v1(&path);

    if v2.is_none() && v1.is_none() {
        debug!("no ID3 tag in {}", path.display());
        return (TrackRow::untagged(path), true);
    }

    let mut row = match &v2 {
        Some(tag) => build_row_from_tag(path, tag),
        None => TrackRow::untagged(path),
    };

    if let Some(v1) = v1 {
        row.title = row.title.or_else(|| non_empty(Some(&v1.title)));
        row.artist = row.artist.or_else(|| non_empty(Some(&v1.artist)));
        row.album = row.album.or_else(|| non_empty(Some(&v1.album)));
        row.year = row.year.or_else(|| v1.year.trim().parse::<i32>().ok());
    }

    (row, false)
}

/// The 128-byte trailer, if the file has one. Anything other than "no tag"
/// is logged and treated the same.
fn read_v1(path: &Path) -> Option<v1::Tag> {
    match v1::Tag::read_from_path(path) {
        Ok(tag) => Some(tag),
        Err(id3::Error {
            kind: ErrorKind::NoTag,
            ..
        }) => None,
        Err(e) => {
            warn!("ID3v1 read failed for {}: {e}", path.display());
            None
        }
    }
}

fn build_row_from_tag(path: PathBuf, tag: &Tag) -> TrackRow {
    // v2.3 keeps the year in TYER, v2.4 in TDRC.
    let year = tag
        .year()
        .or_else(|| tag.date_recorded().map(|ts| ts.year));

    let duration_ms = text_frame(tag, "TLEN").and_then(|s| s.trim().parse::<u64>().ok());

    TrackRow {
        path,
        title: non_empty(tag.title()),
        artist: non_empty(tag.artist()),
        album: non_empty(tag.album()),
        year,
        duration_ms,
    }
}

fn non_empty(s: Option<&str>) -> Option<String> {
    s.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn text_frame(tag: &Tag, id: &str) -> Option<String> {
    let frame = tag.get(id)?;
    match frame.content() {
        Content::Text(s) => Some(s.clone()),
        _ => None,
    }
}
