//! core/tags/mod.rs
//!
//! ID3 tag reading.
//! Public API:
//! - [`read_track_row`] reads an MP3 into a [`TrackRow`](super::types::TrackRow)
//!   (non-fatal on tag read failure).
//! - [`read_embedded_art`] pulls the first attached picture out of the tag.

mod art;
mod read;

pub use art::read_embedded_art;
pub use read::read_track_row;
