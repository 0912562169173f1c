//! core/error.rs
//! One error type for everything under `core`.
//!
//! The GUI turns these into status-line strings at the message boundary,
//! since `Message` has to be `Clone` and `io::Error` is not.

use std::path::PathBuf;

use symphonia::core::errors::Error as SymphoniaError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Not a folder: {}", .0.display())]
    NotAFolder(PathBuf),

    #[error("Audio output unavailable: {0}")]
    AudioOutput(String),

    #[error("Format probe failed: {0}")]
    Probe(#[source] SymphoniaError),

    #[error("No supported audio track in {}", .0.display())]
    NoAudioTrack(PathBuf),

    #[error("Decoder init failed: {0}")]
    DecoderInit(#[source] SymphoniaError),

    #[error("Seek failed: {0}")]
    Seek(#[source] SymphoniaError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
