//! GUI state + messages.
//! Pure data definitions used by update/ + view/.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use iced::widget::image;

use crate::config::Config;
use crate::core::playback::{PlaybackController, PlayerCommand, PlayerEvent};
use crate::core::queue::PlayQueue;
use crate::core::types::TrackRow;

/// What the engine is doing with the now-playing track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlayState {
    Stopped,
    Playing,
    Paused,
}

/// App state
pub(crate) struct FastPlay {
    pub status: String,
    pub scanning: bool,

    // Folder
    pub folder_input: String,
    pub folder: Option<PathBuf>,

    // Library
    pub tracks: Vec<TrackRow>,
    pub selected_track: Option<usize>,
    /// File chosen through "Open file"; played once its folder scan lands.
    pub pending_play: Option<PathBuf>,

    // Playback
    pub now_playing: Option<usize>,
    pub play_state: PlayState,
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    pub seek_preview_ratio: Option<f32>,
    pub volume: f32,
    pub queue: PlayQueue,

    /// Decoded cover art per file. `None` = looked, found nothing.
    pub cover_cache: HashMap<PathBuf, Option<image::Handle>>,

    // Engine handles (started lazily on first play)
    pub playback: Option<PlaybackController>,
    pub playback_events: Option<Receiver<PlayerEvent>>,
}

impl FastPlay {
    pub(crate) fn new(config: &Config) -> Self {
        Self {
            status: "Choose a folder with MP3 files.".to_string(),
            scanning: false,

            folder_input: config
                .folder
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            folder: None,

            tracks: Vec::new(),
            selected_track: None,
            pending_play: None,

            now_playing: None,
            play_state: PlayState::Stopped,
            position_ms: 0,
            duration_ms: None,
            seek_preview_ratio: None,
            volume: config.volume,
            queue: PlayQueue::new(config.initial_modes()),

            cover_cache: HashMap::new(),

            playback: None,
            playback_events: None,
        }
    }

    /// The track whose tags and cover the player panel shows:
    /// what's playing, else what's selected.
    pub(crate) fn shown_track(&self) -> Option<&TrackRow> {
        self.now_playing
            .or(self.selected_track)
            .and_then(|i| self.tracks.get(i))
    }

    pub(crate) fn index_of_path(&self, path: &Path) -> Option<usize> {
        self.tracks.iter().position(|t| t.path == path)
    }

    pub(crate) fn cover_for(&self, path: &Path) -> Option<&image::Handle> {
        self.cover_cache.get(path).and_then(Option::as_ref)
    }
}

impl Drop for FastPlay {
    fn drop(&mut self) {
        if let Some(controller) = &self.playback {
            controller.send(PlayerCommand::Shutdown);
        }
    }
}

/// Message = “something happened”.
#[derive(Debug, Clone)]
pub(crate) enum Message {
    // Folder
    FolderInputChanged(String),
    OpenFolderPressed,
    BrowseFolder,
    FolderPicked(Option<PathBuf>),
    BrowseFile,
    FilePicked(Option<PathBuf>),
    Rescan,
    ScanFinished(Result<(Vec<TrackRow>, usize), String>),

    // Selection
    SelectTrack(usize),
    CoverLoaded(PathBuf, Option<image::Handle>),

    // Playback
    TickPlayback,
    PlaySelected,
    PlayTrack(usize),
    TogglePlayPause,
    Stop,
    Next,
    Prev,

    // Seek: preview vs commit
    SeekTo(f32),
    SeekCommit,

    SetVolume(f32),

    // Modes
    ToggleShuffle,
    ToggleRepeat,
    ToggleAutoAdvance,

    PlaybackEvent(PlayerEvent),
}
