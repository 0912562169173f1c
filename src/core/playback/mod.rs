//! core/playback/mod.rs
//! Playback engine thread + the command/event protocol the GUI talks to it with.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use log::error;

mod decoder;
mod engine;

pub use decoder::probe_duration_ms;
use engine::PlaybackEngine;

#[derive(Clone)]
pub struct PlaybackController {
    command_tx: Sender<PlayerCommand>,
}

impl PlaybackController {
    /// Returns false when the engine thread is gone (e.g. no output device);
    /// the command is dropped and a fresh engine is needed.
    pub fn send(&self, cmd: PlayerCommand) -> bool {
        self.command_tx.send(cmd).is_ok()
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController").finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    PlayFile(PathBuf),
    Pause,
    Resume,
    Stop,
    Seek(u64),      // ms
    SetVolume(f32), // 0.0..=1.0
    Shutdown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Started {
        path: PathBuf,
        duration_ms: Option<u64>,
        start_ms: u64,
    },
    Paused,
    Resumed,
    Stopped,
    Position {
        position_ms: u64,
    },
    /// Carries the finished file so a late event can't end a newer track.
    TrackEnded {
        path: PathBuf,
    },
    Error(String),
}

/// Spawns the playback thread and returns:
/// - PlaybackController (store in GUI state)
/// - Receiver<PlayerEvent> (drained on the GUI's tick)
pub fn start_playback() -> (PlaybackController, Receiver<PlayerEvent>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    let (event_tx, event_rx) = mpsc::channel::<PlayerEvent>();

    thread::spawn(move || {
        let mut engine = match PlaybackEngine::new(event_tx.clone()) {
            Ok(e) => e,
            Err(e) => {
                error!("{e}");
                let _ = event_tx.send(PlayerEvent::Error(e.to_string()));
                return;
            }
        };

        engine.run(command_rx);
    });

    (PlaybackController { command_tx }, event_rx)
}

#[cfg(test)]
pub(crate) fn detached_controller() -> (PlaybackController, Receiver<PlayerCommand>) {
    let (command_tx, command_rx) = mpsc::channel::<PlayerCommand>();
    (PlaybackController { command_tx }, command_rx)
}
