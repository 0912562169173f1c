//! gui/update/scan.rs
//! Folder choice + scan lifecycle + async boundary.
//!
//! The scan runs on a worker thread (core::scan_folder) and comes back as
//! `Message::ScanFinished`. Indices into `tracks` are only valid per scan, so
//! everything index-based is remapped by path when results land.

use iced::Task;
use log::{info, warn};
use std::path::PathBuf;

use crate::core;
use crate::core::types::TrackRow;

use super::super::state::{FastPlay, Message};
use super::super::util::parse_folder_input;
use super::playback::play_track;
use super::util::spawn_blocking;

pub(crate) fn folder_input_changed(state: &mut FastPlay, s: String) -> Task<Message> {
    state.folder_input = s;
    Task::none()
}

pub(crate) fn open_folder_pressed(state: &mut FastPlay) -> Task<Message> {
    let Some(path) = parse_folder_input(&state.folder_input) else {
        return Task::none();
    };

    if !path.is_dir() {
        state.status = format!("Not a folder: {}", path.display());
        return Task::none();
    }

    open_folder(state, path)
}

pub(crate) fn browse_folder(state: &mut FastPlay) -> Task<Message> {
    if state.scanning {
        return Task::none();
    }
    Task::perform(pick_folder(), Message::FolderPicked)
}

pub(crate) fn folder_picked(state: &mut FastPlay, picked: Option<PathBuf>) -> Task<Message> {
    match picked {
        Some(path) => {
            state.folder_input = path.display().to_string();
            open_folder(state, path)
        }
        None => Task::none(),
    }
}

pub(crate) fn browse_file(state: &mut FastPlay) -> Task<Message> {
    if state.scanning {
        return Task::none();
    }
    Task::perform(pick_mp3_file(), Message::FilePicked)
}

/// A single file was chosen: list its folder, then play it.
pub(crate) fn file_picked(state: &mut FastPlay, picked: Option<PathBuf>) -> Task<Message> {
    let Some(file) = picked else {
        return Task::none();
    };

    let Some(folder) = file.parent().map(PathBuf::from) else {
        state.status = format!("Can't open: {}", file.display());
        return Task::none();
    };

    // Same folder already listed: no rescan needed.
    if state.folder.as_ref() == Some(&folder) {
        if let Some(i) = state.index_of_path(&file) {
            state.selected_track = Some(i);
            return play_track(state, i);
        }
    }

    state.pending_play = Some(file);
    state.folder_input = folder.display().to_string();
    open_folder(state, folder)
}

pub(crate) fn rescan(state: &mut FastPlay) -> Task<Message> {
    match state.folder.clone() {
        Some(folder) => open_folder(state, folder),
        None => open_folder_pressed(state),
    }
}

/// Start scanning `folder` on a worker thread.
pub(crate) fn open_folder(state: &mut FastPlay, folder: PathBuf) -> Task<Message> {
    if state.scanning {
        return Task::none();
    }

    info!("scanning {}", folder.display());
    state.scanning = true;
    state.status = "Scanning...".to_string();
    state.folder = Some(folder.clone());

    Task::perform(
        spawn_blocking(move || core::scan_folder(&folder).map_err(|e| e.to_string())),
        |result| {
            Message::ScanFinished(
                result.unwrap_or_else(|| Err("Scan worker stopped unexpectedly.".to_string())),
            )
        },
    )
}

pub(crate) fn scan_finished(
    state: &mut FastPlay,
    result: Result<(Vec<TrackRow>, usize), String>,
) -> Task<Message> {
    state.scanning = false;

    let (rows, tag_failures) = match result {
        Ok(r) => r,
        Err(e) => {
            // Keep previous tracks; just report.
            warn!("scan failed: {e}");
            state.status = format!("Scan error: {e}");
            state.pending_play = None;
            return Task::none();
        }
    };

    state.status = if rows.is_empty() {
        "No MP3 files found.".to_string()
    } else if tag_failures == 0 {
        format!("Loaded {} tracks", rows.len())
    } else {
        format!("Loaded {} tracks ({} without tags)", rows.len(), tag_failures)
    };

    // Remember identities by path before the index space changes.
    let selected_path = state
        .selected_track
        .and_then(|i| state.tracks.get(i))
        .map(|t| t.path.clone());
    let playing_path = state
        .now_playing
        .and_then(|i| state.tracks.get(i))
        .map(|t| t.path.clone());

    state.tracks = rows;
    state.queue.reset(state.tracks.len());

    state.selected_track = selected_path.and_then(|p| state.index_of_path(&p));
    state.now_playing = playing_path.and_then(|p| state.index_of_path(&p));
    if let Some(i) = state.now_playing {
        state.queue.set_current(i);
    }

    if let Some(file) = state.pending_play.take() {
        match state.index_of_path(&file) {
            Some(i) => {
                state.selected_track = Some(i);
                return play_track(state, i);
            }
            None => state.status = format!("Not an MP3 in this folder: {}", file.display()),
        }
    }

    Task::none()
}

async fn pick_folder() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Choose Directory")
        .pick_folder()
        .await
        .map(|h| h.path().to_path_buf())
}

async fn pick_mp3_file() -> Option<PathBuf> {
    rfd::AsyncFileDialog::new()
        .set_title("Select an MP3 File")
        .add_filter("MP3 Files", &["mp3"])
        .pick_file()
        .await
        .map(|h| h.path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::gui::state::PlayState;

    fn row(path: &str) -> TrackRow {
        TrackRow::untagged(PathBuf::from(path))
    }

    #[test]
    fn scan_finished_remaps_selection_by_path() {
        let mut state = FastPlay::new(&Config::default());
        state.tracks = vec![row("/m/b.mp3"), row("/m/c.mp3")];
        state.selected_track = Some(1);
        state.scanning = true;

        let _ = scan_finished(
            &mut state,
            Ok((vec![row("/m/a.mp3"), row("/m/b.mp3"), row("/m/c.mp3")], 0)),
        );

        assert!(!state.scanning);
        assert_eq!(state.selected_track, Some(2));
        assert_eq!(state.queue.len(), 3);
        assert_eq!(state.status, "Loaded 3 tracks");
    }

    #[test]
    fn scan_finished_drops_vanished_now_playing() {
        let mut state = FastPlay::new(&Config::default());
        state.tracks = vec![row("/m/gone.mp3")];
        state.now_playing = Some(0);

        let _ = scan_finished(&mut state, Ok((vec![row("/m/other.mp3")], 1)));

        assert_eq!(state.now_playing, None);
        assert_eq!(state.status, "Loaded 1 tracks (1 without tags)");
    }

    #[test]
    fn scan_error_keeps_previous_tracks() {
        let mut state = FastPlay::new(&Config::default());
        state.tracks = vec![row("/m/a.mp3")];
        state.pending_play = Some(PathBuf::from("/m/a.mp3"));

        let _ = scan_finished(&mut state, Err("Not a folder: /m".into()));

        assert_eq!(state.tracks.len(), 1);
        assert_eq!(state.pending_play, None);
        assert_eq!(state.status, "Scan error: Not a folder: /m");
        assert_eq!(state.play_state, PlayState::Stopped);
    }

    #[test]
    fn empty_folder_reports_no_files() {
        let mut state = FastPlay::new(&Config::default());
        let _ = scan_finished(&mut state, Ok((Vec::new(), 0)));
        assert_eq!(state.status, "No MP3 files found.");
    }

    #[test]
    fn open_folder_rejects_non_folder_input() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut state = FastPlay::new(&Config::default());
        state.folder_input = tmp.path().join("missing").display().to_string();

        let _ = open_folder_pressed(&mut state);

        assert!(!state.scanning);
        assert!(state.status.starts_with("Not a folder:"));
    }

    #[test]
    fn open_folder_marks_scanning() {
        let tmp = tempfile::TempDir::new().unwrap();
        let mut state = FastPlay::new(&Config::default());
        state.folder_input = format!("\"{}\"", tmp.path().display());

        let _ = open_folder_pressed(&mut state);

        assert!(state.scanning);
        assert_eq!(state.folder.as_deref(), Some(tmp.path()));

        // A second request while scanning is ignored.
        let _ = rescan(&mut state);
        assert!(state.scanning);
    }
}
