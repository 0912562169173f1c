//! gui/update/mod.rs
//! Update logic (router).
//! Mutates state in response to `Message` events.

use iced::Task;

use super::state::{FastPlay, Message};
use crate::config::Config;

mod playback;
mod scan;
mod selection;
mod util;

pub(crate) fn update(state: &mut FastPlay, message: Message) -> Task<Message> {
    match message {
        Message::TickPlayback => playback::drain_events(state),

        // Folder
        Message::FolderInputChanged(s) => scan::folder_input_changed(state, s),
        Message::OpenFolderPressed => scan::open_folder_pressed(state),
        Message::BrowseFolder => scan::browse_folder(state),
        Message::FolderPicked(p) => scan::folder_picked(state, p),
        Message::BrowseFile => scan::browse_file(state),
        Message::FilePicked(p) => scan::file_picked(state, p),
        Message::Rescan => scan::rescan(state),
        Message::ScanFinished(result) => scan::scan_finished(state, result),

        // Selection
        Message::SelectTrack(i) => selection::select_track(state, i),
        Message::CoverLoaded(path, handle) => selection::cover_loaded(state, path, handle),

        // Playback
        Message::PlaySelected => playback::play_selected(state),
        Message::PlayTrack(i) => playback::play_track(state, i),
        Message::TogglePlayPause => playback::toggle_play_pause(state),
        Message::Stop => playback::stop(state),
        Message::Next => playback::next(state),
        Message::Prev => playback::prev(state),

        Message::SeekTo(ratio) => playback::seek_preview(state, ratio),
        Message::SeekCommit => playback::seek_commit(state),

        Message::SetVolume(vol) => playback::set_volume(state, vol),

        Message::ToggleShuffle => playback::toggle_shuffle(state),
        Message::ToggleRepeat => playback::toggle_repeat(state),
        Message::ToggleAutoAdvance => playback::toggle_auto_advance(state),

        Message::PlaybackEvent(ev) => playback::handle_event(state, ev),
    }
}

/// Initial state plus the startup scan when a folder was given on the command line.
pub(crate) fn boot(config: &Config) -> (FastPlay, Task<Message>) {
    let mut state = FastPlay::new(config);

    let task = match &config.folder {
        Some(folder) => scan::open_folder(&mut state, folder.clone()),
        None => Task::none(),
    };

    (state, task)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn boot_without_folder_is_idle() {
        let (state, _task) = boot(&Config::default());
        assert!(!state.scanning);
        assert!(state.tracks.is_empty());
        assert_eq!(state.volume, 0.5);
    }

    #[test]
    fn boot_with_folder_starts_scan() {
        let config = Config {
            folder: Some(PathBuf::from("/music")),
            ..Config::default()
        };
        let (state, _task) = boot(&config);
        assert!(state.scanning);
        assert_eq!(state.folder_input, "/music");
    }

    #[test]
    fn mode_toggles_route_to_queue() {
        let mut state = FastPlay::new(&Config::default());

        let _ = update(&mut state, Message::ToggleShuffle);
        let _ = update(&mut state, Message::ToggleRepeat);
        let _ = update(&mut state, Message::ToggleAutoAdvance);

        let modes = state.queue.modes();
        assert!(modes.shuffle);
        assert!(modes.repeat);
        assert!(!modes.auto_advance);
        assert_eq!(state.status, "Play next off");
    }
}
