//! gui/update/selection.rs
//!
//! Track selection + lazy cover art loading.
//! Cover art cache is keyed by path, so it survives rescans.

use iced::Task;
use iced::widget::image;
use log::info;
use std::path::{Path, PathBuf};

use super::super::state::{FastPlay, Message};
use super::util::spawn_blocking;
use crate::core::tags::read_embedded_art;

pub(crate) fn select_track(state: &mut FastPlay, i: usize) -> Task<Message> {
    let Some(track) = state.tracks.get(i) else {
        return Task::none();
    };
    let path = track.path.clone();

    state.selected_track = Some(i);
    maybe_load_cover(state, path)
}

pub(crate) fn cover_loaded(
    state: &mut FastPlay,
    path: PathBuf,
    handle: Option<image::Handle>,
) -> Task<Message> {
    if handle.is_none() {
        info!("no cover art: {}", path.display());
    }
    state.cover_cache.insert(path, handle);
    Task::none()
}

/// Decode art off-thread unless this file was already looked at.
pub(crate) fn maybe_load_cover(state: &mut FastPlay, path: PathBuf) -> Task<Message> {
    if state.cover_cache.contains_key(&path) {
        return Task::none();
    }

    let key = path.clone();
    Task::perform(
        spawn_blocking(move || load_cover_handle_from_path(&path)),
        move |handle| Message::CoverLoaded(key, handle.flatten()),
    )
}

fn load_cover_handle_from_path(path: &Path) -> Option<image::Handle> {
    let (bytes, _mime) = read_embedded_art(path)?;
    Some(image::Handle::from_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::types::TrackRow;

    #[test]
    fn select_track_ignores_stale_index() {
        let mut state = FastPlay::new(&Config::default());
        state.tracks = vec![TrackRow::untagged(PathBuf::from("/m/a.mp3"))];

        let _ = select_track(&mut state, 3);
        assert_eq!(state.selected_track, None);

        let _ = select_track(&mut state, 0);
        assert_eq!(state.selected_track, Some(0));
    }

    #[test]
    fn missing_art_is_remembered() {
        let mut state = FastPlay::new(&Config::default());
        let path = PathBuf::from("/m/a.mp3");

        let _ = cover_loaded(&mut state, path.clone(), None);

        assert!(state.cover_cache.contains_key(&path));
        assert!(state.cover_for(&path).is_none());
    }

    #[test]
    fn loaded_art_is_served_from_cache() {
        let mut state = FastPlay::new(&Config::default());
        let path = PathBuf::from("/m/a.mp3");
        let handle = image::Handle::from_bytes(vec![0u8; 4]);

        let _ = cover_loaded(&mut state, path.clone(), Some(handle));

        assert!(state.cover_for(&path).is_some());
    }
}
