//! gui/update/playback.rs
//! GUI <-> playback engine bridge.
//!
//! - GUI never touches rodio/symphonia directly.
//! - Which track comes next is the queue's call (core::queue).
//! - Engine state is mirrored from events drained on TickPlayback.

use std::sync::mpsc::TryRecvError;

use iced::Task;
use log::{debug, info, warn};

use super::super::state::{FastPlay, Message, PlayState};
use super::selection::maybe_load_cover;
use crate::core::playback::{PlayerCommand, PlayerEvent, start_playback};

const NO_FILE: &str = "No file loaded.";

fn ensure_engine(state: &mut FastPlay) {
    if state.playback.is_some() {
        return;
    }

    let (controller, events) = start_playback();
    // A failure here shows up on the next send.
    let _ = controller.send(PlayerCommand::SetVolume(state.volume));

    state.playback = Some(controller);
    state.playback_events = Some(events);
}

/// Returns false when the engine is gone; state is already reset and the
/// status says why.
fn send(state: &mut FastPlay, cmd: PlayerCommand) -> bool {
    ensure_engine(state);
    let delivered = state
        .playback
        .as_ref()
        .is_some_and(|controller| controller.send(cmd));

    if !delivered {
        engine_lost(state);
    }
    delivered
}

/// The engine thread exited (usually: no output device). Drop the handles so
/// the next play starts a fresh engine.
fn engine_lost(state: &mut FastPlay) {
    let reason = state
        .playback_events
        .as_ref()
        .and_then(|rx| {
            rx.try_iter().find_map(|ev| match ev {
                PlayerEvent::Error(e) => Some(e),
                _ => None,
            })
        })
        .unwrap_or_else(|| "audio engine stopped".to_string());

    warn!("playback engine lost: {reason}");
    state.playback = None;
    state.playback_events = None;
    state.play_state = PlayState::Stopped;
    state.position_ms = 0;
    state.seek_preview_ratio = None;
    state.status = format!("Playback error: {reason}");
}

pub(crate) fn drain_events(state: &mut FastPlay) -> Task<Message> {
    let Some(rx) = state.playback_events.as_ref() else {
        return Task::none();
    };

    // Re-dispatched as messages so each event goes through `update` in order.
    let mut tasks = Vec::new();
    let mut disconnected = false;
    loop {
        match rx.try_recv() {
            Ok(ev) => tasks.push(Task::done(Message::PlaybackEvent(ev))),
            Err(TryRecvError::Empty) => break,
            Err(TryRecvError::Disconnected) => {
                disconnected = true;
                break;
            }
        }
    }

    if disconnected {
        // Pending events (the engine's Error) still go out; only the handles go.
        debug!("playback engine exited; dropping handles");
        state.playback = None;
        state.playback_events = None;
    }

    Task::batch(tasks)
}

pub(crate) fn play_selected(state: &mut FastPlay) -> Task<Message> {
    let Some(i) = state.selected_track else {
        state.status = "No track selected.".into();
        return Task::none();
    };
    play_track(state, i)
}

pub(crate) fn play_track(state: &mut FastPlay, i: usize) -> Task<Message> {
    let Some(row) = state.tracks.get(i) else {
        state.status = "Play failed: track not found (rescan?).".into();
        return Task::none();
    };
    let path = row.path.clone();
    let title = row.display_title();

    debug!("play track {i}: {}", path.display());
    if !send(state, PlayerCommand::PlayFile(path.clone())) {
        return Task::none();
    }

    state.queue.set_current(i);
    state.now_playing = Some(i);
    state.play_state = PlayState::Playing;
    state.position_ms = 0;
    state.duration_ms = state.tracks[i].duration_ms;
    state.seek_preview_ratio = None;
    state.status = format!("Playing: {title}");

    maybe_load_cover(state, path)
}

pub(crate) fn toggle_play_pause(state: &mut FastPlay) -> Task<Message> {
    match state.play_state {
        PlayState::Playing => {
            if send(state, PlayerCommand::Pause) {
                state.play_state = PlayState::Paused;
            }
            Task::none()
        }
        PlayState::Paused => {
            if send(state, PlayerCommand::Resume) {
                state.play_state = PlayState::Playing;
            }
            Task::none()
        }
        // Stopped: start the loaded track over, else the selection.
        PlayState::Stopped => match state.now_playing.or(state.selected_track) {
            Some(i) => play_track(state, i),
            None => {
                warn!("play pressed with nothing loaded");
                state.status = NO_FILE.into();
                Task::none()
            }
        },
    }
}

pub(crate) fn stop(state: &mut FastPlay) -> Task<Message> {
    if state.now_playing.is_none() {
        state.status = NO_FILE.into();
        return Task::none();
    }

    // A lost engine is already silent; stopping the UI is all that's left.
    if state.playback.is_some() {
        let _ = send(state, PlayerCommand::Stop);
    }

    state.play_state = PlayState::Stopped;
    state.position_ms = 0;
    state.seek_preview_ratio = None;

    Task::none()
}

/// Nothing playing yet: Next/Prev move relative to the selection.
fn anchor_queue_on_selection(state: &mut FastPlay) {
    if state.now_playing.is_none() {
        if let Some(i) = state.selected_track {
            state.queue.set_current(i);
        }
    }
}

pub(crate) fn next(state: &mut FastPlay) -> Task<Message> {
    if state.tracks.is_empty() {
        return Task::none();
    }
    anchor_queue_on_selection(state);

    match state.queue.next() {
        Some(i) => {
            state.selected_track = Some(i);
            play_track(state, i)
        }
        None => Task::none(),
    }
}

pub(crate) fn prev(state: &mut FastPlay) -> Task<Message> {
    if state.tracks.is_empty() {
        return Task::none();
    }
    anchor_queue_on_selection(state);

    match state.queue.previous() {
        Some(i) => {
            state.selected_track = Some(i);
            play_track(state, i)
        }
        None => Task::none(),
    }
}

/// Seek slider moved: preview only (UI updates, no engine command).
pub(crate) fn seek_preview(state: &mut FastPlay, ratio: f32) -> Task<Message> {
    let Some(dur_ms) = state.duration_ms else {
        return Task::none();
    };

    let ratio = ratio.clamp(0.0, 1.0);
    state.seek_preview_ratio = Some(ratio);
    state.position_ms = ratio_to_ms(ratio, dur_ms);

    Task::none()
}

/// Seek slider released: commit the last preview to the engine.
pub(crate) fn seek_commit(state: &mut FastPlay) -> Task<Message> {
    let Some(ratio) = state.seek_preview_ratio.take() else {
        return Task::none();
    };
    let Some(dur_ms) = state.duration_ms else {
        return Task::none();
    };
    if state.play_state == PlayState::Stopped {
        return Task::none();
    }

    let mut target_ms = ratio_to_ms(ratio, dur_ms);

    // Seeking to *exactly* the end tends to produce EOF weirdness; clamp slightly.
    if target_ms >= dur_ms {
        target_ms = dur_ms.saturating_sub(1);
    }

    debug!("seek commit ratio={ratio} dur_ms={dur_ms} => target_ms={target_ms}");
    if send(state, PlayerCommand::Seek(target_ms)) {
        // Optimistic; engine confirms via Started/Position.
        state.position_ms = target_ms;
    }

    Task::none()
}

fn ratio_to_ms(ratio: f32, dur_ms: u64) -> u64 {
    (((ratio as f64) * (dur_ms as f64)).round() as u64).min(dur_ms)
}

pub(crate) fn set_volume(state: &mut FastPlay, volume: f32) -> Task<Message> {
    let volume = volume.clamp(0.0, 1.0);
    state.volume = volume;

    // No engine yet: ensure_engine hands over the volume when one starts.
    if state.playback.is_some() {
        let _ = send(state, PlayerCommand::SetVolume(volume));
    }

    Task::none()
}

pub(crate) fn toggle_shuffle(state: &mut FastPlay) -> Task<Message> {
    let on = !state.queue.modes().shuffle;
    state.queue.set_shuffle(on);
    state.status = format!("Shuffle {}", on_off(on));
    Task::none()
}

pub(crate) fn toggle_repeat(state: &mut FastPlay) -> Task<Message> {
    let on = !state.queue.modes().repeat;
    state.queue.set_repeat(on);
    state.status = format!("Repeat {}", on_off(on));
    Task::none()
}

pub(crate) fn toggle_auto_advance(state: &mut FastPlay) -> Task<Message> {
    let on = !state.queue.modes().auto_advance;
    state.queue.set_auto_advance(on);
    state.status = format!("Play next {}", on_off(on));
    Task::none()
}

fn on_off(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}

pub(crate) fn handle_event(state: &mut FastPlay, event: PlayerEvent) -> Task<Message> {
    match event {
        PlayerEvent::Started {
            path,
            duration_ms,
            start_ms,
        } => {
            info!("engine started {} at {start_ms} ms", path.display());
            // Keep paused state across a seek; the engine re-pauses itself.
            if state.play_state != PlayState::Paused {
                state.play_state = PlayState::Playing;
            }
            if duration_ms.is_some() {
                state.duration_ms = duration_ms;
            }
            state.position_ms = start_ms;
            state.seek_preview_ratio = None;
        }
        PlayerEvent::Paused => state.play_state = PlayState::Paused,
        PlayerEvent::Resumed => state.play_state = PlayState::Playing,
        PlayerEvent::Stopped => {
            state.play_state = PlayState::Stopped;
            state.position_ms = 0;
            state.seek_preview_ratio = None;
        }
        PlayerEvent::Position { position_ms } => {
            // If the user is dragging the seek slider, don't fight them.
            if state.seek_preview_ratio.is_none() {
                state.position_ms = position_ms;
            }
        }
        PlayerEvent::TrackEnded { path } => {
            let current = state.now_playing.and_then(|i| state.tracks.get(i));
            if current.is_none_or(|t| t.path != path) {
                // Ended before the user moved on; the new track is unaffected.
                debug!("ignoring stale end of {}", path.display());
                return Task::none();
            }

            state.play_state = PlayState::Stopped;
            state.position_ms = 0;
            state.seek_preview_ratio = None;

            if let Some(i) = state.queue.on_track_ended() {
                state.selected_track = Some(i);
                return play_track(state, i);
            }
        }
        PlayerEvent::Error(err) => {
            warn!("playback error: {err}");
            state.status = format!("Playback error: {err}");
            state.play_state = PlayState::Stopped;
        }
    }

    Task::none()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::playback::detached_controller;
    use crate::core::queue::PlayModes;
    use crate::core::types::TrackRow;
    use std::path::PathBuf;
    use std::sync::mpsc::{self, Receiver};

    fn state_with(n: usize, config: &Config) -> (FastPlay, Receiver<PlayerCommand>) {
        let mut state = FastPlay::new(config);
        state.tracks = (0..n)
            .map(|i| TrackRow::untagged(PathBuf::from(format!("/m/{i}.mp3"))))
            .collect();
        state.queue.reset(n);

        let (controller, commands) = detached_controller();
        state.playback = Some(controller);
        // Pretend art was already looked up so no cover task is built.
        for t in &state.tracks {
            state.cover_cache.insert(t.path.clone(), None);
        }
        (state, commands)
    }

    fn sent(commands: &Receiver<PlayerCommand>) -> Vec<PlayerCommand> {
        commands.try_iter().collect()
    }

    fn ended(i: usize) -> PlayerEvent {
        PlayerEvent::TrackEnded {
            path: PathBuf::from(format!("/m/{i}.mp3")),
        }
    }

    #[test]
    fn play_with_nothing_loaded_reports_error() {
        let (mut state, commands) = state_with(2, &Config::default());

        let _ = toggle_play_pause(&mut state);
        assert_eq!(state.status, NO_FILE);

        let _ = stop(&mut state);
        assert_eq!(state.status, NO_FILE);
        assert!(sent(&commands).is_empty());
    }

    #[test]
    fn play_pause_resume_cycle() {
        let (mut state, commands) = state_with(2, &Config::default());
        state.selected_track = Some(1);

        let _ = toggle_play_pause(&mut state);
        assert_eq!(state.now_playing, Some(1));
        assert_eq!(state.play_state, PlayState::Playing);

        let _ = toggle_play_pause(&mut state);
        assert_eq!(state.play_state, PlayState::Paused);

        let _ = toggle_play_pause(&mut state);
        assert_eq!(state.play_state, PlayState::Playing);

        assert_eq!(
            sent(&commands),
            vec![
                PlayerCommand::PlayFile(PathBuf::from("/m/1.mp3")),
                PlayerCommand::Pause,
                PlayerCommand::Resume,
            ]
        );
    }

    #[test]
    fn next_and_prev_stop_at_list_edges() {
        let (mut state, commands) = state_with(3, &Config::default());
        state.selected_track = Some(2);

        let _ = next(&mut state);
        assert_eq!(state.now_playing, None);
        assert!(sent(&commands).is_empty());

        let _ = prev(&mut state);
        assert_eq!(state.now_playing, Some(1));
        let _ = prev(&mut state);
        assert_eq!(state.now_playing, Some(0));
        let _ = prev(&mut state);
        assert_eq!(state.now_playing, Some(0));
        assert_eq!(sent(&commands).len(), 2);
    }

    #[test]
    fn track_end_advances_or_repeats() {
        let (mut state, commands) = state_with(3, &Config::default());
        let _ = play_track(&mut state, 0);

        let _ = handle_event(&mut state, ended(0));
        assert_eq!(state.now_playing, Some(1));

        let _ = toggle_repeat(&mut state);
        let _ = handle_event(&mut state, ended(1));
        assert_eq!(state.now_playing, Some(1));

        assert_eq!(
            sent(&commands),
            vec![
                PlayerCommand::PlayFile(PathBuf::from("/m/0.mp3")),
                PlayerCommand::PlayFile(PathBuf::from("/m/1.mp3")),
                PlayerCommand::PlayFile(PathBuf::from("/m/1.mp3")),
            ]
        );
    }

    #[test]
    fn track_end_without_auto_advance_stops() {
        let config = Config {
            no_auto_advance: true,
            ..Config::default()
        };
        let (mut state, _commands) = state_with(3, &config);
        assert_eq!(
            state.queue.modes(),
            PlayModes {
                shuffle: false,
                repeat: false,
                auto_advance: false,
            }
        );

        let _ = play_track(&mut state, 0);
        let _ = handle_event(&mut state, ended(0));

        assert_eq!(state.play_state, PlayState::Stopped);
        assert_eq!(state.now_playing, Some(0));
    }

    #[test]
    fn shuffle_next_stays_in_range() {
        let (mut state, _commands) = state_with(4, &Config::default());
        let _ = toggle_shuffle(&mut state);
        assert!(state.queue.modes().shuffle);

        for _ in 0..8 {
            let _ = next(&mut state);
            assert!(state.now_playing.is_some_and(|i| i < 4));
        }
    }

    #[test]
    fn seek_preview_then_commit() {
        let (mut state, commands) = state_with(1, &Config::default());
        let _ = play_track(&mut state, 0);
        let _ = handle_event(
            &mut state,
            PlayerEvent::Started {
                path: PathBuf::from("/m/0.mp3"),
                duration_ms: Some(10_000),
                start_ms: 0,
            },
        );

        let _ = seek_preview(&mut state, 0.25);
        assert_eq!(state.position_ms, 2_500);

        // Engine ticks don't override an active drag.
        let _ = handle_event(&mut state, PlayerEvent::Position { position_ms: 400 });
        assert_eq!(state.position_ms, 2_500);

        let _ = seek_commit(&mut state);
        assert_eq!(state.seek_preview_ratio, None);

        let _ = seek_preview(&mut state, 1.0);
        let _ = seek_commit(&mut state);

        let cmds = sent(&commands);
        assert_eq!(cmds[1..], [PlayerCommand::Seek(2_500), PlayerCommand::Seek(9_999)]);
    }

    #[test]
    fn volume_is_clamped_and_forwarded() {
        let (mut state, commands) = state_with(1, &Config::default());
        let _ = set_volume(&mut state, 1.7);
        assert_eq!(state.volume, 1.0);
        assert_eq!(sent(&commands), vec![PlayerCommand::SetVolume(1.0)]);
    }

    #[test]
    fn engine_error_lands_in_status() {
        let (mut state, _commands) = state_with(1, &Config::default());
        let _ = play_track(&mut state, 0);
        let _ = handle_event(&mut state, PlayerEvent::Error("Decode failed".into()));

        assert_eq!(state.status, "Playback error: Decode failed");
        assert_eq!(state.play_state, PlayState::Stopped);
    }

    #[test]
    fn stale_track_end_does_not_skip_new_track() {
        let (mut state, commands) = state_with(3, &Config::default());
        let _ = play_track(&mut state, 0);
        let _ = next(&mut state);
        assert_eq!(state.now_playing, Some(1));

        // Track 0 finished just before Next went through.
        let _ = handle_event(&mut state, ended(0));

        assert_eq!(state.now_playing, Some(1));
        assert_eq!(state.play_state, PlayState::Playing);
        assert_eq!(sent(&commands).len(), 2);
    }

    #[test]
    fn shuffle_prev_steps_back_through_played_tracks() {
        let (mut state, _commands) = state_with(5, &Config::default());
        let _ = toggle_shuffle(&mut state);
        for i in [4, 1, 3] {
            let _ = play_track(&mut state, i);
        }

        let _ = prev(&mut state);
        assert_eq!(state.now_playing, Some(1));
        let _ = prev(&mut state);
        assert_eq!(state.now_playing, Some(4));
    }

    #[test]
    fn dead_engine_is_reported_and_dropped() {
        let (mut state, commands) = state_with(2, &Config::default());
        // Engine thread failed to open the device and exited.
        drop(commands);
        let (event_tx, events) = mpsc::channel();
        event_tx
            .send(PlayerEvent::Error("no output device".into()))
            .unwrap();
        state.playback_events = Some(events);

        let _ = play_track(&mut state, 0);

        assert_eq!(state.play_state, PlayState::Stopped);
        assert_eq!(state.now_playing, None);
        assert_eq!(state.status, "Playback error: no output device");
        assert!(state.playback.is_none());
        assert!(state.playback_events.is_none());
    }

    #[test]
    fn closed_event_channel_drops_engine_handles() {
        let (mut state, _commands) = state_with(1, &Config::default());
        let (event_tx, events) = mpsc::channel();
        event_tx
            .send(PlayerEvent::Error("no output device".into()))
            .unwrap();
        drop(event_tx);
        state.playback_events = Some(events);

        let _ = drain_events(&mut state);

        assert!(state.playback.is_none());
        assert!(state.playback_events.is_none());
    }
}
