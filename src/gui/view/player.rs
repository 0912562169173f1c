//! Right panel: cover art, tags, transport, seek + volume.

use iced::widget::{Column, column, container, row, slider, text};
use iced::{Alignment, Length};

use super::super::state::{FastPlay, Message, PlayState};
use super::super::util::{fmt_ms, year_label};
use super::constants::{COVER_SIZE, HEADER_TEXT, STATUS_TEXT, VOLUME_W};
use super::widgets::{cover_art, mode_toggle, transport_button};

pub(crate) fn build_player_panel(state: &FastPlay) -> iced::widget::Container<'_, Message> {
    let col = column![
        text("Now Playing").size(HEADER_TEXT),
        build_track_info(state),
        build_transport(state),
        build_modes(state),
        build_seek(state),
        build_volume(state),
    ]
    .spacing(14);

    container(col).padding(12)
}

fn build_track_info(state: &FastPlay) -> Column<'_, Message> {
    let track = state.shown_track();

    let cover = cover_art(track.and_then(|t| state.cover_for(&t.path)), COVER_SIZE);

    let (title, artist, album, year) = match track {
        Some(t) => (
            t.display_title(),
            t.artist.clone().unwrap_or_default(),
            t.album.clone().unwrap_or_default(),
            year_label(t.year),
        ),
        None => Default::default(),
    };

    column![
        cover,
        text(format!("Title: {title}")),
        text(format!("Artist: {artist}")),
        text(format!("Album: {album}")),
        text(format!("Year: {year}")),
    ]
    .spacing(6)
}

fn build_transport(state: &FastPlay) -> iced::widget::Row<'_, Message> {
    let has_tracks = !state.tracks.is_empty();

    let play_label = match state.play_state {
        PlayState::Playing => "Pause",
        PlayState::Paused => "Resume",
        PlayState::Stopped => "Play",
    };

    row![
        transport_button("Previous", has_tracks.then_some(Message::Prev)),
        transport_button(play_label, Some(Message::TogglePlayPause)),
        transport_button("Stop", Some(Message::Stop)),
        transport_button("Next", has_tracks.then_some(Message::Next)),
    ]
    .spacing(8)
}

fn build_modes(state: &FastPlay) -> iced::widget::Row<'_, Message> {
    let modes = state.queue.modes();

    row![
        mode_toggle("Shuffle", modes.shuffle, Message::ToggleShuffle),
        mode_toggle("Repeat", modes.repeat, Message::ToggleRepeat),
        mode_toggle("Play next", modes.auto_advance, Message::ToggleAutoAdvance),
    ]
    .spacing(8)
}

fn build_seek(state: &FastPlay) -> iced::widget::Row<'_, Message> {
    let pos = state.position_ms;
    let dur = state.duration_ms.unwrap_or(0);

    // Slider works in 0..=1; unknown duration freezes it at 0.
    let ratio = match state.seek_preview_ratio {
        Some(r) => r,
        None if dur > 0 => (pos.min(dur) as f32) / (dur as f32),
        None => 0.0,
    };

    let seek = slider(0.0..=1.0, ratio, Message::SeekTo)
        .step(0.001)
        .on_release(Message::SeekCommit)
        .width(Length::Fill);

    let time_text = if dur > 0 {
        format!("{} / {}", fmt_ms(pos), fmt_ms(dur))
    } else {
        format!("{} / -:--", fmt_ms(pos))
    };

    row![seek, text(time_text).size(STATUS_TEXT)]
        .spacing(10)
        .align_y(Alignment::Center)
}

fn build_volume(state: &FastPlay) -> iced::widget::Row<'_, Message> {
    let vol = state.volume.clamp(0.0, 1.0);
    let vol_slider = slider(0.0..=1.0, vol, Message::SetVolume)
        .step(0.01)
        .width(Length::Fixed(VOLUME_W));

    row![
        text("Volume").size(STATUS_TEXT),
        vol_slider,
        text(format!("{:.0}%", vol * 100.0)).size(STATUS_TEXT),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
}
