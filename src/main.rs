//! fastplay
//!
//! A small desktop app (built with `iced`) for one folder of `.mp3` files:
//! pick a folder, see the files, select one to show its ID3 title/artist/
//! album/year and cover art, and play it with the usual controls
//! (play/pause/stop, previous/next, shuffle, repeat, seek, volume).
//!
//! # Shape
//! - `core`: folder scan, tag + art reading, the play queue, the rodio engine
//!   thread. No GUI imports.
//! - `gui`: state, messages, update handlers, view, the playback tick.
//! - `config`: command-line flags for the starting state.
//!
//! Message happens -> update changes state -> view redraws.
//! Slow work (scans, cover decoding) runs off-thread and comes back as a
//! message; audio runs on the engine thread and reports through a channel
//! drained every tick.

mod config;
mod core;
mod gui;

use clap::Parser;
use log::info;

use crate::config::Config;
use crate::gui::view::constants::{WINDOW_H, WINDOW_W};

fn main() -> iced::Result {
    let config = Config::parse();
    init_logging(&config.log_level);

    info!("starting fastplay {}", env!("CARGO_PKG_VERSION"));

    iced::application(move || gui::boot(&config), gui::update, gui::view)
        .title("fastplay")
        .subscription(gui::subscription)
        .window_size((WINDOW_W, WINDOW_H))
        .run()
}

fn init_logging(default_filter: &str) {
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or("FASTPLAY_LOG", default_filter),
    )
    .init();
}
