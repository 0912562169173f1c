//! GUI renderer (reads state, produces widgets; no mutation).

pub(crate) mod constants;
mod library;
mod player;
mod widgets;

use iced::Length;
use iced::widget::{Row, row};

use super::state::{FastPlay, Message};
use constants::LIBRARY_W;

pub(crate) fn view(state: &FastPlay) -> Row<'_, Message> {
    let library = library::build_library_panel(state).width(Length::Fixed(LIBRARY_W));
    let player = player::build_player_panel(state).width(Length::Fill);

    row![library, player]
        .spacing(12)
        .padding(12)
        .height(Length::Fill)
}
