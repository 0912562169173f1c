//! Reusable small widgets/helpers used across view modules.

use iced::widget::{Button, button, column, container, image, text};
use iced::{Alignment, Element, Length};

use super::super::state::Message;
use super::constants::{TRANSPORT_BTN_H, TRANSPORT_BTN_W};

pub(crate) fn cover_placeholder(size: f32) -> iced::widget::Container<'static, Message> {
    container(
        column![text("♪").size(28), text("No Cover Art").size(12)]
            .spacing(4)
            .align_x(Alignment::Center),
    )
    .width(Length::Fixed(size))
    .height(Length::Fixed(size))
    .center_x(Length::Fixed(size))
    .center_y(Length::Fixed(size))
    .style(container::bordered_box)
}

/// If `handle` exists, show it; otherwise show the placeholder.
pub(crate) fn cover_art(handle: Option<&image::Handle>, size: f32) -> Element<'static, Message> {
    match handle {
        Some(h) => container(
            image(h.clone())
                .width(Length::Fixed(size))
                .height(Length::Fixed(size)),
        )
        .width(Length::Fixed(size))
        .height(Length::Fixed(size))
        .into(),
        None => cover_placeholder(size).into(),
    }
}

/// Fixed-size transport button; `None` renders it disabled.
pub(crate) fn transport_button(label: &str, on_press: Option<Message>) -> Button<'_, Message> {
    button(text(label))
        .width(Length::Fixed(TRANSPORT_BTN_W))
        .height(Length::Fixed(TRANSPORT_BTN_H))
        .on_press_maybe(on_press)
}

/// Mode toggle shown as "✓ Label" when on.
pub(crate) fn mode_toggle(label: &str, on: bool, msg: Message) -> Button<'static, Message> {
    let label = if on {
        format!("✓ {label}")
    } else {
        label.to_string()
    };
    button(text(label)).on_press(msg)
}
