//! gui/subscription.rs
//! Poll playback events by emitting a periodic TickPlayback message.

use iced::{Subscription, time};
use std::time::Duration;

use super::state::{FastPlay, Message};

const TICK_MS: u64 = 200;

pub(crate) fn subscription(state: &FastPlay) -> Subscription<Message> {
    if state.playback_events.is_none() {
        return Subscription::none();
    }

    time::every(Duration::from_millis(TICK_MS)).map(|_| Message::TickPlayback)
}
