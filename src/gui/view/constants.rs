//! View constants (layout/sizing).

pub(crate) const WINDOW_W: f32 = 1100.0;
pub(crate) const WINDOW_H: f32 = 680.0;

pub(crate) const LIBRARY_W: f32 = 480.0;

pub(crate) const HEADER_TEXT: f32 = 18.0;
pub(crate) const ROW_TEXT: f32 = 14.0;
pub(crate) const STATUS_TEXT: f32 = 12.0;

pub(crate) const TRACK_ROW_H: f32 = 26.0;
pub(crate) const TRACK_ROW_VPAD: f32 = 2.0;
pub(crate) const TRACK_ROW_HPAD: f32 = 8.0;
pub(crate) const TRACK_LIST_SPACING: f32 = 1.0;

pub(crate) const COVER_SIZE: f32 = 150.0;

pub(crate) const TRANSPORT_BTN_W: f32 = 90.0;
pub(crate) const TRANSPORT_BTN_H: f32 = 30.0;
pub(crate) const VOLUME_W: f32 = 160.0;
