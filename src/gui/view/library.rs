//! Left panel: folder chooser + file list.

use iced::widget::{
    Column, button, column, container, mouse_area, row, scrollable, text, text_input,
};
use iced::{Alignment, Length};

use super::super::state::{FastPlay, Message};
use super::constants::{
    HEADER_TEXT, ROW_TEXT, STATUS_TEXT, TRACK_LIST_SPACING, TRACK_ROW_H, TRACK_ROW_HPAD,
    TRACK_ROW_VPAD,
};

pub(crate) fn build_library_panel(state: &FastPlay) -> iced::widget::Container<'_, Message> {
    let folder_input = text_input("Folder path", &state.folder_input)
        .on_input(Message::FolderInputChanged)
        .on_submit(Message::OpenFolderPressed)
        .width(Length::Fill);

    let idle = !state.scanning;
    let open_btn = button("Open").on_press_maybe(idle.then_some(Message::OpenFolderPressed));
    let browse_btn =
        button("Choose Directory").on_press_maybe(idle.then_some(Message::BrowseFolder));
    let file_btn = button("Open File").on_press_maybe(idle.then_some(Message::BrowseFile));
    let rescan_btn = if state.scanning {
        button("Scanning...")
    } else {
        button("Rescan").on_press_maybe(state.folder.is_some().then_some(Message::Rescan))
    };

    let selected_dir = match &state.folder {
        Some(p) => format!("Selected Directory: {}", p.display()),
        None => "Selected Directory: -".to_string(),
    };

    let load_btn = button("Load Selected File")
        .on_press_maybe(state.selected_track.map(|_| Message::PlaySelected));

    let col = column![
        text("fastplay").size(HEADER_TEXT),
        row![folder_input, open_btn].spacing(8),
        row![browse_btn, file_btn, rescan_btn].spacing(8),
        text(selected_dir).size(STATUS_TEXT),
        text(&state.status).size(STATUS_TEXT),
        text("MP3 Files:"),
        build_file_list(state).height(Length::Fill),
        load_btn,
    ]
    .spacing(10);

    container(col).padding(12)
}

fn build_file_list(state: &FastPlay) -> iced::widget::Scrollable<'_, Message> {
    if state.tracks.is_empty() {
        return scrollable(column![text("No MP3 files found.").size(ROW_TEXT)]);
    }

    let mut col: Column<'_, Message> = column![].spacing(TRACK_LIST_SPACING);

    for (i, t) in state.tracks.iter().enumerate() {
        // Now playing gets ▶. Selection gets ●.
        let marker = if state.now_playing == Some(i) {
            "▶"
        } else if state.selected_track == Some(i) {
            "●"
        } else {
            ""
        };

        let name = t
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| t.display_title());

        let cells = row![
            text(marker).size(ROW_TEXT).width(Length::Fixed(20.0)),
            text(name).size(ROW_TEXT).width(Length::Fill),
        ]
        .spacing(8)
        .align_y(Alignment::Center);

        let row_widget = mouse_area(
            container(cells)
                .padding([TRACK_ROW_VPAD, TRACK_ROW_HPAD])
                .height(Length::Fixed(TRACK_ROW_H))
                .width(Length::Fill),
        )
        .on_press(Message::SelectTrack(i))
        .on_double_click(Message::PlayTrack(i));

        col = col.push(row_widget);
    }

    scrollable(col)
}
