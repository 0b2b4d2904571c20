//! Recent files card: the menu mirror plus a path chooser.

use crate::app::Message;
use crate::ui::components;
use iced::widget::{button, column, pick_list, row, text, text_input, tooltip};
use iced::{Color, Element, Fill};
use recent_files::services::MenuEntry;
use recent_files::SelectionMode;

pub fn view<'a>(
    entries: Vec<MenuEntry>,
    path_input: &'a str,
    mode: SelectionMode,
) -> Element<'a, Message> {
    let chooser = row![
        text_input("Path to a file or folder", path_input)
            .on_input(Message::PathChanged)
            .on_submit(Message::OpenPath)
            .width(Fill),
        pick_list(SelectionMode::ALL, Some(mode), Message::SelectionModeChanged),
        button("Open").on_press(Message::OpenPath).padding([6, 12]),
    ]
    .spacing(8)
    .align_y(iced::Alignment::Center);

    let mut content = column![
        components::card_header("Recent Files", "Purge missing", Message::PurgeInaccessible),
        chooser,
    ]
    .spacing(10);

    if entries.is_empty() {
        content = content.push(components::muted_text("Nothing opened yet"));
    }

    for (index, entry) in entries.into_iter().enumerate() {
        let label = tooltip(
            button(text(entry.label).size(15))
                .on_press(Message::OpenRecent(index))
                .width(Fill)
                .style(button::text),
            text(entry.tooltip).size(12),
            tooltip::Position::Bottom,
        );

        content = content.push(
            row![
                text(format!("{}.", index + 1)).size(15).width(28),
                label,
                button("Remove")
                    .on_press(Message::RemoveRecent(index))
                    .padding([4, 10]),
            ]
            .spacing(8)
            .align_y(iced::Alignment::Center),
        );
    }

    content = content.push(
        button("Clear history")
            .on_press(Message::ClearHistory)
            .padding([6, 12]),
    );

    components::card_container(
        content,
        Color::from_rgb(0.15, 0.2, 0.25),
        Color::from_rgb(0.3, 0.4, 0.5),
    )
    .into()
}
