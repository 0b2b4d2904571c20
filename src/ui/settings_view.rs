//! File preferences panel.

use crate::app::Message;
use crate::ui::components;
use iced::widget::{column, pick_list, row, slider, text, text_input};
use iced::{Color, Element, Fill};
use recent_files::services::StartupChoice;
use recent_files::{BackupFrequency, FilePreferences, PurgeWhen};

fn slider_row<'a>(
    label: &'a str,
    range: std::ops::RangeInclusive<u8>,
    value: u8,
    on_change: fn(u8) -> Message,
) -> Element<'a, Message> {
    components::info_row(
        label,
        row![
            slider(range, value, on_change).width(Fill),
            text(value.to_string()).size(14).width(32),
        ]
        .spacing(10),
    )
    .into()
}

fn clamp_u8(value: impl TryInto<u8>) -> u8 {
    value.try_into().unwrap_or(u8::MAX)
}

pub fn view<'a>(
    preferences: &'a FilePreferences,
    startup_choices: Vec<StartupChoice>,
    startup_selected: Option<StartupChoice>,
) -> Element<'a, Message> {
    let content = column![
        components::card_header("Preferences", "Save", Message::SavePreferences),
        slider_row(
            "Recent files:",
            1..=25,
            clamp_u8(preferences.recent_files_max),
            Message::MaxSizeChanged,
        ),
        components::info_row(
            "Backups:",
            pick_list(
                BackupFrequency::ALL,
                Some(preferences.backup_frequency),
                Message::FrequencyChanged,
            ),
        ),
        slider_row(
            "Days between:",
            1..=60,
            clamp_u8(preferences.days_between_backups),
            Message::DaysBetweenChanged,
        ),
        slider_row(
            "Backups to keep:",
            1..=50,
            clamp_u8(preferences.backups_to_keep),
            Message::BackupsToKeepChanged,
        ),
        components::info_row(
            "Launch at startup:",
            pick_list(startup_choices, startup_selected, Message::StartupChosen).width(Fill),
        ),
        components::info_row(
            "Purge missing files:",
            pick_list(
                PurgeWhen::ALL,
                Some(preferences.purge_inaccessible),
                Message::PurgeWhenChanged,
            ),
        ),
        components::info_row(
            "Essential path:",
            text_input("Always-available folder", &preferences.essential_path)
                .on_input(Message::EssentialPathChanged)
                .width(Fill),
        ),
    ]
    .spacing(12);

    components::card_container(
        content,
        Color::from_rgb(0.2, 0.15, 0.25),
        Color::from_rgb(0.5, 0.3, 0.5),
    )
    .into()
}
