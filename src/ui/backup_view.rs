//! Backup card for the file currently at the front of the list.

use crate::app::Message;
use crate::ui::components;
use chrono::{DateTime, Local};
use iced::widget::{button, column, row, text};
use iced::{Color, Element};
use recent_files::services::days_since_last_backup;
use recent_files::utils::{format_time, time_ago};
use recent_files::{BackupFrequency, FilePreferences, FileRecord};

pub fn view<'a>(
    current: Option<&'a FileRecord>,
    preferences: &FilePreferences,
    now: DateTime<Local>,
) -> Element<'a, Message> {
    let Some(record) = current else {
        return components::card_container(
            components::muted_text("Open a file to see its backup status"),
            Color::from_rgb(0.15, 0.25, 0.2),
            Color::from_rgb(0.3, 0.5, 0.4),
        )
        .into();
    };

    let last_backup = match &record.last_backup {
        Some(when) => format!("{} ({})", format_time(when), time_ago(when, &now)),
        None => "Never".to_string(),
    };

    let due = match (preferences.backup_frequency, days_since_last_backup(record, &now)) {
        (BackupFrequency::Manual, _) => false,
        (_, None) => true,
        (_, Some(days)) => days >= i64::from(preferences.days_between_backups),
    };
    let days = days_since_last_backup(record, &now)
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".into());

    let content = column![
        components::card_header("Current File", "Backup folder", Message::OpenBackupFolder),
        components::info_row("File:", text(record.brief_display_name()).size(16)),
        components::info_row("Last backup:", text(last_backup).size(14)),
        components::info_row(
            "Status:",
            components::status_text(if due { "due" } else { "ok" }, !due)
        ),
        components::info_row("Days since:", text(days).size(14)),
        components::info_row(
            "Backups:",
            text(preferences.backup_frequency.to_string()).size(14)
        ),
        components::muted_text(record.display_name()),
        row![
            button("Close file")
                .on_press(Message::CloseCurrent)
                .padding([6, 12]),
            button("Major change")
                .on_press(Message::MajorEvent)
                .padding([6, 12]),
        ]
        .spacing(8),
    ]
    .spacing(10);

    components::card_container(
        content,
        Color::from_rgb(0.15, 0.25, 0.2),
        Color::from_rgb(0.3, 0.5, 0.4),
    )
    .into()
}
