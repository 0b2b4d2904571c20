//! Reusable UI components.

use crate::app::Message;
use iced::widget::{button, container, row, text, Row, Text};
use iced::{Color, Element, Fill};
use recent_files::BackupTrigger;

pub fn muted_text<'a>(value: impl text::IntoFragment<'a>) -> Text<'a> {
    text(value).size(12).color(Color::from_rgb(0.6, 0.6, 0.6))
}

pub fn status_text(label: &str, is_good: bool) -> Text<'_> {
    text(label).size(16).color(if is_good {
        Color::from_rgb(0.4, 1.0, 0.4)
    } else {
        Color::from_rgb(1.0, 0.6, 0.3)
    })
}

pub fn info_row<'a, M: 'a>(label: &'a str, value: impl Into<Element<'a, M>>) -> Row<'a, M> {
    row![
        text(label)
            .size(15)
            .color(Color::from_rgb(0.7, 0.7, 0.7))
            .width(160),
        value.into()
    ]
    .spacing(10)
}

pub fn card_header<'a, M: Clone + 'a>(title: &'a str, action: &'a str, on_press: M) -> Row<'a, M> {
    row![
        text(title).size(22),
        iced::widget::Space::new().width(Fill),
        button(action).on_press(on_press).padding([6, 12]),
    ]
    .align_y(iced::Alignment::Center)
}

pub fn card_container<'a, M: 'a>(
    content: impl Into<Element<'a, M>>,
    bg: Color,
    border: Color,
) -> container::Container<'a, M> {
    container(content)
        .padding(20)
        .width(Fill)
        .style(move |_| container::Style {
            background: Some(iced::Background::Color(bg)),
            border: iced::Border {
                color: border,
                width: 1.0,
                radius: 8.0.into(),
            },
            ..Default::default()
        })
}

fn boxed_style(bg: Color, border: Color) -> impl Fn(&iced::Theme) -> container::Style {
    move |_| container::Style {
        background: Some(iced::Background::Color(bg)),
        border: iced::Border {
            color: border,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

pub fn status_box(message: &str) -> Element<'_, Message> {
    container(text(message).size(14))
        .padding(12)
        .width(Fill)
        .style(boxed_style(
            Color::from_rgb(0.2, 0.25, 0.15),
            Color::from_rgb(0.5, 0.6, 0.3),
        ))
        .into()
}

/// "May we suggest a backup?" with yes/no answers.
pub fn backup_banner(trigger: BackupTrigger) -> Element<'static, Message> {
    let question = match trigger {
        BackupTrigger::Close => "It has been a while. May we suggest a backup?",
        BackupTrigger::MajorEvent => "That was a big change. May we suggest a backup?",
    };

    container(
        row![
            text(question).size(13).width(Fill),
            button("Back up")
                .on_press(Message::BackupAnswered(true))
                .padding([5, 10]),
            button("Not now")
                .on_press(Message::BackupAnswered(false))
                .padding([5, 10]),
        ]
        .spacing(8)
        .align_y(iced::Alignment::Center),
    )
    .padding(10)
    .style(boxed_style(
        Color::from_rgb(0.25, 0.2, 0.15),
        Color::from_rgb(0.6, 0.5, 0.3),
    ))
    .into()
}
