#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod ui;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    iced::application(app::init, app::update, app::view)
        .title("Recent Files")
        .theme(app::theme)
        .window_size((640.0, 820.0))
        .run()?;

    Ok(())
}
