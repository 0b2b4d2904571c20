pub mod backup_view;
pub mod components;
pub mod recent_view;
pub mod settings_view;
