//! Preference value types and their persisted spellings.

use serde::Serialize;
use std::fmt;

/// How eagerly the host application should back up the file it has open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BackupFrequency {
    #[serde(rename = "manual-backups")]
    Manual,
    #[default]
    #[serde(rename = "occasional-backups")]
    Occasional,
    #[serde(rename = "automatic-backups")]
    Automatic,
}

impl BackupFrequency {
    pub const ALL: [Self; 3] = [Self::Manual, Self::Occasional, Self::Automatic];

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Manual => "manual-backups",
            Self::Occasional => "occasional-backups",
            Self::Automatic => "automatic-backups",
        }
    }

    /// Unrecognised values fall back to occasional backups.
    pub fn from_key(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| value.eq_ignore_ascii_case(f.as_key()))
            .unwrap_or_default()
    }
}

impl fmt::Display for BackupFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "Manual",
            Self::Occasional => "Occasional",
            Self::Automatic => "Automatic",
        })
    }
}

/// Which file, if any, to reopen when the application starts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum LaunchAtStartup {
    #[serde(rename = "no-file")]
    NoFile,
    #[default]
    #[serde(rename = "last-file-opened")]
    LastFileOpened,
    #[serde(untagged)]
    Path(String),
}

impl LaunchAtStartup {
    pub const NO_FILE: &'static str = "no-file";
    pub const LAST_FILE_OPENED: &'static str = "last-file-opened";

    pub fn as_value(&self) -> &str {
        match self {
            Self::NoFile => Self::NO_FILE,
            Self::LastFileOpened => Self::LAST_FILE_OPENED,
            Self::Path(path) => path,
        }
    }

    pub fn from_value(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case(Self::LAST_FILE_OPENED) {
            Self::LastFileOpened
        } else if value.eq_ignore_ascii_case(Self::NO_FILE) {
            Self::NoFile
        } else {
            Self::Path(value.to_string())
        }
    }
}

/// When to drop recent entries whose path no longer exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum PurgeWhen {
    #[default]
    #[serde(rename = "never")]
    Never,
    #[serde(rename = "at-startup")]
    AtStartup,
}

impl PurgeWhen {
    pub const ALL: [Self; 2] = [Self::Never, Self::AtStartup];

    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Never => "never",
            Self::AtStartup => "at-startup",
        }
    }

    pub fn from_key(value: &str) -> Self {
        if value.eq_ignore_ascii_case(Self::AtStartup.as_key()) {
            Self::AtStartup
        } else {
            Self::Never
        }
    }
}

impl fmt::Display for PurgeWhen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Never => "Never",
            Self::AtStartup => "At startup",
        })
    }
}

/// What a chosen path must be for the chooser to accept it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    FilesOnly,
    #[default]
    DirectoriesOnly,
    FilesAndDirectories,
}

impl SelectionMode {
    pub const ALL: [Self; 3] = [
        Self::FilesOnly,
        Self::DirectoriesOnly,
        Self::FilesAndDirectories,
    ];
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FilesOnly => "Files",
            Self::DirectoriesOnly => "Folders",
            Self::FilesAndDirectories => "Files and folders",
        })
    }
}
