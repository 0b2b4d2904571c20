//! File and backup preferences shown in the preferences panel.

use super::backup::{BackupSettings, DEFAULT_DAYS_BETWEEN_BACKUPS};
use super::recent::{RecentFileList, DEFAULT_MAX_SIZE, MAX_SIZE_LIMIT, RECENT_FILES_MAX};
use crate::domain::{BackupFrequency, LaunchAtStartup, PurgeWhen};
use crate::error::Result;
use crate::repositories::PreferenceStore;
use serde::Serialize;
use tracing::debug;

pub const BACKUP_FREQUENCY: &str = "backup-frequency";
pub const DAYS_BETWEEN_BACKUPS: &str = "days-between-backups";
pub const BACKUPS_TO_KEEP: &str = "backups-to-keep";
pub const LAUNCH_AT_STARTUP: &str = "launch-at-startup";
pub const PURGE_INACCESSIBLE_FILES: &str = "purge-inaccessible-files";
pub const ESSENTIAL_PATH: &str = "essential-path";

pub const DEFAULT_BACKUPS_TO_KEEP: u32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct FilePreferences {
    pub recent_files_max: usize,
    pub backup_frequency: BackupFrequency,
    pub days_between_backups: u32,
    pub backups_to_keep: u32,
    pub launch_at_startup: LaunchAtStartup,
    #[serde(rename = "purge-inaccessible-files")]
    pub purge_inaccessible: PurgeWhen,
    pub essential_path: String,
}

impl Default for FilePreferences {
    fn default() -> Self {
        Self {
            recent_files_max: DEFAULT_MAX_SIZE,
            backup_frequency: BackupFrequency::default(),
            days_between_backups: DEFAULT_DAYS_BETWEEN_BACKUPS,
            backups_to_keep: DEFAULT_BACKUPS_TO_KEEP,
            launch_at_startup: LaunchAtStartup::default(),
            purge_inaccessible: PurgeWhen::default(),
            essential_path: String::new(),
        }
    }
}

/// Stored integer if it is at least 1, else `default`.
fn positive(store: &dyn PreferenceStore, key: &str, default: u32) -> u32 {
    u32::try_from(store.get_int(key, i64::from(default)))
        .ok()
        .filter(|n| *n >= 1)
        .unwrap_or(default)
}

impl FilePreferences {
    /// Read every preference, substituting defaults for missing or bad values.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let recent_files_max = usize::try_from(store.get_int(RECENT_FILES_MAX, DEFAULT_MAX_SIZE as i64))
            .ok()
            .filter(|n| (1..=MAX_SIZE_LIMIT).contains(n))
            .unwrap_or(DEFAULT_MAX_SIZE);

        let prefs = Self {
            recent_files_max,
            backup_frequency: store
                .get(BACKUP_FREQUENCY)
                .map(|v| BackupFrequency::from_key(&v))
                .unwrap_or_default(),
            days_between_backups: positive(store, DAYS_BETWEEN_BACKUPS, DEFAULT_DAYS_BETWEEN_BACKUPS),
            backups_to_keep: positive(store, BACKUPS_TO_KEEP, DEFAULT_BACKUPS_TO_KEEP),
            launch_at_startup: store
                .get(LAUNCH_AT_STARTUP)
                .map(|v| LaunchAtStartup::from_value(&v))
                .unwrap_or_default(),
            purge_inaccessible: store
                .get(PURGE_INACCESSIBLE_FILES)
                .map(|v| PurgeWhen::from_key(&v))
                .unwrap_or_default(),
            essential_path: store.get_or(ESSENTIAL_PATH, ""),
        };
        debug!("Loaded file preferences: {:?}", prefs);
        prefs
    }

    /// Write every preference under its key. Empty values remove the key.
    pub fn save(&self, store: &dyn PreferenceStore) -> Result<()> {
        let table = match toml::Value::try_from(self)? {
            toml::Value::Table(table) => table,
            _ => return Ok(()),
        };

        for (key, value) in table {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            if value.is_empty() {
                store.remove(&key)?;
            } else {
                store.set(&key, &value)?;
            }
        }
        store.flush()
    }

    pub fn backup_settings(&self) -> BackupSettings {
        BackupSettings {
            frequency: self.backup_frequency,
            days_between_backups: self.days_between_backups,
        }
    }

    pub fn purge_at_startup(&self) -> bool {
        self.purge_inaccessible == PurgeWhen::AtStartup
    }

    /// The file to reopen on launch, if any.
    pub fn startup_path(&self, list: &RecentFileList) -> Option<String> {
        match &self.launch_at_startup {
            LaunchAtStartup::NoFile => None,
            LaunchAtStartup::LastFileOpened => list.get(0).map(|r| r.path.clone()),
            LaunchAtStartup::Path(path) => Some(path.clone()),
        }
    }
}
