//! Preferences kept in a flat TOML file in the user's config directory.

use super::preference_store::PreferenceStore;
use crate::error::{RecentFilesError, Result};
use directories::ProjectDirs;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};

const FILE_NAME: &str = "preferences.toml";

/// Writes are buffered in memory until [`PreferenceStore::flush`].
#[derive(Debug)]
pub struct TomlFileStore {
    path: PathBuf,
    values: RefCell<BTreeMap<String, String>>,
    dirty: Cell<bool>,
}

impl TomlFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = if path.exists() {
            read_values(&path)?
        } else {
            debug!("No preferences file at {}, starting empty", path.display());
            BTreeMap::new()
        };

        Ok(Self {
            path,
            values: RefCell::new(values),
            dirty: Cell::new(false),
        })
    }

    /// Open `preferences.toml` in the platform config directory for this application.
    pub fn open_in_config_dir(organisation: &str, application: &str) -> Result<Self> {
        let dirs = ProjectDirs::from("com", organisation, application)
            .ok_or(RecentFilesError::ConfigDirNotFound)?;
        Self::open(dirs.config_dir().join(FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Hand-edited files may hold numbers or booleans; everything is kept as text.
fn read_values(path: &Path) -> Result<BTreeMap<String, String>> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        RecentFilesError::StoreReadFailed(format!("{}: {}", path.display(), e))
    })?;
    let table: BTreeMap<String, toml::Value> = toml::from_str(&text)?;

    Ok(table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(s) => s,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

impl PreferenceStore for TomlFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let previous = self
            .values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.dirty.set(true);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.values.borrow_mut().remove(key).is_some() {
            self.dirty.set(true);
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        if !self.dirty.get() {
            trace!("Preferences unchanged, skipping write");
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = toml::to_string(&*self.values.borrow())?;
        std::fs::write(&self.path, text).map_err(|e| {
            RecentFilesError::StoreWriteFailed(format!("{}: {}", self.path.display(), e))
        })?;

        self.dirty.set(false);
        info!("Preferences written to {}", self.path.display());
        Ok(())
    }
}
