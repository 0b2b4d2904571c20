//! Registry-backed preferences - thin wrapper over winreg.

use super::preference_store::PreferenceStore;
use crate::error::{RecentFilesError, Result};
use std::io::ErrorKind;
use winreg::{enums::*, RegKey};

/// String values under `HKCU\Software\<organisation>\<application>`.
pub struct RegistryStore {
    key: RegKey,
    path: String,
}

impl RegistryStore {
    pub fn open(organisation: &str, application: &str) -> Result<Self> {
        let path = format!(r"Software\{}\{}", organisation, application);
        let (key, _) = RegKey::predef(HKEY_CURRENT_USER)
            .create_subkey(&path)
            .map_err(|e| RecentFilesError::RegistryWriteFailed(format!("{}: {}", path, e)))?;
        Ok(Self { key, path })
    }
}

impl PreferenceStore for RegistryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.key.get_value::<String, _>(key).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.key
            .set_value(key, &value.to_string())
            .map_err(|e| RecentFilesError::RegistryWriteFailed(format!("{}\\{}: {}", self.path, key, e)))
    }

    fn remove(&self, key: &str) -> Result<()> {
        match self.key.delete_value(key) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(RecentFilesError::RegistryWriteFailed(format!(
                "{}\\{}: {}",
                self.path, key, e
            ))),
        }
    }
}
