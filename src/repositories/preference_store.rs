//! Per-user key/value preference storage.

use crate::error::Result;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// A flat string-to-string preference store.
///
/// Methods take `&self` so one store can be shared (`Rc<dyn PreferenceStore>`)
/// between the recent list, the backup policy and the preferences panel.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Push pending writes to the backing medium.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Integer value, or `default` when missing or not numeric.
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.get(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// In-process store. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.values.borrow().clone()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_fall_back_to_defaults() {
        let store = MemoryStore::new();
        store.set("recent-files-max", " 9 ").unwrap();
        store.set("backups-to-keep", "lots").unwrap();

        assert_eq!(store.get_int("recent-files-max", 5), 9);
        assert_eq!(store.get_int("backups-to-keep", 10), 10);
        assert_eq!(store.get_or("launch-at-startup", "no-file"), "no-file");

        store.remove("recent-files-max").unwrap();
        store.remove("never-set").unwrap();
        assert_eq!(store.get("recent-files-max"), None);
    }
}
