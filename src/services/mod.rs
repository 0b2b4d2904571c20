//! Recent-files and backup logic on top of a preference store.

pub mod backup;
pub mod mirrors;
pub mod prefs;
pub mod recent;

pub use backup::{days_since, days_since_last_backup, BackupPolicy, BackupSettings};
pub use mirrors::{MenuEntry, MenuMirror, StartupChoice, StartupChoices};
pub use prefs::FilePreferences;
pub use recent::{recent_file_key, RecentFileList};

use crate::domain::{ListObserver, PathProbe};
use crate::repositories::PreferenceStore;
use std::rc::Rc;
use tracing::info;

/// Everything the application needs once its preferences are read.
pub struct Session {
    pub preferences: FilePreferences,
    pub recent: RecentFileList,
    pub policy: BackupPolicy,
}

/// Load preferences and the recent list, purging missing files first if
/// the user asked for that. `observers` see the initial load.
pub fn start_session(
    store: Rc<dyn PreferenceStore>,
    scope: &str,
    probe: &dyn PathProbe,
    observers: Vec<Box<dyn ListObserver>>,
) -> Session {
    let preferences = FilePreferences::load(store.as_ref());

    let mut recent = RecentFileList::new(store.clone(), scope);
    for observer in observers {
        recent.subscribe_boxed(observer);
    }
    recent.load_from_store();

    if preferences.purge_at_startup() {
        recent.purge_inaccessible(probe);
    }

    let policy = BackupPolicy::new(preferences.backup_settings(), store);
    info!(
        "Session started with {} recent files (max {})",
        recent.len(),
        recent.max_size()
    );

    Session {
        preferences,
        recent,
        policy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FsProbe;
    use crate::repositories::MemoryStore;
    use std::cell::RefCell;

    fn seeded_store(existing: &str) -> Rc<MemoryStore> {
        let store = MemoryStore::shared();
        store.set("recent-file-0", "path=/definitely/not/here.txt;").unwrap();
        store.set("recent-file-1", &format!("path={};", existing)).unwrap();
        store
    }

    #[test]
    fn purges_at_startup_when_asked() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().display().to_string();
        let store = seeded_store(&existing);
        store.set(prefs::PURGE_INACCESSIBLE_FILES, "at-startup").unwrap();

        let menu = Rc::new(RefCell::new(MenuMirror::new()));
        let observers: Vec<Box<dyn ListObserver>> = vec![Box::new(menu.clone())];
        let session = start_session(store, "", &FsProbe, observers);

        assert_eq!(session.recent.len(), 1);
        assert_eq!(session.recent.get(0).unwrap().path, existing);
        assert_eq!(menu.borrow().len(), 1);
    }

    #[test]
    fn keeps_missing_files_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = seeded_store(&dir.path().display().to_string());
        store.set(prefs::BACKUP_FREQUENCY, "manual-backups").unwrap();

        let session = start_session(store, "", &FsProbe, Vec::new());

        assert_eq!(session.recent.len(), 2);
        assert_eq!(
            session.policy.settings().frequency,
            crate::domain::BackupFrequency::Manual
        );
    }
}
