//! The recent-files list: bounded, deduplicated by path, most recent first.

use crate::domain::{
    file_record, FileOpener, FileRecord, ListEvent, ListObserver, PathProbe, SelectionMode,
};
use crate::error::{RecentFilesError, Result};
use crate::repositories::PreferenceStore;
use std::path::Path;
use std::rc::Rc;
use tracing::{debug, info, instrument, trace, warn};

pub const RECENT_FILES_MAX: &str = "recent-files-max";
pub const RECENT_FILE: &str = "recent-file";

const LEGACY_NAME: &str = "recent-file-name";
const LEGACY_TYPE: &str = "recent-file-type";
const LEGACY_FORMAT: &str = "recent-file-format";
const LEGACY_DATE: &str = "recent-file-date";
const LEGACY_BACKUP_FOLDER: &str = "backup-folder";
const OLDEST_PREFIX: &str = "recent.file";

pub const DEFAULT_MAX_SIZE: usize = 5;
pub const MAX_SIZE_LIMIT: usize = 25;

/// A non-empty scope always ends with `-` so keys read `docs-recent-file-0`.
pub fn normalize_scope(scope: &str) -> String {
    let scope = scope.trim();
    if scope.is_empty() || scope.ends_with('-') {
        scope.to_string()
    } else {
        format!("{}-", scope)
    }
}

/// Preference key holding the record in `slot`.
pub fn recent_file_key(scope: &str, slot: usize) -> String {
    format!("{}{}-{}", normalize_scope(scope), RECENT_FILE, slot)
}

fn legacy_key(scope: &str, name: &str, slot: usize) -> String {
    format!("{}{}-{}", scope, name, slot)
}

fn valid_max_size(n: usize) -> bool {
    (1..=MAX_SIZE_LIMIT).contains(&n)
}

fn read_max_size(store: &dyn PreferenceStore) -> usize {
    let stored = store.get_int(RECENT_FILES_MAX, DEFAULT_MAX_SIZE as i64);
    match usize::try_from(stored) {
        Ok(n) if valid_max_size(n) => n,
        _ => {
            debug!("Ignoring out of range {} = {}", RECENT_FILES_MAX, stored);
            DEFAULT_MAX_SIZE
        }
    }
}

/// Ordered list of recently used files, persisted to a [`PreferenceStore`].
///
/// Every structural change is published to the subscribed observers as a
/// [`ListEvent`], in the order it happened, so mirrors such as a menu can
/// stay index-aligned with the list.
pub struct RecentFileList {
    store: Rc<dyn PreferenceStore>,
    scope: String,
    max_size: usize,
    files: Vec<FileRecord>,
    observers: Vec<Box<dyn ListObserver>>,
}

impl RecentFileList {
    /// An empty list. Call [`Self::load_from_store`] after subscribing.
    pub fn new(store: Rc<dyn PreferenceStore>, scope: &str) -> Self {
        let max_size = read_max_size(store.as_ref());
        Self {
            store,
            scope: normalize_scope(scope),
            max_size,
            files: Vec::new(),
            observers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl ListObserver + 'static) {
        self.subscribe_boxed(Box::new(observer));
    }

    pub fn subscribe_boxed(&mut self, observer: Box<dyn ListObserver>) {
        self.observers.push(observer);
    }

    fn emit(&mut self, event: ListEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    /// Append every stored record, slot by slot. Empty slots and paths
    /// already in the list are skipped.
    #[instrument(skip(self), fields(scope = %self.scope))]
    pub fn load_from_store(&mut self) {
        self.max_size = read_max_size(self.store.as_ref());

        for slot in 0..self.max_size {
            let Some(record) = self.read_slot(slot) else {
                continue;
            };
            if self.position(&record.path).is_some() || self.files.len() >= self.max_size {
                continue;
            }
            self.files.push(record.clone());
            self.emit(ListEvent::Appended(record));
        }

        debug!("Loaded {} recent files", self.files.len());
    }

    fn read_slot(&self, slot: usize) -> Option<FileRecord> {
        let store = self.store.as_ref();
        if let Some(info) = store.get(&recent_file_key(&self.scope, slot)) {
            let record = FileRecord::parse(&info);
            return record.has_path().then_some(record);
        }

        let legacy_name = store.get(&legacy_key(&self.scope, LEGACY_NAME, slot));
        let path = match legacy_name {
            Some(name) => name,
            None if self.scope.is_empty() => store.get(&format!("{}{}", OLDEST_PREFIX, slot))?,
            None => return None,
        };
        if path.is_empty() {
            return None;
        }

        trace!("Reading legacy preferences for slot {}", slot);
        let mut record = FileRecord::new(path);
        record.kind = store.get_or(&legacy_key(&self.scope, LEGACY_TYPE, slot), "");
        record.format = store.get_or(&legacy_key(&self.scope, LEGACY_FORMAT, slot), "");
        if let Some(date) = store.get(&legacy_key(&self.scope, LEGACY_DATE, slot)) {
            if let Some(when) = file_record::parse_timestamp(&date) {
                record.last_access = when;
            }
        }
        record.backup_folder = store.get_or(LEGACY_BACKUP_FOLDER, "");
        Some(record)
    }

    /// Record a file that was just opened. Returns the front record after
    /// any metadata from an older entry for the same path was merged in.
    pub fn add_at_front(&mut self, record: FileRecord) -> FileRecord {
        if !record.has_path() {
            warn!("Refusing to add a recent file without a path");
            return record;
        }
        self.insert(0, record)
    }

    /// Remember a file as recently relevant without displacing the file at
    /// the front.
    pub fn add_at_second_position(&mut self, record: FileRecord) -> FileRecord {
        if !record.has_path() {
            warn!("Refusing to add a recent file without a path");
            return record;
        }

        if self.files.is_empty() {
            return self.insert(0, record);
        }
        if self.files[0].path == record.path {
            // Same file as the front: its fields win, the slot stays put.
            let mut merged = record;
            merged.absorb(&self.files[0]);
            merged.touch();
            self.files[0] = merged;
            self.save();
            return self.files[0].clone();
        }
        self.insert(1, record)
    }

    pub fn add_recent_path(&mut self, kind: &str, path: &str, format: &str) -> FileRecord {
        self.add_at_front(FileRecord::with_kind(kind, path, format))
    }

    fn insert(&mut self, pos: usize, record: FileRecord) -> FileRecord {
        self.files.insert(pos, record.clone());
        self.emit(ListEvent::Inserted { index: pos, record });

        let mut i = pos + 1;
        while i < self.files.len() {
            if self.files[i].path == self.files[pos].path {
                let older = self.files.remove(i);
                self.files[pos].absorb(&older);
                self.emit(ListEvent::Removed { index: i });
            } else if i >= self.max_size {
                self.files.remove(i);
                self.emit(ListEvent::Removed { index: i });
            } else {
                i += 1;
            }
        }

        let merged = self.files[pos].clone();
        // Only reachable when inserting at 1 with a capacity of 1.
        self.evict_beyond(self.max_size);
        self.save();
        merged
    }

    fn evict_beyond(&mut self, size: usize) {
        while self.files.len() > size {
            let index = self.files.len() - 1;
            self.files.pop();
            self.emit(ListEvent::Removed { index });
        }
    }

    fn remove_at(&mut self, index: usize) -> Option<FileRecord> {
        if index >= self.files.len() {
            return None;
        }
        let removed = self.files.remove(index);
        self.emit(ListEvent::Removed { index });
        Some(removed)
    }

    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if self.remove_at(index).is_some() {
            self.save();
        }
    }

    /// Drop every record whose path no longer exists. Returns how many went.
    #[instrument(skip_all, fields(scope = %self.scope))]
    pub fn purge_inaccessible(&mut self, probe: &dyn PathProbe) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.files.len() {
            if probe.exists(&self.files[i].path) {
                i += 1;
            } else {
                debug!("Purging inaccessible {}", self.files[i].path);
                self.remove_at(i);
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Purged {} inaccessible recent files", removed);
            self.save();
        }
        removed
    }

    /// Values outside `1..=25` are ignored.
    pub fn set_max_size(&mut self, max_size: usize) {
        if !valid_max_size(max_size) {
            debug!("Ignoring recent files max of {}", max_size);
            return;
        }
        self.max_size = max_size;
        self.evict_beyond(max_size);
        self.save();
    }

    /// Keep only the current file.
    pub fn clear_history(&mut self) {
        self.files.truncate(1);
        self.emit(ListEvent::HistoryCleared);
        self.save();
    }

    pub fn get(&self, index: usize) -> Option<&FileRecord> {
        self.files.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut FileRecord> {
        self.files.get_mut(index)
    }

    pub fn position(&self, path: &str) -> Option<usize> {
        self.files.iter().position(|r| r.path == path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.files.iter()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn store(&self) -> &Rc<dyn PreferenceStore> {
        &self.store
    }

    /// Persist the list. Failures are logged, never returned.
    pub fn save(&self) {
        if let Err(e) = self.write_slots() {
            warn!("Could not save recent files: {}", e);
        }
    }

    fn write_slots(&self) -> Result<()> {
        let store = self.store.as_ref();
        store.set(RECENT_FILES_MAX, &self.max_size.to_string())?;

        let mut slot = 0;
        for record in self.files.iter().filter(|r| r.has_path()) {
            store.set(&recent_file_key(&self.scope, slot), &record.encode())?;
            slot += 1;
        }
        for stale in slot..MAX_SIZE_LIMIT {
            store.remove(&recent_file_key(&self.scope, stale))?;
        }

        // Legacy keys would otherwise be read back for the slots just cleared.
        for old in 0..MAX_SIZE_LIMIT {
            for name in [LEGACY_NAME, LEGACY_TYPE, LEGACY_FORMAT, LEGACY_DATE] {
                store.remove(&legacy_key(&self.scope, name, old))?;
            }
            if self.scope.is_empty() {
                store.remove(&format!("{}{}", OLDEST_PREFIX, old))?;
            }
        }

        trace!("Saved {} recent files", slot);
        store.flush()
    }

    /// Open the record at `index` if its path still exists.
    pub fn open_recent(
        &self,
        index: usize,
        opener: &mut dyn FileOpener,
        probe: &dyn PathProbe,
    ) -> bool {
        let Some(record) = self.get(index) else {
            return false;
        };
        if !probe.exists(&record.path) {
            warn!("Recent file {} is no longer available", record.path);
            return false;
        }
        opener.open_file(record);
        true
    }

    /// Open entry `index` and move it to the front with a fresh access time.
    pub fn reopen(
        &mut self,
        index: usize,
        opener: &mut dyn FileOpener,
        probe: &dyn PathProbe,
    ) -> bool {
        if !self.open_recent(index, opener, probe) {
            return false;
        }
        if let Some(mut record) = self.get(index).cloned() {
            record.touch();
            self.add_at_front(record);
        }
        true
    }

    /// Open a path picked by the user, remembering it at the front.
    pub fn open_chosen(
        &mut self,
        path: &Path,
        mode: SelectionMode,
        opener: &mut dyn FileOpener,
        probe: &dyn PathProbe,
    ) -> Result<FileRecord> {
        let shown = path.display().to_string();
        let acceptable = match mode {
            SelectionMode::FilesOnly => probe.is_file(&shown),
            SelectionMode::DirectoriesOnly => probe.is_dir(&shown),
            SelectionMode::FilesAndDirectories => probe.exists(&shown),
        };
        if !acceptable {
            return Err(RecentFilesError::CannotOpen(shown));
        }

        let record = self.add_at_front(FileRecord::from_path(path));
        opener.open_file(&record);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FsProbe;
    use crate::repositories::MemoryStore;
    use chrono::{Datelike, Local, TimeZone};
    use std::cell::RefCell;
    use std::collections::HashSet;

    struct Existing(HashSet<String>);

    impl Existing {
        fn of(paths: &[&str]) -> Self {
            Self(paths.iter().map(|p| p.to_string()).collect())
        }
    }

    impl PathProbe for Existing {
        fn exists(&self, path: &str) -> bool {
            self.0.contains(path)
        }
        fn is_file(&self, path: &str) -> bool {
            self.exists(path)
        }
        fn is_dir(&self, _path: &str) -> bool {
            false
        }
    }

    #[derive(Default)]
    struct Opened(Vec<String>);

    impl FileOpener for Opened {
        fn open_file(&mut self, record: &FileRecord) {
            self.0.push(record.path.clone());
        }
    }

    /// Every write fails.
    struct BrokenStore;

    impl PreferenceStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }
        fn set(&self, key: &str, _value: &str) -> Result<()> {
            Err(RecentFilesError::StoreWriteFailed(key.to_string()))
        }
        fn remove(&self, key: &str) -> Result<()> {
            Err(RecentFilesError::StoreWriteFailed(key.to_string()))
        }
    }

    fn list_with_max(max: usize) -> (Rc<MemoryStore>, RecentFileList) {
        let store = MemoryStore::shared();
        store.set(RECENT_FILES_MAX, &max.to_string()).unwrap();
        let list = RecentFileList::new(store.clone(), "");
        (store, list)
    }

    fn paths(list: &RecentFileList) -> Vec<&str> {
        list.iter().map(|r| r.path.as_str()).collect()
    }

    fn assert_unique(list: &RecentFileList) {
        let unique: HashSet<_> = list.iter().map(|r| &r.path).collect();
        assert_eq!(unique.len(), list.len());
    }

    #[test]
    fn oldest_file_falls_off_the_end() {
        let (_, mut list) = list_with_max(3);
        for path in ["/a", "/b", "/c", "/d"] {
            list.add_at_front(FileRecord::new(path));
        }
        assert_eq!(paths(&list), ["/d", "/c", "/b"]);
    }

    #[test]
    fn capacity_and_uniqueness_hold_after_every_add() {
        let (_, mut list) = list_with_max(4);
        for step in 0..60usize {
            let path = format!("/f{}", (step * 7) % 9);
            if step % 3 == 0 {
                list.add_at_second_position(FileRecord::new(&path));
            } else {
                list.add_at_front(FileRecord::new(&path));
            }
            assert!(list.len() <= list.max_size());
            assert_unique(&list);
        }
    }

    #[test]
    fn add_at_front_promotes_and_inherits_metadata() {
        let (_, mut list) = list_with_max(5);
        let mut older = FileRecord::new("/p");
        older.backup_folder = "X".into();
        older.scripts_folder = "S".into();
        list.add_at_front(older);
        list.add_at_front(FileRecord::new("/q"));

        let mut newer = FileRecord::new("/p");
        newer.scripts_folder = "T".into();
        let merged = list.add_at_front(newer);

        assert_eq!(paths(&list), ["/p", "/q"]);
        assert_eq!(merged.backup_folder, "X");
        assert_eq!(list.get(0).unwrap().backup_folder, "X");
        assert_eq!(list.get(0).unwrap().scripts_folder, "T");
    }

    #[test]
    fn add_at_second_position_leaves_the_front_alone() {
        let (_, mut list) = list_with_max(5);
        for path in ["/c", "/b", "/a"] {
            list.add_at_front(FileRecord::new(path));
        }

        list.add_at_second_position(FileRecord::new("/c"));
        assert_eq!(paths(&list), ["/a", "/c", "/b"]);

        list.add_at_second_position(FileRecord::new("/new"));
        assert_eq!(paths(&list), ["/a", "/new", "/c", "/b"]);
    }

    #[test]
    fn add_at_second_position_edge_cases() {
        let (_, mut list) = list_with_max(1);
        list.add_at_second_position(FileRecord::new("/only"));
        assert_eq!(paths(&list), ["/only"]);

        let front = list.add_at_second_position(FileRecord::new("/only"));
        assert_eq!(front.path, "/only");
        assert_eq!(paths(&list), ["/only"]);

        let mut evicted = FileRecord::new("/other");
        evicted.format = "md".into();
        let returned = list.add_at_second_position(evicted);
        assert_eq!(returned.format, "md");
        assert_eq!(paths(&list), ["/only"]);
    }

    #[test]
    fn re_adding_the_front_at_second_position_keeps_its_new_fields() {
        let (store, mut list) = list_with_max(5);
        let mut first = FileRecord::new("/front");
        first.scripts_folder = "/scripts".into();
        list.add_at_front(first);
        list.add_at_front(FileRecord::new("/other"));
        list.add_at_front(FileRecord::new("/front"));

        let mut again = FileRecord::new("/front");
        again.backup_folder = "/safe".into();
        let front = list.add_at_second_position(again);

        assert_eq!(paths(&list), ["/front", "/other"]);
        assert_eq!(front.backup_folder, "/safe");
        assert_eq!(front.scripts_folder, "/scripts");
        assert!(store.get("recent-file-0").unwrap().contains("/safe"));
    }

    #[test]
    fn reopen_moves_the_entry_to_the_front_with_a_new_access_time() {
        let (_, mut list) = list_with_max(5);
        let mut old = FileRecord::new("/a");
        old.last_access = Local.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        list.add_at_front(old);
        list.add_at_front(FileRecord::new("/b"));

        let mut opener = Opened::default();
        assert!(list.reopen(1, &mut opener, &Existing::of(&["/a", "/b"])));

        assert_eq!(opener.0, ["/a"]);
        assert_eq!(paths(&list), ["/a", "/b"]);
        assert!(list.get(0).unwrap().last_access.year() > 2020);

        assert!(!list.reopen(1, &mut opener, &Existing::of(&[])));
        assert_eq!(paths(&list), ["/a", "/b"]);
    }

    #[test]
    fn add_recent_path_builds_a_typed_record() {
        let (_, mut list) = list_with_max(5);
        let record = list.add_recent_path("url", "https://example.com/wiki", "html");

        assert_eq!(record.kind, "url");
        assert_eq!(record.format, "html");
        assert_eq!(list.position("https://example.com/wiki"), Some(0));
    }

    #[test]
    fn records_without_a_path_are_never_inserted() {
        let (_, mut list) = list_with_max(5);
        list.add_at_front(FileRecord::default());
        list.add_at_second_position(FileRecord::default());
        assert!(list.is_empty());
    }

    #[test]
    fn observers_see_dedup_removals_in_order() {
        let (_, mut list) = list_with_max(3);
        let log = Rc::new(RefCell::new(Vec::<ListEvent>::new()));
        let second = Rc::new(RefCell::new(Vec::<ListEvent>::new()));
        list.subscribe(log.clone());
        list.subscribe(second.clone());

        list.add_at_front(FileRecord::new("/a"));
        list.add_at_front(FileRecord::new("/b"));
        log.borrow_mut().clear();
        second.borrow_mut().clear();

        let record = FileRecord::new("/a");
        list.add_at_front(record.clone());

        let events = log.borrow();
        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], ListEvent::Inserted { index: 0, record } if record.path == "/a"));
        assert_eq!(events[1], ListEvent::Removed { index: 2 });
        assert_eq!(*events, *second.borrow());
    }

    #[test]
    fn purge_keeps_relative_order_and_rechecks_shifted_entries() {
        let (_, mut list) = list_with_max(5);
        for path in ["/valid2", "/gone2", "/gone1", "/valid1"] {
            list.add_at_front(FileRecord::new(path));
        }

        let removed = list.purge_inaccessible(&Existing::of(&["/valid1", "/valid2"]));

        assert_eq!(removed, 2);
        assert_eq!(paths(&list), ["/valid1", "/valid2"]);
    }

    #[test]
    fn clear_history_keeps_the_current_file() {
        let (store, mut list) = list_with_max(5);
        for path in ["/c", "/b", "/a"] {
            list.add_at_front(FileRecord::new(path));
        }

        list.clear_history();

        assert_eq!(paths(&list), ["/a"]);
        assert!(store.get(&recent_file_key("", 0)).is_some());
        assert!(store.get(&recent_file_key("", 1)).is_none());
        assert!(store.get(&recent_file_key("", 2)).is_none());
    }

    #[test]
    fn shrinking_evicts_from_the_tail() {
        let (store, mut list) = list_with_max(5);
        let log = Rc::new(RefCell::new(Vec::<ListEvent>::new()));
        list.subscribe(log.clone());
        for path in ["/d", "/c", "/b", "/a"] {
            list.add_at_front(FileRecord::new(path));
        }
        log.borrow_mut().clear();

        list.set_max_size(2);
        assert_eq!(paths(&list), ["/a", "/b"]);
        assert_eq!(
            *log.borrow(),
            [ListEvent::Removed { index: 3 }, ListEvent::Removed { index: 2 }]
        );
        assert_eq!(store.get(RECENT_FILES_MAX).as_deref(), Some("2"));

        list.set_max_size(0);
        list.set_max_size(26);
        assert_eq!(list.max_size(), 2);
    }

    #[test]
    fn out_of_range_access_is_harmless() {
        let (_, mut list) = list_with_max(5);
        list.add_at_front(FileRecord::new("/a"));
        let log = Rc::new(RefCell::new(Vec::<ListEvent>::new()));
        list.subscribe(log.clone());

        assert!(list.get(1).is_none());
        list.remove(7);
        assert!(log.borrow().is_empty());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn saved_slots_are_contiguous_and_reload_in_order() {
        let (store, mut list) = list_with_max(5);
        for path in ["/c", "/b", "/a"] {
            list.add_at_front(FileRecord::new(path));
        }
        list.remove(1);

        assert!(store.get(&recent_file_key("", 1)).unwrap().contains("path=/c;"));
        assert!(store.get(&recent_file_key("", 2)).is_none());

        let mut reloaded = RecentFileList::new(store.clone(), "");
        let log = Rc::new(RefCell::new(Vec::<ListEvent>::new()));
        reloaded.subscribe(log.clone());
        reloaded.load_from_store();

        assert_eq!(paths(&reloaded), ["/a", "/c"]);
        assert!(matches!(&log.borrow()[0], ListEvent::Appended(r) if r.path == "/a"));
    }

    #[test]
    fn load_skips_empty_slots_and_honours_the_stored_max() {
        let store = MemoryStore::shared();
        store.set(RECENT_FILES_MAX, "2").unwrap();
        store.set(&recent_file_key("", 0), "type=file;").unwrap();
        store.set(&recent_file_key("", 1), "path=/one;").unwrap();
        store.set(&recent_file_key("", 2), "path=/beyond;").unwrap();

        let mut list = RecentFileList::new(store, "");
        list.load_from_store();

        assert_eq!(paths(&list), ["/one"]);
        assert_eq!(list.max_size(), 2);
    }

    #[test]
    fn scoped_lists_use_their_own_keys() {
        let store = MemoryStore::shared();
        let mut docs = RecentFileList::new(store.clone(), "docs");
        docs.add_at_front(FileRecord::new("/d"));

        assert_eq!(docs.scope(), "docs-");
        assert!(store.get("docs-recent-file-0").is_some());
        assert!(store.get("recent-file-0").is_none());
    }

    #[test]
    fn legacy_keys_are_read_and_then_retired() {
        let store = MemoryStore::shared();
        store.set("recent-file-name-0", "/legacy").unwrap();
        store.set("recent-file-type-0", "file").unwrap();
        store.set("recent-file-date-0", "Jan 5, 2013 3:04:05 PM").unwrap();
        store.set("backup-folder", "/backups").unwrap();
        store.set("recent.file1", "/ancient").unwrap();

        let mut list = RecentFileList::new(store.clone(), "");
        list.load_from_store();

        assert_eq!(paths(&list), ["/legacy", "/ancient"]);
        let legacy = list.get(0).unwrap();
        assert_eq!(legacy.kind, "file");
        assert_eq!(legacy.backup_folder, "/backups");
        assert_eq!(legacy.last_access.format("%Y-%m-%d").to_string(), "2013-01-05");

        list.remove(1);
        assert!(store.get("recent.file1").is_none());
        assert!(store.get("recent-file-name-0").is_none());
        assert!(store.get("recent-file-0").unwrap().contains("path=/legacy;"));
    }

    #[test]
    fn store_failures_do_not_reach_the_caller() {
        let mut list = RecentFileList::new(Rc::new(BrokenStore), "");
        let front = list.add_at_front(FileRecord::new("/a"));
        list.clear_history();
        list.save();

        assert_eq!(front.path, "/a");
        assert_eq!(paths(&list), ["/a"]);
    }

    #[test]
    fn open_recent_only_opens_existing_paths() {
        let (_, mut list) = list_with_max(5);
        list.add_at_front(FileRecord::new("/gone"));
        list.add_at_front(FileRecord::new("/here"));
        let probe = Existing::of(&["/here"]);
        let mut opened = Opened::default();

        assert!(list.open_recent(0, &mut opened, &probe));
        assert!(!list.open_recent(1, &mut opened, &probe));
        assert!(!list.open_recent(9, &mut opened, &probe));
        assert_eq!(opened.0, ["/here"]);
    }

    #[test]
    fn open_chosen_checks_the_selection_mode() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        std::fs::write(&file, "x").unwrap();

        let (_, mut list) = list_with_max(5);
        let mut opened = Opened::default();

        assert!(matches!(
            list.open_chosen(&file, SelectionMode::DirectoriesOnly, &mut opened, &FsProbe),
            Err(RecentFilesError::CannotOpen(_))
        ));
        assert!(list
            .open_chosen(&dir.path().join("missing"), SelectionMode::FilesAndDirectories, &mut opened, &FsProbe)
            .is_err());

        let record = list
            .open_chosen(&file, SelectionMode::FilesOnly, &mut opened, &FsProbe)
            .unwrap();
        assert_eq!(record.kind, "file");
        assert_eq!(list.get(0).unwrap().path, record.path);
        assert_eq!(opened.0, [record.path.clone()]);

        list.open_chosen(dir.path(), SelectionMode::DirectoriesOnly, &mut opened, &FsProbe)
            .unwrap();
        assert_eq!(list.len(), 2);
    }
}
