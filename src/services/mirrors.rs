//! Display-side copies of a recent-files list, kept in step through [`ListEvent`]s.

use crate::domain::{FileRecord, LaunchAtStartup, ListEvent, ListObserver};
use std::fmt;

/// Apply one list edit to any index-aligned vector.
fn apply<T>(items: &mut Vec<T>, event: &ListEvent, make: impl FnOnce(&FileRecord) -> T) {
    match event {
        ListEvent::Appended(record) => items.push(make(record)),
        ListEvent::Inserted { index, record } => {
            let index = (*index).min(items.len());
            items.insert(index, make(record));
        }
        ListEvent::Removed { index } => {
            if *index < items.len() {
                items.remove(*index);
            }
        }
        ListEvent::HistoryCleared => items.truncate(1),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub tooltip: String,
    pub path: String,
}

impl MenuEntry {
    fn from_record(record: &FileRecord) -> Self {
        Self {
            label: record.brief_display_name(),
            tooltip: record.display_name(),
            path: record.path.clone(),
        }
    }
}

/// The "Open Recent" menu: one entry per list position.
#[derive(Debug, Default)]
pub struct MenuMirror {
    entries: Vec<MenuEntry>,
}

impl MenuMirror {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ListObserver for MenuMirror {
    fn on_event(&mut self, event: &ListEvent) {
        apply(&mut self.entries, event, MenuEntry::from_record);
    }
}

const NO_FILE_LABEL: &str = "No file";
const LAST_FILE_OPENED_LABEL: &str = "Last file opened";
const FIXED_CHOICES: usize = 2;

/// One row of the "launch at startup" picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupChoice {
    pub index: usize,
    pub label: String,
}

impl fmt::Display for StartupChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// The "launch at startup" picker: "No file", "Last file opened", then the
/// recent paths in list order (index `i` of the list is choice `i + 2`).
///
/// An explicit startup path that is not in the list is offered as one
/// extra choice at the end so the stored preference is never lost.
#[derive(Debug, Default)]
pub struct StartupChoices {
    paths: Vec<String>,
    labels: Vec<String>,
    selected: LaunchAtStartup,
}

impl StartupChoices {
    pub fn new(selected: LaunchAtStartup) -> Self {
        Self {
            paths: Vec::new(),
            labels: Vec::new(),
            selected,
        }
    }

    fn unlisted_path(&self) -> Option<&str> {
        match &self.selected {
            LaunchAtStartup::Path(path) if !self.paths.contains(path) => Some(path),
            _ => None,
        }
    }

    pub fn choices(&self) -> Vec<StartupChoice> {
        let fixed = [NO_FILE_LABEL, LAST_FILE_OPENED_LABEL]
            .into_iter()
            .map(str::to_string);
        let listed = self.labels.iter().cloned();
        let extra = self
            .unlisted_path()
            .map(|path| FileRecord::new(path).brief_display_name());

        fixed
            .chain(listed)
            .chain(extra)
            .enumerate()
            .map(|(index, label)| StartupChoice { index, label })
            .collect()
    }

    pub fn selected(&self) -> usize {
        match &self.selected {
            LaunchAtStartup::NoFile => 0,
            LaunchAtStartup::LastFileOpened => 1,
            LaunchAtStartup::Path(path) => {
                let position = self.paths.iter().position(|p| p == path);
                FIXED_CHOICES + position.unwrap_or(self.paths.len())
            }
        }
    }

    /// Pick choice `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) {
        self.selected = match index {
            0 => LaunchAtStartup::NoFile,
            1 => LaunchAtStartup::LastFileOpened,
            i => match self.paths.get(i - FIXED_CHOICES) {
                Some(path) => LaunchAtStartup::Path(path.clone()),
                None => return,
            },
        };
    }

    pub fn set_launch_at_startup(&mut self, value: LaunchAtStartup) {
        self.selected = value;
    }

    pub fn launch_at_startup(&self) -> &LaunchAtStartup {
        &self.selected
    }

    /// Paths offered after the two fixed choices, aligned with the list.
    pub fn paths(&self) -> &[String] {
        &self.paths
    }
}

impl ListObserver for StartupChoices {
    fn on_event(&mut self, event: &ListEvent) {
        apply(&mut self.paths, event, FileRecord::display_name);
        apply(&mut self.labels, event, FileRecord::brief_display_name);
    }
}
