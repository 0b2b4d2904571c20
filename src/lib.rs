pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;
pub mod utils;

// Public API surface for the GUI and embedding applications

pub use crate::domain::{
    BackupActions, BackupDecision, BackupFrequency, BackupTrigger, FileOpener, FileRecord,
    FsProbe, LaunchAtStartup, ListEvent, ListObserver, PathProbe, PurgeWhen, SelectionMode,
};

pub use crate::error::{RecentFilesError, Result};

pub use crate::repositories::{
    open_default_store, FolderBackup, MemoryStore, PreferenceStore, TomlFileStore,
};

pub use crate::services::{
    start_session, BackupPolicy, BackupSettings, FilePreferences, MenuMirror, RecentFileList,
    Session, StartupChoices,
};

pub mod prelude {
    pub use crate::domain::{
        BackupActions, BackupFrequency, FileOpener, FileRecord, ListEvent, ListObserver,
        PathProbe,
    };
    pub use crate::error::{RecentFilesError, Result};
    pub use crate::repositories::{open_default_store, PreferenceStore};
    pub use crate::services::{start_session, BackupPolicy, FilePreferences, RecentFileList};
}
