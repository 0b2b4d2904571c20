//! Collaborator seams and small shared types.

use super::file_record::FileRecord;
use std::path::Path;

/// Host hook that opens a file the user picked from the recent list.
pub trait FileOpener {
    fn open_file(&mut self, record: &FileRecord);
}

/// Filesystem questions asked by the list. Swappable in tests.
pub trait PathProbe {
    fn exists(&self, path: &str) -> bool;
    fn is_file(&self, path: &str) -> bool;
    fn is_dir(&self, path: &str) -> bool;
}

/// Blocking backup capabilities supplied by the host application.
pub trait BackupActions {
    /// Ask "May we suggest a backup?". True means go ahead.
    fn suggest_backup(&mut self) -> bool;
    /// Back up after letting the user pick or confirm a location.
    fn prompt_for_backup(&mut self) -> bool;
    fn back_up_silently(&mut self) -> bool;
}

/// Why a backup is being considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupTrigger {
    Close,
    /// Something that could threaten data integrity, e.g. a bulk import.
    MajorEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupDecision {
    Skip,
    Prompt,
    Silent,
}

/// `PathProbe` backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn is_file(&self, path: &str) -> bool {
        Path::new(path).is_file()
    }

    fn is_dir(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }
}
