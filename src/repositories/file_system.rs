//! File system helpers: backup copies into a folder, with retention.

use crate::domain::{BackupActions, FileRecord};
use crate::error::{RecentFilesError, Result};
use chrono::{DateTime, Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument};

const BACKUP_DATE_FORMAT: &str = "%Y-%m-%d-%H-%M";
const DEFAULT_BACKUP_FOLDER: &str = "backups";

/// `"<parent folder> <stem> backup "`, shared by every backup of `source`.
fn backup_prefix(source: &Path) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = source
        .parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy().into_owned());

    match parent {
        Some(parent) if !parent.is_empty() => format!("{} {} backup ", parent, stem),
        _ => format!("{} backup ", stem),
    }
}

/// `".<ext>"` for files with an extension, empty for folders.
fn backup_suffix(source: &Path) -> String {
    match source.extension() {
        Some(ext) if source.is_file() => format!(".{}", ext.to_string_lossy()),
        _ => String::new(),
    }
}

/// Suggested name for a backup of `source` taken at `when`, e.g.
/// `projects notes backup 2024-03-01-10-30.md`.
pub fn backup_file_name(source: &Path, when: DateTime<Local>) -> String {
    format!(
        "{}{}{}",
        backup_prefix(source),
        when.format(BACKUP_DATE_FORMAT),
        backup_suffix(source)
    )
}

/// Timestamp of `name` when it is exactly a backup of the source that
/// produced `prefix` and `suffix`.
fn backup_timestamp(name: &str, prefix: &str, suffix: &str) -> Option<NaiveDateTime> {
    let stamp = name.strip_prefix(prefix)?.strip_suffix(suffix)?;
    NaiveDateTime::parse_from_str(stamp, BACKUP_DATE_FORMAT).ok()
}

fn copy_recursive(from: &Path, to: &Path) -> Result<()> {
    if from.is_dir() {
        std::fs::create_dir_all(to)?;
        for entry in std::fs::read_dir(from)?.filter_map(|e| e.ok()) {
            copy_recursive(&entry.path(), &to.join(entry.file_name()))?;
        }
    } else {
        std::fs::copy(from, to)?;
    }
    Ok(())
}

/// Delete the oldest backups of `source` in `folder` beyond `keep`.
/// Returns how many were removed.
pub fn prune_backups(folder: &Path, source: &Path, keep: usize) -> Result<usize> {
    let prefix = backup_prefix(source);
    let suffix = backup_suffix(source);
    let mut backups: Vec<(NaiveDateTime, PathBuf)> = std::fs::read_dir(folder)?
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let stamp = backup_timestamp(&e.file_name().to_string_lossy(), &prefix, &suffix)?;
            Some((stamp, e.path()))
        })
        .collect();

    // Newest last.
    backups.sort();
    let excess = backups.len().saturating_sub(keep.max(1));

    for (_, old) in &backups[..excess] {
        debug!("Pruning old backup {}", old.display());
        if old.is_dir() {
            std::fs::remove_dir_all(old)?;
        } else {
            std::fs::remove_file(old)?;
        }
    }
    Ok(excess)
}

/// Copies a file or folder into a backup folder and keeps the newest few copies.
pub struct FolderBackup {
    source: PathBuf,
    folder: PathBuf,
    keep: usize,
    confirm: Box<dyn FnMut() -> bool>,
    last_backup: Option<PathBuf>,
}

impl FolderBackup {
    pub fn new(source: impl Into<PathBuf>, folder: impl Into<PathBuf>, keep: usize) -> Self {
        Self {
            source: source.into(),
            folder: folder.into(),
            keep,
            confirm: Box::new(|| true),
            last_backup: None,
        }
    }

    /// Back up `record` into its own backup folder, or a `backups` folder
    /// next to it when none is set.
    pub fn for_record(record: &FileRecord, keep: usize) -> Option<Self> {
        if !record.has_path() {
            return None;
        }
        let source = PathBuf::from(&record.path);
        let folder = if record.backup_folder.is_empty() {
            source.parent()?.join(DEFAULT_BACKUP_FOLDER)
        } else {
            PathBuf::from(&record.backup_folder)
        };
        Some(Self::new(source, folder, keep))
    }

    /// Answer used for [`BackupActions::suggest_backup`].
    pub fn with_confirmation(mut self, confirm: impl FnMut() -> bool + 'static) -> Self {
        self.confirm = Box::new(confirm);
        self
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Where the most recent successful run wrote its copy.
    pub fn last_backup(&self) -> Option<&Path> {
        self.last_backup.as_deref()
    }

    #[instrument(skip(self), fields(source = %self.source.display()))]
    pub fn run(&mut self, when: DateTime<Local>) -> Result<PathBuf> {
        if !self.source.exists() {
            return Err(RecentFilesError::BackupFailed(format!(
                "{} does not exist",
                self.source.display()
            )));
        }

        if self.source.is_dir()
            && std::path::absolute(&self.folder)?.starts_with(std::path::absolute(&self.source)?)
        {
            return Err(RecentFilesError::BackupFailed(format!(
                "{} is inside {}",
                self.folder.display(),
                self.source.display()
            )));
        }

        std::fs::create_dir_all(&self.folder)?;
        let target = self.folder.join(backup_file_name(&self.source, when));
        copy_recursive(&self.source, &target)?;
        let pruned = prune_backups(&self.folder, &self.source, self.keep)?;

        info!(
            "Backed up to {} ({} old backups pruned)",
            target.display(),
            pruned
        );
        self.last_backup = Some(target.clone());
        Ok(target)
    }

    fn back_up(&mut self) -> bool {
        match self.run(Local::now()) {
            Ok(_) => true,
            Err(e) => {
                error!("Backup of {} failed: {}", self.source.display(), e);
                false
            }
        }
    }
}

impl BackupActions for FolderBackup {
    fn suggest_backup(&mut self) -> bool {
        (self.confirm)()
    }

    fn prompt_for_backup(&mut self) -> bool {
        self.back_up()
    }

    fn back_up_silently(&mut self) -> bool {
        self.back_up()
    }
}
