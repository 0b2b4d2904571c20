use thiserror::Error;

pub type Result<T = (), E = RecentFilesError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone)]
pub enum RecentFilesError {
    #[error("Failed to read preferences: {0}")]
    StoreReadFailed(String),

    #[error("Failed to write preferences: {0}")]
    StoreWriteFailed(String),

    #[error("Failed to write registry value: {0}")]
    RegistryWriteFailed(String),

    #[error("Could not determine a per-user configuration directory")]
    ConfigDirNotFound,

    #[error("Trouble opening file {0}")]
    CannotOpen(String),

    #[error("Backup failed: {0}")]
    BackupFailed(String),

    #[error("File system error: {0}")]
    FileSystem(String),
}

impl From<std::io::Error> for RecentFilesError {
    fn from(e: std::io::Error) -> Self {
        RecentFilesError::FileSystem(e.to_string())
    }
}

impl From<toml::de::Error> for RecentFilesError {
    fn from(e: toml::de::Error) -> Self {
        RecentFilesError::StoreReadFailed(e.to_string())
    }
}

impl From<toml::ser::Error> for RecentFilesError {
    fn from(e: toml::ser::Error) -> Self {
        RecentFilesError::StoreWriteFailed(e.to_string())
    }
}
