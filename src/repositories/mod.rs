//! Persistence and filesystem access.

pub mod file_store;
pub mod file_system;
pub mod preference_store;
#[cfg(windows)]
pub mod registry;

pub use file_store::TomlFileStore;
pub use file_system::FolderBackup;
pub use preference_store::{MemoryStore, PreferenceStore};
#[cfg(windows)]
pub use registry::RegistryStore;

use crate::error::Result;
use std::rc::Rc;
use tracing::info;

/// The platform's natural per-user store: the registry on Windows,
/// a TOML file in the config directory elsewhere.
pub fn open_default_store(organisation: &str, application: &str) -> Result<Rc<dyn PreferenceStore>> {
    #[cfg(windows)]
    {
        let store = RegistryStore::open(organisation, application)?;
        info!("Using registry preferences for {}/{}", organisation, application);
        Ok(Rc::new(store))
    }

    #[cfg(not(windows))]
    {
        let store = TomlFileStore::open_in_config_dir(organisation, application)?;
        info!("Using preferences file {}", store.path().display());
        Ok(Rc::new(store))
    }
}
