pub mod common;
pub mod events;
pub mod file_record;
pub mod preferences;

pub use common::*;
pub use events::*;
pub use file_record::FileRecord;
pub use preferences::*;
