// Shared helpers

pub mod constants;
pub mod files;
pub mod storage;
pub mod validation;

pub use constants::*;
pub use storage::{BrowserStorage, LocalStorageBackend, MemoryBackend, StorageBackend};
pub use validation::{validate_email, validate_new_password, validate_upload};
