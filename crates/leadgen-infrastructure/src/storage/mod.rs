//! Storage layer for atomic file operations and persisted credentials.

mod atomic_file;
mod config_storage;
mod credential_storage;
mod memory_credential_store;

pub use atomic_file::{AtomicFile, AtomicFileError, FileLock};
pub use config_storage::ConfigStorage;
pub use credential_storage::FileCredentialStore;
pub use memory_credential_store::InMemoryCredentialStore;
