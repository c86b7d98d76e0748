pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::InMemoryStore;
pub use qrlink_core::store::{LinkStore, Result};
pub use qrlink_core::StorageError;
