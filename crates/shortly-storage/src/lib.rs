//! Key-value store backends and the transactional shortcode table.

pub mod file;
pub mod memory;
pub mod table;

pub use file::FileStore;
pub use memory::InMemoryStore;
pub use shortly_core::{KeyValueStore, StorageError};
pub use table::{ShortcodeTable, Transaction, STORE_KEY};
