//! Async key-value persistence for GoMarket.
//!
//! The backends store raw strings. Encoding is layered on top through
//! [`JsonStore`], which any [`KeyValueStore`] gets for free.
//!
//! # Example
//!
//! ```rust,ignore
//! use gomarket_storage::{storage_key, JsonStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let key = storage_key!("@GoMarket", "products");
//!
//! store.set_json(&key, &vec![1, 2, 3]).await?;
//! let items: Option<Vec<u32>> = store.get_json(&key).await?;
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StorageError;
pub use file::FileStore;
pub use kv::{JsonStore, KeyValueStore, SharedStore};
pub use memory::MemoryStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileStore, JsonStore, KeyValueStore, MemoryStore, SharedStore, StorageError};
}
