//! Key-value store abstraction with JSON helpers.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use crate::StorageError;

/// Shared, type-erased handle to a backend.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Async key-value backend storing raw strings.
///
/// Implementations must be safe to share between the task that owns the
/// cart and the background writer.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Get the value stored under `key`, or `None` if the key doesn't exist.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key).await
    }
}

/// Automatic JSON serialization on top of any [`KeyValueStore`].
#[async_trait]
pub trait JsonStore: KeyValueStore {
    /// Get and deserialize a value.
    ///
    /// Returns `None` if the key doesn't exist.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let items: Option<Vec<LineItem>> = store.get_json("@GoMarket:products").await?;
    /// ```
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        match self.get(key).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    async fn set_json<T: Serialize + Sync + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.set(key, raw).await
    }
}

impl<S: KeyValueStore + ?Sized> JsonStore for S {}

/// Helper to build storage keys with namespacing.
///
/// # Example
///
/// ```rust,ignore
/// let key = storage_key!("@GoMarket", "products");
/// // Returns "@GoMarket:products"
/// ```
#[macro_export]
macro_rules! storage_key {
    ($prefix:expr, $($part:expr),+) => {{
        let mut key = String::from($prefix);
        $(
            key.push(':');
            key.push_str(&$part.to_string());
        )+
        key
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    #[test]
    fn test_storage_key_single_part() {
        assert_eq!(storage_key!("@GoMarket", "products"), "@GoMarket:products");
    }

    #[test]
    fn test_storage_key_multiple_parts() {
        let user = 42;
        assert_eq!(storage_key!("cart", "user", user), "cart:user:42");
    }

    #[tokio::test]
    async fn test_json_round_trip() {
        let store = MemoryStore::new();
        let entry = Entry {
            name: "apples".to_string(),
            count: 3,
        };

        store.set_json("k", &entry).await.unwrap();
        let loaded: Option<Entry> = store.get_json("k").await.unwrap();

        assert_eq!(loaded, Some(entry));
    }

    #[tokio::test]
    async fn test_get_json_missing_key() {
        let store = MemoryStore::new();
        let loaded: Option<Entry> = store.get_json("missing").await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_get_json_malformed_value() {
        let store = MemoryStore::new();
        store.set("k", "{not json".to_string()).await.unwrap();

        let result: Result<Option<Entry>, _> = store.get_json("k").await;
        assert!(matches!(result, Err(StorageError::SerializeError(_))));
    }

    #[tokio::test]
    async fn test_shared_store_delegates() {
        let shared: SharedStore = Arc::new(MemoryStore::new());
        shared.set("k", "v".to_string()).await.unwrap();
        assert_eq!(shared.get("k").await.unwrap().as_deref(), Some("v"));

        shared.delete("k").await.unwrap();
        assert!(shared.get("k").await.unwrap().is_none());
    }
}
