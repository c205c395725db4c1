//! Cart error types.

use gomarket_storage::StorageError;
use thiserror::Error;

/// Errors that can occur while setting up or reaching a cart.
///
/// Cart mutations themselves never fail; storage problems are logged and
/// swallowed by [`CartStore`](crate::CartStore).
#[derive(Error, Debug)]
pub enum CartError {
    /// The cart was requested from a context that has no store in scope.
    #[error("cart accessed outside of its owning scope")]
    OutsideScope,

    /// The background writer needs a Tokio runtime.
    #[error("no async runtime available for the cart writer")]
    NoRuntime,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The backend failed to read or decode the persisted cart.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_error_converts() {
        let err: CartError = StorageError::StoreError("offline".to_string()).into();
        assert!(matches!(err, CartError::Storage(StorageError::StoreError(_))));
        assert_eq!(err.to_string(), "Storage error: Store operation failed: offline");
    }
}
