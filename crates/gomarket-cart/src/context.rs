//! Owning scope for a cart store.
//!
//! Consumers receive a [`CartContext`] explicitly instead of reaching for an
//! ambient global. Asking a context for its cart when no store has been
//! provided, or after the scope was closed, is a programmer error and fails
//! at the access point.

use crate::error::CartError;
use crate::store::CartStore;

/// Scope through which consumers reach a [`CartStore`].
#[derive(Debug, Clone, Default)]
pub struct CartContext {
    store: Option<CartStore>,
}

impl CartContext {
    /// Create a context that owns `store`.
    pub fn new(store: CartStore) -> Self {
        Self { store: Some(store) }
    }

    /// Create a context with no store in scope.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Put a store in scope, returning the one it replaces.
    pub fn provide(&mut self, store: CartStore) -> Option<CartStore> {
        self.store.replace(store)
    }

    /// End the scope, handing back the store.
    pub fn close(&mut self) -> Option<CartStore> {
        self.store.take()
    }

    /// Check if a store is in scope.
    pub fn is_active(&self) -> bool {
        self.store.is_some()
    }

    /// Get the cart store in scope.
    pub fn cart(&self) -> Result<&CartStore, CartError> {
        self.store.as_ref().ok_or(CartError::OutsideScope)
    }

    /// Get the cart store in scope.
    ///
    /// # Panics
    ///
    /// Panics if no store is in scope.
    pub fn use_cart(&self) -> &CartStore {
        match self.store.as_ref() {
            Some(store) => store,
            None => panic!("use_cart called outside of a scope that provides a CartStore"),
        }
    }
}
