//! Persisted shopping cart state for GoMarket.
//!
//! - **Cart**: ordered line items, at most one per product id
//! - **CartStore**: the cart state manager, mirrored to a key-value store
//!   after every mutation through a single ordered writer
//! - **CartContext**: the explicit scope consumers reach the store through
//!
//! # Example
//!
//! ```rust,ignore
//! use gomarket_cart::prelude::*;
//! use gomarket_storage::FileStore;
//!
//! let store = FileStore::open(".gomarket")?;
//! let cart = CartStore::open(store, &CartConfig::default()).await?;
//! let ctx = CartContext::new(cart);
//!
//! let cart = ctx.cart()?;
//! cart.add_to_cart(ProductDescriptor::new("A", "Tee", "https://img/a", 10.0));
//! cart.decrement(&ProductId::new("A"));
//! cart.flush().await;
//! ```

pub mod cart;
pub mod config;
pub mod context;
pub mod error;
pub mod ids;
pub mod store;

pub use cart::{Cart, LineItem, ProductDescriptor};
pub use config::CartConfig;
pub use context::CartContext;
pub use error::CartError;
pub use ids::ProductId;
pub use store::CartStore;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cart::{Cart, LineItem, ProductDescriptor};
    pub use crate::config::CartConfig;
    pub use crate::context::CartContext;
    pub use crate::error::CartError;
    pub use crate::ids::ProductId;
    pub use crate::store::CartStore;
}
