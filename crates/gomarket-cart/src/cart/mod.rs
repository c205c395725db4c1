//! Shopping cart module.
//!
//! Contains the ordered, id-unique line item collection.

mod cart;

pub use cart::{Cart, LineItem, ProductDescriptor};
