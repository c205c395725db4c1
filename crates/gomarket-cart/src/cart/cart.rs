//! Cart and line item types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// A product as offered to the cart, without a quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDescriptor {
    /// Product identifier.
    pub id: ProductId,
    /// Product title (denormalized for display).
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
}

impl ProductDescriptor {
    /// Create a new product descriptor.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
        }
    }
}

/// A line item in the cart.
///
/// The serialized form is the persisted wire format:
/// `{"id", "title", "image_url", "price", "quantity"}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItem {
    /// Product identifier; unique within a cart.
    pub id: ProductId,
    /// Product title.
    pub title: String,
    /// Product image URL.
    pub image_url: String,
    /// Unit price.
    pub price: f64,
    /// Quantity, at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Create a line item with quantity 1 from a descriptor.
    pub fn from_descriptor(product: ProductDescriptor) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }
}

/// A shopping cart: line items in insertion order, at most one per product id.
///
/// Serializes as a bare array of line items. There is no `Deserialize`;
/// persisted arrays go through [`Cart::from_items`] so the invariant holds.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from a persisted sequence of items.
    ///
    /// Items with quantity 0 are dropped. Repeated ids are folded into the
    /// first occurrence, summing quantities and keeping the first metadata.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for item in items.into_iter().filter(|i| i.quantity > 0) {
            cart.absorb(item);
        }
        cart
    }

    /// Add one unit of a product.
    ///
    /// An existing line item keeps its metadata and gains one unit; the
    /// descriptor is only used for identity. A new product is appended with
    /// quantity 1. Returns the resulting quantity.
    pub fn add(&mut self, product: ProductDescriptor) -> u32 {
        if let Some(existing) = self.find_mut(&product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return existing.quantity;
        }

        self.items.push(LineItem::from_descriptor(product));
        1
    }

    /// Add one unit to an existing item.
    ///
    /// Returns the new quantity, or `None` if the id is not in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Option<u32> {
        let item = self.find_mut(id)?;
        item.quantity = item.quantity.saturating_add(1);
        Some(item.quantity)
    }

    /// Remove one unit from an existing item, dropping it at zero.
    ///
    /// Returns the new quantity (0 means the item was removed), or `None`
    /// if the id is not in the cart.
    pub fn decrement(&mut self, id: &ProductId) -> Option<u32> {
        let index = self.items.iter().position(|i| &i.id == id)?;
        let item = &mut self.items[index];
        if item.quantity > 1 {
            item.quantity -= 1;
            Some(item.quantity)
        } else {
            self.items.remove(index);
            Some(0)
        }
    }

    /// Merge another cart into this one.
    ///
    /// Shared ids sum their quantities (saturating) and keep this cart's
    /// metadata; new ids are appended in the other cart's order.
    pub fn merge(&mut self, other: Cart) {
        for item in other.items {
            self.absorb(item);
        }
    }

    /// Get an item by product id.
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Items in cart order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Consume the cart and return its items.
    pub fn into_items(self) -> Vec<LineItem> {
        self.items
    }

    /// Get total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Get number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn find_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| &i.id == id)
    }

    fn absorb(&mut self, item: LineItem) {
        match self.find_mut(&item.id) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> ProductDescriptor {
        ProductDescriptor::new(
            id,
            format!("Product {}", id),
            format!("https://img/{}", id),
            10.0,
        )
    }

    fn ids(cart: &Cart) -> Vec<(&str, u32)> {
        cart.items()
            .iter()
            .map(|i| (i.id.as_str(), i.quantity))
            .collect()
    }

    #[test]
    fn test_cart_creation() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_new_item_appends() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(product("A")), 1);
        assert_eq!(cart.add(product("B")), 1);
        assert_eq!(ids(&cart), vec![("A", 1), ("B", 1)]);
    }

    #[test]
    fn test_add_same_item_increases_quantity() {
        let mut cart = Cart::new();
        cart.add(product("A"));
        assert_eq!(cart.add(product("A")), 2);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_keeps_first_metadata() {
        let mut cart = Cart::new();
        cart.add(ProductDescriptor::new("A", "Original", "u1", 10.0));
        cart.add(ProductDescriptor::new("A", "Renamed", "u2", 99.0));

        let item = cart.get(&ProductId::new("A")).unwrap();
        assert_eq!(item.title, "Original");
        assert_eq!(item.image_url, "u1");
        assert_eq!(item.price, 10.0);
        assert_eq!(item.quantity, 2);
    }

    #[test]
    fn test_increment() {
        let mut cart = Cart::new();
        cart.add(product("A"));
        assert_eq!(cart.increment(&ProductId::new("A")), Some(2));
    }

    #[test]
    fn test_increment_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("A"));
        let before = cart.clone();

        assert_eq!(cart.increment(&ProductId::new("Z")), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_from_three() {
        let mut cart = Cart::new();
        cart.add(product("A"));
        cart.add(product("A"));
        cart.add(product("A"));

        assert_eq!(cart.decrement(&ProductId::new("A")), Some(2));
        assert_eq!(ids(&cart), vec![("A", 2)]);
    }

    #[test]
    fn test_decrement_at_one_removes() {
        let mut cart = Cart::new();
        cart.add(product("A"));
        cart.add(product("B"));
        cart.add(product("C"));

        assert_eq!(cart.decrement(&ProductId::new("B")), Some(0));
        assert!(cart.get(&ProductId::new("B")).is_none());
        assert_eq!(ids(&cart), vec![("A", 1), ("C", 1)]);
    }

    #[test]
    fn test_decrement_missing_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("A"));
        let before = cart.clone();

        assert_eq!(cart.decrement(&ProductId::new("Z")), None);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_quantity_saturates() {
        let mut cart = Cart::from_items(vec![LineItem {
            quantity: u32::MAX,
            ..LineItem::from_descriptor(product("A"))
        }]);

        assert_eq!(cart.increment(&ProductId::new("A")), Some(u32::MAX));
        assert_eq!(cart.add(product("A")), u32::MAX);
    }

    #[test]
    fn test_from_items_drops_zero_and_folds_duplicates() {
        let a = LineItem::from_descriptor(product("A"));
        let items = vec![
            LineItem { quantity: 2, ..a.clone() },
            LineItem::from_descriptor(product("B")),
            LineItem { quantity: 0, ..LineItem::from_descriptor(product("C")) },
            LineItem { quantity: 3, title: "Later".to_string(), ..a },
        ];

        let cart = Cart::from_items(items);
        assert_eq!(ids(&cart), vec![("A", 5), ("B", 1)]);
        assert_eq!(cart.get(&ProductId::new("A")).unwrap().title, "Product A");
    }

    #[test]
    fn test_merge() {
        let mut base = Cart::new();
        base.add(product("A"));
        base.add(product("B"));

        let mut other = Cart::new();
        other.add(ProductDescriptor::new("B", "Other B", "x", 1.0));
        other.add(product("C"));

        base.merge(other);
        assert_eq!(ids(&base), vec![("A", 1), ("B", 2), ("C", 1)]);
        assert_eq!(base.get(&ProductId::new("B")).unwrap().title, "Product B");
    }

    #[test]
    fn test_serialized_format() {
        let mut cart = Cart::new();
        cart.add(ProductDescriptor::new("A", "T", "u", 10.0));

        let json: serde_json::Value = serde_json::to_value(&cart).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"id": "A", "title": "T", "image_url": "u", "price": 10.0, "quantity": 1}
            ])
        );
    }

    #[test]
    fn test_deserializes_integer_price() {
        let raw = r#"[{"id":"A","title":"T","image_url":"u","price":10,"quantity":2}]"#;
        let items: Vec<LineItem> = serde_json::from_str(raw).unwrap();
        assert_eq!(items[0].price, 10.0);
        assert_eq!(items[0].quantity, 2);
    }
}
