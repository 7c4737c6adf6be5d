//! The cart and its line items.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;
use crate::types::product::Product;

/// A catalog product annotated with the quantity requested.
///
/// Serializes flat, so a persisted line item is a single JSON object:
/// `{id, title, price, image, amount}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Catalog data carried unchanged from the inventory service.
    #[serde(flatten)]
    pub product: Product,
    /// Quantity in the cart. Always >= 1.
    pub amount: u32,
}

impl CartItem {
    /// Create a line item for a product entering the cart (one unit).
    #[must_use]
    pub const fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    /// Catalog identifier of this line item.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price * self.amount
    }
}

/// The shopper's current ordered sequence of line items.
///
/// Entries are unique by [`ProductId`]; quantity changes update `amount` in
/// place rather than adding a second entry. Insertion order is preserved but
/// carries no meaning.
///
/// `Cart` only provides pure accessors and transforms; deciding *whether* a
/// transform is allowed (stock, positivity) is the store's job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<CartItem>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// All line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.0
    }

    /// Iterate over line items.
    pub fn iter(&self) -> std::slice::Iter<'_, CartItem> {
        self.0.iter()
    }

    /// Number of line items (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Look up a line item by catalog identifier.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CartItem> {
        self.0.iter().find(|item| item.id() == id)
    }

    /// Whether a line item with `id` exists.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Append a line item.
    ///
    /// The caller must have verified that `id` is absent; the store is the
    /// only mutator and checks before appending.
    pub fn push(&mut self, item: CartItem) {
        debug_assert!(!self.contains(item.id()), "duplicate line item");
        self.0.push(item);
    }

    /// Remove the line item with `id`, returning it if present.
    pub fn remove(&mut self, id: ProductId) -> Option<CartItem> {
        let index = self.0.iter().position(|item| item.id() == id)?;
        Some(self.0.remove(index))
    }

    /// Increment the amount of the line item with `id` by one unit.
    ///
    /// Returns `false` if no such line item exists.
    pub fn increment(&mut self, id: ProductId) -> bool {
        self.set_with(id, |amount| amount + 1)
    }

    /// Set the amount of the line item with `id`.
    ///
    /// Returns `false` if no such line item exists; the cart is unchanged in
    /// that case.
    pub fn set_amount(&mut self, id: ProductId, amount: u32) -> bool {
        self.set_with(id, |_| amount)
    }

    fn set_with(&mut self, id: ProductId, f: impl FnOnce(u32) -> u32) -> bool {
        match self.0.iter_mut().find(|item| item.id() == id) {
            Some(item) => {
                item.amount = f(item.amount);
                true
            }
            None => false,
        }
    }

    /// Total units across all line items.
    #[must_use]
    pub fn total_units(&self) -> u32 {
        self.0.iter().map(|item| item.amount).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.0
            .iter()
            .map(CartItem::line_total)
            .fold(Price::new(rust_decimal::Decimal::ZERO), |acc, line| {
                Price::new(acc.amount() + line.amount())
            })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartItem;
    type IntoIter = std::slice::Iter<'a, CartItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
