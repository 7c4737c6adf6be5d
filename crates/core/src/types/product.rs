//! Catalog product data.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;
use crate::types::price::Price;

/// A product as served by the catalog.
///
/// Display fields (`title`, `price`, `image`) are opaque to the cart logic;
/// they are carried into the cart unchanged when an item is added. The
/// quantity in the cart is NOT part of the catalog - see
/// [`CartItem`](crate::types::cart::CartItem).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique catalog identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
}
