//! Cart mutation error taxonomy.
//!
//! Every error here is caught at the operation boundary inside
//! [`CartStore`](crate::store::CartStore) and converted into a notification;
//! none propagates to the caller. The cart and its persisted snapshot are
//! left unchanged on every error path.

use thiserror::Error;

use crate::inventory::InventoryError;
use crate::storage::StorageError;

/// Why a cart mutation was refused.
#[derive(Debug, Error)]
pub enum CartError {
    /// Requested quantity (new add, increment, or explicit set) exceeds the
    /// available stock.
    #[error("requested quantity exceeds available stock")]
    StockExceeded,

    /// Requested amount was zero in an update.
    #[error("requested amount must be at least one")]
    InvalidQuantity,

    /// Removal target is not in the cart.
    #[error("product is not in the cart")]
    ProductNotFound,

    /// The inventory service could not be reached or returned an error.
    #[error("inventory lookup failed: {0}")]
    Lookup(#[from] InventoryError),

    /// The snapshot could not be persisted; the visible cart was not swapped.
    #[error("cart persistence failed: {0}")]
    Storage(#[from] StorageError),
}
