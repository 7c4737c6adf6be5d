//! Notification sink - where operation failures are surfaced.
//!
//! The store only decides *when* to signal; rendering is the sink's job.
//! Every failed mutation produces exactly one notification carrying the
//! operation and the error. Successful mutations are signalled through the
//! store's watch channel instead, so consumers of the cart and consumers of
//! failure messages stay decoupled.

use std::fmt;

use tracing::warn;

use crate::error::CartError;

/// The mutation during which a failure occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    /// `add_product`
    Add,
    /// `remove_product`
    Remove,
    /// `update_product_amount`
    UpdateAmount,
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Add => "add",
            Self::Remove => "remove",
            Self::UpdateAmount => "update amount",
        };
        write!(f, "{name}")
    }
}

/// Receives one notification per failed mutation.
pub trait NotificationSink: Send + Sync {
    /// A mutation failed; the cart and its snapshot are unchanged.
    fn failure(&self, operation: CartOperation, error: &CartError);
}

/// One human-readable message per failure kind.
///
/// Stock and positivity violations share a message regardless of the
/// operation; everything else renders the per-operation generic.
#[must_use]
pub fn failure_message(operation: CartOperation, error: &CartError) -> &'static str {
    match error {
        CartError::StockExceeded | CartError::InvalidQuantity => {
            "Requested quantity is out of stock"
        }
        _ => match operation {
            CartOperation::Add => "Failed to add product",
            CartOperation::Remove => "Failed to remove product",
            CartOperation::UpdateAmount => "Failed to update product amount",
        },
    }
}

/// Default sink: structured warnings through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn failure(&self, operation: CartOperation, error: &CartError) {
        warn!(%operation, %error, "cart mutation failed");
    }
}
