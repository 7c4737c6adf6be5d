//! Inventory Query Client - the remote catalog/stock collaborator.
//!
//! The cart store never owns availability data; it asks this collaborator
//! for the latest catalog entry and stock count at mutation time. The two
//! lookups are independently resolvable so the store can issue them
//! concurrently.
//!
//! No retry or backoff policy is applied here: a failed lookup surfaces as
//! an operation failure and the caller decides whether to try again.

mod http;

pub use http::HttpInventoryClient;

use async_trait::async_trait;
use thiserror::Error;

use cartwright_core::{Product, ProductId, Stock};

/// Errors that can occur when querying the inventory service.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// HTTP request failed (transport or response decoding).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),

    /// No catalog entry or stock record for this identifier.
    #[error("not found: product {0}")]
    NotFound(ProductId),
}

/// Read access to the inventory service.
///
/// Both lookups must be resolvable independently of each other.
#[async_trait]
pub trait InventoryClient: Send + Sync {
    /// Fetch the catalog entry for `id`.
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError>;

    /// Fetch the current stock count for `id`.
    ///
    /// Implementations must return a fresh snapshot; the store relies on
    /// reading the latest count at mutation time.
    async fn stock(&self, id: ProductId) -> Result<Stock, InventoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_error_display() {
        let err = InventoryError::NotFound(ProductId::new(7));
        assert_eq!(err.to_string(), "not found: product 7");

        let err = InventoryError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "unexpected status: 500 Internal Server Error");
    }
}
