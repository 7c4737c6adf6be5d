//! Stock availability data.

use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// Quantity available for purchase for a single catalog identifier.
///
/// The source of truth lives in the inventory service; a `Stock` value is
/// only ever a snapshot read at mutation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    /// Catalog identifier this count applies to.
    pub id: ProductId,
    /// Units available for purchase (may be zero).
    pub amount: u32,
}

impl Stock {
    /// Whether `requested` units can be supplied from this snapshot.
    #[must_use]
    pub const fn covers(&self, requested: u32) -> bool {
        self.amount >= requested
    }
}
