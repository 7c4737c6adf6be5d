//! Type-safe price representation using decimal arithmetic.

use std::ops::Mul;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price in the catalog's (single) currency.
///
/// Serialized transparently as a JSON number, matching the inventory API
/// payloads and the persisted cart snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    /// Line total: unit price times quantity.
    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}
