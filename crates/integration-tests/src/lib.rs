//! Integration tests for Cartwright.
//!
//! The tests drive the real [`CartStore`](cartwright_store::store::CartStore)
//! against in-process collaborators:
//!
//! - [`FakeInventory`] - catalog and stock served from hash maps, with
//!   switchable lookup failures
//! - [`RecordingSink`] - captures every failure notification for assertions
//! - `MemoryStorage`/`FileStorage` from the store crate itself
//!
//! # Test Categories
//!
//! - `cart_store` - mutation semantics, invariants, failure signalling
//! - `persistence` - snapshot lifecycle across store restarts

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use rust_decimal::Decimal;

use cartwright_core::{Price, Product, ProductId, Stock};
use cartwright_store::error::CartError;
use cartwright_store::inventory::{InventoryClient, InventoryError};
use cartwright_store::notify::{CartOperation, NotificationSink, failure_message};

/// Build a catalog product with deterministic display fields.
#[must_use]
pub fn product(id: i32) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Price::new(Decimal::new(100 * i64::from(id) + 90, 1)),
        image: format!("https://cdn.example.com/{id}.jpg"),
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> T {
    err.into_inner()
}

/// Inventory service stub: catalog and stock from hash maps.
///
/// `set_failing(true)` makes every lookup fail, standing in for an
/// unreachable service.
#[derive(Default)]
pub struct FakeInventory {
    catalog: Mutex<HashMap<ProductId, Product>>,
    stock: Mutex<HashMap<ProductId, u32>>,
    failing: AtomicBool,
}

impl FakeInventory {
    /// Empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inventory pre-seeded with `(product id, stock)` pairs; catalog data
    /// comes from [`product`].
    #[must_use]
    pub fn with_stock(entries: &[(i32, u32)]) -> Self {
        let inventory = Self::new();
        for &(id, amount) in entries {
            inventory.insert(product(id), amount);
        }
        inventory
    }

    /// Add or replace a catalog entry and its stock count.
    pub fn insert(&self, product: Product, stock: u32) {
        let id = product.id;
        self.catalog
            .lock()
            .unwrap_or_else(poisoned)
            .insert(id, product);
        self.stock.lock().unwrap_or_else(poisoned).insert(id, stock);
    }

    /// Change the stock count of an existing entry.
    pub fn set_stock(&self, id: i32, amount: u32) {
        self.stock
            .lock()
            .unwrap_or_else(poisoned)
            .insert(ProductId::new(id), amount);
    }

    /// Make every subsequent lookup fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_reachable(&self) -> Result<(), InventoryError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(InventoryError::Status(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl InventoryClient for FakeInventory {
    async fn product(&self, id: ProductId) -> Result<Product, InventoryError> {
        self.check_reachable()?;
        self.catalog
            .lock()
            .unwrap_or_else(poisoned)
            .get(&id)
            .cloned()
            .ok_or(InventoryError::NotFound(id))
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, InventoryError> {
        self.check_reachable()?;
        self.stock
            .lock()
            .unwrap_or_else(poisoned)
            .get(&id)
            .map(|&amount| Stock { id, amount })
            .ok_or(InventoryError::NotFound(id))
    }
}

/// A captured failure notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Which mutation failed.
    pub operation: CartOperation,
    /// `Display` form of the underlying [`CartError`].
    pub error: String,
    /// The human-readable message a front end would render.
    pub message: &'static str,
}

/// Sink that records every failure notification.
#[derive(Default)]
pub struct RecordingSink {
    failures: Mutex<Vec<Failure>>,
}

impl RecordingSink {
    /// Empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded failures, oldest first.
    #[must_use]
    pub fn failures(&self) -> Vec<Failure> {
        self.failures.lock().unwrap_or_else(poisoned).clone()
    }

    /// The single recorded failure; panics if there are zero or several.
    #[must_use]
    pub fn only_failure(&self) -> Failure {
        let failures = self.failures();
        assert_eq!(failures.len(), 1, "expected exactly one failure: {failures:?}");
        failures.into_iter().next().expect("checked above")
    }

    /// Whether nothing was signalled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.lock().unwrap_or_else(poisoned).is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn failure(&self, operation: CartOperation, error: &CartError) {
        self.failures.lock().unwrap_or_else(poisoned).push(Failure {
            operation,
            error: error.to_string(),
            message: failure_message(operation, error),
        });
    }
}
