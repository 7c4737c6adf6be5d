//! The cart state container.
//!
//! [`CartStore`] owns the in-memory cart and is the only writer of the
//! persisted snapshot. Each mutation is a single transaction from the
//! caller's perspective: validate against the latest stock snapshot, compute
//! the next cart, persist it, and only then swap the visible state and
//! publish to watchers. Partial application (memory without storage, or
//! vice versa) is never observable.
//!
//! Mutations suspend only while querying the inventory service; the
//! compute/write-through phase is synchronous, so it is atomic relative to
//! other mutations issued from the same thread. Callers serialize mutations;
//! the store does not arbitrate two concurrent mutations for the same
//! product issued from independent call sites.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument};

use cartwright_core::{Cart, CartItem, ProductId, Stock};

use crate::config::CartPolicy;
use crate::error::CartError;
use crate::inventory::InventoryClient;
use crate::notify::{CartOperation, NotificationSink};
use crate::storage::{CartStorage, StorageError};

/// The cart state container.
///
/// Cheaply cloneable; clones share the same cart, storage, and watch
/// channel. Failed mutations never raise to the caller - they are reported
/// through the [`NotificationSink`] and leave the cart and its snapshot
/// untouched.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    inventory: Arc<dyn InventoryClient>,
    storage: Arc<dyn CartStorage>,
    sink: Arc<dyn NotificationSink>,
    policy: CartPolicy,
    cart: watch::Sender<Cart>,
}

impl CartStore {
    /// Open the store, restoring the persisted cart snapshot.
    ///
    /// An absent snapshot yields an empty cart.
    ///
    /// # Errors
    ///
    /// Returns an error if a snapshot exists but cannot be read or parsed.
    pub fn open(
        inventory: Arc<dyn InventoryClient>,
        storage: Arc<dyn CartStorage>,
        sink: Arc<dyn NotificationSink>,
        policy: CartPolicy,
    ) -> Result<Self, StorageError> {
        let initial = storage.load()?.unwrap_or_default();
        debug!(items = initial.len(), "cart restored from snapshot");
        let (cart, _) = watch::channel(initial);

        Ok(Self {
            inner: Arc::new(CartStoreInner {
                inventory,
                storage,
                sink,
                policy,
                cart,
            }),
        })
    }

    /// The current cart, as a read-only snapshot.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.inner.cart.borrow().clone()
    }

    /// Watch the cart.
    ///
    /// The receiver observes the cart after every successful mutation;
    /// failed mutations publish nothing.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.inner.cart.subscribe()
    }

    /// Ensure a line item for `product_id` exists, newly inserted at one
    /// unit or with its amount incremented by one.
    ///
    /// Catalog data and stock are fetched concurrently. Increments require
    /// stock to cover the new amount; the first unit of a product is only
    /// checked when [`CartPolicy::check_stock_on_first_add`] is set.
    #[instrument(skip(self))]
    pub async fn add_product(&self, product_id: ProductId) {
        if let Err(error) = self.try_add(product_id).await {
            self.inner.sink.failure(CartOperation::Add, &error);
        }
    }

    /// Remove the line item for `product_id`, if present.
    #[instrument(skip(self))]
    pub fn remove_product(&self, product_id: ProductId) {
        if let Err(error) = self.try_remove(product_id) {
            self.inner.sink.failure(CartOperation::Remove, &error);
        }
    }

    /// Set the amount of the line item for `product_id`, subject to stock
    /// and positivity constraints.
    ///
    /// A `product_id` absent from the cart is deliberately not validated:
    /// the transform is then a no-op over existing entries, and the
    /// (unchanged) cart is still written through and published.
    #[instrument(skip(self))]
    pub async fn update_product_amount(&self, product_id: ProductId, amount: u32) {
        if let Err(error) = self.try_update_amount(product_id, amount).await {
            self.inner.sink.failure(CartOperation::UpdateAmount, &error);
        }
    }

    async fn try_add(&self, product_id: ProductId) -> Result<(), CartError> {
        let (product, stock) = tokio::join!(
            self.inner.inventory.product(product_id),
            self.inner.inventory.stock(product_id),
        );
        let (product, stock) = (product?, stock?);

        let mut next = self.cart();
        match next.get(product_id).map(|item| item.amount) {
            None => {
                if self.inner.policy.check_stock_on_first_add {
                    ensure_covers(stock, 1)?;
                }
                next.push(CartItem::new(product));
            }
            Some(existing) => {
                ensure_covers(stock, existing.saturating_add(1))?;
                next.increment(product_id);
            }
        }

        self.commit(next)
    }

    fn try_remove(&self, product_id: ProductId) -> Result<(), CartError> {
        let mut next = self.cart();
        if next.remove(product_id).is_none() {
            return Err(CartError::ProductNotFound);
        }
        self.commit(next)
    }

    async fn try_update_amount(
        &self,
        product_id: ProductId,
        amount: u32,
    ) -> Result<(), CartError> {
        if amount == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let stock = self.inner.inventory.stock(product_id).await?;
        ensure_covers(stock, amount)?;

        let mut next = self.cart();
        next.set_amount(product_id, amount);
        self.commit(next)
    }

    /// Write-through commit: persist the next cart, then swap the visible
    /// state and publish.
    ///
    /// The visible cart is never swapped before persistence succeeds, so the
    /// snapshot and the in-memory cart cannot diverge.
    fn commit(&self, next: Cart) -> Result<(), CartError> {
        self.inner.storage.save(&next)?;
        debug!(items = next.len(), units = next.total_units(), "cart committed");
        self.inner.cart.send_replace(next);
        Ok(())
    }
}

/// Shared stock ceiling check for every mutation path.
fn ensure_covers(stock: Stock, requested: u32) -> Result<(), CartError> {
    if stock.covers(requested) {
        Ok(())
    } else {
        Err(CartError::StockExceeded)
    }
}
