//! Mutation semantics, invariants, and failure signalling.
//!
//! Property names follow the store's contract: uniqueness of line items,
//! positivity of amounts, write-through persistence, the stock ceiling, and
//! idempotent removal failure.

use std::sync::Arc;

use cartwright_core::{Cart, ProductId};
use cartwright_store::config::CartPolicy;
use cartwright_store::notify::CartOperation;
use cartwright_store::storage::{CartStorage, MemoryStorage};
use cartwright_store::store::CartStore;

use cartwright_integration_tests::{FakeInventory, RecordingSink};

struct Harness {
    store: CartStore,
    inventory: Arc<FakeInventory>,
    storage: Arc<MemoryStorage>,
    sink: Arc<RecordingSink>,
}

fn harness(entries: &[(i32, u32)]) -> Harness {
    harness_with_policy(entries, CartPolicy::default())
}

fn harness_with_policy(entries: &[(i32, u32)], policy: CartPolicy) -> Harness {
    let inventory = Arc::new(FakeInventory::with_stock(entries));
    let storage = Arc::new(MemoryStorage::new());
    let sink = Arc::new(RecordingSink::new());

    let store = CartStore::open(
        Arc::clone(&inventory) as _,
        Arc::clone(&storage) as _,
        Arc::clone(&sink) as _,
        policy,
    )
    .expect("open store");

    Harness {
        store,
        inventory,
        storage,
        sink,
    }
}

fn amounts(cart: &Cart) -> Vec<(i32, u32)> {
    cart.iter()
        .map(|item| (item.id().as_i32(), item.amount))
        .collect()
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_add_to_empty_cart_inserts_one_unit() {
    let h = harness(&[(1, 5)]);

    h.store.add_product(ProductId::new(1)).await;

    assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    assert!(h.sink.is_empty());
}

#[tokio::test]
async fn test_add_at_stock_ceiling_signals_out_of_stock() {
    let h = harness(&[(1, 1)]);
    h.store.add_product(ProductId::new(1)).await;
    let snapshot = h.storage.raw_snapshot();

    h.store.add_product(ProductId::new(1)).await;

    assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    assert_eq!(h.storage.raw_snapshot(), snapshot);
    let failure = h.sink.only_failure();
    assert_eq!(failure.operation, CartOperation::Add);
    assert_eq!(failure.message, "Requested quantity is out of stock");
}

#[tokio::test]
async fn test_update_to_zero_signals_invalid_quantity() {
    let h = harness(&[(1, 5)]);
    h.store.add_product(ProductId::new(1)).await;
    h.store.add_product(ProductId::new(1)).await;
    let snapshot = h.storage.raw_snapshot();

    h.store.update_product_amount(ProductId::new(1), 0).await;

    assert_eq!(amounts(&h.store.cart()), vec![(1, 2)]);
    assert_eq!(h.storage.raw_snapshot(), snapshot);
    let failure = h.sink.only_failure();
    assert_eq!(failure.operation, CartOperation::UpdateAmount);
    assert_eq!(failure.message, "Requested quantity is out of stock");
    assert!(failure.error.contains("at least one"));
}

#[tokio::test]
async fn test_remove_excludes_only_the_matching_line() {
    let h = harness(&[(1, 5), (2, 5)]);
    h.store.add_product(ProductId::new(1)).await;
    h.store.add_product(ProductId::new(2)).await;

    h.store.remove_product(ProductId::new(1));

    let cart = h.store.cart();
    assert_eq!(amounts(&cart), vec![(2, 1)]);
    assert_eq!(h.storage.load().expect("load"), Some(cart));
    assert!(h.sink.is_empty());
}

#[tokio::test]
async fn test_open_without_snapshot_starts_empty() {
    let h = harness(&[]);
    assert!(h.store.cart().is_empty());
    assert!(h.sink.is_empty());
}

// =============================================================================
// Properties
// =============================================================================

#[tokio::test]
async fn test_repeated_adds_never_duplicate_line_items() {
    let h = harness(&[(1, 10), (2, 10), (3, 10)]);

    for id in [1, 1, 2, 3, 2, 1, 3, 3] {
        h.store.add_product(ProductId::new(id)).await;
    }

    let cart = h.store.cart();
    let mut ids: Vec<i32> = cart.iter().map(|item| item.id().as_i32()).collect();
    assert_eq!(ids, vec![1, 2, 3], "insertion order is preserved");
    ids.dedup();
    assert_eq!(ids.len(), cart.len());
}

#[tokio::test]
async fn test_amounts_stay_positive_across_mixed_mutations() {
    let h = harness(&[(1, 10), (2, 10)]);

    h.store.add_product(ProductId::new(1)).await;
    h.store.add_product(ProductId::new(2)).await;
    h.store.update_product_amount(ProductId::new(1), 7).await;
    h.store.update_product_amount(ProductId::new(2), 0).await; // refused
    h.store.add_product(ProductId::new(2)).await;
    h.store.remove_product(ProductId::new(1));

    for item in &h.store.cart() {
        assert!(item.amount >= 1);
    }
}

#[tokio::test]
async fn test_snapshot_equals_cart_after_every_successful_mutation() {
    let h = harness(&[(1, 10), (2, 10)]);

    h.store.add_product(ProductId::new(1)).await;
    assert_eq!(h.storage.load().expect("load"), Some(h.store.cart()));

    h.store.add_product(ProductId::new(2)).await;
    assert_eq!(h.storage.load().expect("load"), Some(h.store.cart()));

    h.store.update_product_amount(ProductId::new(1), 4).await;
    assert_eq!(h.storage.load().expect("load"), Some(h.store.cart()));

    h.store.remove_product(ProductId::new(2));
    assert_eq!(h.storage.load().expect("load"), Some(h.store.cart()));
}

#[tokio::test]
async fn test_stock_ceiling_bounds_update_amount() {
    let h = harness(&[(1, 3)]);
    h.store.add_product(ProductId::new(1)).await;

    // Within the ceiling: allowed, including the exact stock count.
    h.store.update_product_amount(ProductId::new(1), 3).await;
    assert_eq!(amounts(&h.store.cart()), vec![(1, 3)]);
    assert!(h.sink.is_empty());

    // One past the ceiling: refused, state untouched.
    h.store.update_product_amount(ProductId::new(1), 4).await;
    assert_eq!(amounts(&h.store.cart()), vec![(1, 3)]);
    let failure = h.sink.only_failure();
    assert!(failure.error.contains("exceeds available stock"));
}

#[tokio::test]
async fn test_stock_changes_are_read_at_mutation_time() {
    let h = harness(&[(1, 1)]);
    h.store.add_product(ProductId::new(1)).await;

    // Restock between mutations; the next increment must see it.
    h.inventory.set_stock(1, 2);
    h.store.add_product(ProductId::new(1)).await;

    assert_eq!(amounts(&h.store.cart()), vec![(1, 2)]);
    assert!(h.sink.is_empty());
}

#[tokio::test]
async fn test_remove_of_absent_product_never_mutates() {
    let h = harness(&[(1, 5)]);
    h.store.add_product(ProductId::new(1)).await;
    let snapshot = h.storage.raw_snapshot();

    h.store.remove_product(ProductId::new(42));
    h.store.remove_product(ProductId::new(42));

    assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    assert_eq!(h.storage.raw_snapshot(), snapshot);
    let failures = h.sink.failures();
    assert_eq!(failures.len(), 2);
    assert!(
        failures
            .iter()
            .all(|f| f.message == "Failed to remove product")
    );
}

// =============================================================================
// Failure handling
// =============================================================================

#[tokio::test]
async fn test_unreachable_inventory_fails_add_without_mutation() {
    let h = harness(&[(1, 5)]);
    h.inventory.set_failing(true);

    h.store.add_product(ProductId::new(1)).await;

    assert!(h.store.cart().is_empty());
    assert!(h.storage.raw_snapshot().is_none());
    let failure = h.sink.only_failure();
    assert_eq!(failure.operation, CartOperation::Add);
    assert_eq!(failure.message, "Failed to add product");
}

#[tokio::test]
async fn test_unreachable_inventory_fails_update_without_mutation() {
    let h = harness(&[(1, 5)]);
    h.store.add_product(ProductId::new(1)).await;
    h.inventory.set_failing(true);
    let snapshot = h.storage.raw_snapshot();

    h.store.update_product_amount(ProductId::new(1), 2).await;

    assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    assert_eq!(h.storage.raw_snapshot(), snapshot);
    assert_eq!(h.sink.only_failure().message, "Failed to update product amount");
}

#[tokio::test]
async fn test_remove_works_while_inventory_is_down() {
    // Removal consults no inventory data.
    let h = harness(&[(1, 5)]);
    h.store.add_product(ProductId::new(1)).await;
    h.inventory.set_failing(true);

    h.store.remove_product(ProductId::new(1));

    assert!(h.store.cart().is_empty());
    assert!(h.sink.is_empty());
}

// =============================================================================
// Documented edge cases
// =============================================================================

#[tokio::test]
async fn test_first_add_is_allowed_at_zero_stock_by_default() {
    let h = harness(&[(1, 0)]);

    h.store.add_product(ProductId::new(1)).await;

    assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    assert!(h.sink.is_empty());
}

#[tokio::test]
async fn test_first_add_respects_stock_when_policy_enabled() {
    let h = harness_with_policy(
        &[(1, 0)],
        CartPolicy {
            check_stock_on_first_add: true,
        },
    );

    h.store.add_product(ProductId::new(1)).await;

    assert!(h.store.cart().is_empty());
    assert!(h.storage.raw_snapshot().is_none());
    assert_eq!(h.sink.only_failure().message, "Requested quantity is out of stock");
}

#[tokio::test]
async fn test_update_of_absent_product_is_a_published_no_op() {
    // Documented behavior: the transform is a no-op over existing entries,
    // and the unchanged cart is still written through and published.
    let h = harness(&[(1, 5), (9, 5)]);
    h.store.add_product(ProductId::new(1)).await;
    let mut watcher = h.store.subscribe();
    watcher.mark_unchanged();

    h.store.update_product_amount(ProductId::new(9), 2).await;

    assert_eq!(amounts(&h.store.cart()), vec![(1, 1)]);
    assert!(h.sink.is_empty(), "no failure is signalled");
    assert!(watcher.has_changed().expect("sender alive"));
    assert_eq!(h.storage.load().expect("load"), Some(h.store.cart()));
}

// =============================================================================
// Publication
// =============================================================================

#[tokio::test]
async fn test_watchers_observe_each_successful_mutation() {
    let h = harness(&[(1, 5)]);
    let mut watcher = h.store.subscribe();
    watcher.mark_unchanged();

    h.store.add_product(ProductId::new(1)).await;
    assert!(watcher.has_changed().expect("sender alive"));
    assert_eq!(watcher.borrow_and_update().total_units(), 1);

    h.store.add_product(ProductId::new(1)).await;
    assert!(watcher.has_changed().expect("sender alive"));
    assert_eq!(watcher.borrow_and_update().total_units(), 2);
}

#[tokio::test]
async fn test_failed_mutations_publish_nothing() {
    let h = harness(&[(1, 1)]);
    h.store.add_product(ProductId::new(1)).await;

    let mut watcher = h.store.subscribe();
    watcher.mark_unchanged();

    h.store.add_product(ProductId::new(1)).await; // out of stock
    h.store.remove_product(ProductId::new(42)); // absent
    h.store.update_product_amount(ProductId::new(1), 0).await; // invalid

    assert!(!watcher.has_changed().expect("sender alive"));
}

#[tokio::test]
async fn test_clones_share_one_cart() {
    let h = harness(&[(1, 5)]);
    let clone = h.store.clone();

    h.store.add_product(ProductId::new(1)).await;

    assert_eq!(amounts(&clone.cart()), vec![(1, 1)]);
}
