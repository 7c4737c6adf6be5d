//! Cart commands: wiring the store and rendering its state.
//!
//! # Environment Variables
//!
//! - `INVENTORY_BASE_URL` - Base URL of the inventory REST API
//! - `CART_STORAGE_PATH` - Cart snapshot file (default: `cart.json`)
//! - `CART_CHECK_STOCK_ON_FIRST_ADD` - Check stock for the first unit too

use std::sync::Arc;

use cartwright_core::Cart;
use cartwright_store::config::StoreConfig;
use cartwright_store::error::CartError;
use cartwright_store::inventory::HttpInventoryClient;
use cartwright_store::notify::{CartOperation, NotificationSink, failure_message};
use cartwright_store::storage::FileStorage;
use cartwright_store::store::CartStore;

/// Failure messages go to stderr, the user-facing channel of this front end.
struct ConsoleSink;

impl NotificationSink for ConsoleSink {
    fn failure(&self, operation: CartOperation, error: &CartError) {
        tracing::debug!(%operation, %error, "cart mutation failed");
        eprintln!("{}", failure_message(operation, error));
    }
}

/// Build the cart store from environment configuration.
///
/// # Errors
///
/// Returns an error if configuration is missing/invalid or an existing cart
/// snapshot cannot be read.
pub fn open_store() -> Result<CartStore, Box<dyn std::error::Error>> {
    let config = StoreConfig::from_env()?;

    let store = CartStore::open(
        Arc::new(HttpInventoryClient::new(&config.inventory)),
        Arc::new(FileStorage::new(config.storage_path.clone())),
        Arc::new(ConsoleSink),
        config.policy,
    )?;

    Ok(store)
}

/// Print the cart, one line item per row, with a subtotal.
pub fn render(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }

    for item in cart {
        println!(
            "{:>6}  {:<40}  {:>3} x {:>9} = {:>9}",
            item.id().to_string(),
            item.product.title,
            item.amount,
            item.product.price.display(),
            item.line_total().display(),
        );
    }
    println!(
        "{} item(s), {} unit(s), subtotal {}",
        cart.len(),
        cart.total_units(),
        cart.subtotal().display(),
    );
}
