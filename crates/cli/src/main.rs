//! Cartwright CLI - drive the cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! cw-cli show
//!
//! # Add one unit of product 1 (insert or increment)
//! cw-cli add 1
//!
//! # Set the quantity of product 1 to 3
//! cw-cli set 1 3
//!
//! # Remove product 1
//! cw-cli remove 1
//! ```
//!
//! # Environment Variables
//!
//! - `INVENTORY_BASE_URL` - Base URL of the inventory REST API (required)
//! - `CART_STORAGE_PATH` - Cart snapshot file (default: `cart.json`)
//! - `CART_CHECK_STOCK_ON_FIRST_ADD` - Check stock for the first unit too
//!
//! # Commands
//!
//! - `show` - Print the current cart
//! - `add` - Ensure a product is in the cart, adding one unit
//! - `remove` - Remove a product from the cart
//! - `set` - Set the quantity of a product already in the cart

#![cfg_attr(not(test), forbid(unsafe_code))]
// A CLI's deliverable is its stdout/stderr output
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cw-cli")]
#[command(author, version, about = "Cartwright cart CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current cart
    Show,
    /// Ensure a product is in the cart, adding one unit
    Add {
        /// Catalog identifier of the product
        id: i32,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog identifier of the product
        id: i32,
    },
    /// Set the quantity of a product already in the cart
    Set {
        /// Catalog identifier of the product
        id: i32,

        /// Desired quantity (must be positive and within stock)
        amount: u32,
    },
}

// Mutations are serialized on one thread; the store suspends only at
// inventory lookups.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = commands::cart::open_store()?;

    match cli.command {
        Commands::Show => {}
        Commands::Add { id } => store.add_product(id.into()).await,
        Commands::Remove { id } => store.remove_product(id.into()),
        Commands::Set { id, amount } => store.update_product_amount(id.into(), amount).await,
    }

    commands::cart::render(&store.cart());
    Ok(())
}
