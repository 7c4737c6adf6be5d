//! Cartwright Store - the cart state container and its collaborators.
//!
//! This crate owns the only state in the system with real invariants: the
//! shopper's cart. The [`store::CartStore`] reconciles three pieces of state
//! on every mutation - the in-memory cart, the remote stock snapshot, and
//! the persisted copy - without ever leaving them inconsistent.
//!
//! # Architecture
//!
//! - [`store`] - `CartStore`: add/remove/set-quantity mutations, read-only
//!   snapshots, and a watch channel publishing the cart after every
//!   successful mutation
//! - [`storage`] - write-through persistence of the full cart snapshot
//! - [`inventory`] - the remote catalog/stock collaborator behind a trait
//! - [`notify`] - where operation failures are surfaced for rendering
//! - [`config`] - environment-driven configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cartwright_store::{
//!     config::StoreConfig, inventory::HttpInventoryClient, notify::TracingSink,
//!     storage::FileStorage, store::CartStore,
//! };
//!
//! let config = StoreConfig::from_env()?;
//! let store = CartStore::open(
//!     Arc::new(HttpInventoryClient::new(&config.inventory)),
//!     Arc::new(FileStorage::new(config.storage_path.clone())),
//!     Arc::new(TracingSink),
//!     config.policy,
//! )?;
//!
//! store.add_product(1.into()).await;
//! println!("{} items", store.cart().len());
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod inventory;
pub mod notify;
pub mod storage;
pub mod store;

pub use config::{CartPolicy, StoreConfig};
pub use error::CartError;
pub use inventory::{InventoryClient, InventoryError};
pub use notify::{CartOperation, NotificationSink};
pub use storage::{CartStorage, StorageError};
pub use store::CartStore;
