//! Cartwright Core - Shared types library.
//!
//! This crate provides the common types used across all Cartwright
//! components:
//! - `store` - Cart state container, storage adapter, and inventory client
//! - `cli` - Command-line front end for driving the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no storage
//! access. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, prices, catalog products, cart line
//!   items, stock levels, and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
