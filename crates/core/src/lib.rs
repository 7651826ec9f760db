//! RocketShoes Core - Shared cart and catalog types.
//!
//! This crate provides the types used across all RocketShoes components:
//! - `storefront` - Cart store, catalog client, and persistence
//! - `cli` - Command-line driver for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, quantities, prices, and the cart itself

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
