//! RocketShoes Storefront library.
//!
//! Client-side shopping cart for the RocketShoes storefront: the
//! [`CartStore`](cart::CartStore) and the collaborators it is built from.
//!
//! # Modules
//!
//! - [`cart`] - Cart store, operation outcomes, and user-facing messages
//! - [`catalog`] - Product and stock lookups (HTTP client and service traits)
//! - [`storage`] - Persistent key-value backends for the cart snapshot
//! - [`notify`] - Notification channels
//! - [`config`] - Environment-based configuration
//! - [`state`] - Wiring of all of the above from configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod notify;
pub mod state;
pub mod storage;
