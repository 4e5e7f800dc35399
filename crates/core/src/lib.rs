//! Pocket Shop Core - Shared types library.
//!
//! This crate provides the types shared by every Pocket Shop component:
//! - `client` - API client, session store and cart store
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no HTTP
//! clients, no async. The shopping cart lives here as a plain value so its
//! invariants can be tested without a runtime.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, credentials, users and products
//! - [`cart`] - The cart mapping and its derived totals

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartLine, CartProduct};
pub use types::*;
