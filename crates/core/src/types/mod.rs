//! Core types for Pocket Shop.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod credential;
pub mod id;
pub mod price;
pub mod product;
pub mod status;
pub mod user;

pub use credential::{AccessToken, Credentials};
pub use id::*;
pub use price::Price;
pub use product::{Dimensions, Product, Review};
pub use status::AvailabilityStatus;
pub use user::User;
