//! Pocket Shop client library.
//!
//! Talks to the DummyJSON demo API and keeps the two pieces of client-side
//! state the shop needs: who is logged in, and what is in the cart.
//!
//! # Components
//!
//! - [`api`] - Typed HTTP client for the remote catalog/auth service
//! - [`session`] - Session store (user, bearer token, loading and error state)
//! - [`cart`] - Cart store wrapping [`pocketshop_core::Cart`]
//! - [`shop`] - Composition root that builds and wires the above
//!
//! # Example
//!
//! ```rust,no_run
//! use pocketshop_client::{ClientConfig, Shop};
//! use pocketshop_core::Credentials;
//!
//! # async fn run() -> Result<(), pocketshop_client::ShopError> {
//! let shop = Shop::new(&ClientConfig::from_env()?)?;
//! shop.login(&Credentials::new("emilys", "emilyspass")).await?;
//!
//! let page = shop.products(&Default::default()).await?;
//! if let Some(product) = page.products.first() {
//!     shop.cart().add_to_cart(product);
//! }
//! println!("{} items", shop.cart().total_items());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod config;
pub mod error;
pub mod session;
pub mod shop;

pub use api::{ApiClient, ApiError, LoginOutcome};
pub use cart::CartStore;
pub use config::{ClientConfig, ConfigError};
pub use error::ShopError;
pub use session::{Session, SessionStatus, SessionStore};
pub use shop::Shop;
