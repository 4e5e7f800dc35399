//! Subcommand implementations.

pub mod account;
pub mod catalog;
pub mod demo;

use pocketshop_client::{ClientConfig, Shop, ShopError};
use pocketshop_core::Credentials;

/// Build a shop and log in.
///
/// A failed login is reported with the same message the session stores.
pub async fn logged_in_shop(
    config: &ClientConfig,
    credentials: &Credentials,
) -> Result<Shop, ShopError> {
    let shop = Shop::new(config)?;
    shop.login(credentials).await?;
    Ok(shop)
}
