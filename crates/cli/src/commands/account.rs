//! Account commands.

use pocketshop_client::{ClientConfig, ShopError};
use pocketshop_core::{Credentials, User};

use super::logged_in_shop;

/// Log in and print the profile the token belongs to.
///
/// # Errors
///
/// Returns an error if the login or the profile request fails.
#[allow(clippy::print_stdout)]
pub async fn whoami(config: &ClientConfig, credentials: &Credentials) -> Result<(), ShopError> {
    let shop = logged_in_shop(config, credentials).await?;
    let user = shop.current_user().await?;
    println!("{}", describe(&user));
    Ok(())
}

fn describe(user: &User) -> String {
    format!(
        "{} ({}) <{}> id={}",
        user.full_name(),
        user.username,
        user.email,
        user.id
    )
}
