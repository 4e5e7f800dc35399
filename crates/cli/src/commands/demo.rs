//! End-to-end walkthrough: log in, fill a cart, print it, clear it, log out.
//!
//! # Usage
//!
//! ```bash
//! pocketshop demo --product 1 --product 1 --product 5 --times 2
//! ```

use std::collections::BTreeMap;

use pocketshop_client::{ClientConfig, ShopError};
use pocketshop_core::{Cart, Credentials, Price, Product, ProductId};
use tracing::info;

use super::logged_in_shop;

/// Run the walkthrough.
///
/// Each distinct product is fetched once; every occurrence in `product_ids`
/// adds one unit, and the whole list is added `times` times.
///
/// # Errors
///
/// Returns an error if the login or a product request fails.
#[allow(clippy::print_stdout)]
pub async fn run(
    config: &ClientConfig,
    credentials: &Credentials,
    product_ids: &[i64],
    times: u32,
) -> Result<(), ShopError> {
    let shop = logged_in_shop(config, credentials).await?;
    if let Some(user) = shop.session().snapshot().user() {
        println!("Logged in as {}", user.full_name());
    }

    let mut products: BTreeMap<ProductId, Product> = BTreeMap::new();
    for id in product_ids.iter().copied().map(ProductId::new) {
        if !products.contains_key(&id) {
            products.insert(id, shop.product(id).await?);
        }
    }

    for _ in 0..times {
        for id in product_ids.iter().copied().map(ProductId::new) {
            if let Some(product) = products.get(&id) {
                shop.cart().add_to_cart(product);
            }
        }
    }

    for line in render(&shop.cart().snapshot()) {
        println!("{line}");
    }

    shop.cart().clear_cart();
    println!(
        "After clear: {} items, {}",
        shop.cart().total_items(),
        Price::usd(shop.cart().total_price()).display()
    );

    shop.logout();
    info!("Logged out");
    Ok(())
}

/// Cart lines grouped by category, then the totals.
fn render(cart: &Cart) -> Vec<String> {
    let mut lines = Vec::new();

    for (category, group) in cart.lines_by_category() {
        lines.push(format!("[{}]", category.unwrap_or("uncategorized")));
        for line in group {
            lines.push(format!(
                "  {:>3} x {:<40} {:>10}",
                line.quantity(),
                line.product.title,
                Price::usd(line.subtotal()).display()
            ));
        }
    }

    lines.push(format!(
        "Total: {} items, {}",
        cart.total_items(),
        Price::usd(cart.total_price()).display()
    ));
    lines
}
