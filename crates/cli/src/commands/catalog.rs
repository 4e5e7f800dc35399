//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! pocketshop products --limit 10 --skip 20
//! pocketshop products --search mascara
//! pocketshop products --category groceries --sort price --desc
//! pocketshop product 1
//! pocketshop categories
//! ```

use pocketshop_client::api::{ProductPage, ProductQuery, SortField, SortOrder};
use pocketshop_client::{ClientConfig, ShopError};
use pocketshop_core::{Credentials, Price, Product, ProductId};

use super::logged_in_shop;

/// Options for `products`.
pub struct Listing {
    pub limit: u32,
    pub skip: u32,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<SortField>,
    pub descending: bool,
}

impl Listing {
    fn query(&self) -> ProductQuery {
        ProductQuery {
            sort_by: self.sort,
            order: self
                .sort
                .map(|_| if self.descending { SortOrder::Desc } else { SortOrder::Asc }),
            ..ProductQuery::page(self.limit, self.skip)
        }
    }
}

/// List one page of products.
///
/// # Errors
///
/// Returns an error if the login or the catalog request fails.
#[allow(clippy::print_stdout)]
pub async fn products(
    config: &ClientConfig,
    credentials: &Credentials,
    listing: Listing,
) -> Result<(), ShopError> {
    let shop = logged_in_shop(config, credentials).await?;
    let query = listing.query();

    let page = match (&listing.search, &listing.category) {
        (Some(q), _) => shop.search_products(q, &query).await?,
        (None, Some(slug)) => shop.products_by_category(slug, &query).await?,
        (None, None) => shop.products(&query).await?,
    };

    tracing::info!(
        returned = page.products.len(),
        total = page.total,
        "Fetched products"
    );

    for product in &page.products {
        println!("{}", product_row(product));
    }
    println!("{}", page_footer(&page));
    Ok(())
}

/// Show one product in detail.
///
/// # Errors
///
/// Returns an error if the login fails or the product does not exist.
#[allow(clippy::print_stdout)]
pub async fn product(
    config: &ClientConfig,
    credentials: &Credentials,
    id: i64,
) -> Result<(), ShopError> {
    let shop = logged_in_shop(config, credentials).await?;
    let product = shop.product(ProductId::new(id)).await?;

    for line in product_detail(&product) {
        println!("{line}");
    }
    Ok(())
}

/// List every category slug and name.
///
/// # Errors
///
/// Returns an error if the login or the catalog request fails.
#[allow(clippy::print_stdout)]
pub async fn categories(config: &ClientConfig, credentials: &Credentials) -> Result<(), ShopError> {
    let shop = logged_in_shop(config, credentials).await?;

    for category in shop.categories().await? {
        println!("{:<24} {}", category.slug, category.name);
    }
    Ok(())
}

// =============================================================================
// Formatting
// =============================================================================

fn product_row(product: &Product) -> String {
    format!(
        "{:>4}  {:<40} {:>10}  {}",
        product.id,
        product.title,
        Price::usd(product.price).display(),
        product.category.as_deref().unwrap_or("-"),
    )
}

fn page_footer(page: &ProductPage) -> String {
    let skip = u64::from(page.skip);
    let first = if page.products.is_empty() {
        skip
    } else {
        skip.saturating_add(1)
    };
    let returned = u64::try_from(page.products.len()).unwrap_or(u64::MAX);
    let last = skip.saturating_add(returned);
    let more = if page.has_more() { " (more available)" } else { "" };
    format!("Showing {first}-{last} of {}{more}", page.total)
}

fn product_detail(product: &Product) -> Vec<String> {
    let mut lines = vec![format!("#{} {}", product.id, product.title)];

    let mut price = Price::usd(product.price).display();
    if let (Some(original), Some(pct)) = (product.original_price(), product.discount_percentage) {
        price.push_str(&format!(
            " (was {}, {pct}% off)",
            Price::usd(original).display()
        ));
    }
    lines.push(format!("Price:     {price}"));

    if let Some(brand) = &product.brand {
        lines.push(format!("Brand:     {brand}"));
    }
    if let Some(category) = &product.category {
        lines.push(format!("Category:  {category}"));
    }
    if let Some(status) = &product.availability_status {
        let stock = product.stock.map(|s| format!(" ({s} left)")).unwrap_or_default();
        lines.push(format!("Stock:     {status}{stock}"));
    }
    if let Some(per_weight) = product.price_per_weight() {
        lines.push(format!("Per unit:  {} per weight unit", Price::usd(per_weight).display()));
    }
    if !product.tags.is_empty() {
        lines.push(format!("Tags:      {}", product.tags.join(", ")));
    }
    for (label, value) in [
        ("Shipping:  ", &product.shipping_information),
        ("Returns:   ", &product.return_policy),
        ("Warranty:  ", &product.warranty_information),
    ] {
        if let Some(value) = value {
            lines.push(format!("{label}{value}"));
        }
    }
    if let Some(rating) = product.average_review_rating().or(product.rating) {
        lines.push(format!(
            "Rating:    {rating:.1} from {} reviews",
            product.review_count()
        ));
    }
    if let Some(description) = &product.description {
        lines.push(String::new());
        lines.push(description.clone());
    }
    if !product.reviews.is_empty() {
        lines.push(String::new());
        for review in &product.reviews {
            lines.push(format!(
                "  {}/5 {} ({}, {})",
                review.rating,
                review.comment,
                review.reviewer_name,
                review.date.format("%Y-%m-%d")
            ));
        }
    }
    lines
}
