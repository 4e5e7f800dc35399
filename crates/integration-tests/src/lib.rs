//! Integration tests for Pocket Shop.
//!
//! # Running Tests
//!
//! ```bash
//! # Mock-server tests (no network needed)
//! cargo test -p pocketshop-integration-tests
//!
//! # Also hit the live DummyJSON service
//! cargo test -p pocketshop-integration-tests -- --include-ignored
//! ```
//!
//! # Test Categories
//!
//! - `session` - Login/logout against a mock auth endpoint
//! - `catalog` - Product and category reads, bearer header, caching
//! - `shop_flow` - Login, cart, logout end to end
//! - `live_dummyjson` - Same flows against <https://dummyjson.com> (ignored by default)
//!
//! This crate holds the fixtures the tests share.

use pocketshop_client::{ClientConfig, Shop};
use pocketshop_core::Credentials;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Demo account that exists on DummyJSON.
pub const USERNAME: &str = "emilys";
/// Password of [`USERNAME`].
pub const PASSWORD: &str = "emilyspass";

/// Credentials for the demo account.
#[must_use]
pub fn demo_credentials() -> Credentials {
    Credentials::new(USERNAME, PASSWORD)
}

/// Profile fields of the demo account.
#[must_use]
pub fn user_json() -> Value {
    json!({
        "id": 1,
        "username": USERNAME,
        "email": "emily.johnson@x.dummyjson.com",
        "firstName": "Emily",
        "lastName": "Johnson",
        "gender": "female",
        "image": "https://dummyjson.com/icon/emilys/128"
    })
}

/// Successful login body carrying `token` as `accessToken`.
#[must_use]
pub fn login_json(token: &str) -> Value {
    let mut body = user_json();
    if let Value::Object(fields) = &mut body {
        fields.insert("accessToken".to_string(), json!(token));
        fields.insert("refreshToken".to_string(), json!("refresh-token"));
    }
    body
}

/// A minimal catalog product.
#[must_use]
pub fn product_json(id: i64, title: &str, price: f64, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "discountPercentage": 10.48,
        "rating": 2.56,
        "stock": 99,
        "category": category,
        "brand": "Essence",
        "thumbnail": format!("https://cdn.dummyjson.com/products/images/{category}/{id}/thumbnail.webp"),
        "availabilityStatus": "In Stock"
    })
}

/// The first product of the DummyJSON catalog.
#[must_use]
pub fn mascara_json() -> Value {
    product_json(1, "Essence Mascara Lash Princess", 9.99, "beauty")
}

/// A page of products.
#[must_use]
pub fn page_json(products: &[Value], total: u32, skip: u32, limit: u32) -> Value {
    json!({
        "products": products,
        "total": total,
        "skip": skip,
        "limit": limit
    })
}

/// Mount a login endpoint that accepts any credentials and returns `token`.
pub async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_json(token)))
        .mount(server)
        .await;
}

/// Client configuration pointing at `server`.
///
/// # Panics
///
/// Panics if the mock server URI is not a valid URL.
#[must_use]
pub fn config_for(server: &MockServer) -> ClientConfig {
    let url = Url::parse(&server.uri()).unwrap_or_else(|e| panic!("mock server URI: {e}"));
    ClientConfig::with_api_url(url)
}

/// A fresh, logged-out shop talking to `server`.
///
/// # Panics
///
/// Panics if the HTTP client cannot be built.
#[must_use]
pub fn shop_for(server: &MockServer) -> Shop {
    Shop::new(&config_for(server)).unwrap_or_else(|e| panic!("build shop: {e}"))
}

/// A shop already logged in as the demo account with `token`.
///
/// # Panics
///
/// Panics if the login fails.
pub async fn logged_in_shop(server: &MockServer, token: &str) -> Shop {
    mount_login(server, token).await;
    let shop = shop_for(server);
    shop.login(&demo_credentials())
        .await
        .unwrap_or_else(|e| panic!("login against mock server: {e}"));
    shop
}
