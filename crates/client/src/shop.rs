//! Composition root tying the API client and both stores together.

use pocketshop_core::{AccessToken, Credentials, Product, ProductId, User};

use crate::api::{ApiClient, Category, LoginOutcome, ProductPage, ProductQuery};
use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::error::{Result, ShopError};
use crate::session::SessionStore;

/// One shopping session: API client, session store and cart store.
///
/// Catalog reads use the session's token, so the caller never handles it.
#[derive(Clone)]
pub struct Shop {
    api: ApiClient,
    session: SessionStore,
    cart: CartStore,
}

impl Shop {
    /// Build a shop from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = ApiClient::new(config)?;
        Ok(Self::with_client(api))
    }

    /// Build a shop around an existing client.
    #[must_use]
    pub fn with_client(api: ApiClient) -> Self {
        Self {
            session: SessionStore::new(api.clone()),
            cart: CartStore::new(),
            api,
        }
    }

    #[must_use]
    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// Log in through the session store.
    ///
    /// # Errors
    ///
    /// Returns an error if the login fails; the session records it too.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        Ok(self.session.login(credentials).await?)
    }

    /// Log out, empty the cart and drop cached catalog responses.
    pub fn logout(&self) {
        self.session.logout();
        self.cart.clear_cart();
        self.api.invalidate_cache();
    }

    fn token(&self) -> Result<AccessToken> {
        self.session.token().ok_or(ShopError::NotAuthenticated)
    }

    /// Profile of the token's owner, fetched fresh.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotAuthenticated` without a session, or an API error.
    pub async fn current_user(&self) -> Result<User> {
        Ok(self.api.current_user(&self.token()?).await?)
    }

    /// Get a page of products.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotAuthenticated` without a session, or an API error.
    pub async fn products(&self, query: &ProductQuery) -> Result<ProductPage> {
        Ok(self.api.products(&self.token()?, query).await?)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotAuthenticated` without a session, or an API error.
    pub async fn product(&self, id: ProductId) -> Result<Product> {
        Ok(self.api.product(&self.token()?, id).await?)
    }

    /// Search products by text.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotAuthenticated` without a session, or an API error.
    pub async fn search_products(&self, q: &str, query: &ProductQuery) -> Result<ProductPage> {
        Ok(self.api.search_products(&self.token()?, q, query).await?)
    }

    /// List product categories.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotAuthenticated` without a session, or an API error.
    pub async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.api.categories(&self.token()?).await?)
    }

    /// Get a page of products in one category.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotAuthenticated` without a session, or an API error.
    pub async fn products_by_category(
        &self,
        slug: &str,
        query: &ProductQuery,
    ) -> Result<ProductPage> {
        Ok(self
            .api
            .products_by_category(&self.token()?, slug, query)
            .await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use url::Url;

    use super::*;

    fn shop() -> Shop {
        let config = ClientConfig::with_api_url(Url::parse("http://127.0.0.1:1").unwrap());
        Shop::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_catalog_requires_session() {
        let shop = shop();
        let err = shop.products(&ProductQuery::default()).await.unwrap_err();
        assert!(matches!(err, ShopError::NotAuthenticated));

        let err = shop.categories().await.unwrap_err();
        assert!(matches!(err, ShopError::NotAuthenticated));
    }

    #[test]
    fn test_logout_clears_cart() {
        let shop = shop();
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": 1, "title": "Essence Mascara Lash Princess", "price": 9.99,
            "thumbnail": "https://cdn.dummyjson.com/1.webp"
        }))
        .unwrap();

        shop.cart().add_to_cart(&product);
        assert_eq!(shop.cart().total_items(), 1);

        shop.logout();
        assert_eq!(shop.cart().total_items(), 0);
        assert!(!shop.session().snapshot().is_authenticated());
    }
}
