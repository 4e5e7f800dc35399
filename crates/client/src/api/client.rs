//! HTTP client implementation.
//!
//! Uses `reqwest` for HTTP and caches read-only catalog responses using
//! `moka` (TTL from [`ClientConfig::cache_ttl`]).

use std::sync::Arc;

use moka::future::Cache;
use pocketshop_core::{AccessToken, Credentials, Product, ProductId, User};
use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::ApiError;
use super::auth;
use super::cache::{CacheKey, CacheValue};
use super::types::{Category, ErrorBody, LoginOutcome, ProductPage, ProductQuery};
use crate::config::ClientConfig;

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the remote catalog/auth service.
///
/// Cheap to clone; clones share the connection pool and the cache.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<CacheKey, CacheValue>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        // Url::join replaces the last segment unless the base ends in '/'
        let mut base_url = config.api_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url,
                cache,
            }),
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Execute an authenticated GET and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &AccessToken,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self
            .inner
            .client
            .get(self.url(path)?)
            .header(AUTHORIZATION, token.bearer())
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            return Err(rejection(response).await);
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse API response"
            );
            ApiError::Malformed(e.to_string())
        })
    }

    // =========================================================================
    // Auth Methods (never cached)
    // =========================================================================

    /// Log in with username and password.
    ///
    /// # Errors
    ///
    /// See [`ApiError`]; a wrong password surfaces as `ApiError::Rejected`.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        auth::login(&self.inner.client, self.url("auth/login")?, credentials).await
    }

    /// Get the profile that owns `token`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip(self, token))]
    pub async fn current_user(&self, token: &AccessToken) -> Result<User, ApiError> {
        self.get_json("auth/me", token, &[]).await
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get a page of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn products(
        &self,
        token: &AccessToken,
        query: &ProductQuery,
    ) -> Result<ProductPage, ApiError> {
        let cache_key = CacheKey::Products(query.clone());

        if let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(page);
        }

        let page: ProductPage = self.get_json("products", token, &query.params()).await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(page.clone()))
            .await;

        Ok(page)
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no product has this id, or another
    /// error if the API request fails.
    #[instrument(skip(self, token), fields(product_id = %id))]
    pub async fn product(&self, token: &AccessToken, id: ProductId) -> Result<Product, ApiError> {
        let cache_key = CacheKey::Product(id);

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let product: Product = self
            .get_json(&format!("products/{id}"), token, &[])
            .await
            .map_err(|e| match e {
                ApiError::NotFound(_) => ApiError::NotFound(format!("Product {id}")),
                other => other,
            })?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Full-text search over products. Results are not cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token), fields(q = %q))]
    pub async fn search_products(
        &self,
        token: &AccessToken,
        q: &str,
        query: &ProductQuery,
    ) -> Result<ProductPage, ApiError> {
        let mut params = vec![("q", q.to_string())];
        params.extend(query.params());
        self.get_json("products/search", token, &params).await
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// List all product categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token))]
    pub async fn categories(&self, token: &AccessToken) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) =
            self.inner.cache.get(&CacheKey::Categories).await
        {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get_json("products/categories", token, &[]).await?;

        self.inner
            .cache
            .insert(
                CacheKey::Categories,
                CacheValue::Categories(categories.clone()),
            )
            .await;

        Ok(categories)
    }

    /// Get a page of products in one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self, token), fields(slug = %slug))]
    pub async fn products_by_category(
        &self,
        token: &AccessToken,
        slug: &str,
        query: &ProductQuery,
    ) -> Result<ProductPage, ApiError> {
        let cache_key = CacheKey::Category {
            slug: slug.to_string(),
            query: query.clone(),
        };

        if let Some(CacheValue::Products(page)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for category");
            return Ok(page);
        }

        let page: ProductPage = self
            .get_json(&format!("products/category/{slug}"), token, &query.params())
            .await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Products(page.clone()))
            .await;

        Ok(page)
    }

    /// Drop every cached catalog response.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }
}

/// Turn a non-success response into an error, reading its `message` field.
pub(super) async fn rejection(response: reqwest::Response) -> ApiError {
    let status = response.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(1);
        return ApiError::RateLimited(retry_after);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message);

    tracing::warn!(
        status = %status,
        message = message.as_deref().unwrap_or(""),
        "API returned non-success status"
    );

    ApiError::Rejected {
        status: status.as_u16(),
        message,
    }
}
