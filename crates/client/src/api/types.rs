//! Wire types for the remote API.
//!
//! Domain types (`User`, `Product`) live in `pocketshop-core`; this module
//! only holds request/response envelopes.

use pocketshop_core::{AccessToken, Product, User};
use serde::{Deserialize, Serialize};

// =============================================================================
// Auth
// =============================================================================

/// Result of a successful login: the profile and its bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: User,
    pub token: AccessToken,
}

/// Body of `POST auth/login`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Body of a successful `POST auth/login`.
///
/// Profile fields sit next to the token at the top level. Older deployments
/// name the token `token` instead of `accessToken`; some send both.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LoginResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(flatten)]
    pub user: User,
}

impl LoginResponse {
    /// The first non-blank token, preferring `accessToken`.
    pub(crate) fn into_token(self) -> (User, Option<String>) {
        let token = [self.access_token, self.token]
            .into_iter()
            .flatten()
            .find(|token| !token.trim().is_empty());
        (self.user, token)
    }
}

/// Error body the service sends with non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Catalog
// =============================================================================

/// One page of products.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    /// Total number of matching products across all pages.
    pub total: u32,
    pub skip: u32,
    pub limit: u32,
}

impl ProductPage {
    /// Whether more products exist past this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        let returned = u32::try_from(self.products.len()).unwrap_or(u32::MAX);
        self.skip.saturating_add(returned) < self.total
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier used in `products/category/{slug}`.
    pub slug: String,
    /// Display name.
    pub name: String,
    pub url: String,
}

/// Field to sort product listings by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Title,
    Price,
    Rating,
    Stock,
}

impl SortField {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Price => "price",
            Self::Rating => "rating",
            Self::Stock => "stock",
        }
    }
}

/// Sort direction for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Pagination and sorting for product listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ProductQuery {
    /// Page size; the service defaults to 30 when unset.
    pub limit: Option<u32>,
    /// Number of products to skip.
    pub skip: Option<u32>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
}

impl ProductQuery {
    /// `limit` products starting after the first `skip`.
    #[must_use]
    pub const fn page(limit: u32, skip: u32) -> Self {
        Self {
            limit: Some(limit),
            skip: Some(skip),
            sort_by: None,
            order: None,
        }
    }

    /// Query-string pairs for this query.
    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(skip) = self.skip {
            params.push(("skip", skip.to_string()));
        }
        if let Some(sort_by) = self.sort_by {
            params.push(("sortBy", sort_by.as_str().to_string()));
            params.push(("order", self.order.unwrap_or_default().as_str().to_string()));
        }
        params
    }
}
