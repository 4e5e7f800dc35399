//! Cache types for catalog responses.

use pocketshop_core::{Product, ProductId};

use super::types::{Category, ProductPage, ProductQuery};

/// Cache key for catalog responses.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Product(ProductId),
    Products(ProductQuery),
    Category { slug: String, query: ProductQuery },
    Categories,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Product(Box<Product>),
    Products(ProductPage),
    Categories(Vec<Category>),
}
