//! Client-side shopping cart.
//!
//! The cart is a mapping from product id to a [`CartLine`]. Lines hold a
//! snapshot of the product taken when it was first added, so later catalog
//! changes never alter what is already in the cart.
//!
//! Invariants:
//! - at most one line per product id
//! - every line's quantity is at least 1
//! - totals are computed from the current lines on every call

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Product, ProductId};

/// The product fields a cart line keeps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub title: String,
    /// Unit price at the moment the product was added.
    pub price: Decimal,
    pub thumbnail: String,
    pub category: Option<String>,
    pub brand: Option<String>,
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price: product.price,
            thumbnail: product.thumbnail.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
        }
    }
}

/// One entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    pub product: CartProduct,
    quantity: u32,
}

impl CartLine {
    /// Number of units of this product in the cart. Always at least 1.
    #[must_use]
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price times quantity, unrounded.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price * Decimal::from(self.quantity)
    }
}

/// Shopping cart keyed by product id.
///
/// Not deserializable: lines are only created through [`Cart::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Cart {
    lines: BTreeMap<ProductId, CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `product`.
    ///
    /// The first add snapshots the product; later adds only bump the
    /// quantity and keep the original snapshot.
    pub fn add(&mut self, product: &Product) {
        self.lines
            .entry(product.id)
            .and_modify(|line| line.quantity = line.quantity.saturating_add(1))
            .or_insert_with(|| CartLine {
                product: CartProduct::from(product),
                quantity: 1,
            });
    }

    /// Remove the line for `product_id`, returning it if there was one.
    pub fn remove(&mut self, product_id: ProductId) -> Option<CartLine> {
        self.lines.remove(&product_id)
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Missing lines are left
    /// alone; this never creates a line.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) {
        let Ok(quantity) = u32::try_from(quantity.max(0)) else {
            // above u32::MAX
            if let Some(line) = self.lines.get_mut(&product_id) {
                line.quantity = u32::MAX;
            }
            return;
        };

        if quantity == 0 {
            self.lines.remove(&product_id);
        } else if let Some(line) = self.lines.get_mut(&product_id) {
            line.quantity = quantity;
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Line for `product_id`, if present.
    #[must_use]
    pub fn get(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.get(&product_id)
    }

    /// Lines ordered by product id.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Number of distinct products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.lines.values().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines, unrounded.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.lines.values().map(CartLine::subtotal).sum()
    }

    /// Lines grouped by category slug.
    ///
    /// Products without a category are grouped under `None`, which sorts
    /// first.
    #[must_use]
    pub fn lines_by_category(&self) -> BTreeMap<Option<&str>, Vec<&CartLine>> {
        let mut groups: BTreeMap<Option<&str>, Vec<&CartLine>> = BTreeMap::new();
        for line in self.lines.values() {
            groups
                .entry(line.product.category.as_deref())
                .or_default()
                .push(line);
        }
        groups
    }
}
