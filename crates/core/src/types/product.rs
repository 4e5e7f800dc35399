//! Catalog product types.
//!
//! Products are read-only snapshots of what the remote catalog returned.
//! Only `id` and `price` matter to the cart; the rest feeds the detail view.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AvailabilityStatus, ProductId};

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Discount in percent (e.g. `12.5` for 12.5% off).
    #[serde(default)]
    pub discount_percentage: Option<Decimal>,
    #[serde(default)]
    pub brand: Option<String>,
    /// Category slug (e.g. `groceries`).
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub shipping_information: Option<String>,
    #[serde(default)]
    pub return_policy: Option<String>,
    #[serde(default)]
    pub warranty_information: Option<String>,
    #[serde(default)]
    pub availability_status: Option<AvailabilityStatus>,
    #[serde(default)]
    pub minimum_order_quantity: Option<u32>,
}

impl Product {
    /// Whether a positive discount applies.
    #[must_use]
    pub fn has_discount(&self) -> bool {
        self.discount_percentage
            .is_some_and(|pct| pct > Decimal::ZERO)
    }

    /// Price before the discount was applied.
    ///
    /// `None` when there is no discount or the discount is 100% or more.
    #[must_use]
    pub fn original_price(&self) -> Option<Decimal> {
        let pct = self.discount_percentage.filter(|_| self.has_discount())?;
        let remaining = Decimal::ONE - pct / Decimal::ONE_HUNDRED;
        if remaining <= Decimal::ZERO {
            return None;
        }
        self.price.checked_div(remaining)
    }

    /// Price per unit of weight, when a positive weight is known.
    #[must_use]
    pub fn price_per_weight(&self) -> Option<Decimal> {
        let weight = self.weight.filter(|w| *w > Decimal::ZERO)?;
        self.price.checked_div(weight)
    }

    /// Number of reviews attached to the product.
    #[must_use]
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    /// Mean rating over the attached reviews.
    #[must_use]
    pub fn average_review_rating(&self) -> Option<f64> {
        if self.reviews.is_empty() {
            return None;
        }
        let sum: u32 = self.reviews.iter().map(|r| u32::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)] // review counts are tiny
        let count = self.reviews.len() as f64;
        Some(f64::from(sum) / count)
    }
}

/// Physical dimensions of a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Star rating, 1-5.
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
    pub reviewer_name: String,
    pub reviewer_email: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::Price;

    fn product_json() -> &'static str {
        r#"{
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "description": "Popular mascara.",
            "category": "beauty",
            "price": 9.99,
            "discountPercentage": 10,
            "rating": 4.94,
            "stock": 5,
            "tags": ["beauty", "mascara"],
            "brand": "Essence",
            "sku": "RCH45Q1A",
            "weight": 2,
            "dimensions": {"width": 23.17, "height": 14.43, "depth": 28.01},
            "warrantyInformation": "1 month warranty",
            "shippingInformation": "Ships in 1 month",
            "availabilityStatus": "Low Stock",
            "reviews": [
                {"rating": 2, "comment": "Very unhappy with my purchase!", "date": "2024-05-23T08:56:21.618Z", "reviewerName": "John Doe", "reviewerEmail": "john.doe@x.dummyjson.com"},
                {"rating": 4, "comment": "Very satisfied!", "date": "2024-05-23T08:56:21.618Z", "reviewerName": "Lucas Gordon", "reviewerEmail": "lucas.gordon@x.dummyjson.com"}
            ],
            "returnPolicy": "30 days return policy",
            "minimumOrderQuantity": 24,
            "thumbnail": "https://cdn.dummyjson.com/products/images/beauty/Essence%20Mascara%20Lash%20Princess/thumbnail.png"
        }"#
    }

    #[test]
    fn test_deserialize_full_product() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.price, Decimal::new(999, 2));
        assert_eq!(product.tags, vec!["beauty", "mascara"]);
        assert_eq!(product.review_count(), 2);
        assert_eq!(
            product.availability_status,
            Some(AvailabilityStatus::LowStock)
        );
        assert_eq!(product.minimum_order_quantity, Some(24));
    }

    #[test]
    fn test_deserialize_minimal_product() {
        let json = r#"{"id": 2, "title": "Eyeshadow Palette", "price": 19.99, "thumbnail": "t.png"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.reviews.is_empty());
        assert!(!product.has_discount());
        assert_eq!(product.original_price(), None);
        assert_eq!(product.price_per_weight(), None);
        assert_eq!(product.average_review_rating(), None);
    }

    #[test]
    fn test_original_price_reverses_discount() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        let original = product.original_price().unwrap();
        assert_eq!(Price::usd(original).display(), "$11.10");
    }

    #[test]
    fn test_price_per_weight() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        assert_eq!(product.price_per_weight(), Some(Decimal::new(4995, 3)));
    }

    #[test]
    fn test_full_discount_has_no_original_price() {
        let mut product: Product = serde_json::from_str(product_json()).unwrap();
        product.discount_percentage = Some(Decimal::ONE_HUNDRED);
        assert!(product.has_discount());
        assert_eq!(product.original_price(), None);
    }

    #[test]
    fn test_average_review_rating() {
        let product: Product = serde_json::from_str(product_json()).unwrap();
        let avg = product.average_review_rating().unwrap();
        assert!((avg - 3.0).abs() < f64::EPSILON);
    }
}
