//! Observable cart store.
//!
//! Wraps a [`Cart`] in a `watch` channel. Cart operations never fail and
//! never suspend: a missing line or a non-positive quantity is handled by
//! [`Cart`] itself.

use std::sync::Arc;

use pocketshop_core::{Cart, Product, ProductId};
use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::debug;

use crate::error::add_breadcrumb;

/// Shared cart state.
///
/// Cheap to clone; clones share the same cart.
#[derive(Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<Cart>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create a store holding an empty cart.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(Cart::new());
        Self {
            state: Arc::new(state),
        }
    }

    /// Add one unit of `product`, creating its line if needed.
    pub fn add_to_cart(&self, product: &Product) {
        self.state.send_modify(|cart| cart.add(product));
        let id = product.id.to_string();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", &id)]));
        debug!(product_id = %product.id, "Added to cart");
    }

    /// Remove the line for `product_id`. No-op if there is none.
    pub fn remove_from_cart(&self, product_id: ProductId) {
        // Only notify observers when something changed.
        let removed = self
            .state
            .send_if_modified(|cart| cart.remove(product_id).is_some());
        if removed {
            let id = product_id.to_string();
            add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", &id)]));
            debug!(product_id = %product_id, "Removed from cart");
        }
    }

    /// Set the quantity of an existing line; zero or less removes it.
    pub fn update_quantity(&self, product_id: ProductId, quantity: i64) {
        let changed = self.state.send_if_modified(|cart| {
            let before = cart.get(product_id).map(pocketshop_core::CartLine::quantity);
            cart.update_quantity(product_id, quantity);
            before != cart.get(product_id).map(pocketshop_core::CartLine::quantity)
        });
        if changed {
            debug!(product_id = %product_id, quantity, "Updated cart quantity");
        }
    }

    /// Empty the cart.
    pub fn clear_cart(&self) {
        self.state.send_modify(Cart::clear);
        debug!("Cleared cart");
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> u64 {
        self.state.borrow().total_items()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.state.borrow().total_price()
    }

    /// Copy of the current cart.
    #[must_use]
    pub fn snapshot(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every cart change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }
}
