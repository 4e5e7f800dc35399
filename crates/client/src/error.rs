//! Unified error handling with Sentry integration.
//!
//! [`ShopError`] is what the [`Shop`](crate::Shop) composition root returns;
//! the store operations themselves report failures through their state.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Error type for the shopping client.
#[derive(Debug, Error)]
pub enum ShopError {
    /// Remote API operation failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A catalog read was attempted without a logged-in session.
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl ShopError {
    /// Message suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Config(err) => err.to_string(),
            Self::NotAuthenticated => "Please log in first".to_string(),
        }
    }
}

/// Result type alias for shop operations.
pub type Result<T> = std::result::Result<T, ShopError>;

// =============================================================================
// Sentry Context Helpers
// =============================================================================

/// Associate subsequent Sentry events with the logged-in user.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Record a cart or session action as a Sentry breadcrumb.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data.unwrap_or_default() {
        breadcrumb.data.insert(
            (*key).to_string(),
            serde_json::Value::String((*value).to_string()),
        );
    }

    sentry::add_breadcrumb(breadcrumb);
}
