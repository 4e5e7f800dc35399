//! Client for the remote catalog/auth service.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest`, JSON bodies via `serde`
//! - The remote service is the source of truth; nothing is persisted
//! - In-memory caching via `moka` for read-only catalog responses
//!
//! # Endpoints
//!
//! ## Auth
//! - `POST auth/login` - exchange username/password for a bearer token
//! - `GET auth/me` - profile of the token's owner
//!
//! ## Catalog (bearer token required)
//! - `GET products`, `GET products/{id}`, `GET products/search`
//! - `GET products/categories`, `GET products/category/{slug}`

mod auth;
mod cache;
mod client;
pub mod types;

pub use client::ApiClient;
pub use types::*;

use thiserror::Error;

/// Message used when a failure carries nothing more specific.
pub const GENERIC_LOGIN_ERROR: &str = "An error occurred during login";

/// Errors that can occur when talking to the remote service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or no response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Request rejected with status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, if any.
        message: Option<String>,
    },

    /// A successful login response carried no access token.
    #[error("No access token received")]
    MissingToken,

    /// A success response could not be decoded.
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the service.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// A request URL could not be built from the configured base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request task was stopped before it finished.
    #[error("Request interrupted")]
    Interrupted,
}

impl ApiError {
    /// Human-readable message suitable for showing to the user.
    ///
    /// Prefers the service's own `message`; otherwise describes the failure.
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            Self::Rejected {
                status,
                message: None,
            } => format!("Request failed with status code {status}"),
            Self::Http(err) if err.is_timeout() => "The request timed out".to_string(),
            Self::Http(err) if err.is_connect() => "Could not reach the server".to_string(),
            Self::Http(err) => err.to_string(),
            Self::MissingToken => self.to_string(),
            Self::Malformed(_) | Self::InvalidUrl(_) | Self::Interrupted => {
                GENERIC_LOGIN_ERROR.to_string()
            }
            Self::NotFound(what) => format!("{what} was not found"),
            Self::RateLimited(secs) => {
                format!("Too many requests, try again in {secs} seconds")
            }
        };

        if message.trim().is_empty() {
            GENERIC_LOGIN_ERROR.to_string()
        } else {
            message
        }
    }

    /// Whether the failure happened before any response was received.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
