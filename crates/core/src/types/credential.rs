//! Credential types.
//!
//! Passwords and bearer tokens are wrapped in [`SecretString`] so they never
//! show up in `Debug` output or logs.

use core::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Bearer token issued by the remote service on a successful login.
///
/// Opaque to the client: it is only ever stored and attached to requests
/// as `Authorization: Bearer <token>`.
#[derive(Clone)]
pub struct AccessToken(SecretString);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Expose the raw token.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Value for an `Authorization` header.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.expose())
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken([REDACTED])")
    }
}

impl PartialEq for AccessToken {
    fn eq(&self, other: &Self) -> bool {
        self.expose() == other.expose()
    }
}

impl Eq for AccessToken {}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self::new(token)
    }
}

/// Username/password pair forwarded to the login endpoint.
///
/// No validation happens here; the remote service decides what is valid.
#[derive(Clone)]
pub struct Credentials {
    /// Account username.
    pub username: String,
    /// Account password.
    pub password: SecretString,
}

impl Credentials {
    /// Create credentials from plain strings.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}
