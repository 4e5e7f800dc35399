//! Authenticated user profile.

use serde::{Deserialize, Serialize};

use super::UserId;

/// Profile of the logged-in user, as returned by the login endpoint.
///
/// Only `id` is required; other profile fields default to empty when the
/// service leaves them out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: String,
    /// Avatar URL.
    #[serde(default)]
    pub image: String,
}

impl User {
    /// First and last name joined by a space.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
