//! Product availability status.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Availability as reported by the catalog.
///
/// The catalog sends free-form strings; the three it documents get their own
/// variants and anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AvailabilityStatus {
    InStock,
    LowStock,
    OutOfStock,
    Other(String),
}

impl AvailabilityStatus {
    /// Whether the product can currently be ordered.
    #[must_use]
    pub const fn is_orderable(&self) -> bool {
        !matches!(self, Self::OutOfStock)
    }

    /// Label as the catalog spells it.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::InStock => "In Stock",
            Self::LowStock => "Low Stock",
            Self::OutOfStock => "Out of Stock",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for AvailabilityStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "In Stock" => Self::InStock,
            "Low Stock" => Self::LowStock,
            "Out of Stock" => Self::OutOfStock,
            _ => Self::Other(label),
        }
    }
}

impl From<AvailabilityStatus> for String {
    fn from(status: AvailabilityStatus) -> Self {
        match status {
            AvailabilityStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
