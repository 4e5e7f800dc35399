//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are carried at full precision everywhere; rounding to two decimal
//! places happens only in [`Price::display`].

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A price in US dollars, the only currency the demo catalog quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    /// Amount in dollars, not cents.
    pub amount: Decimal,
}

impl Price {
    /// Wrap a dollar amount.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Format for display (e.g., "$19.98").
    ///
    /// Midpoints round away from zero, matching how prices are shown on
    /// receipts.
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("${rounded:.2}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_to_two_places() {
        assert_eq!(Price::usd(Decimal::new(25, 0)).display(), "$25.00");
        assert_eq!(Price::usd(Decimal::new(1998, 2)).display(), "$19.98");
    }

    #[test]
    fn test_display_rounds_only_at_presentation() {
        let price = Price::usd(Decimal::new(199_995, 4));
        assert_eq!(price.amount, Decimal::new(199_995, 4));
        assert_eq!(price.display(), "$20.00");
    }

    #[test]
    fn test_to_string_matches_display() {
        let price = Price::usd(Decimal::ZERO);
        assert_eq!(price.to_string(), "$0.00");
    }
}
