//! Discount policies.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// The four mutually exclusive ways a discount can be applied.
///
/// Base-relative types discount the amount before tax and then add tax on the
/// discounted amount. Total-relative types fold tax into the amount first and
/// discount the tax-inclusive figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// `discount` is a percentage of the base.
    BasePercentage,

    /// `discount` is an amount taken off the base.
    BaseFixed,

    /// `discount` is a percentage of the tax-inclusive total.
    TotalPercentage,

    /// `discount` is an amount taken off the tax-inclusive total.
    TotalFixed,
}

impl DiscountType {
    /// All variants, in declaration order.
    pub const ALL: [DiscountType; 4] = [
        DiscountType::BasePercentage,
        DiscountType::BaseFixed,
        DiscountType::TotalPercentage,
        DiscountType::TotalFixed,
    ];

    /// Returns `true` when `discount` is read as a percentage.
    pub fn is_percentage(&self) -> bool {
        matches!(
            self,
            DiscountType::BasePercentage | DiscountType::TotalPercentage
        )
    }

    /// Canonical `snake_case` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountType::BasePercentage => "base_percentage",
            DiscountType::BaseFixed => "base_fixed",
            DiscountType::TotalPercentage => "total_percentage",
            DiscountType::TotalFixed => "total_fixed",
        }
    }
}

/// Error returned when a discount type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown discount type: {0:?}")]
pub struct ParseDiscountTypeError(pub String);

impl FromStr for DiscountType {
    type Err = ParseDiscountTypeError;

    /// Accepts `base_percentage`, `base-percentage` or `BASE_PERCENTAGE`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "base_percentage" => Ok(DiscountType::BasePercentage),
            "base_fixed" => Ok(DiscountType::BaseFixed),
            "total_percentage" => Ok(DiscountType::TotalPercentage),
            "total_fixed" => Ok(DiscountType::TotalFixed),
            _ => Err(ParseDiscountTypeError(s.to_string())),
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_spellings() {
        assert_eq!(
            DiscountType::from_str("base_percentage"),
            Ok(DiscountType::BasePercentage)
        );
        assert_eq!(
            DiscountType::from_str("BASE_FIXED"),
            Ok(DiscountType::BaseFixed)
        );
        assert_eq!(
            DiscountType::from_str("total-percentage"),
            Ok(DiscountType::TotalPercentage)
        );
        assert_eq!(
            DiscountType::from_str("  Total_Fixed  "),
            Ok(DiscountType::TotalFixed)
        );
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        let err = DiscountType::from_str("percentage").unwrap_err();
        assert_eq!(err.to_string(), "unknown discount type: \"percentage\"");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for kind in DiscountType::ALL {
            assert_eq!(DiscountType::from_str(&kind.to_string()), Ok(kind));
        }
    }

    #[test]
    fn test_percentage_types() {
        assert!(DiscountType::BasePercentage.is_percentage());
        assert!(DiscountType::TotalPercentage.is_percentage());
        assert!(!DiscountType::BaseFixed.is_percentage());
        assert!(!DiscountType::TotalFixed.is_percentage());
    }
}
