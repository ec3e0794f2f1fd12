//! Rounding policies for monetary amounts.
//!
//! Every subtotal is rounded on its own to a fixed number of decimal places.
//! The mode only matters for exact midpoints; anything else rounds to the
//! nearest representable value.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How exact midpoints are resolved when reducing scale.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use discounts_calculator::RoundingMode;
/// use rust_decimal::Decimal;
///
/// let value = Decimal::from_str("2.345").unwrap();
/// assert_eq!(RoundingMode::HalfUp.round(value, 2).to_string(), "2.35");
/// assert_eq!(RoundingMode::HalfEven.round(value, 2).to_string(), "2.34");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties away from zero.
    #[default]
    HalfUp,

    /// Ties toward zero.
    HalfDown,

    /// Ties to the even neighbour.
    HalfEven,

    /// Ties to the odd neighbour.
    HalfOdd,
}

impl RoundingMode {
    /// Rounds `value` to `precision` decimal places.
    pub fn round(self, value: Decimal, precision: u32) -> Decimal {
        match self {
            RoundingMode::HalfUp => {
                value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero)
            }
            RoundingMode::HalfDown => {
                value.round_dp_with_strategy(precision, RoundingStrategy::MidpointTowardZero)
            }
            RoundingMode::HalfEven => {
                value.round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven)
            }
            RoundingMode::HalfOdd => round_half_odd(value, precision),
        }
    }

    /// Canonical `snake_case` name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundingMode::HalfUp => "half_up",
            RoundingMode::HalfDown => "half_down",
            RoundingMode::HalfEven => "half_even",
            RoundingMode::HalfOdd => "half_odd",
        }
    }
}

/// `rust_decimal` has no odd-midpoint strategy. The two midpoint-directed
/// strategies only disagree on an exact tie, and on a tie the odd neighbour is
/// whichever one nearest-even did not pick.
fn round_half_odd(value: Decimal, precision: u32) -> Decimal {
    let away = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let toward = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointTowardZero);
    if away == toward {
        return away;
    }

    let even = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointNearestEven);
    if even == away {
        toward
    } else {
        away
    }
}

/// Error returned when a rounding mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rounding mode: {0:?}")]
pub struct ParseRoundingModeError(pub String);

impl FromStr for RoundingMode {
    type Err = ParseRoundingModeError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "half_up" => Ok(RoundingMode::HalfUp),
            "half_down" => Ok(RoundingMode::HalfDown),
            "half_even" => Ok(RoundingMode::HalfEven),
            "half_odd" => Ok(RoundingMode::HalfOdd),
            _ => Err(ParseRoundingModeError(s.to_string())),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn round(mode: RoundingMode, s: &str, precision: u32) -> String {
        mode.round(dec(s), precision).to_string()
    }

    #[test]
    fn test_ties_resolve_per_mode() {
        assert_eq!(round(RoundingMode::HalfUp, "2.345", 2), "2.35");
        assert_eq!(round(RoundingMode::HalfDown, "2.345", 2), "2.34");
        assert_eq!(round(RoundingMode::HalfEven, "2.345", 2), "2.34");
        assert_eq!(round(RoundingMode::HalfOdd, "2.345", 2), "2.35");

        assert_eq!(round(RoundingMode::HalfEven, "2.355", 2), "2.36");
        assert_eq!(round(RoundingMode::HalfOdd, "2.355", 2), "2.35");
    }

    #[test]
    fn test_negative_ties_are_symmetric() {
        assert_eq!(round(RoundingMode::HalfUp, "-2.345", 2), "-2.35");
        assert_eq!(round(RoundingMode::HalfDown, "-2.345", 2), "-2.34");
        assert_eq!(round(RoundingMode::HalfEven, "-2.345", 2), "-2.34");
        assert_eq!(round(RoundingMode::HalfOdd, "-2.345", 2), "-2.35");
    }

    #[test]
    fn test_non_ties_round_to_nearest_in_every_mode() {
        for mode in [
            RoundingMode::HalfUp,
            RoundingMode::HalfDown,
            RoundingMode::HalfEven,
            RoundingMode::HalfOdd,
        ] {
            assert_eq!(round(mode, "2.346", 2), "2.35", "{mode}");
            assert_eq!(round(mode, "2.344", 2), "2.34", "{mode}");
            assert_eq!(round(mode, "0.0049", 2), "0.00", "{mode}");
        }
    }

    #[test]
    fn test_zero_precision() {
        assert_eq!(round(RoundingMode::HalfUp, "2.5", 0), "3");
        assert_eq!(round(RoundingMode::HalfDown, "2.5", 0), "2");
        assert_eq!(round(RoundingMode::HalfEven, "2.5", 0), "2");
        assert_eq!(round(RoundingMode::HalfOdd, "2.5", 0), "3");
        assert_eq!(round(RoundingMode::HalfOdd, "3.5", 0), "3");
    }

    #[test]
    fn test_value_already_at_precision_is_unchanged() {
        assert_eq!(round(RoundingMode::HalfOdd, "12.3", 2), "12.3");
        assert_eq!(round(RoundingMode::HalfUp, "100", 4), "100");
    }

    #[test]
    fn test_parse_accepts_common_spellings() {
        assert_eq!(RoundingMode::from_str("half_up"), Ok(RoundingMode::HalfUp));
        assert_eq!(RoundingMode::from_str("HALF-DOWN"), Ok(RoundingMode::HalfDown));
        assert_eq!(RoundingMode::from_str(" Half_Even "), Ok(RoundingMode::HalfEven));
        assert_eq!(RoundingMode::from_str("half_odd"), Ok(RoundingMode::HalfOdd));
        assert!(RoundingMode::from_str("bankers").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let mode = RoundingMode::HalfOdd;
        assert_eq!(RoundingMode::from_str(&mode.to_string()), Ok(mode));
    }

    #[test]
    fn test_default_is_half_up() {
        assert_eq!(RoundingMode::default(), RoundingMode::HalfUp);
    }
}
