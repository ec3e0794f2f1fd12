//! Calculation request models for CSV parsing and internal representation.

use crate::calculator::{CalculationOptions, DiscountResult};
use crate::discount::DiscountType;
use crate::error::{BatchError, DiscountError, Result};
use crate::rounding::RoundingMode;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// Raw calculation request as read from CSV.
///
/// Every field is kept as text so that a bad value can be reported with the
/// row it came from. `tax`, `precision` and `rounding` may be missing or empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculationRecord {
    /// Discount type: base_percentage, base_fixed, total_percentage, total_fixed
    #[serde(rename = "type")]
    pub discount_type: String,

    /// Amount before discount
    pub base: String,

    /// Discount percentage or amount
    pub discount: String,

    /// Tax rate in percent (defaults to 0)
    #[serde(default)]
    pub tax: Option<String>,

    /// Decimal places (defaults to 2)
    #[serde(default)]
    pub precision: Option<String>,

    /// Rounding mode (defaults to half_up)
    #[serde(default)]
    pub rounding: Option<String>,
}

impl CalculationRecord {
    /// Parses the raw CSV record into a typed request.
    pub fn parse(&self, row: usize) -> Result<CalculationRequest> {
        let invalid = |message: String| BatchError::InvalidRecord { row, message };

        let discount_type =
            DiscountType::from_str(&self.discount_type).map_err(|e| invalid(e.to_string()))?;
        let base = parse_amount("base", &self.base).map_err(invalid)?;
        let discount = parse_amount("discount", &self.discount).map_err(invalid)?;
        let tax = match non_empty(&self.tax) {
            Some(raw) => parse_amount("tax", raw).map_err(invalid)?,
            None => Decimal::ZERO,
        };

        let mut options = CalculationOptions::default();
        if let Some(raw) = non_empty(&self.precision) {
            options.precision = parse_precision(raw).map_err(invalid)?;
        }
        if let Some(raw) = non_empty(&self.rounding) {
            options.rounding_mode =
                RoundingMode::from_str(raw).map_err(|e| invalid(e.to_string()))?;
        }

        Ok(CalculationRequest {
            discount_type,
            base,
            discount,
            tax,
            options,
        })
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Parses a precision, capped at [`CalculationOptions::MAX_PRECISION`].
pub fn parse_precision(raw: &str) -> std::result::Result<u32, String> {
    let trimmed = raw.trim();
    let precision = trimmed
        .parse::<u32>()
        .map_err(|e| format!("precision {:?}: {}", trimmed, e))?;
    if precision > CalculationOptions::MAX_PRECISION {
        return Err(format!(
            "precision {} exceeds maximum of {}",
            precision,
            CalculationOptions::MAX_PRECISION
        ));
    }
    Ok(precision)
}

fn parse_amount(name: &str, raw: &str) -> std::result::Result<Decimal, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("missing {}", name));
    }
    Decimal::from_str(trimmed).map_err(|e| format!("{} {:?}: {}", name, trimmed, e))
}

/// A parsed request ready to be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct CalculationRequest {
    pub discount_type: DiscountType,
    pub base: Decimal,
    pub discount: Decimal,
    pub tax: Decimal,
    pub options: CalculationOptions,
}

impl CalculationRequest {
    /// Runs the calculation for this request.
    pub fn compute(&self) -> std::result::Result<DiscountResult, DiscountError> {
        DiscountResult::compute(
            self.discount_type,
            self.base,
            self.discount,
            self.tax,
            self.options,
        )
    }
}
