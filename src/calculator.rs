//! Discount and tax breakdown calculation.
//!
//! A [`DiscountResult`] is built once by [`DiscountResult::compute`] and is
//! never mutated afterwards. Construction validates the inputs, runs either the
//! base-relative or the total-relative arithmetic, and checks the outcome
//! before anything is handed back.

use crate::discount::DiscountType;
use crate::error::{DiscountError, Parameter};
use crate::rounding::RoundingMode;
use rust_decimal::Decimal;
use serde::Serialize;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Rounding configuration applied to every derived amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalculationOptions {
    /// Decimal places kept after rounding.
    pub precision: u32,

    /// How midpoints are resolved.
    pub rounding_mode: RoundingMode,
}

impl CalculationOptions {
    /// Default precision, in decimal places.
    pub const DEFAULT_PRECISION: u32 = 2;

    /// Largest precision accepted from text input; `Decimal` holds at most 28
    /// decimal places.
    pub const MAX_PRECISION: u32 = 28;

    pub fn new(precision: u32, rounding_mode: RoundingMode) -> Self {
        CalculationOptions {
            precision,
            rounding_mode,
        }
    }

    fn round(&self, value: Decimal) -> Decimal {
        self.rounding_mode.round(value, self.precision)
    }
}

impl Default for CalculationOptions {
    fn default() -> Self {
        CalculationOptions::new(Self::DEFAULT_PRECISION, RoundingMode::default())
    }
}

/// Immutable discount/tax breakdown for one amount.
///
/// # Invariants
///
/// - `base`, `discount` and `tax` are non-negative
/// - `discount_subtotal <= base`
/// - `base_subtotal + tax_subtotal == total`
/// - `round(base - base_subtotal) == discount_subtotal`
///
/// # Examples
///
/// ```
/// use discounts_calculator::{DiscountResult, DiscountType};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let result = DiscountResult::with_tax(
///     DiscountType::BaseFixed,
///     dec("456.78"),
///     dec("12.3"),
///     dec("21"),
/// )
/// .unwrap();
///
/// assert_eq!(result.base_subtotal(), dec("444.48"));
/// assert_eq!(result.tax_subtotal(), dec("93.34"));
/// assert_eq!(result.total(), dec("537.82"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiscountResult {
    #[serde(rename = "type")]
    discount_type: DiscountType,
    base: Decimal,
    discount: Decimal,
    tax: Decimal,
    precision: u32,
    rounding_mode: RoundingMode,
    base_subtotal: Decimal,
    discount_subtotal: Decimal,
    tax_subtotal: Decimal,
    total: Decimal,
}

/// The four derived amounts, before they are frozen into a result.
struct Breakdown {
    base_subtotal: Decimal,
    discount_subtotal: Decimal,
    tax_subtotal: Decimal,
    total: Decimal,
}

impl DiscountResult {
    /// Computes a breakdown without tax, using default rounding.
    pub fn new(
        discount_type: DiscountType,
        base: Decimal,
        discount: Decimal,
    ) -> Result<Self, DiscountError> {
        Self::compute(
            discount_type,
            base,
            discount,
            Decimal::ZERO,
            CalculationOptions::default(),
        )
    }

    /// Computes a breakdown with a flat tax rate, using default rounding.
    pub fn with_tax(
        discount_type: DiscountType,
        base: Decimal,
        discount: Decimal,
        tax: Decimal,
    ) -> Result<Self, DiscountError> {
        Self::compute(
            discount_type,
            base,
            discount,
            tax,
            CalculationOptions::default(),
        )
    }

    /// Validates the inputs and computes the breakdown.
    ///
    /// `tax` is a percentage. `discount` is a percentage or an amount depending
    /// on `discount_type`.
    ///
    /// # Errors
    ///
    /// - [`DiscountError::InvalidParameter`] if `base`, `discount` or `tax` is
    ///   negative, checked in that order
    /// - [`DiscountError::DiscountExceedsBase`] if a fixed base discount is
    ///   larger than `base`, or if the resulting discount subtotal ends up
    ///   larger than `base`
    /// - [`DiscountError::Overflow`] if an intermediate leaves the decimal range
    pub fn compute(
        discount_type: DiscountType,
        base: Decimal,
        discount: Decimal,
        tax: Decimal,
        options: CalculationOptions,
    ) -> Result<Self, DiscountError> {
        validate(discount_type, base, discount, tax)?;

        let breakdown = match discount_type {
            DiscountType::BasePercentage => {
                let discounted = sub(base, percentage_of(base, discount)?)?;
                discount_in_base(base, options.round(discounted), tax, &options)?
            }
            DiscountType::BaseFixed => {
                discount_in_base(base, options.round(sub(base, discount)?), tax, &options)?
            }
            DiscountType::TotalPercentage => {
                let pretotal = mul(base, add(Decimal::ONE, div(tax, HUNDRED)?)?)?;
                let discounted = sub(pretotal, percentage_of(pretotal, discount)?)?;
                discount_in_total(base, options.round(discounted), tax, &options)?
            }
            DiscountType::TotalFixed => {
                let discounted = sub(add(base, percentage_of(base, tax)?)?, discount)?;
                discount_in_total(base, options.round(discounted), tax, &options)?
            }
        };

        if breakdown.discount_subtotal > base {
            return Err(DiscountError::DiscountExceedsBase);
        }

        Ok(DiscountResult {
            discount_type,
            base,
            discount,
            tax,
            precision: options.precision,
            rounding_mode: options.rounding_mode,
            base_subtotal: breakdown.base_subtotal,
            discount_subtotal: breakdown.discount_subtotal,
            tax_subtotal: breakdown.tax_subtotal,
            total: breakdown.total,
        })
    }

    pub fn discount_type(&self) -> DiscountType {
        self.discount_type
    }

    /// Amount before discount, as given.
    pub fn base(&self) -> Decimal {
        self.base
    }

    /// Discount percentage or amount, as given.
    pub fn discount(&self) -> Decimal {
        self.discount
    }

    /// Tax rate in percent, as given.
    pub fn tax(&self) -> Decimal {
        self.tax
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn rounding_mode(&self) -> RoundingMode {
        self.rounding_mode
    }

    /// Base amount after the discount, excluding tax.
    pub fn base_subtotal(&self) -> Decimal {
        self.base_subtotal
    }

    /// Portion of the base removed by the discount.
    pub fn discount_subtotal(&self) -> Decimal {
        self.discount_subtotal
    }

    /// Tax owed on the discounted base.
    pub fn tax_subtotal(&self) -> Decimal {
        self.tax_subtotal
    }

    /// Amount payable: `base_subtotal + tax_subtotal`.
    pub fn total(&self) -> Decimal {
        self.total
    }
}

fn validate(
    discount_type: DiscountType,
    base: Decimal,
    discount: Decimal,
    tax: Decimal,
) -> Result<(), DiscountError> {
    for (parameter, value) in [
        (Parameter::Base, base),
        (Parameter::Discount, discount),
        (Parameter::Tax, tax),
    ] {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(DiscountError::InvalidParameter { parameter });
        }
    }

    if discount_type == DiscountType::BaseFixed && discount > base {
        return Err(DiscountError::DiscountExceedsBase);
    }

    Ok(())
}

/// Discount already applied to the pre-tax base; tax is added on top.
fn discount_in_base(
    base: Decimal,
    base_subtotal: Decimal,
    tax: Decimal,
    options: &CalculationOptions,
) -> Result<Breakdown, DiscountError> {
    let discount_subtotal = options.round(sub(base, base_subtotal)?);
    let tax_subtotal = options.round(percentage_of(base_subtotal, tax)?);
    let total = options.round(add(base_subtotal, tax_subtotal)?);

    Ok(Breakdown {
        base_subtotal,
        discount_subtotal,
        tax_subtotal,
        total,
    })
}

/// Discount already applied to the tax-inclusive total; subtotals are derived
/// back from it.
fn discount_in_total(
    base: Decimal,
    total: Decimal,
    tax: Decimal,
    options: &CalculationOptions,
) -> Result<Breakdown, DiscountError> {
    // tax >= 0 is validated, so the divisor is at least 100.
    let tax_subtotal = options.round(div(mul(total, tax)?, add(HUNDRED, tax)?)?);
    let base_subtotal = options.round(sub(total, tax_subtotal)?);
    let discount_subtotal = options.round(sub(base, base_subtotal)?);

    Ok(Breakdown {
        base_subtotal,
        discount_subtotal,
        tax_subtotal,
        total,
    })
}

fn percentage_of(value: Decimal, percentage: Decimal) -> Result<Decimal, DiscountError> {
    div(mul(value, percentage)?, HUNDRED)
}

fn add(a: Decimal, b: Decimal) -> Result<Decimal, DiscountError> {
    a.checked_add(b).ok_or(DiscountError::Overflow)
}

fn sub(a: Decimal, b: Decimal) -> Result<Decimal, DiscountError> {
    a.checked_sub(b).ok_or(DiscountError::Overflow)
}

fn mul(a: Decimal, b: Decimal) -> Result<Decimal, DiscountError> {
    a.checked_mul(b).ok_or(DiscountError::Overflow)
}

fn div(a: Decimal, b: Decimal) -> Result<Decimal, DiscountError> {
    a.checked_div(b).ok_or(DiscountError::Overflow)
}
