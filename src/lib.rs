//! # Discounts Calculator
//!
//! Discount and tax breakdowns for a monetary amount under four discount
//! policies: percentage or fixed amount, taken off either the pre-tax base or
//! the tax-inclusive total.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: all amounts are `rust_decimal::Decimal`
//! - **Round every field**: each subtotal is rounded on its own at the
//!   configured precision and rounding mode
//! - **Strict invariants**: `base_subtotal + tax_subtotal == total` and the
//!   discount never exceeds the base
//! - **Immutable results**: a [`DiscountResult`] is validated and computed
//!   once, then only read
//!
//! ## Example
//!
//! ```
//! use discounts_calculator::{CalculationOptions, DiscountResult, DiscountType, RoundingMode};
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let dec = |s: &str| Decimal::from_str(s).unwrap();
//! let result = DiscountResult::compute(
//!     DiscountType::TotalPercentage,
//!     dec("456.78"),
//!     dec("12.3"),
//!     dec("21"),
//!     CalculationOptions::new(2, RoundingMode::HalfUp),
//! )
//! .unwrap();
//!
//! assert_eq!(result.total(), dec("484.72"));
//! assert_eq!(result.base_subtotal() + result.tax_subtotal(), result.total());
//! ```

pub mod batch;
pub mod calculator;
pub mod discount;
pub mod error;
pub mod record;
pub mod rounding;

pub use batch::BatchProcessor;
pub use calculator::{CalculationOptions, DiscountResult};
pub use discount::{DiscountType, ParseDiscountTypeError};
pub use error::{BatchError, DiscountError, Parameter, Result};
pub use record::{parse_precision, CalculationRecord, CalculationRequest};
pub use rounding::{ParseRoundingModeError, RoundingMode};
