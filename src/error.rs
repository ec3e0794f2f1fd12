//! Error types for discount calculation and batch processing.

use std::fmt;
use thiserror::Error;

/// Result type alias for batch and CLI operations
pub type Result<T> = std::result::Result<T, BatchError>;

/// Input parameter that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Base,
    Discount,
    Tax,
}

impl Parameter {
    /// Returns the parameter name as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Base => "base",
            Parameter::Discount => "discount",
            Parameter::Tax => "tax",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while computing a discount breakdown.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiscountError {
    /// A monetary input was negative
    #[error("Invalid parameter: {parameter}")]
    InvalidParameter { parameter: Parameter },

    /// The discount would take away more than the base amount
    #[error("Discount is bigger than base")]
    DiscountExceedsBase,

    /// Decimal arithmetic left the representable range
    #[error("Arithmetic overflow while computing discount")]
    Overflow,
}

impl DiscountError {
    /// Returns the offending parameter for `InvalidParameter` errors.
    pub fn parameter(&self) -> Option<Parameter> {
        match self {
            DiscountError::InvalidParameter { parameter } => Some(*parameter),
            _ => None,
        }
    }
}

/// Errors that can occur in the batch processor and the binary.
#[derive(Error, Debug)]
pub enum BatchError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Calculation rejected its inputs
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Invalid request record
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Command line argument could not be parsed
    #[error("Invalid value for {name}: {value:?}")]
    InvalidArgument { name: &'static str, value: String },

    /// Not enough command line arguments
    #[error("Missing arguments. Usage: discounts-calculator <type> <base> <discount> [tax] [precision] [rounding] | --batch <input.csv>")]
    MissingArgument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message_names_field() {
        let err = DiscountError::InvalidParameter {
            parameter: Parameter::Tax,
        };
        assert_eq!(err.to_string(), "Invalid parameter: tax");
        assert_eq!(err.parameter(), Some(Parameter::Tax));
    }

    #[test]
    fn test_exceeds_base_has_no_parameter() {
        let err = DiscountError::DiscountExceedsBase;
        assert_eq!(err.to_string(), "Discount is bigger than base");
        assert_eq!(err.parameter(), None);
    }

    #[test]
    fn test_batch_error_wraps_discount_error_transparently() {
        let err = BatchError::from(DiscountError::DiscountExceedsBase);
        assert_eq!(err.to_string(), "Discount is bigger than base");
    }
}
