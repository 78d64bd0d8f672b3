//! # Error Types
//!
//! Structured error types for wellcalc_core. Errors fall into two families:
//!
//! - **Input errors** (`InputParse`, `MissingField`): raised at the raw-text
//!   boundary before any parameters exist. The formula engine never sees them.
//! - **Domain errors** (`DivisionByZero`, `InvalidDomainValue`): raised by a
//!   calculation when one of its preconditions does not hold. They name the
//!   offending quantity and the operation so a front end can explain them.
//!
//! ## Example
//!
//! ```rust
//! use wellcalc_core::errors::{CalcError, CalcResult};
//!
//! fn ratio(num: f64, den: f64) -> CalcResult<f64> {
//!     if den == 0.0 {
//!         return Err(CalcError::division_by_zero("den", "ratio"));
//!     }
//!     Ok(num / den)
//! }
//!
//! assert!(ratio(1.0, 0.0).unwrap_err().is_domain_error());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for wellcalc_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for calculation operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// A raw textual input could not be parsed into a finite number
    #[error("Could not parse '{field}' from {value:?}: {reason}")]
    InputParse {
        field: String,
        value: String,
        reason: String,
    },

    /// A required field is missing from a submission
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A divisor formed by a calculation evaluated to exactly zero
    #[error("Division by zero: '{quantity}' is zero in {operation}")]
    DivisionByZero { quantity: String, operation: String },

    /// A value lies outside the domain of a correlation (phasing, logarithm argument, ...)
    #[error("Invalid value for '{field}': {value} - {reason}")]
    InvalidDomainValue {
        field: String,
        value: String,
        reason: String,
    },

    /// JSON or TOML (de)serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InputParse error
    pub fn input_parse(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InputParse {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a MissingField error
    pub fn missing_field(field: impl Into<String>) -> Self {
        CalcError::MissingField {
            field: field.into(),
        }
    }

    /// Create a DivisionByZero error
    pub fn division_by_zero(quantity: impl Into<String>, operation: impl Into<String>) -> Self {
        CalcError::DivisionByZero {
            quantity: quantity.into(),
            operation: operation.into(),
        }
    }

    /// Create an InvalidDomainValue error
    pub fn invalid_domain(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidDomainValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization(reason: impl Into<String>) -> Self {
        CalcError::SerializationError {
            reason: reason.into(),
        }
    }

    /// True for errors raised by a calculation precondition
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            CalcError::DivisionByZero { .. } | CalcError::InvalidDomainValue { .. }
        )
    }

    /// True for errors raised while reading raw inputs
    pub fn is_input_error(&self) -> bool {
        matches!(self, CalcError::InputParse { .. } | CalcError::MissingField { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InputParse { .. } => "INPUT_PARSE",
            CalcError::MissingField { .. } => "MISSING_FIELD",
            CalcError::DivisionByZero { .. } => "DIVISION_BY_ZERO",
            CalcError::InvalidDomainValue { .. } => "INVALID_DOMAIN_VALUE",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(e: serde_json::Error) -> Self {
        CalcError::serialization(e.to_string())
    }
}
