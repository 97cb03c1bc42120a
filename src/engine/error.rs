//! Error types for purchase processing.

use thiserror::Error;

/// Top-level error returned by [`Engine`](super::Engine) operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("formatting failed: {0}")]
    Format(#[from] FormatError),
}

/// Input rejected at the validation boundary, before any calculation.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("meter number must not be empty")]
    EmptyMeterNumber,
    #[error("purchase amount is missing")]
    MissingAmount,
    #[error("purchase amount '{0}' is not a number")]
    InvalidAmount(String),
    #[error("purchase amount must be positive, got {0}")]
    NonPositiveAmount(f64),
    #[error("tariff must be positive, got {0}")]
    InvalidTariff(f64),
}

/// A value that cannot be rendered for display.
#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error("{field} is not a finite number")]
    NonFinite { field: &'static str },
    #[error("{field} is too large to display")]
    OutOfRange { field: &'static str },
}
