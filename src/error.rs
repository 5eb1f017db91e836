//! Error types for snapshot handling, result export and input validation
//!
//! The projection engine itself is infallible; these errors only surface at
//! the boundaries (loading snapshots, writing reports, validating settings).

use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading, parsing or writing plan snapshots
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse imported data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures while exporting projection results
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write year table: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush year table: {0}")]
    Io(#[from] std::io::Error),
}

/// Inconsistent simulation inputs, reported by the `validate` helpers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("age range must satisfy start <= current <= end (got {start}, {current}, {end})")]
    AgeRange { start: u32, current: u32, end: u32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    #[error("investment ratio must lie in 0..=1 (got {0})")]
    RatioOutOfRange(f64),

    #[error("down payment {down_payment} exceeds property price {property_price}")]
    DownPaymentExceedsPrice { down_payment: f64, property_price: f64 },

    #[error("loan amount {loan_amount} does not match price minus down payment ({expected})")]
    LoanAmountMismatch { loan_amount: f64, expected: f64 },

    #[error("loan term must be at least one year")]
    ZeroLoanTerm,

    #[error("house purchase age {age} lies outside the simulated range {start}..={end}")]
    PurchaseAgeOutOfRange { age: u32, start: u32, end: u32 },
}
