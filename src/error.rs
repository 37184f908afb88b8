//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure that can occur while loading statutory tables or
//! computing deductions.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Gross salary input never produces an error: missing, non-numeric and
/// negative amounts are clamped to zero. Errors come from configuration or
/// from arithmetic that leaves the range of [`rust_decimal::Decimal`].
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/paye.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/paye.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was parsed but is not usable.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending field, dotted (e.g. `nssf.tier1_cap`).
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
