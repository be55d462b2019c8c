//! Error types for the nkcheck-core library.

use thiserror::Error;

/// Main error type for the nkcheck library.
#[derive(Error, Debug)]
pub enum NkError {
    /// Bill input failed validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Location resolution failed.
    #[error("location error: {0}")]
    Location(#[from] LocationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised when validating bill input.
///
/// These are the expected, recoverable failures: OCR output is noisy and
/// missing or implausible fields are corrected by asking the user, not by
/// aborting the program.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Postal code is missing, malformed, or outside the German range.
    #[error("invalid postal code: {0:?}")]
    InvalidPostalCode(String),

    /// Floor area is missing or outside the plausible apartment range.
    #[error("floor area {0} m² outside plausible range {1}-{2} m²")]
    FloorAreaOutOfRange(rust_decimal::Decimal, u32, u32),

    /// Billing period end is not after its start.
    #[error("billing period end {end} is not after start {start}")]
    InvalidPeriod {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    /// No cost category carries a positive amount.
    #[error("no cost data: at least one cost category must be positive")]
    NoCostData,

    /// A cost amount is negative.
    #[error("negative amount for {category}: {amount}")]
    NegativeAmount {
        category: String,
        amount: rust_decimal::Decimal,
    },
}

/// Errors raised when resolving a postal code to a regional profile.
///
/// Unlike validation errors these terminate the analysis: without a
/// regional baseline there is nothing to compare against.
#[derive(Error, Debug)]
pub enum LocationError {
    /// Postal code not in the bundled table and unknown to the place API.
    #[error("postal code {0} could not be resolved")]
    UnknownPostalCode(String),

    /// The place API could not be reached.
    #[error("place lookup unreachable: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The place API answered with something we could not interpret.
    #[error("malformed place response: {0}")]
    MalformedResponse(String),
}

/// Result type for the nkcheck library.
pub type Result<T> = std::result::Result<T, NkError>;
