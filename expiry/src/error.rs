use thiserror::Error;

/// Errors that can occur when parsing an expiration expression.
///
/// Every variant carries the input as the operator typed it.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Neither a `YYYY-MM-DD` date nor a `<count><unit>` interval.
    #[error("couldn't parse expiry: {0:?}")]
    InvalidExpirySyntax(String),

    /// A `<count><unit>` interval whose unit is not one of `m h d w M y`.
    #[error("unknown interval {unit:?} in {input:?}")]
    UnknownIntervalUnit { unit: char, input: String },

    /// The count or the resulting instant does not fit the calendar.
    #[error("expiry out of range: {0:?}")]
    OutOfRange(String),
}
