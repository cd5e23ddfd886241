//! Parse failures for statistic lines.
//!
//! These never escape the ledger: a line that fails to parse reads as zero and
//! the error is only attached to the warning that reports it.

use std::num::{ParseFloatError, ParseIntError};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatParseError {
    /// The line names the statistic but does not end in `": <number>"`.
    #[error("line does not end with a numeric value")]
    MissingValue,

    #[error("integer value out of range")]
    Integer(#[from] ParseIntError),

    #[error("invalid fractional value")]
    Fractional(#[from] ParseFloatError),
}
