//! The module contains the error the engine can throw.
//!
//! Aggregation itself never fails: a bad amount becomes [`Amount::Invalid`]
//! and flows into the totals. The only fallible input is configuration.
//!
//!  [`Amount::Invalid`]: super::amount::Amount::Invalid
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),
}
