//! Error type for ephemeris oracle queries.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors raised by an ephemeris oracle.
///
/// Oracle failures are propagated verbatim to callers; the core never wraps
/// them with retries or reinterprets them.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum OracleError {
    /// The engine failed to evaluate a query.
    Compute(String),
    /// The oracle does not implement an optional capability.
    NotSupported(&'static str),
}

impl Display for OracleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Compute(msg) => write!(f, "oracle computation failed: {msg}"),
            Self::NotSupported(op) => write!(f, "oracle does not support: {op}"),
        }
    }
}

impl Error for OracleError {}
