//! Error types for the math layer.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from angle and interpolation math.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum MathError {
    /// Malformed input (mismatched lengths, too few points, bad parameter).
    InvalidInput(&'static str),
    /// The problem has no unique answer (duplicate y-nodes).
    IllDefined(&'static str),
    /// A denominator underflowed below the conditioning threshold.
    IllConditioned(&'static str),
}

impl Display for MathError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::IllDefined(msg) => write!(f, "ill-defined: {msg}"),
            Self::IllConditioned(msg) => write!(f, "ill-conditioned: {msg}"),
        }
    }
}

impl Error for MathError {}
