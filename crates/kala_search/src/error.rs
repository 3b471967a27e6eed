//! Error types for boundary-event search.

use std::error::Error;
use std::fmt::{Display, Formatter};

use kala_ephem::OracleError;
use kala_math::MathError;

/// Errors from the solver and event-finder layers.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// Error from the ephemeris oracle, propagated verbatim.
    Oracle(OracleError),
    /// Error from the interpolation/angle math layer.
    Math(MathError),
    /// Invalid search configuration parameter.
    InvalidConfig(&'static str),
    /// No sign change in the search window.
    NoBracket(&'static str),
    /// Newton stalled (stationary or ill-conditioned derivative).
    NonConvergence(&'static str),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Oracle(e) => write!(f, "oracle error: {e}"),
            Self::Math(e) => write!(f, "math error: {e}"),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::NoBracket(msg) => write!(f, "no bracket: {msg}"),
            Self::NonConvergence(msg) => write!(f, "no convergence: {msg}"),
        }
    }
}

impl Error for SearchError {}

impl From<OracleError> for SearchError {
    fn from(e: OracleError) -> Self {
        Self::Oracle(e)
    }
}

impl From<MathError> for SearchError {
    fn from(e: MathError) -> Self {
        Self::Math(e)
    }
}
