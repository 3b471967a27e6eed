//! Panchanga boundary-event search engine.
//!
//! This crate provides:
//! - A hybrid scalar root solver (bracket scan, speed-assisted Newton,
//!   bisection fallback) over functions that return their own derivative
//! - Continuous tithi/nakshatra/yoga index functions with speeds
//! - The event finder for the next tithi/nakshatra/yoga boundary crossing
//! - Sunrise-anchored nakshatra end times via inverse interpolation

pub mod error;
pub mod finder;
pub mod solver;
pub mod sunrise_nakshatra;
pub mod temporal;

pub use error::SearchError;
pub use finder::{PanchangaFinder, SearchParams};
pub use solver::{
    SolveMethod, SolveResult, SolverConfig, ValueSpeedFn, bisection, bracket_root,
    newton_speed_assisted, solve_root,
};
pub use sunrise_nakshatra::{NakshatraDay, nakshatra_at_sunrise};
pub use temporal::{
    NakshatraPada, ONE_PADA_DEG, ONE_STAR_DEG, nakshatra_continuous,
    nakshatra_pada_from_longitude, tithi_continuous, yoga_continuous,
};
