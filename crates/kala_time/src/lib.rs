//! UT ↔ TT conversions over a pluggable Delta-T source.
//!
//! Delta-T itself is owned by the ephemeris oracle; this crate only turns a
//! raw Delta-T reading into days and applies it as a monotone map between
//! Universal Time and Terrestrial Time Julian Days.

/// Seconds per day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Raw Delta-T magnitudes above this are taken to be seconds, not days.
const SECONDS_HEURISTIC: f64 = 0.5;

/// Fixed-point iterations for the TT → UT inverse.
const INVERSE_ITERATIONS: u32 = 4;

/// A source of Delta-T readings, keyed by UT Julian Day.
///
/// Implemented by the ephemeris provider; test doubles supply analytic
/// values.
pub trait DeltaTSource {
    /// Delta-T in days at the given UT Julian Day.
    fn delta_t_days(&self, jd_ut: f64) -> f64;
}

/// Interpret a raw Delta-T reading as days.
///
/// Oracles report Delta-T in either seconds or days; anything above 0.5 in
/// magnitude cannot be days for any historical epoch, so it is divided down.
pub fn delta_t_days_from_raw(raw: f64) -> f64 {
    if raw.abs() > SECONDS_HEURISTIC {
        raw / SECONDS_PER_DAY
    } else {
        raw
    }
}

/// Convert a UT Julian Day to TT.
pub fn ut_to_tt(dt: &impl DeltaTSource, jd_ut: f64) -> f64 {
    jd_ut + dt.delta_t_days(jd_ut)
}

/// Convert a TT Julian Day to UT.
///
/// Delta-T is keyed by UT, so the inverse is solved by fixed point:
/// `u <- jd_tt - dt(u)`, seeded with `jd_tt`. Four iterations reach
/// sub-microsecond agreement for the slowly-varying Delta-T of interest.
pub fn tt_to_ut(dt: &impl DeltaTSource, jd_tt: f64) -> f64 {
    let mut jd_ut = jd_tt;
    for _ in 0..INVERSE_ITERATIONS {
        jd_ut = jd_tt - dt.delta_t_days(jd_ut);
    }
    jd_ut
}
