//! Angle normalization and phase unwrapping.
//!
//! Boundary crossings of cyclic quantities are only well-defined once the
//! 0/360 wrap is removed. These helpers normalize single angles, unwrap
//! sampled sequences into continuous ones, and extend a sequence's coverage
//! so an interpolation target is guaranteed to fall inside it.

/// Normalize an angle to [0, 360).
pub fn normalize_360(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Normalize an angle to [start, start + period).
pub fn normalize_range(deg: f64, start: f64, period: f64) -> f64 {
    (deg - start).rem_euclid(period) + start
}

/// Unwrap a sampled circular sequence into a continuous one.
///
/// Each step takes the shortest signed difference to its predecessor, so
/// wrap jumps disappear: `[340, 350, 10, 20]` becomes `[340, 350, 370, 380]`.
/// The first element is kept as-is.
pub fn unwrap_sequence(angles: &[f64], period: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(angles.len());
    let Some(&first) = angles.first() else {
        return out;
    };
    out.push(first);
    let half = period / 2.0;
    for &a in &angles[1..] {
        let prev = out[out.len() - 1];
        let diff = (a - prev + half).rem_euclid(period) - half;
        out.push(prev + diff);
    }
    out
}

/// Unwrap `val` (mod `period`) to be continuous around `target`.
///
/// Keeps `result - target` in [-period/2, +period/2]; `result - val` is an
/// integer multiple of `period`.
pub fn unwrap_relative(val: f64, target: f64, period: f64) -> f64 {
    let half = period / 2.0;
    target + (val - target + half).rem_euclid(period) - half
}

/// Extend a sequence by appending `+k * period` copies until it spans `span`.
///
/// Used to give the inverse interpolator enough coverage to locate a target
/// on either side of the wrap. Degenerate inputs (empty slice, non-positive
/// or non-finite `period`/`span`) return the input unchanged.
pub fn extend_range(angles: &[f64], span: f64, period: f64) -> Vec<f64> {
    let mut ext = angles.to_vec();
    if angles.is_empty() || !(period > 0.0) || !span.is_finite() {
        return ext;
    }
    let mut k = 1.0;
    while max(&ext) - min(&ext) < span {
        ext.extend(angles.iter().map(|a| a + k * period));
        k += 1.0;
    }
    ext
}

fn min(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max(xs: &[f64]) -> f64 {
    xs.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
