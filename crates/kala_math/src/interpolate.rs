//! Inverse interpolation: estimate x with y(x) = y_target.
//!
//! Treats x as a function of y and evaluates it in barycentric Lagrange
//! form. Only the samples nearest the target are used, which keeps the fit
//! local and well-conditioned for the short Moon-longitude grids this is
//! applied to.

use crate::error::MathError;

/// Default cap on the number of samples used for the local fit.
pub const MAX_POINTS: usize = 5;

/// Default conditioning threshold for node and denominator checks.
pub const EPS: f64 = 1e-10;

/// Inverse Lagrange interpolation with default `MAX_POINTS` / `EPS`.
pub fn inverse_lagrange(xs: &[f64], ys: &[f64], y_target: f64) -> Result<f64, MathError> {
    inverse_lagrange_with(xs, ys, y_target, MAX_POINTS, EPS)
}

/// Inverse Lagrange interpolation with explicit sample cap and threshold.
///
/// Fails with `InvalidInput` on mismatched or too-short inputs, `IllDefined`
/// when two y-nodes coincide within `eps` (the inverse is ambiguous there),
/// and `IllConditioned` when a barycentric weight product or the final
/// denominator underflows below `eps`.
pub fn inverse_lagrange_with(
    xs: &[f64],
    ys: &[f64],
    y_target: f64,
    max_points: usize,
    eps: f64,
) -> Result<f64, MathError> {
    if xs.len() != ys.len() {
        return Err(MathError::InvalidInput("xs and ys must be the same length"));
    }
    if xs.len() < 2 {
        return Err(MathError::InvalidInput(
            "need at least 2 points for inverse interpolation",
        ));
    }

    // Local fit: keep the max_points samples nearest the target in y.
    let k = max_points.max(2);
    let (xs, ys): (Vec<f64>, Vec<f64>) = if xs.len() > k {
        let mut idx: Vec<usize> = (0..xs.len()).collect();
        idx.sort_by(|&i, &j| {
            let di = (ys[i] - y_target).abs();
            let dj = (ys[j] - y_target).abs();
            di.partial_cmp(&dj).unwrap_or(std::cmp::Ordering::Equal)
        });
        idx.truncate(k);
        (
            idx.iter().map(|&i| xs[i]).collect(),
            idx.iter().map(|&i| ys[i]).collect(),
        )
    } else {
        (xs.to_vec(), ys.to_vec())
    };
    let n = xs.len();

    // Exact-hit shortcut
    for i in 0..n {
        if (y_target - ys[i]).abs() <= eps {
            return Ok(xs[i]);
        }
    }

    for i in 0..n {
        for j in (i + 1)..n {
            if (ys[i] - ys[j]).abs() <= eps {
                return Err(MathError::IllDefined(
                    "duplicate y nodes make the inverse ambiguous",
                ));
            }
        }
    }

    // Barycentric weights in the y-domain: w_i = 1 / prod_{j != i} (y_i - y_j)
    let mut w = Vec::with_capacity(n);
    for i in 0..n {
        let mut denom = 1.0;
        for j in 0..n {
            if j != i {
                denom *= ys[i] - ys[j];
            }
        }
        if denom.abs() <= eps {
            return Err(MathError::IllConditioned("weight product underflow"));
        }
        w.push(1.0 / denom);
    }

    let mut num = 0.0;
    let mut den = 0.0;
    for i in 0..n {
        let t = w[i] / (y_target - ys[i]);
        num += t * xs[i];
        den += t;
    }

    if den.abs() <= eps {
        return Err(MathError::IllConditioned("denominator underflow"));
    }
    Ok(num / den)
}
