//! Order statistics and returns.

use crate::error::{MathError, MathResult};

/// Returns the `p`-th percentile of `values` using linear interpolation
/// between the two nearest order statistics.
///
/// With the values sorted ascending as `v[0..n]`, the fractional rank is
/// `h = p / 100 * (n - 1)` and the result is
/// `v[floor(h)] + (h - floor(h)) * (v[floor(h) + 1] - v[floor(h)])`.
///
/// # Arguments
///
/// * `values` - Sample, in any order
/// * `p` - Percentile in `[0, 100]`
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for an empty sample and
/// `MathError::InvalidInput` if `p` is outside `[0, 100]` or any value is NaN.
///
/// # Example
///
/// ```rust
/// use varlens_math::statistics::percentile;
///
/// let pl = [-1000.0, -500.0, 100.0, 2000.0];
/// let p5 = percentile(&pl, 5.0).unwrap();
/// assert!((p5 + 925.0).abs() < 1e-9);
/// ```
pub fn percentile(values: &[f64], p: f64) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=100.0).contains(&p) {
        return Err(MathError::invalid_input(format!(
            "percentile must be between 0 and 100, got {p}"
        )));
    }
    if values.iter().any(|v| v.is_nan()) {
        return Err(MathError::invalid_input("sample contains NaN"));
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);

    Ok(lerp(sorted[lower], sorted[upper], rank - lower as f64))
}

/// Linear interpolation evaluated from the nearer endpoint, so that
/// `t = 1` yields exactly `b` and results stay monotone in `t`.
#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t >= 0.5 {
        b - diff * (1.0 - t)
    } else {
        a + diff * t
    }
}

/// Simple percentage change from `previous` to `current`.
///
/// Callers guarantee `previous` is non-zero; price points are validated as
/// strictly positive when they enter the system.
#[inline]
pub fn pct_change(previous: f64, current: f64) -> f64 {
    (current - previous) / previous
}
