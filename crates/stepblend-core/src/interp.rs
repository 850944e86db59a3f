// ─────────────────────────────────────────────────────────────────────
// StepBlend — Interpolation Utilities
// ─────────────────────────────────────────────────────────────────────
//! Uniform sampling and piecewise-linear interpolation with edge clamping.

/// `n` points spaced uniformly over `[0, 1]`, both ends included.
///
/// `n == 1` yields `[0.0]`; the last point is exactly `1.0` otherwise.
pub fn linspace(n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}

/// Piecewise-linear interpolation of the knots `(xp, fp)` at each `x`.
///
/// `xp` must be ascending. Queries left of the first knot take `fp[0]`,
/// right of the last take the last value; NaN queries yield NaN.
/// Returns `None` if the knot slices are empty or differ in length.
pub fn interp(x: &[f64], xp: &[f64], fp: &[f64]) -> Option<Vec<f64>> {
    if xp.is_empty() || xp.len() != fp.len() {
        return None;
    }
    let last = xp.len() - 1;

    let out = x
        .iter()
        .map(|&v| {
            if v.is_nan() {
                f64::NAN
            } else if v <= xp[0] {
                fp[0]
            } else if v >= xp[last] {
                fp[last]
            } else {
                // xp[i] <= v < xp[j]
                let j = xp.partition_point(|&k| k <= v);
                let i = j - 1;
                let t = (v - xp[i]) / (xp[j] - xp[i]);
                fp[i] + (fp[j] - fp[i]) * t
            }
        })
        .collect();
    Some(out)
}

/// Resample `values` (taken as uniformly spaced over `[0, 1]`) to `n`
/// uniformly spaced points.
///
/// An empty input yields an empty output; a single value is held constant.
pub fn resample(values: &[f64], n: usize) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let xp = linspace(values.len());
    interp(&linspace(n), &xp, values).unwrap_or_default()
}
