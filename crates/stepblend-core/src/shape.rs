// ─────────────────────────────────────────────────────────────────────
// StepBlend — Shape Functions
// ─────────────────────────────────────────────────────────────────────
//! Base 0→1 transition shapes over a normalized position `t ∈ [0, 1]`.

use stepblend_types::{BlendError, BlendResult, BlendShape};

use crate::interp::{linspace, resample};

/// Evaluate a built-in shape at `t`.
///
/// `CustomCurve` has no closed form and evaluates as linear here; use
/// [`shape_segment`] to resample a caller curve.
pub fn evaluate(shape: BlendShape, t: f64, sigmoid_steepness: f64) -> f64 {
    match shape {
        BlendShape::Linear | BlendShape::CustomCurve => t,
        BlendShape::EaseIn => t * t,
        BlendShape::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        BlendShape::Sigmoid => 1.0 / (1.0 + (-sigmoid_steepness * (t - 0.5)).exp()),
        BlendShape::Step => {
            if t < 0.5 {
                0.0
            } else {
                1.0
            }
        }
    }
}

/// Shape values at `duration` uniformly spaced positions, ends included.
///
/// A custom curve is resampled to `duration` points and clamped to
/// [0, 1]. A missing or empty custom curve falls back to linear; a curve
/// with non-finite values is rejected.
pub fn shape_segment(
    shape: BlendShape,
    duration: usize,
    custom_curve: Option<&[f64]>,
    sigmoid_steepness: f64,
) -> BlendResult<Vec<f64>> {
    if shape == BlendShape::CustomCurve {
        if let Some(curve) = custom_curve.filter(|c| !c.is_empty()) {
            if let Some(pos) = curve.iter().position(|v| !v.is_finite()) {
                return Err(BlendError::invalid_input(
                    "custom_curve",
                    format!("value at index {pos} is {}", curve[pos]),
                ));
            }
            return Ok(resample(curve, duration)
                .into_iter()
                .map(|v| v.clamp(0.0, 1.0))
                .collect());
        }
    }

    Ok(linspace(duration)
        .into_iter()
        .map(|t| evaluate(shape, t, sigmoid_steepness))
        .collect())
}
