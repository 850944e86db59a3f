// ─────────────────────────────────────────────────────────────────────
// StepBlend — Tuning Policy
// ─────────────────────────────────────────────────────────────────────
//! Maps `(tuning_goal, complexity, intensity)` to the exponent applied
//! to the active curve segment as `segment.powf(exponent)`.
//!
//! Exponent < 1 bulges the rising curve, so a fading high channel drops
//! sooner. Exponent > 1 sags it, so the high channel is sustained.
//!
//! The goals disagree on whether complexity should weaken or sustain the
//! high channel. Each branch is kept as tuned, discontinuities included.

use stepblend_types::{BlendError, BlendResult, TuningConfig, TuningGoal};

/// Complexity treated as neither smooth nor detailed.
pub const NEUTRAL_COMPLEXITY: f64 = 0.5;

/// Signed modifier `(score - 0.5) · 2 · intensity`, roughly in
/// `[-intensity, +intensity]`.
#[inline]
pub fn base_modifier(score: f64, intensity: f64) -> f64 {
    (score - NEUTRAL_COMPLEXITY) * 2.0 * intensity
}

/// Select the curve exponent for one call.
///
/// Fails with `Numerical` if the result is not finite and positive.
pub fn select_exponent(
    score: f64,
    goal: TuningGoal,
    intensity: f64,
    tuning: &TuningConfig,
) -> BlendResult<f64> {
    let base_mod = base_modifier(score, intensity);

    let exponent = match goal {
        TuningGoal::PreserveDetails => {
            if score > NEUTRAL_COMPLEXITY {
                1.0 / (1.0 + base_mod)
            } else {
                1.0 + base_mod.abs()
            }
        }
        TuningGoal::EncourageMotion => 1.0 + base_mod.abs(),
        TuningGoal::Standard => {
            if score > tuning.standard_complex_threshold {
                tuning.standard_complex_exponent
            } else if score < tuning.standard_smooth_threshold {
                tuning.standard_smooth_exponent
            } else {
                1.0
            }
        }
    };

    if !(exponent.is_finite() && exponent > 0.0) {
        return Err(BlendError::Numerical(format!(
            "exponent {exponent} for goal {goal} (score {score:.4}, intensity {intensity})"
        )));
    }
    Ok(exponent)
}
