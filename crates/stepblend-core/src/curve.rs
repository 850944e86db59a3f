// ─────────────────────────────────────────────────────────────────────
// StepBlend — Curve Builder
// ─────────────────────────────────────────────────────────────────────
//! Full-length "high" weight schedule from a step range, a shape, a
//! direction, and an optional adaptive exponent.
//!
//! Layout for `steps = 10`, range `[3, 7)`, `invert = false`:
//!
//! ```text
//! step    0   1   2 | 3   4   5   6 | 7   8   9
//! high    1   1   1 | 1 ..fading.. ~0| 0   0   0
//! ```
//!
//! With `invert = true` the constants swap and the segment rises.

use serde::{Deserialize, Serialize};

use stepblend_types::{BlendError, BlendResult, BlendShape, Schedule, SchedulerConfig};

use crate::shape::shape_segment;

/// Normalized active step range `[start, end)` within `[0, steps]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveRange {
    pub steps: usize,
    pub start: usize,
    pub end: usize,
}

impl ActiveRange {
    /// Normalize caller step parameters. Never fails for in-range integers:
    ///
    /// - `steps < 1` becomes 1.
    /// - `end_step` outside `[0, steps]` becomes `steps` (open-ended fade).
    /// - `start_step > end_step` resets `start_step` to 0.
    /// - Both are then clamped so that `0 <= start <= end <= steps`.
    ///
    /// Fails only if `steps` does not fit in `usize`.
    pub fn normalize(steps: i64, start_step: i64, end_step: i64) -> BlendResult<Self> {
        let steps = steps.max(1);
        let mut start = start_step;
        let mut end = end_step;

        if end < 0 || end > steps {
            end = steps;
        }
        if start > end {
            start = 0;
        }
        start = start.clamp(0, steps);
        end = end.min(steps).max(start);

        let to_usize = |field: &'static str, v: i64| {
            usize::try_from(v).map_err(|e| BlendError::invalid_input(field, e.to_string()))
        };
        Ok(Self {
            steps: to_usize("steps", steps)?,
            start: to_usize("start_step", start)?,
            end: to_usize("end_step", end)?,
        })
    }

    pub fn duration(&self) -> usize {
        self.end - self.start
    }

    /// True when no step transitions.
    pub fn is_degenerate(&self) -> bool {
        self.duration() == 0
    }
}

/// Builds schedules. Stateless apart from the sigmoid steepness.
#[derive(Debug, Clone, Copy)]
pub struct CurveBuilder {
    sigmoid_steepness: f64,
}

impl Default for CurveBuilder {
    fn default() -> Self {
        Self::from_config(&SchedulerConfig::default())
    }
}

impl CurveBuilder {
    pub fn new(sigmoid_steepness: f64) -> Self {
        Self { sigmoid_steepness }
    }

    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.sigmoid_steepness)
    }

    /// Base 0→1 shape values for the active range.
    pub fn segment(
        &self,
        range: &ActiveRange,
        shape: BlendShape,
        custom_curve: Option<&[f64]>,
    ) -> BlendResult<Vec<f64>> {
        shape_segment(shape, range.duration(), custom_curve, self.sigmoid_steepness)
    }

    /// Apply `exponent` to a base segment and lay out the full schedule.
    ///
    /// A degenerate range yields an all-zero schedule in both directions.
    /// Every element is clamped to [0, 1].
    pub fn assemble(
        &self,
        range: &ActiveRange,
        segment: &[f64],
        exponent: f64,
        invert: bool,
    ) -> BlendResult<Schedule> {
        if !(exponent.is_finite() && exponent > 0.0) {
            return Err(BlendError::invalid_input(
                "exponent",
                format!("must be finite and > 0, got {exponent}"),
            ));
        }
        if segment.len() != range.duration() {
            return Err(BlendError::invalid_input(
                "segment",
                format!(
                    "length {} does not match range duration {}",
                    segment.len(),
                    range.duration()
                ),
            ));
        }

        if range.is_degenerate() {
            return Ok(Schedule::from_high(vec![0.0; range.steps]));
        }

        let (before, after) = if invert { (0.0, 1.0) } else { (1.0, 0.0) };
        let mut high = Vec::with_capacity(range.steps);
        high.resize(range.start, before);
        high.extend(segment.iter().map(|&c| {
            let c = if exponent == 1.0 { c } else { c.powf(exponent) };
            if invert {
                c
            } else {
                1.0 - c
            }
        }));
        high.resize(range.steps, after);

        Ok(Schedule::from_high(high))
    }

    /// Normalize the range, shape it, apply `exponent`, and assemble.
    #[allow(clippy::too_many_arguments)]
    pub fn build(
        &self,
        steps: i64,
        start_step: i64,
        end_step: i64,
        shape: BlendShape,
        invert: bool,
        exponent: f64,
        custom_curve: Option<&[f64]>,
    ) -> BlendResult<Schedule> {
        let range = ActiveRange::normalize(steps, start_step, end_step)?;
        let segment = self.segment(&range, shape, custom_curve)?;
        self.assemble(&range, &segment, exponent, invert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(steps: i64, start: i64, end: i64, shape: BlendShape, invert: bool) -> Schedule {
        CurveBuilder::default()
            .build(steps, start, end, shape, invert, 1.0, None)
            .unwrap()
    }

    // ── ActiveRange ───────────────────────────────────────────────

    #[test]
    fn test_normalize_open_end() {
        let r = ActiveRange::normalize(30, 0, -1).unwrap();
        assert_eq!((r.steps, r.start, r.end), (30, 0, 30));
        let r = ActiveRange::normalize(30, 5, 99).unwrap();
        assert_eq!((r.start, r.end), (5, 30));
    }

    #[test]
    fn test_normalize_steps_floor() {
        let r = ActiveRange::normalize(0, 0, -1).unwrap();
        assert_eq!((r.steps, r.start, r.end), (1, 0, 1));
        let r = ActiveRange::normalize(-7, 3, 2).unwrap();
        assert_eq!(r.steps, 1);
        assert!(r.start <= r.end && r.end <= r.steps);
    }

    #[test]
    fn test_normalize_start_after_end_resets() {
        let r = ActiveRange::normalize(20, 12, 8).unwrap();
        assert_eq!((r.start, r.end), (0, 8));
    }

    #[test]
    fn test_normalize_negative_start() {
        let r = ActiveRange::normalize(10, -4, 6).unwrap();
        assert_eq!((r.start, r.end), (0, 6));
    }

    #[test]
    fn test_normalize_equal_bounds() {
        let r = ActiveRange::normalize(10, 4, 4).unwrap();
        assert!(r.is_degenerate());
    }

    // ── Direction and layout ──────────────────────────────────────

    #[test]
    fn test_full_range_linear_fades_down() {
        let s = build(10, 0, 10, BlendShape::Linear, false);
        assert_eq!(s.len(), 10);
        assert!((s.high()[0] - 1.0).abs() < 1e-12);
        assert!(s.high()[9].abs() < 1e-12);
    }

    #[test]
    fn test_full_range_linear_inverted_rises() {
        let s = build(10, 0, -1, BlendShape::Linear, true);
        assert!(s.high()[0].abs() < 1e-12);
        assert!((s.high()[9] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_range_constants() {
        let s = build(20, 5, 15, BlendShape::Linear, false);
        assert!(s.high()[..5].iter().all(|&v| v == 1.0));
        assert!(s.high()[15..].iter().all(|&v| v == 0.0));
        assert_eq!(s.high()[5], 1.0);
        assert_eq!(s.high()[14], 0.0);
        assert_eq!(s.high()[0], 1.0);
        assert_eq!(s.high()[19], 0.0);
    }

    #[test]
    fn test_partial_range_inverted_constants() {
        let s = build(20, 5, 15, BlendShape::EaseOut, true);
        assert!(s.high()[..5].iter().all(|&v| v == 0.0));
        assert!(s.high()[15..].iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_degenerate_range_is_all_zero() {
        for invert in [false, true] {
            let s = build(12, 6, 6, BlendShape::Sigmoid, invert);
            assert_eq!(s.high(), vec![0.0; 12].as_slice());
        }
    }

    #[test]
    fn test_single_step_duration() {
        // duration 1 samples t = [0] → high stays 1.0 on that step
        let s = build(4, 2, 3, BlendShape::Linear, false);
        assert_eq!(s.high(), &[1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_single_step_schedule() {
        let s = build(1, 0, -1, BlendShape::Linear, false);
        assert_eq!(s.high(), &[1.0]);
    }

    #[test]
    fn test_low_channel_is_complement() {
        let s = build(17, 2, 13, BlendShape::Sigmoid, false);
        for (h, l) in s.high().iter().zip(s.low()) {
            assert!((h + l - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_unknown_shape_name_builds_linear() {
        let a = build(9, 0, -1, BlendShape::from_name("zigzag"), false);
        let b = build(9, 0, -1, BlendShape::Linear, false);
        assert_eq!(a, b);
    }

    // ── Exponent ──────────────────────────────────────────────────

    #[test]
    fn test_exponent_above_one_sustains_high() {
        let builder = CurveBuilder::default();
        let base = builder.build(11, 0, -1, BlendShape::Linear, false, 1.0, None).unwrap();
        let sag = builder.build(11, 0, -1, BlendShape::Linear, false, 2.0, None).unwrap();
        assert!((sag.high()[5] - 0.75).abs() < 1e-12);
        assert!(sag.high()[5] > base.high()[5]);
        assert_eq!(sag.high()[0], 1.0);
        assert!(sag.high()[10].abs() < 1e-12);
    }

    #[test]
    fn test_exponent_below_one_drops_high() {
        let builder = CurveBuilder::default();
        let base = builder.build(11, 0, -1, BlendShape::Linear, false, 1.0, None).unwrap();
        let bulge = builder.build(11, 0, -1, BlendShape::Linear, false, 0.5, None).unwrap();
        assert!(bulge.high()[5] < base.high()[5]);
    }

    #[test]
    fn test_extreme_exponents_stay_in_bounds() {
        let builder = CurveBuilder::default();
        for exponent in [1e-9, 1e-3, 50.0, 1e6] {
            let s = builder
                .build(40, 3, 35, BlendShape::Sigmoid, false, exponent, None)
                .unwrap();
            assert!(s.high().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_invalid_exponent_rejected() {
        let builder = CurveBuilder::default();
        for exponent in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = builder
                .build(10, 0, -1, BlendShape::Linear, false, exponent, None)
                .unwrap_err();
            assert!(matches!(err, BlendError::InvalidInput { field: "exponent", .. }));
        }
    }

    // ── Custom curves ─────────────────────────────────────────────

    #[test]
    fn test_custom_curve_reproduced_in_active_segment() {
        let curve = [0.0, 0.3, 0.1, 0.8, 1.0, 0.6];
        let s = CurveBuilder::default()
            .build(10, 2, 8, BlendShape::CustomCurve, true, 1.0, Some(&curve[..]))
            .unwrap();
        assert_eq!(&s.high()[2..8], &curve);
        assert_eq!(&s.high()[..2], &[0.0, 0.0]);
        assert_eq!(&s.high()[8..], &[1.0, 1.0]);
    }

    #[test]
    fn test_custom_curve_with_nan_fails() {
        let err = CurveBuilder::default()
            .build(10, 0, -1, BlendShape::CustomCurve, false, 1.0, Some(&[0.0, f64::NAN][..]))
            .unwrap_err();
        assert!(matches!(err, BlendError::InvalidInput { field: "custom_curve", .. }));
    }

    #[test]
    fn test_assemble_rejects_mismatched_segment() {
        let builder = CurveBuilder::default();
        let range = ActiveRange::normalize(10, 0, 5).unwrap();
        assert!(builder.assemble(&range, &[0.0, 1.0], 1.0, false).is_err());
    }
}
