// ─────────────────────────────────────────────────────────────────────
// StepBlend — Schedule Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Clamp a weight to [0, 1], mapping NaN to 0 and Inf to the nearest bound.
#[inline]
pub fn clamp_weight(value: f64) -> f64 {
    if value.is_nan() {
        log::warn!("clamp_weight: NaN detected, clamping to 0.0");
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Per-step "high" channel weights.
///
/// The "low" channel is always derived as `1 - high`; it is never
/// stored, so the two channels sum to 1.0 at every step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSchedule")]
pub struct Schedule {
    high: Vec<f64>,
}

/// Wire form of [`Schedule`]; deserialized weights pass through `from_high`.
#[derive(Deserialize)]
struct RawSchedule {
    high: Vec<f64>,
}

impl From<RawSchedule> for Schedule {
    fn from(raw: RawSchedule) -> Self {
        Self::from_high(raw.high)
    }
}

/// One row of the numeric preview: step index and both weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub step: usize,
    pub high: f64,
    pub low: f64,
}

impl Schedule {
    /// Build from raw weights, clamping every element into [0, 1].
    pub fn from_high(high: Vec<f64>) -> Self {
        Self {
            high: high.into_iter().map(clamp_weight).collect(),
        }
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> Vec<f64> {
        self.high.iter().map(|h| 1.0 - h).collect()
    }

    pub fn high_at(&self, step: usize) -> Option<f64> {
        self.high.get(step).copied()
    }

    pub fn low_at(&self, step: usize) -> Option<f64> {
        self.high_at(step).map(|h| 1.0 - h)
    }

    pub fn len(&self) -> usize {
        self.high.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty()
    }

    pub fn into_high(self) -> Vec<f64> {
        self.high
    }

    /// Weights at steps `[0, n/4, n/2, 3n/4, n-1]`.
    pub fn sample_points(&self) -> Vec<SamplePoint> {
        let n = self.high.len();
        if n == 0 {
            return Vec::new();
        }
        [0, n / 4, n / 2, 3 * n / 4, n - 1]
            .into_iter()
            .map(|i| i.min(n - 1))
            .map(|step| SamplePoint {
                step,
                high: self.high[step],
                low: 1.0 - self.high[step],
            })
            .collect()
    }

    /// First step where the two channels are closest to equal.
    pub fn crossover_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &h) in self.high.iter().enumerate() {
            let gap = (h - (1.0 - h)).abs();
            match best {
                Some((_, g)) if gap >= g => {}
                _ => best = Some((i, gap)),
            }
        }
        best.map(|(i, _)| i)
    }
}

/// Adaptive analysis outcome handed to presentation collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveInfo {
    /// Complexity score in [0, 1].
    pub complexity: f64,
    /// Exponent applied to the active curve segment (> 0).
    pub exponent: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_nan() {
        assert_eq!(clamp_weight(f64::NAN), 0.0);
    }

    #[test]
    fn test_deserialize_clamps() {
        let s: Schedule = serde_json::from_str(r#"{"high": [1.5, 0.25, -3.0]}"#).unwrap();
        assert_eq!(s.high(), &[1.0, 0.25, 0.0]);
        assert_eq!(s.low(), vec![0.0, 0.75, 1.0]);
    }

    #[test]
    fn test_serde_round_trip_keeps_shape() {
        let s = Schedule::from_high(vec![1.0, 0.5, 0.0]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"high":[1.0,0.5,0.0]}"#);
        let back: Schedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_clamp_inf() {
        assert_eq!(clamp_weight(f64::INFINITY), 1.0);
        assert_eq!(clamp_weight(f64::NEG_INFINITY), 0.0);
    }

    #[test]
    fn test_clamp_normal() {
        assert_eq!(clamp_weight(0.25), 0.25);
        assert_eq!(clamp_weight(1.0000001), 1.0);
        assert_eq!(clamp_weight(-1e-12), 0.0);
    }

    #[test]
    fn test_low_is_complement() {
        let s = Schedule::from_high(vec![1.0, 0.75, 0.5, 0.0]);
        assert_eq!(s.low(), vec![0.0, 0.25, 0.5, 1.0]);
        for i in 0..s.len() {
            assert!((s.high_at(i).unwrap() + s.low_at(i).unwrap() - 1.0).abs() < 1e-12);
        }
        assert_eq!(s.low_at(9), None);
    }

    #[test]
    fn test_from_high_clamps() {
        let s = Schedule::from_high(vec![1.5, -0.2, f64::NAN]);
        assert_eq!(s.high(), &[1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_sample_points() {
        let s = Schedule::from_high((0..20).map(|i| 1.0 - i as f64 / 19.0).collect());
        let steps: Vec<usize> = s.sample_points().iter().map(|p| p.step).collect();
        assert_eq!(steps, vec![0, 5, 10, 15, 19]);
        assert!((s.sample_points()[0].high - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_points_single_step() {
        let s = Schedule::from_high(vec![0.0]);
        let pts = s.sample_points();
        assert_eq!(pts.len(), 5);
        assert!(pts.iter().all(|p| p.step == 0 && p.low == 1.0));
    }

    #[test]
    fn test_crossover_index() {
        let s = Schedule::from_high(vec![1.0, 0.8, 0.6, 0.45, 0.0]);
        assert_eq!(s.crossover_index(), Some(3));
        assert_eq!(Schedule::from_high(Vec::new()).crossover_index(), None);
    }
}
