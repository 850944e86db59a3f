// ─────────────────────────────────────────────────────────────────────
// StepBlend — Scheduler Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{BlendError, BlendResult};

/// Tunables for the complexity analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Upper bound on frames scored per call.
    /// Default: 8.
    pub max_samples: usize,

    /// Half-width of the low-frequency square is `min(H, W) / low_freq_divisor`.
    /// Default: 8.
    pub low_freq_divisor: usize,

    /// High/total energy ratio mapped to score 0.0.
    /// Default: 0.2.
    pub ratio_floor: f64,

    /// Width of the ratio band mapped onto [0, 1].
    /// Default: 0.6 (so a ratio of 0.8 scores 1.0).
    pub ratio_span: f64,

    /// Multiplier applied to luma variance in `basic_variance` mode.
    /// Default: 10.0.
    pub variance_gain: f64,

    /// Score sampled frames on the rayon pool.
    /// Default: true.
    pub parallel: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_samples: 8,
            low_freq_divisor: 8,
            ratio_floor: 0.2,
            ratio_span: 0.6,
            variance_gain: 10.0,
            parallel: true,
        }
    }
}

/// Tier constants for the `Standard` tuning goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningConfig {
    /// Scores strictly above this use `standard_complex_exponent`.
    /// Default: 0.6.
    pub standard_complex_threshold: f64,

    /// Scores strictly below this use `standard_smooth_exponent`.
    /// Default: 0.3.
    pub standard_smooth_threshold: f64,

    /// Default: 0.8 (high channel drops faster).
    pub standard_complex_exponent: f64,

    /// Default: 1.2 (high channel sustained).
    pub standard_smooth_exponent: f64,
}

impl Default for TuningConfig {
    fn default() -> Self {
        Self {
            standard_complex_threshold: 0.6,
            standard_smooth_threshold: 0.3,
            standard_complex_exponent: 0.8,
            standard_smooth_exponent: 1.2,
        }
    }
}

/// Runtime configuration for the scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub analyzer: AnalyzerConfig,
    pub tuning: TuningConfig,
    /// Steepness of the logistic shape: `1 / (1 + e^{-k(t - 0.5)})`.
    /// Default: 10.0.
    pub sigmoid_steepness: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            tuning: TuningConfig::default(),
            sigmoid_steepness: 10.0,
        }
    }
}

impl SchedulerConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> BlendResult<()> {
        let a = &self.analyzer;
        if a.max_samples == 0 {
            return Err(BlendError::Config(
                "analyzer.max_samples must be >= 1".to_string(),
            ));
        }
        if a.low_freq_divisor == 0 {
            return Err(BlendError::Config(
                "analyzer.low_freq_divisor must be >= 1".to_string(),
            ));
        }
        if !a.ratio_floor.is_finite() {
            return Err(BlendError::Config(format!(
                "analyzer.ratio_floor must be finite, got {}",
                a.ratio_floor
            )));
        }
        if !(a.ratio_span.is_finite() && a.ratio_span > 0.0) {
            return Err(BlendError::Config(format!(
                "analyzer.ratio_span must be > 0, got {}",
                a.ratio_span
            )));
        }
        if !(a.variance_gain.is_finite() && a.variance_gain >= 0.0) {
            return Err(BlendError::Config(format!(
                "analyzer.variance_gain must be >= 0, got {}",
                a.variance_gain
            )));
        }

        let t = &self.tuning;
        if t.standard_smooth_threshold > t.standard_complex_threshold {
            return Err(BlendError::Config(format!(
                "tuning.standard_smooth_threshold ({}) must not exceed standard_complex_threshold ({})",
                t.standard_smooth_threshold, t.standard_complex_threshold
            )));
        }
        for (name, value) in [
            ("standard_complex_exponent", t.standard_complex_exponent),
            ("standard_smooth_exponent", t.standard_smooth_exponent),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(BlendError::Config(format!(
                    "tuning.{name} must be > 0, got {value}"
                )));
            }
        }

        if !(self.sigmoid_steepness.is_finite() && self.sigmoid_steepness > 0.0) {
            return Err(BlendError::Config(format!(
                "sigmoid_steepness must be > 0, got {}",
                self.sigmoid_steepness
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> BlendResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| BlendError::Config(format!("JSON parse error: {e}")))
    }
}
