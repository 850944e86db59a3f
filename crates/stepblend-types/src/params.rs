// ─────────────────────────────────────────────────────────────────────
// StepBlend — Request Parameters
// ─────────────────────────────────────────────────────────────────────
//! Caller-facing request parameters.
//!
//! All enum parsers are tolerant: unknown names fall back to a default
//! variant instead of failing, matching the host's loose string inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BlendError, BlendResult};

/// `end_step` sentinel meaning "through the last step".
pub const END_OF_SCHEDULE: i64 = -1;

/// Base 0→1 transition function applied over the active range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlendShape {
    /// `t`
    #[default]
    Linear,
    /// `t²`: slow start, fast end.
    EaseIn,
    /// `1 - (1 - t)²`: fast start, slow end.
    EaseOut,
    /// Logistic S-curve centred on `t = 0.5`.
    Sigmoid,
    /// Hard jump at `t = 0.5`.
    Step,
    /// Caller-supplied curve resampled onto the active range.
    CustomCurve,
}

impl BlendShape {
    /// Parse a shape name. Unrecognized names fall back to `Linear`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Self::Linear,
            "ease-in" | "ease_in" => Self::EaseIn,
            "ease-out" | "ease_out" => Self::EaseOut,
            "sigmoid" => Self::Sigmoid,
            "step" => Self::Step,
            "custom_curve" | "custom-curve" | "custom" => Self::CustomCurve,
            _ => Self::Linear,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::EaseIn => "ease-in",
            Self::EaseOut => "ease-out",
            Self::Sigmoid => "sigmoid",
            Self::Step => "step",
            Self::CustomCurve => "custom_curve",
        }
    }

    /// Built-in shapes that rise monotonically from 0 to 1.
    pub fn is_monotonic(self) -> bool {
        !matches!(self, Self::CustomCurve)
    }
}

/// How image complexity is measured, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AdaptiveMode {
    Off,
    /// FFT high/total energy ratio of the luma plane.
    #[default]
    FrequencyAnalysis,
    /// Scaled luma variance; cheap proxy.
    BasicVariance,
}

impl AdaptiveMode {
    /// Parse a mode name. Anything that is neither `off` nor
    /// `frequency_analysis` selects `BasicVariance`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "off" => Self::Off,
            "frequency_analysis" | "frequency-analysis" => Self::FrequencyAnalysis,
            _ => Self::BasicVariance,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::FrequencyAnalysis => "frequency_analysis",
            Self::BasicVariance => "basic_variance",
        }
    }

    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

/// How a complexity score is turned into a curve exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TuningGoal {
    #[default]
    Standard,
    EncourageMotion,
    PreserveDetails,
}

impl TuningGoal {
    /// Parse a goal name. Unrecognized names select `Standard`.
    pub fn from_name(name: &str) -> Self {
        let key: String = name
            .trim()
            .to_ascii_lowercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        match key.as_str() {
            "encouragemotion" => Self::EncourageMotion,
            "preservedetails" => Self::PreserveDetails,
            _ => Self::Standard,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::EncourageMotion => "Encourage Motion",
            Self::PreserveDetails => "Preserve Details",
        }
    }
}

macro_rules! string_enum_conversions {
    ($($ty:ty),*) => {$(
        impl From<String> for $ty {
            fn from(name: String) -> Self {
                Self::from_name(&name)
            }
        }

        impl From<$ty> for String {
            fn from(value: $ty) -> Self {
                value.name().to_string()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    )*};
}

string_enum_conversions!(BlendShape, AdaptiveMode, TuningGoal);

/// Schedule parameters for one scheduler call.
///
/// Out-of-range values are normalized by the curve builder, never
/// rejected. The image batch travels separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendRequest {
    /// Total generation steps. Values < 1 are treated as 1.
    pub steps: i64,
    /// First step of the transition.
    pub start_step: i64,
    /// One past the last transition step; `END_OF_SCHEDULE` (or any
    /// value outside `[0, steps]`) means "through the end".
    pub end_step: i64,
    #[serde(alias = "blend_strategy")]
    pub shape: BlendShape,
    /// `false`: high channel fades 1 → 0. `true`: rises 0 → 1.
    pub invert: bool,
    pub adaptive_mode: AdaptiveMode,
    pub tuning_goal: TuningGoal,
    #[serde(alias = "adaptive_intensity")]
    pub intensity: f64,
    pub custom_curve: Option<Vec<f64>>,
}

impl Default for BlendRequest {
    fn default() -> Self {
        Self {
            steps: 30,
            start_step: 0,
            end_step: END_OF_SCHEDULE,
            shape: BlendShape::Linear,
            invert: false,
            adaptive_mode: AdaptiveMode::FrequencyAnalysis,
            tuning_goal: TuningGoal::Standard,
            intensity: 1.0,
            custom_curve: None,
        }
    }
}

impl BlendRequest {
    pub fn new(steps: i64, start_step: i64, end_step: i64) -> Self {
        Self {
            steps,
            start_step,
            end_step,
            ..Default::default()
        }
    }

    /// Intensity with NaN and negatives normalized to 0.0.
    pub fn effective_intensity(&self) -> f64 {
        if self.intensity.is_nan() || self.intensity < 0.0 {
            0.0
        } else {
            self.intensity
        }
    }

    /// Load from JSON string. Missing fields take the host defaults.
    pub fn from_json(json: &str) -> BlendResult<Self> {
        serde_json::from_str(json).map_err(|e| BlendError::invalid_input("request", e.to_string()))
    }
}
