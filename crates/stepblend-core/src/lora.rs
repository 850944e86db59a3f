// ─────────────────────────────────────────────────────────────────────
// StepBlend — LoRA Entry Scheduling
// ─────────────────────────────────────────────────────────────────────
//! Attach per-step strengths to caller-owned LoRA entries.
//!
//! Entries are cloned, never mutated. Fields this crate does not know
//! about ride along untouched in `extra`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use stepblend_types::Schedule;

/// LoRA strength: one constant or one value per step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LoraStrength {
    Constant(f64),
    PerStep(Vec<f64>),
}

impl Default for LoraStrength {
    fn default() -> Self {
        Self::Constant(1.0)
    }
}

impl LoraStrength {
    /// Strength at `step`; a per-step list holds its last value past the end.
    pub fn at(&self, step: usize) -> f64 {
        match self {
            Self::Constant(v) => *v,
            Self::PerStep(values) => values
                .get(step)
                .or_else(|| values.last())
                .copied()
                .unwrap_or(0.0),
        }
    }
}

/// One LoRA record as handed over by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoraEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub strength: LoraStrength,
    /// Whether the host may fold this LoRA into the base weights.
    /// Scheduled entries are never merged.
    #[serde(default = "default_merge")]
    pub merge_loras: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_merge() -> bool {
    true
}

impl LoraEntry {
    pub fn new(name: impl Into<String>, path: impl Into<String>, strength: f64) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            strength: LoraStrength::Constant(strength),
            merge_loras: default_merge(),
            extra: Map::new(),
        }
    }

    /// Copy of this entry carrying `weights` as its per-step strength.
    pub fn with_schedule(&self, weights: &[f64]) -> Self {
        Self {
            strength: LoraStrength::PerStep(weights.to_vec()),
            merge_loras: false,
            ..self.clone()
        }
    }
}

/// Clone every entry with `weights` attached.
pub fn attach_schedule(entries: &[LoraEntry], weights: &[f64]) -> Vec<LoraEntry> {
    entries.iter().map(|e| e.with_schedule(weights)).collect()
}

/// High entries get the high channel, low entries its complement.
pub fn apply_schedule(
    high: &[LoraEntry],
    low: &[LoraEntry],
    schedule: &Schedule,
) -> (Vec<LoraEntry>, Vec<LoraEntry>) {
    (
        attach_schedule(high, schedule.high()),
        attach_schedule(low, &schedule.low()),
    )
}
