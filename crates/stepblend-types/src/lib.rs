// ─────────────────────────────────────────────────────────────────────
// StepBlend — Scheduler Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Type definitions, configuration, and error hierarchy for the
//! StepBlend scheduler, the per-step blend-weight engine that fades
//! a "high" parameter set into a "low" one across generation steps.

pub mod config;
pub mod error;
pub mod params;
pub mod schedule;

pub use config::{AnalyzerConfig, SchedulerConfig, TuningConfig};
pub use error::{BlendError, BlendResult};
pub use params::{AdaptiveMode, BlendRequest, BlendShape, TuningGoal, END_OF_SCHEDULE};
pub use schedule::{clamp_weight, AdaptiveInfo, SamplePoint, Schedule};
