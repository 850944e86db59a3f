// ─────────────────────────────────────────────────────────────────────
// StepBlend — Adaptive Blend Scheduler Core
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Curve builder, LoRA attachment, and the adaptive scheduler that
//! turns step parameters plus optional reference images into a pair
//! of complementary per-step weight lists.
//!
//! # Invariants
//!
//! 1. **Complementary channels**: for every step, `high + low == 1`.
//!    Only `high` is stored; `low` is always derived.
//!
//! 2. **Bounded weights**: every element lies in `[0, 1]`. NaN collapses
//!    to 0.0 before it can reach a caller.
//!
//! 3. **Adaptive analysis is optional**: analyzer errors and panics are
//!    caught, reported as `AnalysisFailed`, and the schedule proceeds
//!    with exponent 1.0. Only an unusable custom curve fails a call.
//!
//! 4. **Stateless calls**: the scheduler holds configuration only.
//!    Concurrent calls never interact.

pub mod curve;
pub mod interp;
pub mod lora;
pub mod observer;
pub mod scheduler;
pub mod shape;

pub use curve::{ActiveRange, CurveBuilder};
pub use lora::{apply_schedule, attach_schedule, LoraEntry, LoraStrength};
pub use observer::{
    DiagnosticEvent, DiagnosticObserver, ExternalObserver, LogObserver, NullObserver,
    RecordingObserver,
};
pub use scheduler::{BlendOutcome, BlendScheduler};
pub use shape::{evaluate, shape_segment};

pub use stepblend_analysis::{ComplexityAnalyzer, ImageBatch};
pub use stepblend_types::{
    AdaptiveInfo, AdaptiveMode, BlendError, BlendRequest, BlendResult, BlendShape, Schedule,
    SchedulerConfig, TuningGoal,
};
