// ─────────────────────────────────────────────────────────────────────
// StepBlend — Complexity Analysis
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Image complexity measurement and the adaptive exponent policy.
//!
//! Pipeline per call:
//!   1. `ImageBatch` → deterministic frame sample (≤ 8 frames)
//!   2. Frame → luma plane (Rec. 601 weights)
//!   3. Luma → FFT energy ratio or scaled variance → per-frame score
//!   4. Mean score + tuning goal + intensity → curve exponent
//!
//! Frames are scored independently on the rayon pool. Nothing here
//! holds state between calls.

pub mod complexity;
pub mod image;
pub mod policy;
pub mod sampling;
pub mod spectrum;

pub use complexity::{AnalysisReport, ComplexityAnalyzer};
pub use image::{luma, ImageBatch};
pub use policy::{base_modifier, select_exponent, NEUTRAL_COMPLEXITY};
pub use sampling::sample_indices;
pub use spectrum::{fft_shift, high_frequency_ratio, SpectrumPlan};
