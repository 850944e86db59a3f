// ─────────────────────────────────────────────────────────────────────
// StepBlend — Complexity Analyzer
// ─────────────────────────────────────────────────────────────────────
//! Image complexity score in [0, 1]: 0.0 = smooth, 1.0 = texture/noise.
//!
//! Two measures over the luma plane of each sampled frame:
//! - **Frequency analysis**: share of log-magnitude spectral energy
//!   outside the central low-frequency square, with the typical band
//!   `[0.2, 0.8]` stretched onto `[0, 1]`.
//! - **Basic variance**: `variance(luma) · 10`, clamped.
//!
//! The batch score is the mean of per-frame scores.

use std::time::Instant;

use ndarray::Array2;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use stepblend_types::{AdaptiveMode, AnalyzerConfig, BlendError, BlendResult};

use crate::image::{luma, ImageBatch};
use crate::sampling::sample_indices;
use crate::spectrum::{high_frequency_ratio, SpectrumPlan};

/// Summary of one analysis pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Mean per-frame score in [0, 1].
    pub score: f64,
    pub frames_total: usize,
    pub frames_sampled: usize,
    pub height: usize,
    pub width: usize,
    pub elapsed_ms: f64,
}

/// Stateless complexity analyzer. Never mutates the batch.
#[derive(Debug, Clone, Default)]
pub struct ComplexityAnalyzer {
    config: AnalyzerConfig,
}

impl ComplexityAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Score a batch. An empty sample set scores 0.0.
    ///
    /// `AdaptiveMode::Off` is not a measurement and is rejected; callers
    /// skip the analyzer for it.
    pub fn score(&self, images: &ImageBatch, mode: AdaptiveMode) -> BlendResult<f64> {
        self.analyze(images, mode).map(|report| report.score)
    }

    /// Score a batch and report sampling and timing details.
    pub fn analyze(&self, images: &ImageBatch, mode: AdaptiveMode) -> BlendResult<AnalysisReport> {
        if mode == AdaptiveMode::Off {
            return Err(BlendError::Analysis(
                "analysis requested with adaptive mode off".to_string(),
            ));
        }
        images.check_analyzable()?;

        let start = Instant::now();
        let (height, width) = images.frame_size();
        let indices = sample_indices(images.len(), self.config.max_samples);
        let plan = match mode {
            AdaptiveMode::FrequencyAnalysis if !indices.is_empty() => {
                Some(SpectrumPlan::new(height, width))
            }
            _ => None,
        };

        let score_one = |&i: &usize| -> BlendResult<f64> {
            let plane = luma(images.frame(i));
            let score = match &plan {
                Some(plan) => self.frequency_score(plan, &plane),
                None => self.variance_score(&plane),
            }?;
            log::trace!("frame {i}: complexity {score:.4}");
            Ok(score)
        };

        let scores: Vec<f64> = if self.config.parallel {
            indices.par_iter().map(score_one).collect::<BlendResult<_>>()?
        } else {
            indices.iter().map(score_one).collect::<BlendResult<_>>()?
        };

        let score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Ok(AnalysisReport {
            score,
            frames_total: images.len(),
            frames_sampled: indices.len(),
            height,
            width,
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    /// Normalized high-frequency energy share of one luma plane.
    pub fn frequency_score(&self, plan: &SpectrumPlan, plane: &Array2<f32>) -> BlendResult<f64> {
        let spectrum = plan.magnitude_spectrum(plane);
        let Some(ratio) = high_frequency_ratio(&spectrum, self.config.low_freq_divisor) else {
            // no energy anywhere: a black frame is perfectly smooth
            return Ok(0.0);
        };
        if !ratio.is_finite() {
            return Err(BlendError::Numerical(format!(
                "non-finite spectral energy ratio {ratio}"
            )));
        }
        let normalized = (ratio - self.config.ratio_floor) / self.config.ratio_span;
        Ok(normalized.clamp(0.0, 1.0))
    }

    /// Scaled unbiased luma variance of one plane.
    pub fn variance_score(&self, plane: &Array2<f32>) -> BlendResult<f64> {
        let var = unbiased_variance(plane)?;
        Ok((var * self.config.variance_gain).clamp(0.0, 1.0))
    }
}

fn unbiased_variance(plane: &Array2<f32>) -> BlendResult<f64> {
    let n = plane.len();
    if n < 2 {
        return Err(BlendError::Numerical(format!(
            "variance needs at least 2 pixels, got {n}"
        )));
    }
    let mean = plane.iter().map(|&v| f64::from(v)).sum::<f64>() / n as f64;
    let ss: f64 = plane
        .iter()
        .map(|&v| {
            let d = f64::from(v) - mean;
            d * d
        })
        .sum();
    let var = ss / (n - 1) as f64;
    if !var.is_finite() {
        return Err(BlendError::Numerical(format!("non-finite luma variance {var}")));
    }
    Ok(var)
}
