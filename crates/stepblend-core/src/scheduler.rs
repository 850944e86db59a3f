// ─────────────────────────────────────────────────────────────────────
// StepBlend — Adaptive Blend Scheduler
// ─────────────────────────────────────────────────────────────────────
//! Top-level call: schedule parameters + optional images → high/low
//! weight schedules and the optional adaptive summary.
//!
//! Control flow:
//!   1. Normalize the step range (never fails for valid integers).
//!   2. Build the base shape segment (fails only on an unusable custom curve).
//!   3. If adaptive mode is on, images are present, and the range is not
//!      degenerate: measure complexity and select an exponent. Any analyzer
//!      error or panic degrades to exponent 1.0.
//!   4. Assemble and clamp the full schedule.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stepblend_analysis::{select_exponent, ComplexityAnalyzer, ImageBatch};
use stepblend_types::{
    AdaptiveInfo, BlendRequest, BlendResult, Schedule, SchedulerConfig, END_OF_SCHEDULE,
};

use crate::curve::{ActiveRange, CurveBuilder};
use crate::lora::{apply_schedule, LoraEntry};
use crate::observer::{emit, DiagnosticEvent, DiagnosticObserver, LogObserver};

/// Result of one scheduler call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendOutcome {
    pub schedule: Schedule,
    pub range: ActiveRange,
    /// Present only when adaptive analysis ran and succeeded.
    pub adaptive: Option<AdaptiveInfo>,
}

impl BlendOutcome {
    pub fn high(&self) -> &[f64] {
        self.schedule.high()
    }

    pub fn low(&self) -> Vec<f64> {
        self.schedule.low()
    }

    /// Exponent applied to the active segment (1.0 when not adaptive).
    pub fn exponent(&self) -> f64 {
        self.adaptive.map_or(1.0, |a| a.exponent)
    }

    /// Clone the caller's LoRA lists with the two channels attached.
    pub fn apply_to_loras(
        &self,
        high: &[LoraEntry],
        low: &[LoraEntry],
    ) -> (Vec<LoraEntry>, Vec<LoraEntry>) {
        apply_schedule(high, low, &self.schedule)
    }
}

/// Stateless adaptive scheduler.
///
/// Safe to share across threads; calls do not interact.
pub struct BlendScheduler {
    config: SchedulerConfig,
    builder: CurveBuilder,
    analyzer: ComplexityAnalyzer,
    observer: Arc<dyn DiagnosticObserver>,
}

impl Default for BlendScheduler {
    fn default() -> Self {
        let config = SchedulerConfig::default();
        Self {
            builder: CurveBuilder::from_config(&config),
            analyzer: ComplexityAnalyzer::new(config.analyzer.clone()),
            observer: Arc::new(LogObserver),
            config,
        }
    }
}

impl BlendScheduler {
    /// Validate `config` and build a scheduler that logs via `log`.
    pub fn new(config: SchedulerConfig) -> BlendResult<Self> {
        Self::with_observer(config, Arc::new(LogObserver))
    }

    pub fn with_observer(
        config: SchedulerConfig,
        observer: Arc<dyn DiagnosticObserver>,
    ) -> BlendResult<Self> {
        config.validate()?;
        Ok(Self {
            builder: CurveBuilder::from_config(&config),
            analyzer: ComplexityAnalyzer::new(config.analyzer.clone()),
            observer,
            config,
        })
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Produce the blend schedule for one request.
    ///
    /// Fails only when the base curve cannot be built; adaptive failures
    /// are reported to the observer and otherwise ignored.
    pub fn schedule(
        &self,
        request: &BlendRequest,
        images: Option<&ImageBatch>,
    ) -> BlendResult<BlendOutcome> {
        let range = ActiveRange::normalize(request.steps, request.start_step, request.end_step)?;
        let requested_end = if request.end_step == END_OF_SCHEDULE {
            request.steps
        } else {
            request.end_step
        };
        if (range.steps as i64, range.start as i64, range.end as i64)
            != (request.steps, request.start_step, requested_end)
        {
            self.emit(DiagnosticEvent::RangeNormalized {
                requested_steps: request.steps,
                requested_start: request.start_step,
                requested_end: request.end_step,
                range,
            });
        }

        let segment =
            self.builder
                .segment(&range, request.shape, request.custom_curve.as_deref())?;

        let adaptive = match images {
            Some(batch) if request.adaptive_mode.is_enabled() && !range.is_degenerate() => {
                self.adaptive_info(request, batch)
            }
            _ => None,
        };
        let exponent = adaptive.map_or(1.0, |a| a.exponent);

        let schedule = self
            .builder
            .assemble(&range, &segment, exponent, request.invert)?;

        self.emit(DiagnosticEvent::ScheduleBuilt {
            range,
            shape: request.shape,
            invert: request.invert,
            exponent,
            samples: schedule.sample_points(),
            crossover: schedule.crossover_index(),
        });

        Ok(BlendOutcome {
            schedule,
            range,
            adaptive,
        })
    }

    /// Schedule and attach the result to the caller's LoRA lists.
    pub fn schedule_loras(
        &self,
        request: &BlendRequest,
        images: Option<&ImageBatch>,
        high: &[LoraEntry],
        low: &[LoraEntry],
    ) -> BlendResult<(Vec<LoraEntry>, Vec<LoraEntry>, BlendOutcome)> {
        let outcome = self.schedule(request, images)?;
        let (high, low) = outcome.apply_to_loras(high, low);
        Ok((high, low, outcome))
    }

    /// Measure complexity and pick an exponent, or `None` on any failure.
    fn adaptive_info(&self, request: &BlendRequest, images: &ImageBatch) -> Option<AdaptiveInfo> {
        let intensity = request.effective_intensity();
        self.emit(DiagnosticEvent::AnalysisStarted {
            mode: request.adaptive_mode,
            goal: request.tuning_goal,
            intensity,
            frames: images.len(),
        });

        let result = catch_unwind(AssertUnwindSafe(|| -> BlendResult<AdaptiveInfo> {
            let report = self.analyzer.analyze(images, request.adaptive_mode)?;
            let complexity = report.score;
            self.emit(DiagnosticEvent::ComplexityMeasured { report });
            let exponent = select_exponent(
                complexity,
                request.tuning_goal,
                intensity,
                &self.config.tuning,
            )?;
            Ok(AdaptiveInfo {
                complexity,
                exponent,
            })
        }));

        let reason = match result {
            Ok(Ok(info)) => {
                self.emit(DiagnosticEvent::ExponentSelected {
                    goal: request.tuning_goal,
                    complexity: info.complexity,
                    exponent: info.exponent,
                });
                return Some(info);
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => "complexity analyzer panicked".to_string(),
        };
        self.emit(DiagnosticEvent::AnalysisFailed { reason });
        None
    }

    fn emit(&self, event: DiagnosticEvent) {
        emit(self.observer.as_ref(), event);
    }
}
