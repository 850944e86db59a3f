// ─────────────────────────────────────────────────────────────────────
// StepBlend — Diagnostic Observers
// ─────────────────────────────────────────────────────────────────────
//! Structured diagnostic events and the observer trait that receives them.
//!
//! The scheduler never prints. It emits `DiagnosticEvent`s to an injected
//! `DiagnosticObserver`; the default `LogObserver` forwards them to the
//! `log` facade. Observer panics are swallowed so diagnostics can never
//! fail a call.

use std::panic::{catch_unwind, AssertUnwindSafe};

use parking_lot::Mutex;
use serde::Serialize;

use stepblend_analysis::AnalysisReport;
use stepblend_types::{AdaptiveMode, BlendShape, SamplePoint, TuningGoal};

use crate::curve::ActiveRange;

/// One diagnostic event from a scheduler call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DiagnosticEvent {
    /// The caller's step parameters were adjusted.
    RangeNormalized {
        requested_steps: i64,
        requested_start: i64,
        requested_end: i64,
        range: ActiveRange,
    },
    AnalysisStarted {
        mode: AdaptiveMode,
        goal: TuningGoal,
        intensity: f64,
        frames: usize,
    },
    ComplexityMeasured { report: AnalysisReport },
    ExponentSelected {
        goal: TuningGoal,
        complexity: f64,
        exponent: f64,
    },
    /// Adaptive step abandoned; the curve proceeds with exponent 1.0.
    AnalysisFailed { reason: String },
    ScheduleBuilt {
        range: ActiveRange,
        shape: BlendShape,
        invert: bool,
        exponent: f64,
        samples: Vec<SamplePoint>,
        crossover: Option<usize>,
    },
}

/// Receiver for diagnostic events.
pub trait DiagnosticObserver: Send + Sync {
    fn on_event(&self, event: &DiagnosticEvent);
}

/// Deliver `event`, dropping it if the observer panics.
pub fn emit(observer: &dyn DiagnosticObserver, event: DiagnosticEvent) {
    if catch_unwind(AssertUnwindSafe(|| observer.on_event(&event))).is_err() {
        log::warn!("diagnostic observer panicked, event dropped");
    }
}

/// Forwards events to the `log` facade.
pub struct LogObserver;

impl DiagnosticObserver for LogObserver {
    fn on_event(&self, event: &DiagnosticEvent) {
        match event {
            DiagnosticEvent::RangeNormalized {
                requested_steps,
                requested_start,
                requested_end,
                range,
            } => log::debug!(
                "range normalized: steps={requested_steps} [{requested_start}, {requested_end}) → steps={} [{}, {})",
                range.steps,
                range.start,
                range.end
            ),
            DiagnosticEvent::AnalysisStarted {
                mode,
                goal,
                intensity,
                frames,
            } => log::info!(
                "adaptive analysis: mode={mode} goal={goal} intensity={intensity} frames={frames}"
            ),
            DiagnosticEvent::ComplexityMeasured { report } => log::info!(
                "complexity {:.4} from {}/{} frames ({}x{}) in {:.2}ms",
                report.score,
                report.frames_sampled,
                report.frames_total,
                report.width,
                report.height,
                report.elapsed_ms
            ),
            DiagnosticEvent::ExponentSelected {
                goal,
                complexity,
                exponent,
            } => log::info!("exponent {exponent:.3} (goal={goal}, complexity={complexity:.3})"),
            DiagnosticEvent::AnalysisFailed { reason } => {
                log::warn!("adaptive analysis failed, curve left unmodified: {reason}")
            }
            DiagnosticEvent::ScheduleBuilt {
                range,
                shape,
                invert,
                exponent,
                samples,
                crossover,
            } => {
                log::debug!(
                    "schedule built: shape={shape} invert={invert} exponent={exponent:.3} steps={} active=[{}, {}) crossover={crossover:?}",
                    range.steps,
                    range.start,
                    range.end
                );
                for p in samples {
                    log::debug!(
                        "  step {:3}: high={:.1}% low={:.1}%",
                        p.step,
                        p.high * 100.0,
                        p.low * 100.0
                    );
                }
            }
        }
    }
}

/// Discards every event.
pub struct NullObserver;

impl DiagnosticObserver for NullObserver {
    fn on_event(&self, _event: &DiagnosticEvent) {}
}

/// Buffers events in memory.
#[derive(Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<DiagnosticEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl DiagnosticObserver for RecordingObserver {
    fn on_event(&self, event: &DiagnosticEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Observer backed by a closure, for host bridges.
type EventFn = Box<dyn Fn(&DiagnosticEvent) + Send + Sync>;

pub struct ExternalObserver {
    event_fn: EventFn,
}

impl ExternalObserver {
    pub fn new(event_fn: impl Fn(&DiagnosticEvent) + Send + Sync + 'static) -> Self {
        Self {
            event_fn: Box::new(event_fn),
        }
    }
}

impl DiagnosticObserver for ExternalObserver {
    fn on_event(&self, event: &DiagnosticEvent) {
        (self.event_fn)(event)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn failed(reason: &str) -> DiagnosticEvent {
        DiagnosticEvent::AnalysisFailed {
            reason: reason.to_string(),
        }
    }

    #[test]
    fn test_recording_observer() {
        let obs = RecordingObserver::new();
        emit(&obs, failed("a"));
        emit(&obs, failed("b"));
        assert_eq!(obs.len(), 2);
        assert_eq!(obs.events()[1], failed("b"));
        assert_eq!(obs.take().len(), 2);
        assert!(obs.is_empty());
    }

    #[test]
    fn test_external_observer() {
        let count = Arc::new(AtomicUsize::new(0));
        let c = count.clone();
        let obs = ExternalObserver::new(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
        emit(&obs, failed("x"));
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_observer_is_contained() {
        let obs = ExternalObserver::new(|_| panic!("boom"));
        emit(&obs, failed("x"));
    }

    #[test]
    fn test_log_and_null_observers_accept_everything() {
        let range = ActiveRange {
            steps: 4,
            start: 0,
            end: 4,
        };
        let events = vec![
            DiagnosticEvent::RangeNormalized {
                requested_steps: 4,
                requested_start: 0,
                requested_end: -1,
                range,
            },
            DiagnosticEvent::ExponentSelected {
                goal: TuningGoal::Standard,
                complexity: 0.2,
                exponent: 1.2,
            },
            DiagnosticEvent::ScheduleBuilt {
                range,
                shape: BlendShape::Linear,
                invert: false,
                exponent: 1.0,
                samples: vec![SamplePoint {
                    step: 0,
                    high: 1.0,
                    low: 0.0,
                }],
                crossover: Some(2),
            },
        ];
        for e in events {
            emit(&LogObserver, e.clone());
            emit(&NullObserver, e);
        }
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let json = serde_json::to_string(&DiagnosticEvent::ExponentSelected {
            goal: TuningGoal::PreserveDetails,
            complexity: 0.75,
            exponent: 0.5,
        })
        .unwrap();
        assert!(json.contains(r#""event":"exponent_selected""#));
        assert!(json.contains(r#""goal":"Preserve Details""#));
    }
}
