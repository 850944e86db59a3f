// ─────────────────────────────────────────────────────────────────────
// StepBlend — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all StepBlend failures.
///
/// Only `InvalidInput` and `Config` are ever returned by the top-level
/// scheduler call. `Analysis` and `Numerical` are raised inside the
/// complexity analyzer and degrade to "adaptive off" at its boundary.
#[derive(Error, Debug)]
pub enum BlendError {
    /// The base curve cannot be constructed from the given input.
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput { field: &'static str, reason: String },

    /// Malformed image tensor handed to the analyzer.
    #[error("analysis error: {0}")]
    Analysis(String),

    /// Numerical error (NaN/Inf, degenerate statistics).
    #[error("numerical error: {0}")]
    Numerical(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),
}

impl BlendError {
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// True for failures that only affect the adaptive embellishment.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Analysis(_) | Self::Numerical(_))
    }
}

pub type BlendResult<T> = Result<T, BlendError>;
