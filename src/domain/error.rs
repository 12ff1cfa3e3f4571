// Error taxonomy for diagnosis requests and model loading
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiagnosisError {
    /// Missing, non-finite or wrongly shaped telemetry. The request is rejected.
    #[error("invalid input: {field} {reason}")]
    InvalidInput { field: String, reason: String },

    /// Telemetry that makes the physics formulas undefined (e.g. zero wind speed).
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    /// Classifier artifact missing, corrupt or incompatible. Fatal at startup.
    #[error("classifier model unavailable at {path}: {reason}")]
    ModelUnavailable { path: String, reason: String },

    /// The loaded model produced an output outside its contract.
    #[error("classifier inference failed: {0}")]
    InferenceFailed(String),
}

impl DiagnosisError {
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn model_unavailable(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ModelUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable identifier for the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "invalid_input",
            Self::DegenerateInput(_) => "degenerate_input",
            Self::ModelUnavailable { .. } => "model_unavailable",
            Self::InferenceFailed(_) => "inference_failed",
        }
    }
}

/// Reject NaN and infinite readings
pub fn ensure_finite(field: &str, value: f64) -> Result<(), DiagnosisError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DiagnosisError::invalid_input(
            field,
            format!("must be a finite number, got {}", value),
        ))
    }
}
