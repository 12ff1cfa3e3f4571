// Classifier adapter - Use case for turning telemetry into a classifier verdict
use crate::application::fault_model::FaultModel;
use crate::domain::diagnosis::ClassifierVerdict;
use crate::domain::error::{ensure_finite, DiagnosisError};
use crate::domain::telemetry::{TelemetrySample, FEATURE_COUNT, FEATURE_NAMES};
use std::sync::Arc;

#[derive(Clone)]
pub struct ClassifierAdapter {
    model: Arc<dyn FaultModel>,
}

impl ClassifierAdapter {
    pub fn new(model: Arc<dyn FaultModel>) -> Self {
        Self { model }
    }

    pub fn classify(&self, sample: &TelemetrySample) -> Result<ClassifierVerdict, DiagnosisError> {
        self.classify_features(&sample.features())
    }

    /// Classify a raw feature vector. Order is a documented contract and is not checked.
    pub fn classify_features(&self, features: &[f64]) -> Result<ClassifierVerdict, DiagnosisError> {
        if features.len() != FEATURE_COUNT {
            return Err(DiagnosisError::invalid_input(
                "features",
                format!("expected {} values, got {}", FEATURE_COUNT, features.len()),
            ));
        }
        for (name, value) in FEATURE_NAMES.iter().zip(features) {
            ensure_finite(name, *value)?;
        }

        let is_fault = self
            .model
            .predict(features)
            .map_err(|e| DiagnosisError::InferenceFailed(e.to_string()))?;
        let fault_probability = self
            .model
            .predict_probability(features)
            .map_err(|e| DiagnosisError::InferenceFailed(e.to_string()))?;

        if !(0.0..=1.0).contains(&fault_probability) {
            return Err(DiagnosisError::InferenceFailed(format!(
                "fault probability {} outside [0, 1]",
                fault_probability
            )));
        }

        Ok(ClassifierVerdict::new(is_fault, fault_probability))
    }
}
