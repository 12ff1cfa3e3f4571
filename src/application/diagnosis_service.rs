// Diagnosis service - Use case for evaluating one telemetry sample
use crate::application::classifier_adapter::ClassifierAdapter;
use crate::application::fault_model::FaultModel;
use crate::domain::diagnosis::Diagnosis;
use crate::domain::error::DiagnosisError;
use crate::domain::physics;
use crate::domain::telemetry::TelemetrySample;
use std::sync::Arc;

#[derive(Clone)]
pub struct DiagnosisService {
    classifier: ClassifierAdapter,
}

impl DiagnosisService {
    pub fn new(model: Arc<dyn FaultModel>) -> Self {
        Self {
            classifier: ClassifierAdapter::new(model),
        }
    }

    /// Run the classifier and the physics check on one sample and return both results.
    pub fn diagnose(&self, sample: &TelemetrySample) -> Result<Diagnosis, DiagnosisError> {
        sample.validate()?;

        let extrapolated = sample.extrapolated_fields();
        if !extrapolated.is_empty() {
            tracing::debug!(
                "Telemetry outside operating domain: {}",
                extrapolated.join(", ")
            );
        }

        let verdict = self.classifier.classify(sample)?;
        let physics = physics::validate(
            sample.wind_speed_mps,
            sample.rotor_speed_rpm,
            sample.power_output_w,
        )?;

        tracing::debug!(
            is_fault = verdict.is_fault,
            fault_probability = verdict.fault_probability,
            expected_power_w = physics.expected_power_w,
            efficiency = physics.efficiency,
            tip_speed_ratio = physics.tip_speed_ratio,
            anomalies = physics.anomalies.len(),
            "Diagnosis complete"
        );

        Ok(Diagnosis::new(verdict, physics))
    }
}
