// Mapper to convert domain models to JSON wire types
use crate::domain::diagnosis::{ClassifierVerdict, Diagnosis};
use crate::domain::error::DiagnosisError;
use crate::domain::physics::{PhysicsAnomaly, PhysicsMetrics};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DiagnosisJson {
    pub verdict: VerdictJson,
    pub physics: PhysicsJson,
    pub within_safe_range: bool,
}

#[derive(Debug, Serialize)]
pub struct VerdictJson {
    pub is_fault: bool,
    pub fault_probability: f64,
}

#[derive(Debug, Serialize)]
pub struct PhysicsJson {
    pub expected_power_w: f64,
    pub efficiency: f64,
    pub tip_speed_ratio: f64,
    pub anomalies: Vec<AnomalyJson>,
}

#[derive(Debug, Serialize)]
pub struct AnomalyJson {
    pub code: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorJson {
    pub error: &'static str,
    pub message: String,
}

pub fn diagnosis_to_json(diagnosis: Diagnosis) -> DiagnosisJson {
    let within_safe_range = diagnosis.physics.is_within_safe_range();

    DiagnosisJson {
        verdict: verdict_to_json(diagnosis.verdict),
        physics: physics_to_json(diagnosis.physics),
        within_safe_range,
    }
}

pub fn error_to_json(error: &DiagnosisError) -> ErrorJson {
    ErrorJson {
        error: error.kind(),
        message: error.to_string(),
    }
}

fn verdict_to_json(verdict: ClassifierVerdict) -> VerdictJson {
    VerdictJson {
        is_fault: verdict.is_fault,
        fault_probability: verdict.fault_probability,
    }
}

fn physics_to_json(physics: PhysicsMetrics) -> PhysicsJson {
    PhysicsJson {
        expected_power_w: physics.expected_power_w,
        efficiency: physics.efficiency,
        tip_speed_ratio: physics.tip_speed_ratio,
        anomalies: physics.anomalies.into_iter().map(anomaly_to_json).collect(),
    }
}

fn anomaly_to_json(anomaly: PhysicsAnomaly) -> AnomalyJson {
    AnomalyJson {
        code: anomaly.code(),
        message: anomaly.message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::physics;

    #[test]
    fn test_diagnosis_to_json() {
        let diagnosis = Diagnosis::new(
            ClassifierVerdict::new(false, 0.1),
            physics::validate(12.0, 20.0, 500_000.0).unwrap(),
        );

        let value = serde_json::to_value(diagnosis_to_json(diagnosis)).unwrap();
        assert_eq!(value["verdict"]["is_fault"], false);
        assert_eq!(value["verdict"]["fault_probability"], 0.1);
        assert_eq!(value["within_safe_range"], false);
        assert_eq!(
            value["physics"]["anomalies"][0]["message"],
            "Efficiency outside optimal range (30% - 60%)"
        );
        assert_eq!(
            value["physics"]["anomalies"][0]["code"],
            "efficiency_out_of_range"
        );
    }

    #[test]
    fn test_error_to_json() {
        let error = DiagnosisError::DegenerateInput("wind speed is zero".to_string());
        let json = error_to_json(&error);
        assert_eq!(json.error, "degenerate_input");
        assert_eq!(json.message, "degenerate input: wind speed is zero");
    }
}
