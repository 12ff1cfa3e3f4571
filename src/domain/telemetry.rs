// Turbine telemetry domain model
use super::error::{ensure_finite, DiagnosisError};

pub const FEATURE_COUNT: usize = 5;

/// Feature order the classifier was trained on. Reordering silently breaks predictions.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "wind_speed_mps",
    "rotor_speed_rpm",
    "temperature_c",
    "power_output_w",
    "vibration_mm_s",
];

// Documented operating domains (cut-in to cut-out for wind speed)
pub const WIND_SPEED_DOMAIN_MPS: (f64, f64) = (3.0, 25.0);
pub const ROTOR_SPEED_DOMAIN_RPM: (f64, f64) = (5.0, 100.0);
pub const TEMPERATURE_DOMAIN_C: (f64, f64) = (20.0, 100.0);
pub const POWER_OUTPUT_DOMAIN_W: (f64, f64) = (100_000.0, 1_000_000.0);
pub const VIBRATION_DOMAIN_MM_S: (f64, f64) = (0.1, 1.0);

/// One telemetry reading from a turbine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TelemetrySample {
    pub wind_speed_mps: f64,
    pub rotor_speed_rpm: f64,
    /// Carried to the classifier only
    pub temperature_c: f64,
    pub power_output_w: f64,
    /// Carried to the classifier only
    pub vibration_mm_s: f64,
}

impl Default for TelemetrySample {
    /// Midpoint operating defaults
    fn default() -> Self {
        Self {
            wind_speed_mps: 12.0,
            rotor_speed_rpm: 20.0,
            temperature_c: 45.0,
            power_output_w: 500_000.0,
            vibration_mm_s: 0.4,
        }
    }
}

impl TelemetrySample {
    pub fn new(
        wind_speed_mps: f64,
        rotor_speed_rpm: f64,
        temperature_c: f64,
        power_output_w: f64,
        vibration_mm_s: f64,
    ) -> Self {
        Self {
            wind_speed_mps,
            rotor_speed_rpm,
            temperature_c,
            power_output_w,
            vibration_mm_s,
        }
    }

    /// Feature vector in `FEATURE_NAMES` order
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.wind_speed_mps,
            self.rotor_speed_rpm,
            self.temperature_c,
            self.power_output_w,
            self.vibration_mm_s,
        ]
    }

    /// Fails with `InvalidInput` naming the first non-finite field
    pub fn validate(&self) -> Result<(), DiagnosisError> {
        FEATURE_NAMES
            .iter()
            .zip(self.features())
            .try_for_each(|(name, value)| ensure_finite(name, value))
    }

    /// Fields outside their documented operating domain.
    /// These are accepted; the physics ranges are what flag them.
    pub fn extrapolated_fields(&self) -> Vec<&'static str> {
        let domains = [
            WIND_SPEED_DOMAIN_MPS,
            ROTOR_SPEED_DOMAIN_RPM,
            TEMPERATURE_DOMAIN_C,
            POWER_OUTPUT_DOMAIN_W,
            VIBRATION_DOMAIN_MM_S,
        ];

        FEATURE_NAMES
            .iter()
            .zip(self.features())
            .zip(domains)
            .filter(|((_, value), (min, max))| value < min || value > max)
            .map(|((name, _), _)| *name)
            .collect()
    }
}
