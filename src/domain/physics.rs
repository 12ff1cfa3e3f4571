// Aerodynamic validation of a turbine operating point
//
// Expected power follows the wind-power equation P = 0.5 * rho * Cp * A * v^3,
// and tip speed ratio is blade-tip linear speed over wind speed.
use std::f64::consts::PI;
use std::fmt;

use super::error::{ensure_finite, DiagnosisError};

/// Air density at sea level, kg/m^3
pub const AIR_DENSITY_KG_M3: f64 = 1.225;
/// Assumed coefficient of performance
pub const POWER_COEFFICIENT: f64 = 0.4;
pub const ROTOR_RADIUS_M: f64 = 20.0;
pub const SWEPT_AREA_M2: f64 = PI * ROTOR_RADIUS_M * ROTOR_RADIUS_M;

pub const MAX_POWER_DEVIATION_W: f64 = 100_000.0;
pub const EFFICIENCY_OPTIMAL_RANGE: (f64, f64) = (0.30, 0.60);
pub const TSR_OPTIMAL_RANGE: (f64, f64) = (3.0, 6.0);

const SECONDS_PER_MINUTE: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhysicsAnomaly {
    PowerDeviation,
    EfficiencyOutOfRange,
    TipSpeedRatioOutOfRange,
}

impl PhysicsAnomaly {
    pub fn code(&self) -> &'static str {
        match self {
            Self::PowerDeviation => "power_deviation",
            Self::EfficiencyOutOfRange => "efficiency_out_of_range",
            Self::TipSpeedRatioOutOfRange => "tip_speed_ratio_out_of_range",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::PowerDeviation => "Power deviation is high (> 100,000 W)",
            Self::EfficiencyOutOfRange => "Efficiency outside optimal range (30% - 60%)",
            Self::TipSpeedRatioOutOfRange => "TSR outside aerodynamic efficiency range (3 - 6)",
        }
    }
}

impl fmt::Display for PhysicsAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsMetrics {
    pub expected_power_w: f64,
    /// Reported over expected power. Not clamped.
    pub efficiency: f64,
    pub tip_speed_ratio: f64,
    /// In check order: power deviation, efficiency, TSR
    pub anomalies: Vec<PhysicsAnomaly>,
}

impl PhysicsMetrics {
    pub fn is_within_safe_range(&self) -> bool {
        self.anomalies.is_empty()
    }
}

pub fn expected_power_w(wind_speed_mps: f64) -> f64 {
    0.5 * AIR_DENSITY_KG_M3 * POWER_COEFFICIENT * SWEPT_AREA_M2 * wind_speed_mps.powi(3)
}

pub fn tip_speed_ratio(rotor_speed_rpm: f64, wind_speed_mps: f64) -> f64 {
    let tip_speed_mps = rotor_speed_rpm * 2.0 * PI * ROTOR_RADIUS_M / SECONDS_PER_MINUTE;
    tip_speed_mps / wind_speed_mps
}

/// Range bounds are inclusive
fn outside(value: f64, (min, max): (f64, f64)) -> bool {
    value < min || value > max
}

fn power_deviation_exceeds(power_output_w: f64, expected_power_w: f64) -> bool {
    (power_output_w - expected_power_w).abs() > MAX_POWER_DEVIATION_W
}

/// Compare reported power and rotor speed against turbine theory.
///
/// Anomalies are not errors; they come back in `PhysicsMetrics::anomalies`.
/// Errors are reserved for inputs that make the formulas undefined.
pub fn validate(
    wind_speed_mps: f64,
    rotor_speed_rpm: f64,
    power_output_w: f64,
) -> Result<PhysicsMetrics, DiagnosisError> {
    ensure_finite("wind_speed_mps", wind_speed_mps)?;
    ensure_finite("rotor_speed_rpm", rotor_speed_rpm)?;
    ensure_finite("power_output_w", power_output_w)?;

    if wind_speed_mps == 0.0 {
        return Err(DiagnosisError::DegenerateInput(
            "wind speed is zero, expected power and tip speed ratio are undefined".to_string(),
        ));
    }
    if wind_speed_mps < 0.0 {
        return Err(DiagnosisError::DegenerateInput(format!(
            "wind speed {} m/s is negative",
            wind_speed_mps
        )));
    }

    let expected_power_w = expected_power_w(wind_speed_mps);
    let efficiency = power_output_w / expected_power_w;
    let tip_speed_ratio = tip_speed_ratio(rotor_speed_rpm, wind_speed_mps);

    // Underflow to zero or overflow to infinity for extreme wind speeds
    if expected_power_w == 0.0 || !expected_power_w.is_finite() {
        return Err(DiagnosisError::DegenerateInput(format!(
            "expected power {} W is not usable for wind speed {} m/s",
            expected_power_w, wind_speed_mps
        )));
    }
    if !efficiency.is_finite() || !tip_speed_ratio.is_finite() {
        return Err(DiagnosisError::DegenerateInput(format!(
            "derived metrics are not finite (efficiency {}, tip speed ratio {})",
            efficiency, tip_speed_ratio
        )));
    }

    let mut anomalies = Vec::new();
    if power_deviation_exceeds(power_output_w, expected_power_w) {
        anomalies.push(PhysicsAnomaly::PowerDeviation);
    }
    if outside(efficiency, EFFICIENCY_OPTIMAL_RANGE) {
        anomalies.push(PhysicsAnomaly::EfficiencyOutOfRange);
    }
    if outside(tip_speed_ratio, TSR_OPTIMAL_RANGE) {
        anomalies.push(PhysicsAnomaly::TipSpeedRatioOutOfRange);
    }

    Ok(PhysicsMetrics {
        expected_power_w,
        efficiency,
        tip_speed_ratio,
        anomalies,
    })
}
