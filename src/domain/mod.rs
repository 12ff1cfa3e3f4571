// Domain layer - Turbine telemetry, physics and diagnosis models
pub mod diagnosis;
pub mod error;
pub mod physics;
pub mod telemetry;
