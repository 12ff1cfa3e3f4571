// Diagnosis domain model - classifier verdict alongside physics metrics
use super::physics::PhysicsMetrics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassifierVerdict {
    /// The model's native decision, not necessarily `fault_probability >= 0.5`
    pub is_fault: bool,
    pub fault_probability: f64,
}

impl ClassifierVerdict {
    pub fn new(is_fault: bool, fault_probability: f64) -> Self {
        Self {
            is_fault,
            fault_probability,
        }
    }
}

/// Both judgments side by side. Disagreement between them is reported, not reconciled.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub verdict: ClassifierVerdict,
    pub physics: PhysicsMetrics,
}

impl Diagnosis {
    pub fn new(verdict: ClassifierVerdict, physics: PhysicsMetrics) -> Self {
        Self { verdict, physics }
    }
}
