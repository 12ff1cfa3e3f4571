// Contract for pre-trained fault classifiers

/// A trained binary classifier over the five telemetry features.
///
/// Features arrive in `FEATURE_NAMES` order. Implementations are shared
/// across concurrent requests and must not mutate state during inference.
pub trait FaultModel: Send + Sync {
    /// Native decision of the model, `true` for the fault class
    fn predict(&self, features: &[f64]) -> anyhow::Result<bool>;

    /// Probability of the fault class, expected in [0, 1]
    fn predict_probability(&self, features: &[f64]) -> anyhow::Result<f64>;
}
