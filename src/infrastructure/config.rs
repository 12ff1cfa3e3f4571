use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = "config/diagnostics.toml";
const ENV_PREFIX: &str = "TURBINE";

#[derive(Debug, Deserialize, Clone)]
pub struct DiagnosticsConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub model: ModelSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelSettings {
    /// Serialized classifier artifact, loaded once at startup
    pub path: PathBuf,
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

pub fn load_diagnostics_config() -> anyhow::Result<DiagnosticsConfig> {
    load_diagnostics_config_from(Path::new(DEFAULT_CONFIG))
}

/// Read settings from a TOML file, overridable with `TURBINE__SECTION__KEY` variables
pub fn load_diagnostics_config_from(path: &Path) -> anyhow::Result<DiagnosticsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from(path))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

    settings
        .try_deserialize()
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}
