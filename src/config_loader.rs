use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{PricerError, PricerResult};

pub const DEFAULT_CONFIG_FILE: &str = "pricer.toml";
pub const ENV_PREFIX: &str = "PRICER_";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PricerConfig {
    /// Classifier artifact, `.onnx` or `.json`.
    pub model_path: PathBuf,
    /// Fail instead of warn when an indicator column is missing from the schema.
    #[serde(default)]
    pub strict_schema: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for PricerConfig {
    fn default() -> Self {
        PricerConfig {
            model_path: PathBuf::from("artifacts/model_data.onnx"),
            strict_schema: false,
            log_level: default_log_level(),
        }
    }
}

impl PricerConfig {
    pub fn validate(&self) -> PricerResult<()> {
        if self.model_path.as_os_str().is_empty() {
            return Err(PricerError::config("model_path must be set"));
        }
        if self.log_level.trim().is_empty() {
            return Err(PricerError::config("log_level cannot be empty"));
        }
        Ok(())
    }
}

/// Load from `pricer.toml` in the working directory plus `PRICER_*` variables.
pub fn load_config() -> PricerResult<PricerConfig> {
    load_config_from(Path::new(DEFAULT_CONFIG_FILE))
}

/// Defaults, then the TOML file at `path` (if it exists), then the environment.
pub fn load_config_from(path: &Path) -> PricerResult<PricerConfig> {
    let figment = Figment::from(Serialized::defaults(PricerConfig::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX));

    let config: PricerConfig = figment.extract()?;
    config.validate()?;

    tracing::debug!(
        model_path = %config.model_path.display(),
        strict_schema = config.strict_schema,
        "Configuration loaded"
    );

    Ok(config)
}
