//! Configuration loader (file + env merge).

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use thiserror::Error;

use crate::schema::TwinConfig;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to load or merge configuration.
    #[error("configuration error: {0}")]
    Load(String),
    /// The merged configuration is unusable.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Unprefixed variables understood for compatibility with older deployments.
const LEGACY_ENV: [(&str, &str); 4] = [
    ("API_KEYS", "http.api_keys"),
    ("COSMOS_ENDPOINT", "store.cosmos.endpoint"),
    ("COSMOS_KEY", "store.cosmos.key"),
    ("PORT", "http.port"),
];

/// Config path a legacy variable maps to.
pub fn legacy_key(var: &str) -> Option<&'static str> {
    LEGACY_ENV
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(var))
        .map(|(_, path)| *path)
}

/// Loads configuration by merging layers:
/// 1. Default values
/// 2. Config file (if given)
/// 3. Legacy variables (`API_KEYS`, `COSMOS_ENDPOINT`, `COSMOS_KEY`, `PORT`)
/// 4. `TWIN_`-prefixed variables, `__` separating sections
pub fn load_config(config_path: Option<&str>) -> Result<TwinConfig, ConfigError> {
    let legacy = Env::raw()
        .only(&LEGACY_ENV.map(|(name, _)| name))
        .map(|key| legacy_key(key.as_str()).unwrap_or_default().into());

    extract(
        base(config_path)
            .merge(legacy)
            .merge(Env::prefixed("TWIN_").split("__")),
    )
}

/// Defaults overlaid with the TOML file, if any.
fn base(config_path: Option<&str>) -> Figment {
    let figment = Figment::from(Serialized::defaults(TwinConfig::default()));
    match config_path {
        Some(path) => figment.merge(Toml::file(path)),
        None => figment,
    }
}

fn extract(figment: Figment) -> Result<TwinConfig, ConfigError> {
    let config: TwinConfig = figment
        .extract()
        .map_err(|e| ConfigError::Load(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &TwinConfig) -> Result<(), ConfigError> {
    if config.server.request_timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "server.request_timeout_secs must be positive".to_string(),
        ));
    }
    Ok(())
}
