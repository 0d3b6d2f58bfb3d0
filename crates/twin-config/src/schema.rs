//! Configuration schema types.

use std::fmt;
use std::time::Duration;

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwinConfig {
    /// Dispatcher settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
    /// Persistence settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Per-request time limit in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Returns the request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// HTTP transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Accepted API keys. A comma-separated string is also accepted.
    #[serde(default, deserialize_with = "string_or_list")]
    pub api_keys: Vec<String>,
    /// Attach a permissive CORS layer.
    #[serde(default = "default_cors")]
    pub cors: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_keys: Vec::new(),
            cors: default_cors(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_cors() -> bool {
    true
}

/// Which persistence backend `save_twin_info` writes to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Azure Cosmos DB over its REST API.
    #[default]
    Cosmos,
    /// Process-local map, lost on exit.
    Memory,
    /// No store; `save_twin_info` reports it unavailable.
    Disabled,
}

/// Persistence configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StoreBackend,
    /// Cosmos DB account settings.
    #[serde(default)]
    pub cosmos: CosmosConfig,
}

/// Cosmos DB account settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CosmosConfig {
    /// Account endpoint, e.g. `https://acct.documents.azure.com:443/`.
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Base64 master key.
    #[serde(default)]
    pub key: Option<String>,
    /// Database id.
    #[serde(default = "default_database")]
    pub database: String,
    /// Container id.
    #[serde(default = "default_container")]
    pub container: String,
}

impl CosmosConfig {
    /// Endpoint and key, when both are set and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let endpoint = self.endpoint.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        let key = self.key.as_deref().map(str::trim).filter(|s| !s.is_empty())?;
        Some((endpoint, key))
    }
}

impl Default for CosmosConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            key: None,
            database: default_database(),
            container: default_container(),
        }
    }
}

fn default_database() -> String {
    "TwinHumanDB".to_string()
}
fn default_container() -> String {
    "TwinHumanContainer".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g. "info", "debug", "twin_mcp=trace").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Accepts `"a,b"`, `["a", "b"]`, or a bare number (env values parse as one).
fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a comma-separated string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(v.split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                let key = key.trim();
                if !key.is_empty() {
                    keys.push(key.to_string());
                }
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_require_both() {
        let mut cosmos = CosmosConfig::default();
        assert!(cosmos.credentials().is_none());
        cosmos.endpoint = Some("https://acct.documents.azure.com:443/".into());
        assert!(cosmos.credentials().is_none());
        cosmos.key = Some("  ".into());
        assert!(cosmos.credentials().is_none());
        cosmos.key = Some("a2V5".into());
        assert!(cosmos.credentials().is_some());
    }

    #[test]
    fn api_keys_from_string() {
        let http: HttpConfig =
            serde_json::from_str(r#"{"api_keys": "one, two,,three"}"#).expect("parse");
        assert_eq!(http.api_keys, ["one", "two", "three"]);
    }

    #[test]
    fn api_keys_from_list() {
        let http: HttpConfig =
            serde_json::from_str(r#"{"api_keys": ["one", " "]}"#).expect("parse");
        assert_eq!(http.api_keys, ["one"]);
    }
}
