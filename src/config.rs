//! Process settings read from the environment.

use std::path::PathBuf;

use tracing::warn;

use crate::data::loader::{DEFAULT_CONFIG_NAME, DEFAULT_DATA_DIR};
use crate::data::MergePolicy;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_CLIENT_DIR: &str = "client";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_dir: PathBuf,
    pub client_dir: PathBuf,
    pub server_config: String,
    pub merge_policy: MergePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            client_dir: PathBuf::from(DEFAULT_CLIENT_DIR),
            server_config: DEFAULT_CONFIG_NAME.to_string(),
            merge_policy: MergePolicy::Accumulate,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or empty keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = AppConfig::default();

        let port = match get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|_| {
                warn!(value = %raw, fallback = DEFAULT_PORT, "invalid PORT, using default");
                DEFAULT_PORT
            }),
            None => defaults.port,
        };

        let merge_policy = if get("HOLONET_RESET_ON_SWITCH").is_some_and(|v| is_truthy(&v)) {
            MergePolicy::ResetToBase
        } else {
            MergePolicy::Accumulate
        };

        AppConfig {
            host: get("HOST").unwrap_or(defaults.host),
            port,
            data_dir: get("HOLONET_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.data_dir),
            client_dir: get("HOLONET_CLIENT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.client_dir),
            server_config: get("HOLONET_SERVER_CONFIG").unwrap_or(defaults.server_config),
            merge_policy,
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

pub fn is_truthy(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("HOLONET_DATA_DIR", "/srv/data"),
            ("HOLONET_SERVER_CONFIG", "legends"),
            ("HOLONET_RESET_ON_SWITCH", "TRUE"),
        ]);
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.data_dir, PathBuf::from("/srv/data"));
        assert_eq!(config.server_config, "legends");
        assert_eq!(config.merge_policy, MergePolicy::ResetToBase);
    }

    #[test]
    fn invalid_port_falls_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("HOST", "  ")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.host, DEFAULT_HOST);
    }
}
