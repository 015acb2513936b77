//! Environment variable overrides.
//!
//! `MDPLAIN_*` variables take precedence over the config file. Values that
//! fail to parse are ignored with a warning.

use std::collections::HashMap;

use tracing::warn;

use crate::schema::{ExportConfig, LoggingConfig, MdplainConfig, ServerConfig};

pub const ENV_CONFIG_DIR: &str = "MDPLAIN_CONFIG_DIR";
pub const ENV_LOG_LEVEL: &str = "MDPLAIN_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MDPLAIN_LOG_DIR";
pub const ENV_OUTPUT_DIR: &str = "MDPLAIN_OUTPUT_DIR";
pub const ENV_BIND: &str = "MDPLAIN_BIND";
pub const ENV_PORT: &str = "MDPLAIN_PORT";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: MdplainConfig) -> MdplainConfig {
    apply_env_overrides_with(config, &std::env::vars().collect())
}

/// Apply overrides from a provided map (useful for testing).
pub fn apply_env_overrides_with(
    mut config: MdplainConfig,
    env: &HashMap<String, String>,
) -> MdplainConfig {
    let get = |key: &str| env.get(key).filter(|v| !v.trim().is_empty()).cloned();

    if let Some(level) = get(ENV_LOG_LEVEL) {
        config.logging.get_or_insert_with(LoggingConfig::default).level = Some(level);
    }
    if let Some(dir) = get(ENV_LOG_DIR) {
        config.logging.get_or_insert_with(LoggingConfig::default).dir = Some(dir);
    }
    if let Some(dir) = get(ENV_OUTPUT_DIR) {
        config.export.get_or_insert_with(ExportConfig::default).output_dir = Some(dir);
    }
    if let Some(bind) = get(ENV_BIND) {
        config.server.get_or_insert_with(ServerConfig::default).bind = Some(bind);
    }
    if let Some(raw) = get(ENV_PORT) {
        match raw.trim().parse::<u16>() {
            Ok(port) => {
                config.server.get_or_insert_with(ServerConfig::default).port = Some(port);
            }
            Err(_) => warn!(var = ENV_PORT, value = %raw, "Ignoring non-numeric port"),
        }
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_overrides_win() {
        let mut config = MdplainConfig::default();
        config.server = Some(ServerConfig {
            port: Some(1),
            ..Default::default()
        });
        let config = apply_env_overrides_with(
            config,
            &env(&[
                (ENV_PORT, "9090"),
                (ENV_LOG_LEVEL, "debug"),
                (ENV_OUTPUT_DIR, "/tmp/out"),
            ]),
        );
        assert_eq!(config.port(), 9090);
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.output_dir(), "/tmp/out");
    }

    #[test]
    fn test_bad_port_ignored() {
        let config = apply_env_overrides_with(
            MdplainConfig::default(),
            &env(&[(ENV_PORT, "eighty"), (ENV_BIND, "")]),
        );
        assert!(config.server.is_none());
    }
}
