//! Process configuration from environment variables.
//!
//! | Variable                      | Default                      |
//! |-------------------------------|------------------------------|
//! | `INVOICEHUB_API_URL`          | `http://localhost:5000/api`  |
//! | `INVOICEHUB_API_TIMEOUT_SECS` | `10`                         |
//! | `INVOICEHUB_LOG_FORMAT`       | `json` (or `pretty`)         |
//!
//! Unusable values fall back to the default and leave a warning behind, to be
//! logged once tracing is up.

use std::time::Duration;

use invoicehub_gateway::GatewayConfig;
use invoicehub_observability::LogFormat;

pub const API_URL_VAR: &str = "INVOICEHUB_API_URL";
pub const API_TIMEOUT_VAR: &str = "INVOICEHUB_API_TIMEOUT_SECS";
pub const LOG_FORMAT_VAR: &str = "INVOICEHUB_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub gateway: GatewayConfig,
    pub log_format: LogFormat,
    pub warnings: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();
        let mut gateway = GatewayConfig::default();

        if let Some(url) = lookup(API_URL_VAR).filter(|v| !v.trim().is_empty()) {
            let candidate = GatewayConfig::new(url, gateway.timeout);
            match candidate.normalized_base_url() {
                Ok(_) => gateway.base_url = candidate.base_url,
                Err(err) => warnings.push(format!("{API_URL_VAR}: {err}; using default")),
            }
        }

        if let Some(raw) = lookup(API_TIMEOUT_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => gateway.timeout = Duration::from_secs(secs),
                _ => warnings.push(format!(
                    "{API_TIMEOUT_VAR}: expected a positive number of seconds, got {raw:?}; using default"
                )),
            }
        }

        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(raw) => raw.parse().unwrap_or_else(|err| {
                warnings.push(format!("{LOG_FORMAT_VAR}: {err}; using json"));
                LogFormat::default()
            }),
            None => LogFormat::default(),
        };

        Self {
            gateway,
            log_format,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let cfg = config(&[]);
        assert_eq!(cfg.gateway, GatewayConfig::default());
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn variables_override_defaults() {
        let cfg = config(&[
            (API_URL_VAR, "https://billing.example.com/api/"),
            (API_TIMEOUT_VAR, "3"),
            (LOG_FORMAT_VAR, "pretty"),
        ]);
        assert_eq!(cfg.gateway.base_url, "https://billing.example.com/api/");
        assert_eq!(cfg.gateway.timeout, Duration::from_secs(3));
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert!(cfg.warnings.is_empty());
    }

    #[test]
    fn bad_values_fall_back_with_warnings() {
        let cfg = config(&[
            (API_URL_VAR, "localhost:5000"),
            (API_TIMEOUT_VAR, "0"),
            (LOG_FORMAT_VAR, "xml"),
        ]);
        assert_eq!(cfg.gateway, GatewayConfig::default());
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.warnings.len(), 3);
        assert!(cfg.warnings[0].starts_with(API_URL_VAR));
    }
}
