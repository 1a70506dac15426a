use std::time::Duration;

use crate::error::GatewayError;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
        }
    }

    /// Base URL without a trailing slash, checked for an http(s) scheme.
    pub fn normalized_base_url(&self) -> Result<String, GatewayError> {
        let url = self.base_url.trim().trim_end_matches('/');
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(GatewayError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                self.base_url
            )));
        }
        Ok(url.to_string())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slashes_are_dropped() {
        let cfg = GatewayConfig::new("http://localhost:5000/api//", DEFAULT_TIMEOUT);
        assert_eq!(cfg.normalized_base_url().unwrap(), "http://localhost:5000/api");
    }

    #[test]
    fn scheme_is_required() {
        let cfg = GatewayConfig::new("localhost:5000", DEFAULT_TIMEOUT);
        assert!(matches!(
            cfg.normalized_base_url(),
            Err(GatewayError::Config(_))
        ));
    }

    #[test]
    fn default_points_at_local_api() {
        let cfg = GatewayConfig::default();
        assert_eq!(cfg.base_url, DEFAULT_API_URL);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }
}
