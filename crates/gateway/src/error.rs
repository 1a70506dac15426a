use thiserror::Error;

/// Failure talking to the invoicing API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("request timed out")]
    Timeout,
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("could not decode API response: {0}")]
    Decode(String),
    #[error("invalid gateway configuration: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether the same request may succeed if the user tries again.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout | GatewayError::Network(_) => true,
            GatewayError::Api(status, _) => *status >= 500,
            GatewayError::Decode(_) | GatewayError::Config(_) => false,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Api(status, _) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GatewayError::Timeout
        } else if err.is_decode() {
            GatewayError::Decode(err.to_string())
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_kinds() {
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::Network("reset".into()).is_retryable());
        assert!(GatewayError::Api(503, String::new()).is_retryable());
        assert!(!GatewayError::Api(404, String::new()).is_retryable());
        assert!(!GatewayError::Decode("eof".into()).is_retryable());
    }

    #[test]
    fn status_is_only_present_for_api_errors() {
        assert_eq!(GatewayError::Api(422, "bad".into()).status(), Some(422));
        assert_eq!(GatewayError::Timeout.status(), None);
    }
}
