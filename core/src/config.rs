//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// What to do with an option the target endpoint does not recognize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownParamPolicy {
    /// Fail with `ApiError::UnknownParameter` before reaching the transport.
    #[default]
    Reject,
    /// Remove the option and send the rest.
    Drop,
    /// Forward the option as-is.
    PassThrough,
}

/// Settings shared by every request a client builds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub unknown_params: UnknownParamPolicy,
    /// Headers added to every request, before any per-call headers.
    pub default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn with_unknown_params(mut self, policy: UnknownParamPolicy) -> Self {
        self.unknown_params = policy;
        self
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_reject() {
        let config = ClientConfig::default();
        assert_eq!(config.unknown_params, UnknownParamPolicy::Reject);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn parses_partial_json() {
        let config = ClientConfig::from_json(r#"{"unknown_params":"pass_through"}"#).unwrap();
        assert_eq!(config.unknown_params, UnknownParamPolicy::PassThrough);
        assert!(config.default_headers.is_empty());
    }

    #[test]
    fn parses_default_headers() {
        let config =
            ClientConfig::from_json(r#"{"default_headers":[["authorization","ApiKey abc"]]}"#)
                .unwrap();
        assert_eq!(
            config.default_headers,
            vec![("authorization".to_string(), "ApiKey abc".to_string())]
        );
    }

    #[test]
    fn rejects_unknown_policy_name() {
        let err = ClientConfig::from_json(r#"{"unknown_params":"ignore"}"#).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
