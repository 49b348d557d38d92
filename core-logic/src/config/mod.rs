use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Placeholder substituted into RPC URL templates, e.g.
/// `https://eth-goerli.g.alchemy.com/v2/{API_KEY}`.
pub const API_KEY_PLACEHOLDER: &str = "{API_KEY}";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub name: String,
    pub rpc_endpoint: String,
    pub chain_id: u64,
}

/// Reads a required environment variable.
///
/// Empty values count as missing, matching how an unset `.env` entry shows up.
pub fn require_env(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingField {
            field: key.to_string(),
        }),
    }
}

/// Fills the API key placeholder of an RPC URL template.
///
/// Templates without a placeholder are returned unchanged and `api_key` is not
/// consulted. The result must be an http(s) or ws(s) URL.
pub fn resolve_rpc_url(template: &str, api_key: Option<&str>) -> Result<String, ConfigError> {
    let url = if template.contains(API_KEY_PLACEHOLDER) {
        let key = api_key.ok_or_else(|| ConfigError::MissingField {
            field: "api key".to_string(),
        })?;
        template.replace(API_KEY_PLACEHOLDER, key)
    } else {
        template.to_string()
    };

    let valid_scheme = ["http://", "https://", "ws://", "wss://"]
        .iter()
        .any(|scheme| url.starts_with(scheme));
    if !valid_scheme {
        return Err(ConfigError::InvalidRpcUrl { url });
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rpc_url_substitutes_key() {
        let url = resolve_rpc_url(
            "https://eth-goerli.g.alchemy.com/v2/{API_KEY}",
            Some("abc123"),
        )
        .unwrap();
        assert_eq!(url, "https://eth-goerli.g.alchemy.com/v2/abc123");
    }

    #[test]
    fn test_resolve_rpc_url_without_placeholder() {
        let url = resolve_rpc_url("http://127.0.0.1:8545", None).unwrap();
        assert_eq!(url, "http://127.0.0.1:8545");
    }

    #[test]
    fn test_resolve_rpc_url_missing_key() {
        let err = resolve_rpc_url("https://rpc.example/{API_KEY}", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField { .. }));
    }

    #[test]
    fn test_resolve_rpc_url_rejects_bad_scheme() {
        let err = resolve_rpc_url("ftp://rpc.example", None).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidRpcUrl {
                url: "ftp://rpc.example".to_string()
            }
        );
    }
}
