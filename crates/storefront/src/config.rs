//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ROCKETSHOES_API_URL` - Catalog API base URL (default: <http://localhost:3333>)
//! - `ROCKETSHOES_STORAGE_DIR` - Directory holding persisted state (default: `.rocketshoes`)
//! - `ROCKETSHOES_STORAGE_NAMESPACE` - Storage key prefix (default: `@RocketShoes`)
//! - `ROCKETSHOES_HTTP_TIMEOUT_SECS` - Per-request timeout for catalog calls (default: none)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_DIR: &str = ".rocketshoes";
const DEFAULT_NAMESPACE: &str = "@RocketShoes";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Catalog API configuration
    pub api: CatalogApiConfig,
    /// Local persistence configuration
    pub storage: StorageConfig,
}

/// Catalog (products and stock) API configuration.
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    /// Base URL; `/products/{id}` and `/stock/{id}` are resolved against it
    pub base_url: Url,
    /// Per-request timeout; requests run to completion when unset
    pub timeout: Option<Duration>,
}

/// Persistent key-value storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding one file per stored key
    pub dir: PathBuf,
    /// Prefix applied to every stored key
    pub namespace: String,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let base_url = parse_base_url(&get_or("ROCKETSHOES_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("ROCKETSHOES_API_URL".to_string(), e))?;

        let timeout = lookup("ROCKETSHOES_HTTP_TIMEOUT_SECS")
            .map(|raw| parse_timeout(&raw))
            .transpose()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ROCKETSHOES_HTTP_TIMEOUT_SECS".to_string(), e)
            })?;

        let namespace = get_or("ROCKETSHOES_STORAGE_NAMESPACE", DEFAULT_NAMESPACE);
        if namespace.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "ROCKETSHOES_STORAGE_NAMESPACE".to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            api: CatalogApiConfig { base_url, timeout },
            storage: StorageConfig {
                dir: PathBuf::from(get_or("ROCKETSHOES_STORAGE_DIR", DEFAULT_STORAGE_DIR)),
                namespace,
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse the API base URL, making sure relative joins keep its path.
///
/// # Errors
///
/// Returns a description of the problem if `raw` is not an absolute URL.
pub fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err("must be an absolute http(s) URL".to_string());
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err("must be a positive number of seconds".to_string()),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api.base_url.as_str(), "http://localhost:3333/");
        assert!(config.api.timeout.is_none());
        assert_eq!(config.storage.dir, PathBuf::from(".rocketshoes"));
        assert_eq!(config.storage.namespace, "@RocketShoes");
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = load(&[("ROCKETSHOES_API_URL", "https://api.example.com/v1")]).unwrap();
        assert_eq!(config.api.base_url.as_str(), "https://api.example.com/v1/");
        assert_eq!(
            config.api.base_url.join("stock/3").unwrap().as_str(),
            "https://api.example.com/v1/stock/3"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let err = load(&[("ROCKETSHOES_API_URL", "not a url")]).unwrap_err();
        let ConfigError::InvalidEnvVar(key, _) = err;
        assert_eq!(key, "ROCKETSHOES_API_URL");
    }

    #[test]
    fn test_timeout() {
        let config = load(&[("ROCKETSHOES_HTTP_TIMEOUT_SECS", "5")]).unwrap();
        assert_eq!(config.api.timeout, Some(Duration::from_secs(5)));

        assert!(load(&[("ROCKETSHOES_HTTP_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("ROCKETSHOES_HTTP_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_empty_namespace_rejected() {
        let err = load(&[("ROCKETSHOES_STORAGE_NAMESPACE", "  ")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }
}
