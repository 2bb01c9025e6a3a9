//! Browser configuration
//!
//! Loaded from a YAML file (JSON files parse too) or an inline JSON string.
//!
//! ```yaml
//! endpoint: https://pokeapi.co/api/v2/pokemon?limit=50
//! http:
//!   timeout_secs: 10
//!   headers:
//!     Accept: application/json
//!   rate_limit:
//!     requests_per_second: 5
//! cache:
//!   capacity: 100
//! ```

use crate::error::{Error, Result, ResultExt};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// Collection endpoint used when none is configured
pub const DEFAULT_ENDPOINT: &str = "https://pokeapi.co/api/v2/pokemon?limit=50";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete browser configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// URL of the collection's default first page
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,

    /// Page cache settings
    #[serde(default)]
    pub cache: CacheSettings,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            http: HttpSettings::default(),
            cache: CacheSettings::default(),
        }
    }
}

impl BrowserConfig {
    /// Load configuration from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Parse configuration from inline JSON
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Replace the endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Check values serde cannot
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::invalid_value("endpoint", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.cache.capacity == Some(0) {
            return Err(Error::invalid_value(
                "cache.capacity",
                "must be greater than zero",
            ));
        }
        if self.http.timeout_secs == Some(0) {
            return Err(Error::invalid_value(
                "http.timeout_secs",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds (`null` disables the timeout)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Client-side throttling
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

fn default_timeout_secs() -> Option<u64> {
    Some(30)
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
            headers: HashMap::new(),
            rate_limit: None,
        }
    }
}

impl HttpSettings {
    /// Build the HTTP client configuration
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder();
        builder = match self.timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder.no_timeout(),
        };
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        if let Some(rate_limit) = &self.rate_limit {
            builder = builder.rate_limit(rate_limit.clone());
        }
        builder.build()
    }
}

// ============================================================================
// Cache Settings
// ============================================================================

/// Page cache settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum cached pages; unbounded when absent
    #[serde(default)]
    pub capacity: Option<usize>,
}
