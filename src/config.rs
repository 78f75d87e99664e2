use std::{env, fmt, net::SocketAddr, time::Duration};

use thiserror::Error;

/// Listen address used when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:5000";
/// Upstream request timeout used when `UPSTREAM_TIMEOUT_SECS` is not set.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
}

/// Where the financial statements come from.
///
/// `base_url` already carries the symbol and any query parameters the provider
/// needs; the API key is appended as one more `&apikey=` parameter.
#[derive(Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl UpstreamConfig {
    /// Full request URL including the API key. Never log this.
    pub fn request_url(&self) -> String {
        format!("{}&apikey={}", self.base_url, self.api_key)
    }

    /// Request URL with the key masked, safe for logs and error messages.
    pub fn redacted_url(&self) -> String {
        format!("{}&apikey=***", self.base_url)
    }
}

impl fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub upstream: UpstreamConfig,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// Call `dotenv().ok()` first if a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = read("API_KEY").ok_or(ConfigError::MissingVar("API_KEY"))?;
        let base_url = read("API_BASE_URL").ok_or(ConfigError::MissingVar("API_BASE_URL"))?;

        reqwest::Url::parse(&base_url).map_err(|e| ConfigError::InvalidVar {
            name: "API_BASE_URL",
            reason: e.to_string(),
        })?;

        let bind_addr = read("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidVar {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let timeout_secs = match read("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidVar {
                name: "UPSTREAM_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidVar {
                name: "UPSTREAM_TIMEOUT_SECS",
                reason: "must be greater than zero".into(),
            });
        }

        Ok(Self {
            upstream: UpstreamConfig {
                base_url,
                api_key,
                timeout: Duration::from_secs(timeout_secs),
            },
            bind_addr,
        })
    }
}
