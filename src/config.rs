use std::time::Duration;

use crate::verify::RetryConfig;

pub const DEFAULT_API_BASE: &str = "https://www.moltbook.com/api/v1";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "MOLTBOOK_API_KEY";
/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "MOLTBOOK_API_URL";

/// Settings for the verification client.
///
/// Resolution order is explicit override, then environment, then default.
/// Decoding itself needs none of this.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }
}

impl Config {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::with_env(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`. Empty values are ignored.
    pub fn with_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut config = Self::default();
        if let Some(base) = get(API_URL_ENV) {
            config.api_base = base;
        }
        config.api_key = get(API_KEY_ENV);
        config
    }

    /// Apply CLI flags on top. `None` keeps the current value.
    pub fn with_overrides(mut self, api_key: Option<String>, api_base: Option<String>) -> Self {
        if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(base) = api_base.filter(|b| !b.trim().is_empty()) {
            self.api_base = base;
        }
        self
    }
}
