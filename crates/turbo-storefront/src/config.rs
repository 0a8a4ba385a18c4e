//! Storefront configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use turbo_commerce::UserId;

use crate::error::{StorefrontError, StorefrontResult};

/// File names searched for by [`StorefrontConfig::discover`].
pub const CONFIG_FILE_NAMES: [&str; 3] = ["turbo-shop.toml", ".turbo-shop.toml", "turbo-shop.json"];

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "TURBO_SHOP_";

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Remote API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// User whose cart is shown when the session does not name one.
    #[serde(default = "default_user_id")]
    pub user_id: UserId,

    /// Local cache settings.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Identity resolution settings.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_user_id() -> UserId {
    UserId::new(1)
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            user_id: default_user_id(),
            cache: CacheConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load config from a file. `.json` files are parsed as JSON, anything
    /// else as TOML.
    pub fn load(path: impl AsRef<Path>) -> StorefrontResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            StorefrontError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&content)
        } else {
            Self::from_toml(&content)
        }
    }

    /// Parse TOML config.
    pub fn from_toml(content: &str) -> StorefrontResult<Self> {
        toml::from_str(content).map_err(|e| StorefrontError::Config(e.to_string()))
    }

    /// Parse JSON config.
    pub fn from_json(content: &str) -> StorefrontResult<Self> {
        serde_json::from_str(content).map_err(|e| StorefrontError::Config(e.to_string()))
    }

    /// Find a config file in `start` or one of its parents.
    pub fn discover(start: &Path) -> Option<PathBuf> {
        start.ancestors().find_map(|dir| {
            CONFIG_FILE_NAMES
                .iter()
                .map(|name| dir.join(name))
                .find(|candidate| candidate.is_file())
        })
    }

    /// Apply `BASE_URL` and `USER_ID` overrides from `lookup`, keyed by the
    /// variable name without [`ENV_PREFIX`].
    pub fn with_overrides<F>(mut self, lookup: F) -> StorefrontResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(raw) = lookup("USER_ID") {
            self.user_id = raw.parse().map_err(|_| {
                StorefrontError::Config(format!("{}USER_ID is not an integer: {}", ENV_PREFIX, raw))
            })?;
        }
        Ok(self)
    }
}

/// Remote API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the catalog and cart API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "https://localhost:7252".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl ApiConfig {
    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Local cache settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory for persisted snapshots. In-memory when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Key of the product snapshot.
    #[serde(default = "default_products_key")]
    pub products_key: String,

    /// Key of the cart snapshot.
    #[serde(default = "default_cart_key")]
    pub cart_key: String,
}

fn default_products_key() -> String {
    "ProductCollection".to_string()
}

fn default_cart_key() -> String {
    "CartItemCollection".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: None,
            products_key: default_products_key(),
            cart_key: default_cart_key(),
        }
    }
}

/// Identity resolution settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// How long to wait for the identity provider before treating the
    /// session as anonymous. Defaults to 5000 when absent; `0` waits
    /// without bound.
    #[serde(default = "default_resolve_timeout_ms")]
    pub resolve_timeout_ms: u64,
}

fn default_resolve_timeout_ms() -> u64 {
    5_000
}

impl AuthConfig {
    /// Resolution bound, or `None` when configured as `0`.
    pub fn resolve_timeout(&self) -> Option<Duration> {
        (self.resolve_timeout_ms > 0).then(|| Duration::from_millis(self.resolve_timeout_ms))
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            resolve_timeout_ms: default_resolve_timeout_ms(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}
