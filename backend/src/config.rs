//! Layered configuration loading using figment.
//!
//! Sources, highest priority first:
//! 1. Environment variables (`CHURCH_DASHBOARD_*`, `__` separates sections)
//! 2. `dashboard.toml` in the working directory
//! 3. Built-in defaults
//!
//! `CHURCH_DASHBOARD_SUPABASE__ANON_KEY` maps to `supabase.anon_key`,
//! `CHURCH_DASHBOARD_SERVER__BIND_ADDR` to `server.bind_addr`, and so on.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use chrono::FixedOffset;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::DisplayLocale;

pub const ENV_PREFIX: &str = "CHURCH_DASHBOARD_";
pub const DEFAULT_CONFIG_FILE: &str = "dashboard.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Configuration section '{section}' is not configured (missing required fields)")]
    NotConfigured { section: String },

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_schema() -> String {
    "public".to_string()
}

fn default_bind_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_utc_offset() -> String {
    "-03:00".to_string()
}

fn default_allowed_origin() -> String {
    "http://localhost:8080".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SupabaseConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`.
    #[serde(default)]
    pub url: String,

    /// Public anon key, sent as `apikey` on every request.
    #[serde(default)]
    pub anon_key: String,

    /// Signed-in user's JWT. When empty the anon key is used as bearer token.
    #[serde(default)]
    pub access_token: String,

    #[serde(default = "default_schema")]
    pub schema: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            access_token: String::new(),
            schema: default_schema(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SupabaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.anon_key.is_empty()
    }

    pub fn access_token(&self) -> Option<&str> {
        (!self.access_token.is_empty()).then_some(self.access_token.as_str())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Origin allowed by CORS (the UI's dev server or deployed host)
    #[serde(default = "default_allowed_origin")]
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            allowed_origin: default_allowed_origin(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub locale: DisplayLocale,

    /// Offset the chart months are counted in, as `+HH:MM` or `-HH:MM`
    #[serde(default = "default_utc_offset")]
    pub utc_offset: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: DisplayLocale::default(),
            utc_offset: default_utc_offset(),
        }
    }
}

impl DisplayConfig {
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        self.utc_offset
            .parse()
            .map_err(|e: chrono::ParseError| ConfigError::InvalidValue {
                field: "display.utc_offset".to_string(),
                reason: e.to_string(),
            })
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub supabase: SupabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl DashboardConfig {
    /// Load from defaults, `dashboard.toml` and the environment.
    ///
    /// Does not read `.env`; see [`DashboardConfig::load_with_dotenv`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Same as [`DashboardConfig::load`] with a different TOML file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `.env` from the working directory (if any) first.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    pub fn figment(path: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;
        self.display.utc_offset()?;

        if self.supabase.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "supabase.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let url = &self.supabase.url;
        if !url.is_empty() && !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidValue {
                field: "supabase.url".to_string(),
                reason: format!("'{url}' is not an http(s) URL"),
            });
        }

        if !url.is_empty() && self.supabase.anon_key.is_empty() {
            return Err(ConfigError::NotConfigured {
                section: "supabase".to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server
            .bind_addr
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                field: "server.bind_addr".to_string(),
                reason: e.to_string(),
            })
    }
}
