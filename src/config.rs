//! Configuration Management
//!
//! Client configuration (which API to talk to and how long to wait) and the
//! small settings file persisted between CLI runs.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};
use crate::watch::WaitOptions;

/// Environment variable holding the API access key
pub const ACCESS_KEY_VAR: &str = "MEGAPORT_ACCESS_KEY";
/// Environment variable holding the API secret key
pub const SECRET_KEY_VAR: &str = "MEGAPORT_SECRET_KEY";

/// Deployment the client talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Staging,
    Development,
}

impl Environment {
    pub fn api_url(self) -> &'static str {
        match self {
            Environment::Production => "https://api.megaport.com/",
            Environment::Staging => "https://api-staging.megaport.com/",
            Environment::Development => "https://api-mpone-dev.megaport.com/",
        }
    }

    pub fn token_url(self) -> &'static str {
        match self {
            Environment::Production => "https://auth-m2m.megaport.com/oauth2/token",
            Environment::Staging => "https://auth-m2m-staging.megaport.com/oauth2/token",
            Environment::Development => "https://auth-m2m-mpone-dev.megaport.com/oauth2/token",
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "staging" => Ok(Environment::Staging),
            "development" | "dev" => Ok(Environment::Development),
            other => Err(Error::Config(format!("unknown environment '{}'", other))),
        }
    }
}

/// Everything needed to build a [`crate::Client`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token_url: Url,
    pub user_agent: String,
    /// Per-request timeout; `None` leaves reqwest's default
    pub timeout: Option<Duration>,
    pub wait: WaitOptions,
}

impl ClientConfig {
    pub fn for_environment(environment: Environment) -> Result<Self> {
        Ok(Self {
            base_url: Url::parse(environment.api_url())?,
            token_url: Url::parse(environment.token_url())?,
            user_agent: format!("megaport-rs/{}", env!("CARGO_PKG_VERSION")),
            timeout: Some(Duration::from_secs(60)),
            wait: WaitOptions::default(),
        })
    }

    /// Point the client at an arbitrary base URL (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        // Paths are joined relative to the base, which needs a trailing slash
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        self.base_url = Url::parse(&base_url)?;
        Ok(self)
    }

    pub fn with_token_url(mut self, token_url: &str) -> Result<Self> {
        self.token_url = Url::parse(token_url)?;
        Ok(self)
    }

    pub fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }
}

/// API credentials read from the environment
#[derive(Clone)]
pub struct ApiKeys {
    pub access_key: String,
    pub secret_key: String,
}

impl ApiKeys {
    pub fn from_env() -> Result<Self> {
        let access_key = std::env::var(ACCESS_KEY_VAR)
            .map_err(|_| Error::Config(format!("{} environment variable not set", ACCESS_KEY_VAR)))?;
        let secret_key = std::env::var(SECRET_KEY_VAR)
            .map_err(|_| Error::Config(format!("{} environment variable not set", SECRET_KEY_VAR)))?;
        Ok(Self {
            access_key,
            secret_key,
        })
    }
}

/// Settings persisted between CLI runs
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Last used environment
    #[serde(default)]
    pub environment: Option<Environment>,
    /// Last used log level
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Settings {
    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("megaport").join("config.json"))
    }

    /// Load settings from disk
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let Some(path) = Self::settings_path() else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Record options given on the command line. Returns true when anything changed.
    pub fn remember(&mut self, environment: Option<Environment>, log_level: Option<&str>) -> bool {
        let mut changed = false;
        if environment.is_some() && self.environment != environment {
            self.environment = environment;
            changed = true;
        }
        if let Some(level) = log_level {
            if self.log_level.as_deref() != Some(level) {
                self.log_level = Some(level.to_string());
                changed = true;
            }
        }
        changed
    }

    /// Effective environment (CLI > settings > production)
    pub fn effective_environment(&self, cli: Option<Environment>) -> Environment {
        cli.or(self.environment).unwrap_or_default()
    }
}
