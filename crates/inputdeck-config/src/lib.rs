//! Configuration for inputdeck front ends.
//!
//! Layered loading (built-in defaults → TOML file → `INPUTDECK_*`
//! environment), the development proxy rule, tracing setup, and
//! translation into `inputdeck_core::ClientConfig`.

mod logging;
mod proxy;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use inputdeck_core::{ClientConfig, TlsMode, TransportConfig};

pub use logging::{LoggingSettings, init_tracing};
pub use proxy::ProxyRule;

/// Environment variable holding the dev proxy's backend address.
pub const SERVER_URL_ENV: &str = "INPUTDECK_SERVER_URL";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to initialise logging: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub dev_proxy: ProxyRule,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// How the request client reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Origin the `/api/v1.0` prefix is appended to.
    #[serde(default = "default_origin")]
    pub origin: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Accept self-signed certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Extra CA certificate (PEM). Takes precedence over `insecure`.
    pub ca_cert: Option<PathBuf>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            origin: default_origin(),
            timeout_secs: default_timeout(),
            insecure: false,
            ca_cert: None,
        }
    }
}

fn default_origin() -> String {
    "http://localhost:8080".into()
}
fn default_timeout() -> u64 {
    30
}

impl Config {
    /// Check cross-field constraints figment cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        self.dev_proxy.validate()
    }

    /// Translate into the request client's configuration.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let origin = Url::parse(&self.api.origin).map_err(|e| ConfigError::Validation {
            field: "api.origin".into(),
            reason: e.to_string(),
        })?;

        let tls = match (&self.api.ca_cert, self.api.insecure) {
            (Some(path), _) => TlsMode::CustomCa(path.clone()),
            (None, true) => TlsMode::DangerAcceptInvalid,
            (None, false) => TlsMode::System,
        };

        Ok(ClientConfig {
            origin,
            transport: TransportConfig {
                tls,
                timeout: Duration::from_secs(self.api.timeout_secs),
            },
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "inputdeck", "inputdeck").map_or_else(
        || PathBuf::from(".inputdeck").join("config.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// The provider stack: defaults, then `path`, then environment.
///
/// Nested keys use a double underscore, e.g. `INPUTDECK_API__ORIGIN`.
/// `INPUTDECK_SERVER_URL` sets `dev_proxy.target`.
pub fn figment(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("INPUTDECK_").ignore(&["SERVER_URL"]).split("__"))
        .merge(Env::raw().only(&[SERVER_URL_ENV]).map(|_| "dev_proxy.target".into()))
}

/// Load and validate the config at `path` (a missing file is fine).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let config: Config = figment(path).extract()?;
    config.validate()?;
    Ok(config)
}

/// Load from the canonical config path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`.
pub fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
