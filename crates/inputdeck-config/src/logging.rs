// ── Tracing setup ──

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".into()
}

impl LoggingSettings {
    /// Filter from `RUST_LOG`, falling back to the configured level.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| ConfigError::Validation {
                field: "logging.level".into(),
                reason: e.to_string(),
            })
    }
}

/// Install the global fmt subscriber. Fails if one is already set.
pub fn init_tracing(settings: &LoggingSettings) -> Result<(), ConfigError> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(settings.env_filter()?)
        .with_target(false);

    let result = if settings.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| ConfigError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_directive_is_a_validation_error() {
        let settings = LoggingSettings {
            level: "inputdeck=notalevel".into(),
            json: false,
        };
        // RUST_LOG may be set in the environment running the tests.
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(matches!(
                settings.env_filter(),
                Err(ConfigError::Validation { .. })
            ));
        }
    }

    #[test]
    fn second_init_fails() {
        let settings = LoggingSettings::default();
        let first = init_tracing(&settings);
        let second = init_tracing(&settings);
        // The subscriber is process-global, so only the first call can win.
        assert!(first.is_ok() || matches!(first, Err(ConfigError::Logging(_))));
        assert!(matches!(second, Err(ConfigError::Logging(_))));
    }
}
