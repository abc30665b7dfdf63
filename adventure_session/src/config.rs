//! Session configuration and logging setup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adventure_rules::TurnPolicy;

use crate::error::SessionError;

fn default_log_filter() -> String {
    "adventure_rules=info,adventure_session=info".to_string()
}

/// Settings for one play session, usually read from a TOML file.
///
/// ```toml
/// world = "worlds/lighthouse.json"
/// log_filter = "adventure_rules=debug"
/// turn_policy = "accepted_only"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// World description, `.json` or `.toml`.
    pub world: PathBuf,

    /// Used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Whether refused commands consume a turn.
    #[serde(default)]
    pub turn_policy: TurnPolicy,
}

impl SessionConfig {
    /// Create a configuration with defaults for everything but the world.
    pub fn new(world: impl Into<PathBuf>) -> Self {
        Self {
            world: world.into(),
            log_filter: default_log_filter(),
            turn_policy: TurnPolicy::default(),
        }
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml_str(source: &str) -> Result<Self, SessionError> {
        Ok(toml::from_str(source)?)
    }

    /// Read a configuration file. A relative `world` path is taken
    /// relative to the file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::from_toml_str(&source)?;
        if config.world.is_relative() {
            if let Some(dir) = path.parent() {
                config.world = dir.join(&config.world);
            }
        }
        Ok(config)
    }
}

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` wins over the configured filter. Fails if a subscriber is
/// already installed.
pub fn init_logging(config: &SessionConfig) -> Result<(), SessionError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;
    Ok(())
}
