use std::{collections::HashMap, path::PathBuf};

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

const DEFAULT_LOCK_FILE_NAME: &str = "dependencies.lock";
const DEFAULT_LOG_FILTER: &str = "info";

/// Settings read from `DEPLOCK_*` environment variables, with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeplockConfig {
    /// Lock file name, relative to the project root.
    pub lock_file: PathBuf,
    /// Logging filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for DeplockConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

impl DeplockConfig {
    pub fn load() -> anyhow::Result<Self> {
        Ok(RawConfig::from_env(None)?.into())
    }
}

impl From<RawConfig> for DeplockConfig {
    fn from(raw: RawConfig) -> Self {
        DeplockConfig {
            lock_file: raw
                .lock
                .file
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOCK_FILE_NAME)),
            log_filter: raw
                .log
                .filter
                .filter(|filter| !filter.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        }
    }
}

#[derive(Default, Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    lock: RawLockConfig,
    #[serde(default)]
    log: RawLogConfig,
}

#[derive(Default, Debug, Deserialize)]
struct RawLockConfig {
    file: Option<PathBuf>,
}

#[derive(Default, Debug, Deserialize)]
struct RawLogConfig {
    filter: Option<String>,
}

impl RawConfig {
    /// `env` replaces the process environment when given.
    fn from_env(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                Environment::with_prefix("DEPLOCK")
                    .separator("_")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}
