//! Configuration loading and typed config structures for the demo harness.
//!
//! The configuration lives in `reconcile-demo.yaml` in the working directory
//! (or wherever `RECONCILE_CONFIG` points). Every field has a default, so a
//! missing file or an empty document is valid.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "reconcile-demo.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value of the wrong shape.
    #[error("invalid {name}: {reason}")]
    Env {
        /// The environment variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level demo configuration.
///
/// Mirrors the structure of `reconcile-demo.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DemoConfig {
    /// Random stream pacing and shuffling.
    #[serde(default)]
    pub stream: StreamConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// What each output frame contains.
    #[serde(default)]
    pub output: OutputConfig,
}

impl DemoConfig {
    /// Resolve the config path, load it if present, then apply environment
    /// overrides.
    ///
    /// `RECONCILE_CONFIG` replaces the default path. A missing file is not an
    /// error; defaults are used instead.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("RECONCILE_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Override values from the process environment.
    ///
    /// - `RECONCILE_DELAY_MS` overrides `stream.delay_ms`
    /// - `RECONCILE_SEED` overrides `stream.seed`
    /// - `RECONCILE_LOG_LEVEL` overrides `logging.level`
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Override values from any variable lookup.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("RECONCILE_DELAY_MS") {
            self.stream.delay_ms = val.parse().map_err(|e| ConfigError::Env {
                name: "RECONCILE_DELAY_MS",
                reason: format!("{e}"),
            })?;
        }
        if let Some(val) = lookup("RECONCILE_SEED") {
            self.stream.seed = Some(val.parse().map_err(|e| ConfigError::Env {
                name: "RECONCILE_SEED",
                reason: format!("{e}"),
            })?);
        }
        if let Some(val) = lookup("RECONCILE_LOG_LEVEL") {
            self.logging.level = val;
        }
        Ok(())
    }
}

/// Random stream configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StreamConfig {
    /// Milliseconds to wait before each streamed event.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Seed for the shuffle. Unset means a fresh order every run.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl StreamConfig {
    /// The per-event delay as a [`Duration`].
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            seed: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit logs as JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Output frame configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OutputConfig {
    /// Include the arriving event in each frame, not just the active list.
    #[serde(default = "default_true")]
    pub show_events: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { show_events: true }
    }
}

const fn default_delay_ms() -> u64 {
    600
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_true() -> bool {
    true
}
