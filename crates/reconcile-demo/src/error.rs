//! Error types for the demo harness.
//!
//! [`DemoError`] is the top-level error that `main` propagates with `?`.
//! The reconciler itself never fails; every variant here belongs to the
//! harness edges (configuration, arguments, input and output).

use crate::config::ConfigError;

/// Top-level error for the demo binary.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The command line could not be understood.
    #[error("usage error: {message}")]
    Usage {
        /// What was wrong with the arguments.
        message: String,
    },

    /// No preset scenario has the requested name.
    #[error("unknown scenario: {name}")]
    UnknownScenario {
        /// The name that was asked for.
        name: String,
    },

    /// Reading input or writing output failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A frame could not be serialized.
    #[error("serialization error: {source}")]
    Serialization {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
