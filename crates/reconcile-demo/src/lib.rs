//! Demo harness for the arrival-order reconciler.
//!
//! Feeds preset scenarios, a shuffled random stream, or replayed JSON-lines
//! events into one [`reconcile_core::EventReconciler`], printing the active
//! list after every arrival.
//!
//! # Modules
//!
//! - [`cli`] -- Mode selection from command-line arguments
//! - [`config`] -- YAML configuration with environment overrides
//! - [`driver`] -- The feed-and-render loop
//! - [`error`] -- Harness error types
//! - [`scenarios`] -- Preset sequences and the shuffled stream

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod scenarios;

pub use cli::{Mode, Source};
pub use config::{ConfigError, DemoConfig};
pub use driver::{Driver, ReplayStats};
pub use error::DemoError;
pub use scenarios::Scenario;
