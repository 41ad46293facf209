//! Demo binary for the arrival-order reconciler.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `reconcile-demo.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing) on stderr
//! 3. Parse the mode from the command line
//! 4. Drive the reconciler, writing JSON-lines frames to stdout

use std::fs::File;
use std::io::{BufReader, Write};

use reconcile_demo::config::LoggingConfig;
use reconcile_demo::{DemoConfig, DemoError, Driver, Mode, Scenario, Source, scenarios};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point for the demo.
///
/// # Errors
///
/// Returns an error if configuration, arguments, input, or output fail.
#[tokio::main]
async fn main() -> Result<(), DemoError> {
    // 1. Load configuration.
    let config = DemoConfig::load()?;

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    info!(
        delay_ms = config.stream.delay_ms,
        seed = ?config.stream.seed,
        show_events = config.output.show_events,
        "reconcile-demo starting"
    );

    // 3. Parse the mode.
    let mode = Mode::parse(std::env::args().skip(1))?;

    // 4. Run it.
    let stdout = std::io::stdout().lock();
    let mut driver = Driver::new(stdout, &config.output);

    match mode {
        Mode::List => {
            let mut out = driver.into_inner();
            for scenario in Scenario::ALL {
                writeln!(out, "{:<26}{}", scenario.name(), scenario.label())?;
            }
        }
        Mode::Scenario(scenario) => driver.run_scenario(scenario)?,
        Mode::Stream => {
            let events = scenarios::shuffled_stream(config.stream.seed);
            driver.run_stream(events, config.stream.delay()).await?;
        }
        Mode::Replay(Source::Stdin) => {
            driver.replay(std::io::stdin().lock())?;
        }
        Mode::Replay(Source::File(path)) => {
            let file = File::open(&path)?;
            driver.replay(BufReader::new(file))?;
        }
    }

    info!("reconcile-demo finished");
    Ok(())
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise the configured level applies.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}
