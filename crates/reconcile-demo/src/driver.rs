//! Feeds events into a reconciler and renders a frame after each arrival.
//!
//! The driver is the whole display harness: it holds one reconciler, adds
//! events one at a time, and re-queries the active items after every
//! addition. Frames are written as JSON lines:
//!
//! ```text
//! {"arrival":1,"event":{"id":"a","timestamp":100,"type":"created"},"active":[...]}
//! ```

use std::io::{BufRead, Write};
use std::time::Duration;

use reconcile_core::EventReconciler;
use reconcile_types::{Event, Item};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::OutputConfig;
use crate::error::DemoError;
use crate::scenarios::Scenario;

/// One rendered step.
#[derive(Debug, Serialize)]
struct Frame<'a> {
    /// 1-based position of the event in the log.
    arrival: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<&'a Event>,
    active: &'a [Item],
}

/// Counts from a JSON-lines replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    /// Lines parsed and fed to the reconciler.
    pub fed: usize,
    /// Lines that were not valid events.
    pub skipped: usize,
}

/// Drives a reconciler and writes frames to `out`.
#[derive(Debug)]
pub struct Driver<W> {
    reconciler: EventReconciler,
    out: W,
    show_events: bool,
}

impl<W: Write> Driver<W> {
    /// Create a driver with an empty reconciler.
    pub const fn new(out: W, output: &OutputConfig) -> Self {
        Self {
            reconciler: EventReconciler::new(),
            out,
            show_events: output.show_events,
        }
    }

    /// Add one event, then write the resulting frame.
    pub fn feed(&mut self, event: Event) -> Result<(), DemoError> {
        self.reconciler.add_event(event);
        let active = self.reconciler.active_items();

        let frame = Frame {
            arrival: self.reconciler.len(),
            event: if self.show_events {
                self.reconciler.events().last()
            } else {
                None
            },
            active: &active,
        };
        serde_json::to_writer(&mut self.out, &frame)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }

    /// Forget everything fed so far.
    pub fn reset(&mut self) {
        self.reconciler.reset();
    }

    /// Reset, then feed every event of `scenario`.
    pub fn run_scenario(&mut self, scenario: Scenario) -> Result<(), DemoError> {
        self.reset();
        let events = scenario.events();
        info!(
            scenario = scenario.name(),
            label = scenario.label(),
            events = events.len(),
            "Running scenario"
        );
        for event in events {
            self.feed(event)?;
        }
        Ok(())
    }

    /// Reset, then feed `events` waiting `delay` before each one.
    pub async fn run_stream(&mut self, events: Vec<Event>, delay: Duration) -> Result<(), DemoError> {
        self.reset();
        info!(
            events = events.len(),
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "Streaming events"
        );
        for event in events {
            tokio::time::sleep(delay).await;
            self.feed(event)?;
        }
        Ok(())
    }

    /// Feed JSON-lines events from `reader`, in line order.
    ///
    /// Blank lines are ignored. Lines that do not parse as an event are
    /// logged and skipped; they never abort the replay.
    pub fn replay(&mut self, reader: impl BufRead) -> Result<ReplayStats, DemoError> {
        let mut stats = ReplayStats::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Event>(&line) {
                Ok(event) => {
                    self.feed(event)?;
                    stats.fed = stats.fed.saturating_add(1);
                }
                Err(e) => {
                    warn!(
                        line = index.saturating_add(1),
                        error = %e,
                        "Skipping line that is not an event"
                    );
                    stats.skipped = stats.skipped.saturating_add(1);
                }
            }
        }
        info!(fed = stats.fed, skipped = stats.skipped, "Replay finished");
        Ok(stats)
    }

    /// The reconciler being driven.
    pub const fn reconciler(&self) -> &EventReconciler {
        &self.reconciler
    }

    /// Recover the output sink.
    pub fn into_inner(self) -> W {
        self.out
    }
}
