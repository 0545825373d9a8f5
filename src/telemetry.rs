//! Workbench telemetry events and sinks.
//!
//! Events capture the outcome of backend round trips (how many stories or
//! test cases came back, which context kind was attached) so a session can
//! be reconstructed when debugging. Nothing is transmitted anywhere.

use std::io;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by the workbench.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Stories were fetched from the tracker.
    StoriesFetched {
        /// Number of stories returned.
        count: usize,
    },
    /// A context file was uploaded and accepted.
    ContextAttached {
        /// Backend type tag of the context (e.g. `json`).
        context_type: String,
        /// Name of the uploaded file.
        filename: String,
    },
    /// A generation request completed.
    GenerationCompleted {
        /// `story` or `manual`.
        mode: String,
        /// Number of test cases returned.
        test_case_count: usize,
    },
    /// A generation request failed.
    GenerationFailed {
        /// `story` or `manual`.
        mode: String,
        /// Rendered error.
        error: String,
    },
    /// Test cases were pushed to the tracker.
    TestCasesUploaded {
        /// Number of test cases uploaded.
        count: usize,
        /// Link to the created test execution, when reported.
        test_execution_url: Option<String>,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// An event stamped with the time it was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampedEvent {
    /// UTC time the sink received the event.
    pub recorded_at: DateTime<Utc>,
    /// The recorded event.
    #[serde(flatten)]
    pub event: TelemetryEvent,
}

impl TimestampedEvent {
    /// Stamps `event` with the current time.
    #[must_use]
    pub fn now(event: TelemetryEvent) -> Self {
        Self {
            recorded_at: Utc::now(),
            event,
        }
    }
}

/// Records telemetry events to stderr as JSON lines (JSONL).
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&TimestampedEvent::now(event)) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}

/// Sink that keeps events in memory for assertions.
#[cfg(any(test, feature = "test-support"))]
#[derive(Debug, Default)]
pub struct RecordingTelemetrySink {
    events: std::sync::Mutex<Vec<TelemetryEvent>>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingTelemetrySink {
    /// Removes and returns every recorded event.
    #[must_use]
    pub fn take(&self) -> Vec<TelemetryEvent> {
        self.events
            .lock()
            .map(|mut events| events.drain(..).collect())
            .unwrap_or_default()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl TelemetrySink for RecordingTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
