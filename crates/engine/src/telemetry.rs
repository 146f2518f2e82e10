//! Telemetry collaborators - fire-and-forget sinks for gameplay events

use std::io::Write;

use serde::Serialize;
use tui_tiles_core::GameEvent;
use tui_tiles_types::Ruleset;

/// One gameplay event plus the session context it happened in
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord<'a> {
    pub ruleset: Ruleset,
    pub best_score: u64,
    #[serde(flatten)]
    pub event: &'a GameEvent,
}

/// Observer of gameplay events. Implementations must not fail the caller.
pub trait Telemetry {
    fn record(&mut self, record: &TelemetryRecord<'_>);
}

/// Emits every event through `tracing` on the `telemetry` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl Telemetry for TracingTelemetry {
    fn record(&mut self, record: &TelemetryRecord<'_>) {
        match serde_json::to_string(record) {
            Ok(payload) => tracing::info!(
                target: "telemetry",
                event = record.event.name(),
                ruleset = record.ruleset.as_str(),
                %payload
            ),
            Err(err) => tracing::warn!(target: "telemetry", %err, "unserializable event"),
        }
    }
}

/// Appends each event as one JSON line to a writer
#[derive(Debug)]
pub struct JsonLinesTelemetry<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesTelemetry<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Telemetry for JsonLinesTelemetry<W> {
    fn record(&mut self, record: &TelemetryRecord<'_>) {
        let written = serde_json::to_writer(&mut self.out, record)
            .map_err(std::io::Error::from)
            .and_then(|()| self.out.write_all(b"\n"));
        if let Err(err) = written {
            tracing::warn!(%err, "failed to write telemetry line");
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTelemetry;

impl Telemetry for NoTelemetry {
    fn record(&mut self, _record: &TelemetryRecord<'_>) {}
}
