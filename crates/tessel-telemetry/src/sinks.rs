//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::SimulationEvent;

/// Trait for event consumers.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called when the simulation ends.
    fn finalize(&mut self) {}

    /// Returns a human-readable name for this sink.
    fn name(&self) -> &str;
}

/// Collects events in memory.
///
/// Clones share the same buffer, so a caller can keep one clone and hand
/// the other to the bus.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event received so far.
    pub fn events(&self) -> Vec<SimulationEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing` at a fixed level.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        let timestep = event.timestep;
        let kind = &event.kind;
        match self.level {
            tracing::Level::ERROR => tracing::error!(timestep, event = ?kind, "simulation_event"),
            tracing::Level::WARN => tracing::warn!(timestep, event = ?kind, "simulation_event"),
            tracing::Level::INFO => tracing::info!(timestep, event = ?kind, "simulation_event"),
            tracing::Level::DEBUG => tracing::debug!(timestep, event = ?kind, "simulation_event"),
            _ => tracing::trace!(timestep, event = ?kind, "simulation_event"),
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
