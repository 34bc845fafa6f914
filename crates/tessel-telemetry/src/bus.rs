//! Event bus with pluggable sinks.
//!
//! Events are queued on an `mpsc` channel when emitted and handed to the
//! sinks on [`EventBus::flush`], so emitting never blocks on sink I/O.

use std::sync::mpsc;

use crate::events::{EventKind, SimulationEvent};
use crate::sinks::EventSink;

/// Event bus for simulation telemetry.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    /// Registered sinks.
    sinks: Vec<Box<dyn EventSink>>,
    /// Whether the bus is active. Disabled bus is a no-op.
    enabled: bool,
}

impl EventBus {
    /// Creates a new event bus with no sinks.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    /// Registers a sink to receive events.
    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. Disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Returns true if the bus is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Emit an event. If the bus is disabled, this is a no-op.
    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives in `self`, so sending cannot fail.
        let _ = self.sender.send(event);
    }

    /// Shorthand for `emit(SimulationEvent::new(timestep, kind))`.
    pub fn emit_at(&self, timestep: u32, kind: EventKind) {
        self.emit(SimulationEvent::new(timestep, kind));
    }

    /// Deliver all pending events to the registered sinks, in emission
    /// order. Returns the number of events delivered.
    pub fn flush(&mut self) -> usize {
        let mut delivered = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            delivered += 1;
        }
        delivered
    }

    /// Flush, then let every sink finalize.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            sink.finalize();
        }
    }

    /// Returns the number of registered sinks.
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
