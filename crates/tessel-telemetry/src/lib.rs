//! # tessel-telemetry
//!
//! Event bus for simulation telemetry. The reference host emits structured
//! events (step timing, energy, per-instance passive-force summaries,
//! skipped instances) that pluggable sinks consume.

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::{EventKind, SimulationEvent};
pub use sinks::{EventSink, TracingSink, VecSink};
