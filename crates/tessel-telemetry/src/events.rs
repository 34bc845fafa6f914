//! Simulation event types.
//!
//! Events are lightweight value types tagged with the step that produced
//! them.

use serde::{Deserialize, Serialize};
use tessel_types::InstanceId;

/// A simulation event emitted by the host loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEvent {
    /// Timestep number (0-indexed).
    pub timestep: u32,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    /// Timestep started.
    TimestepBegin {
        /// Simulation time at the start of the step (seconds).
        sim_time: f64,
    },

    /// Timestep completed.
    TimestepEnd {
        /// Wall-clock time for the entire timestep (seconds).
        wall_time: f64,
    },

    /// Energy snapshot after the step.
    Energy {
        /// Kinetic energy of all free vertices.
        kinetic: f64,
        /// Elastic energy summed over plugin instances.
        elastic: f64,
    },

    /// Passive-force summary of one plugin instance.
    PassiveForce {
        instance: InstanceId,
        elastic_energy: f64,
        max_nodal_force: f64,
    },

    /// A plugin instance was not created.
    InstanceSkipped {
        instance: InstanceId,
        reason: String,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl SimulationEvent {
    /// Creates a new event for the given timestep.
    pub fn new(timestep: u32, kind: EventKind) -> Self {
        Self { timestep, kind }
    }
}
