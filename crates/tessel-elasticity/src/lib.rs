//! # tessel-elasticity
//!
//! Edge-based linear elasticity for tetrahedral meshes.
//!
//! Setup derives a 6×6 metric per tetrahedron from its rest pose; each step
//! contracts that metric with the current edge elongations to produce nodal
//! forces, with an optional Rayleigh damping term.
//!
//! ## Key Types
//!
//! - [`ElementGeometry`] — rest volume, strain bases, trace invariants
//! - [`MetricAssembler`] / [`ElementMetric`] — per-element quadratic form
//! - [`EdgeLengths`] — free-body or host-coupled edge-length source
//! - [`Solid`] — one model instance: construction and per-step force evaluation

pub mod force;
pub mod invariants;
pub mod lengths;
pub mod metric;
pub mod solid;

pub use force::StepReport;
pub use invariants::ElementGeometry;
pub use lengths::{EdgeCacheHandle, EdgeLengths, FreeBodyLengths, HostEdgeCache};
pub use metric::{ElementMetric, MetricAssembler};
pub use solid::{Coupling, Solid, SolidParams, StepInput};
