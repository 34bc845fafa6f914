//! # tessel-types
//!
//! Shared types, identifiers, error types, and numerical constants
//! for the Tessel tetrahedral elasticity engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Tessel crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{TesselError, TesselResult};
pub use ids::{EdgeId, ElementId, InstanceId};
pub use scalar::Scalar;
