//! # tessel-math
//!
//! Linear algebra primitives for the Tessel elasticity engine.
//!
//! Provides:
//! - Re-exports of the double-precision `glam` types (`DVec3`, `DMat3`)
//! - 3×3 tensor helpers used to build per-edge strain bases
//!   (outer products, traces, contractions)

pub mod tensor;

// Re-export glam types as the canonical math types for Tessel.
pub use glam::{DMat3, DVec3};
