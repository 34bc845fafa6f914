//! Scalar type alias for the simulation.
//!
//! The metric couples squared edge lengths through volume-normalized
//! tensors, so intermediate values span many orders of magnitude.
//! Everything runs in double precision.

/// The floating-point type used throughout the simulation.
pub type Scalar = f64;
