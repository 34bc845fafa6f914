//! Numerical constants and simulation defaults.

use crate::Scalar;

/// Default simulation timestep (seconds).
pub const DEFAULT_DT: Scalar = 0.002;

/// Gravitational acceleration (m/s²).
pub const GRAVITY: Scalar = 9.81;

/// Relative tolerance for degenerate tetrahedron detection.
///
/// A tetrahedron is rejected when `|volume| <= DEGENERATE_VOLUME_TOLERANCE * l_max³`,
/// where `l_max` is its longest edge. Scale-free, so it works for meshes
/// in millimeters as well as meters.
pub const DEGENERATE_VOLUME_TOLERANCE: Scalar = 1.0e-12;
