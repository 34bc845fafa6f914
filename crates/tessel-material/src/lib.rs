//! # tessel-material
//!
//! Isotropic linear-elastic material parameters and a preset database.
//!
//! ## Design
//!
//! [`IsotropicMaterial`] carries the user-facing constants (Young's modulus,
//! Poisson's ratio, Rayleigh damping). [`LameParameters`] are derived from
//! them and scaled by element volume when the per-tetrahedron metric is
//! assembled.
//!
//! The [`MaterialDatabase`] stores named presets for common soft solids.

pub mod database;
pub mod properties;

pub use database::MaterialDatabase;
pub use properties::{IsotropicMaterial, LameParameters};
