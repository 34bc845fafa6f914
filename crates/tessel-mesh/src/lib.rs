//! # tessel-mesh
//!
//! Tetrahedral mesh representation with Structure-of-Arrays (SoA) layout,
//! plus the edge topology the elasticity model is built on.
//!
//! ## Key Types
//!
//! - [`TetMesh`] — Vertex positions and flat tetrahedron index buffer.
//! - [`TetTopology`] — Deduplicated edges and element→edge/vertex maps.
//! - [`stencil`] — The fixed local numbering of a tetrahedron's
//!   vertices, edges, and faces.
//! - Procedural generators for tests and benchmarks.

pub mod generators;
pub mod mesh;
pub mod stencil;
pub mod topology;

pub use mesh::TetMesh;
pub use topology::{TetElement, TetTopology};
