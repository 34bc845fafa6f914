//! Core tetrahedral mesh type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! Tetrahedra are stored as a flat index buffer, four vertices per element,
//! in the same layout as the `face` plugin option.

use serde::{Deserialize, Serialize};
use tessel_math::DVec3;
use tessel_types::{TesselError, TesselResult};

use crate::stencil::NUM_VERTS;

/// A tetrahedral mesh stored in Structure-of-Arrays layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TetMesh {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f64>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f64>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f64>,

    /// Tetrahedron indices — each element is [v0, v1, v2, v3].
    /// Stored flat: `[t0v0, t0v1, t0v2, t0v3, t1v0, ...]`
    pub indices: Vec<u32>,
}

impl TetMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns the number of tetrahedra.
    #[inline]
    pub fn tet_count(&self) -> usize {
        self.indices.len() / NUM_VERTS
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f64; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::DVec3`.
    #[inline]
    pub fn position_dvec3(&self, i: usize) -> DVec3 {
        DVec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Collects all vertex positions in array-of-structs form.
    pub fn positions(&self) -> Vec<DVec3> {
        (0..self.vertex_count()).map(|i| self.position_dvec3(i)).collect()
    }

    /// Returns the four vertex indices of tetrahedron `t`.
    #[inline]
    pub fn tet(&self, t: usize) -> [u32; 4] {
        let base = t * NUM_VERTS;
        [
            self.indices[base],
            self.indices[base + 1],
            self.indices[base + 2],
            self.indices[base + 3],
        ]
    }

    /// Sets the position of vertex `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, p: DVec3) {
        self.pos_x[i] = p.x;
        self.pos_y[i] = p.y;
        self.pos_z[i] = p.z;
    }

    /// Creates an empty mesh with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize, tet_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(tet_capacity * NUM_VERTS),
        }
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, p: DVec3) -> u32 {
        let index = self.pos_x.len() as u32;
        self.pos_x.push(p.x);
        self.pos_y.push(p.y);
        self.pos_z.push(p.z);
        index
    }

    /// Validates mesh integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - Index count is a multiple of 4 and indices are within bounds
    /// - No tetrahedron repeats a vertex
    pub fn validate(&self) -> TesselResult<()> {
        let n = self.pos_x.len();

        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(TesselError::InvalidMesh(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        if self.indices.len() % NUM_VERTS != 0 {
            return Err(TesselError::InvalidMesh(format!(
                "Index count ({}) is not divisible by 4",
                self.indices.len()
            )));
        }

        for (i, &idx) in self.indices.iter().enumerate() {
            if idx as usize >= n {
                return Err(TesselError::InvalidMesh(format!(
                    "Index {} at position {} is out of range (vertex count: {})",
                    idx, i, n
                )));
            }
        }

        for t in 0..self.tet_count() {
            let v = self.tet(t);
            for a in 0..NUM_VERTS {
                for b in (a + 1)..NUM_VERTS {
                    if v[a] == v[b] {
                        return Err(TesselError::InvalidMesh(format!(
                            "Tetrahedron {} has repeated vertex indices: {:?}",
                            t, v
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Constructs a mesh from interleaved AoS position data.
    ///
    /// Converts `[x0, y0, z0, x1, y1, z1, ...]` to SoA layout.
    pub fn from_interleaved(positions: &[f64], indices: &[u32]) -> TesselResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(TesselError::InvalidMesh(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut mesh = Self::with_capacity(n, indices.len() / NUM_VERTS);

        for p in positions.chunks_exact(3) {
            mesh.pos_x.push(p[0]);
            mesh.pos_y.push(p[1]);
            mesh.pos_z.push(p[2]);
        }
        mesh.indices = indices.to_vec();

        mesh.validate()?;
        Ok(mesh)
    }
}
