//! Mesh topology extraction.
//!
//! Builds the deduplicated edge list and the element→edge/vertex maps from a
//! flat tetrahedron index buffer. Edge ids are dense and allocated in
//! first-visit order: tetrahedra in input order, local edges in
//! [`stencil::EDGES`] order. Every per-edge array in the elasticity model is
//! indexed by these ids, so the ordering is reproducible by construction.

use std::collections::HashMap;

use tessel_types::{EdgeId, ElementId, TesselError, TesselResult};

use crate::mesh::TetMesh;
use crate::stencil::{self, NUM_EDGES, NUM_VERTS};

/// A tetrahedron with its global vertex and edge ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TetElement {
    /// Vertex ids, in local stencil order.
    pub vertices: [u32; NUM_VERTS],
    /// Edge ids, in local stencil order.
    pub edges: [u32; NUM_EDGES],
}

impl TetElement {
    /// Returns the global vertex pair of local edge `e`, in stencil orientation.
    #[inline]
    pub fn edge_vertices(&self, e: usize) -> [u32; 2] {
        let [a, b] = stencil::EDGES[e];
        [self.vertices[a], self.vertices[b]]
    }
}

/// Precomputed topology for a tetrahedral mesh.
///
/// Built once when a model is instantiated and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TetTopology {
    /// Per-tetrahedron vertex and edge ids.
    pub elements: Vec<TetElement>,

    /// Unique edges as `[v_min, v_max]` pairs, indexed by edge id.
    pub edges: Vec<[u32; 2]>,
}

impl TetTopology {
    /// Build topology from a flat tetrahedron vertex list.
    ///
    /// `edge_check`, when present and non-empty, holds the edge id the caller
    /// expects at position `6·t + e` for every tetrahedron `t` and local edge
    /// `e`. Any disagreement means the caller's topology data is malformed and
    /// is reported as [`TesselError::EdgeMismatch`].
    pub fn build(simplex: &[u32], edge_check: Option<&[u32]>) -> TesselResult<Self> {
        if simplex.len() % NUM_VERTS != 0 {
            return Err(TesselError::InvalidMesh(format!(
                "Tetrahedron list length ({}) is not divisible by 4",
                simplex.len()
            )));
        }

        let tet_count = simplex.len() / NUM_VERTS;
        let edge_check = edge_check.filter(|ids| !ids.is_empty());
        if let Some(ids) = edge_check {
            if ids.len() != tet_count * NUM_EDGES {
                return Err(TesselError::InvalidMesh(format!(
                    "Edge index list length ({}) != 6 × tetrahedron count ({})",
                    ids.len(),
                    tet_count * NUM_EDGES
                )));
            }
        }

        let mut elements = Vec::with_capacity(tet_count);
        let mut edges: Vec<[u32; 2]> = Vec::new();

        // Key: (min_vertex, max_vertex) to canonicalize edge direction
        let mut edge_map: HashMap<(u32, u32), u32> = HashMap::new();

        for (t, chunk) in simplex.chunks_exact(NUM_VERTS).enumerate() {
            let vertices = [chunk[0], chunk[1], chunk[2], chunk[3]];
            let mut element_edges = [0u32; NUM_EDGES];

            for (e, [a, b]) in stencil::EDGES.iter().enumerate() {
                let (va, vb) = (vertices[*a], vertices[*b]);
                if va == vb {
                    return Err(TesselError::InvalidMesh(format!(
                        "Tetrahedron {} has repeated vertex indices: {:?}",
                        t, vertices
                    )));
                }

                let key = (va.min(vb), va.max(vb));
                let next_id = edges.len() as u32;
                let id = *edge_map.entry(key).or_insert_with(|| {
                    edges.push([key.0, key.1]);
                    next_id
                });
                element_edges[e] = id;

                if let Some(ids) = edge_check {
                    let expected = ids[NUM_EDGES * t + e];
                    if expected != id {
                        return Err(TesselError::EdgeMismatch {
                            element: t as u32,
                            local_edge: e,
                            expected,
                            computed: id,
                        });
                    }
                }
            }

            elements.push(TetElement {
                vertices,
                edges: element_edges,
            });
        }

        tracing::debug!(
            tetrahedra = elements.len(),
            edges = edges.len(),
            "built tetrahedral topology"
        );

        Ok(Self { elements, edges })
    }

    /// Build topology from a mesh's index buffer.
    pub fn from_mesh(mesh: &TetMesh) -> TesselResult<Self> {
        Self::build(&mesh.indices, None)
    }

    /// Returns the number of tetrahedra.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the number of unique edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the canonical vertex pair of an edge.
    #[inline]
    pub fn edge(&self, id: EdgeId) -> [u32; 2] {
        self.edges[id.index()]
    }

    /// Returns a tetrahedron.
    #[inline]
    pub fn element(&self, id: ElementId) -> &TetElement {
        &self.elements[id.index()]
    }

    /// Number of vertices referenced, i.e. the largest vertex id plus one.
    pub fn vertex_count(&self) -> usize {
        self.elements
            .iter()
            .flat_map(|el| el.vertices)
            .max()
            .map_or(0, |v| v as usize + 1)
    }

    /// Flattened per-element edge ids, `6·t + e`.
    ///
    /// This is exactly the sequence accepted as `edge_check` by [`Self::build`].
    pub fn edge_index_sequence(&self) -> Vec<u32> {
        self.elements.iter().flat_map(|el| el.edges).collect()
    }
}
