//! Per-tetrahedron elastic metric.
//!
//! The metric is the 6×6 quadratic form that maps pairs of edge elongations
//! (changes in squared length) to elastic energy:
//!
//! ```text
//! M[e1][e2] = μ·V · second[e1][e2] + λ·V · first[e1] · first[e2]
//! ```
//!
//! `V` enters as a magnitude, so both vertex windings give the same
//! positive semi-definite metric.
//!
//! It is assembled once from the rest pose and never changes. A diagonal
//! metric with entries `1 / L₀` would reduce the model to a plain spring
//! network; the dense metric couples every pair of edges of a tetrahedron.

use tessel_material::IsotropicMaterial;
use tessel_math::DVec3;
use tessel_mesh::stencil::NUM_EDGES;
use tessel_mesh::TetTopology;
use tessel_types::{Scalar, TesselResult};

use crate::invariants::ElementGeometry;

/// Symmetric 6×6 stiffness kernel of one tetrahedron, indexed by local edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementMetric(pub [[Scalar; NUM_EDGES]; NUM_EDGES]);

impl ElementMetric {
    /// Entry for the ordered pair of local edges `(e1, e2)`.
    #[inline]
    pub fn get(&self, e1: usize, e2: usize) -> Scalar {
        self.0[e1][e2]
    }

    /// Returns true if `M[e1][e2] == M[e2][e1]` for every pair.
    pub fn is_symmetric(&self) -> bool {
        (0..NUM_EDGES).all(|i| (0..NUM_EDGES).all(|j| self.0[i][j] == self.0[j][i]))
    }

    /// `Σ_e1 elongation[e1] · M[e1][e2]` for every `e2`.
    #[inline]
    pub fn apply(&self, elongation: &[Scalar; NUM_EDGES]) -> [Scalar; NUM_EDGES] {
        std::array::from_fn(|e2| {
            (0..NUM_EDGES)
                .map(|e1| elongation[e1] * self.0[e1][e2])
                .sum()
        })
    }

    /// Quadratic form `εᵀ M ε`.
    #[inline]
    pub fn quadratic_form(&self, elongation: &[Scalar; NUM_EDGES]) -> Scalar {
        self.apply(elongation)
            .iter()
            .zip(elongation)
            .map(|(a, b)| a * b)
            .sum()
    }
}

/// Combines geometric invariants with material constants.
pub struct MetricAssembler {
    material: IsotropicMaterial,
}

impl MetricAssembler {
    /// Creates an assembler for one material.
    pub fn new(material: IsotropicMaterial) -> Self {
        Self { material }
    }

    /// Assemble the metric of a single element.
    ///
    /// Symmetric by construction: the second invariant is symmetric in its
    /// two edges and the first-invariant product is commutative.
    pub fn assemble(&self, geometry: &ElementGeometry) -> ElementMetric {
        let lame = self.material.lame().scaled(geometry.volume.abs());

        let mut metric = [[0.0; NUM_EDGES]; NUM_EDGES];
        for e1 in 0..NUM_EDGES {
            for e2 in e1..NUM_EDGES {
                let value = lame.mu * geometry.second[e1][e2]
                    + lame.lambda * geometry.first[e1] * geometry.first[e2];
                metric[e1][e2] = value;
                metric[e2][e1] = value;
            }
        }

        ElementMetric(metric)
    }

    /// Compute geometry and assemble the metric for every element.
    pub fn assemble_all(
        &self,
        topology: &TetTopology,
        rest_positions: &[DVec3],
    ) -> TesselResult<Vec<ElementMetric>> {
        topology
            .elements
            .iter()
            .enumerate()
            .map(|(t, element)| {
                let geometry = ElementGeometry::compute(t as u32, rest_positions, element.vertices)?;
                Ok(self.assemble(&geometry))
            })
            .collect()
    }
}
