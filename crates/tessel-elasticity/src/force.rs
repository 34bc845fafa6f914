//! Per-element force evaluation.
//!
//! The elastic energy of one tetrahedron is `½ εᵀ M ε`, where `ε[e]` is the
//! change in squared length of local edge `e`. Differentiating through
//! `ε[e] = |x_a − x_b|² − L₀²` gives the nodal forces:
//!
//! ```text
//! f_v = −Σ_e2 (Σ_e1 ε[e1] · M[e1][e2]) · ∂ε[e2]/∂x_v
//! ```
//!
//! Damping is folded into `ε` before the contraction, so the same kernel
//! serves both terms.

use tessel_math::DVec3;
use tessel_mesh::stencil::{EDGES, NUM_EDGES, NUM_VERTS};
use tessel_types::Scalar;

use crate::metric::ElementMetric;

/// Gradients of each local edge's squared length.
///
/// `grad[e][0]` is taken with respect to the edge's first stencil vertex,
/// `grad[e][1]` with respect to the second; they always sum to zero.
pub fn squared_length_gradients(x: &[DVec3; NUM_VERTS]) -> [[DVec3; 2]; NUM_EDGES] {
    EDGES.map(|[a, b]| {
        let g = 2.0 * (x[a] - x[b]);
        [g, -g]
    })
}

/// Energy gradient at the four vertices of one element.
///
/// The returned vectors are `∂E/∂x_v`; the caller subtracts them from the
/// force accumulator.
pub fn element_energy_gradient(
    metric: &ElementMetric,
    elongation: &[Scalar; NUM_EDGES],
    gradients: &[[DVec3; 2]; NUM_EDGES],
) -> [DVec3; NUM_VERTS] {
    let weights = metric.apply(elongation);

    let mut nodal = [DVec3::ZERO; NUM_VERTS];
    for (e, [a, b]) in EDGES.iter().enumerate() {
        nodal[*a] += weights[e] * gradients[e][0];
        nodal[*b] += weights[e] * gradients[e][1];
    }
    nodal
}

/// Summary of one force evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// `½ Σ εᵀ M ε` over all elements, without the damping term.
    pub elastic_energy: Scalar,
    /// Largest per-vertex force magnitude written this step.
    pub max_nodal_force: Scalar,
}
