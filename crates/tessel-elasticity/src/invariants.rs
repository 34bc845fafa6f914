//! Rest-pose geometric invariants of a tetrahedron.
//!
//! For each local edge the strain basis is the symmetrized tensor product of
//! the area normals of the two faces that do not contain the edge, scaled by
//! `1 / (72·V²)`. Contracting an edge's squared-length change against these
//! tensors reproduces the linear finite-element strain, without ever choosing
//! a coordinate frame.
//!
//! From the six basis tensors we keep two invariants:
//! - `first[e]` — trace of the basis of edge `e`
//! - `second[e1][e2]` — `Σ_ij T_e1[i][j] · T_e2[j][i]`

use tessel_math::tensor::{contract, symmetric_outer, trace, triple_product};
use tessel_math::{DMat3, DVec3};
use tessel_mesh::stencil::{self, NUM_EDGES, NUM_VERTS};
use tessel_types::constants::DEGENERATE_VOLUME_TOLERANCE;
use tessel_types::{Scalar, TesselError, TesselResult};

/// Per-tetrahedron quantities derived from the rest pose.
#[derive(Debug, Clone, Copy)]
pub struct ElementGeometry {
    /// Signed volume. The sign depends on vertex winding and is irrelevant
    /// downstream, where the volume only appears squared or as a scale of
    /// the Lamé moduli.
    pub volume: Scalar,
    /// Strain basis tensor of each local edge.
    pub basis: [DMat3; NUM_EDGES],
    /// First invariant: trace of each basis tensor.
    pub first: [Scalar; NUM_EDGES],
    /// Second invariant: pairwise contraction of basis tensors.
    pub second: [[Scalar; NUM_EDGES]; NUM_EDGES],
}

impl ElementGeometry {
    /// Compute volume, bases, and invariants for one tetrahedron.
    ///
    /// `element` is only used to label errors. A vertex outside `positions`
    /// is an [`TesselError::OwnershipViolation`]. Near-zero volume is rejected
    /// with [`TesselError::DegenerateElement`]; the bases would otherwise
    /// divide by zero and poison the metric with infinities.
    pub fn compute(
        element: u32,
        positions: &[DVec3],
        vertices: [u32; NUM_VERTS],
    ) -> TesselResult<Self> {
        let mut x = [DVec3::ZERO; NUM_VERTS];
        for (corner, &vertex) in x.iter_mut().zip(&vertices) {
            *corner = *positions
                .get(vertex as usize)
                .ok_or(TesselError::OwnershipViolation { element, vertex })?;
        }

        let volume = tetrahedron_volume(&x);
        let longest = stencil::EDGES
            .iter()
            .map(|[a, b]| x[*a].distance(x[*b]))
            .fold(0.0, Scalar::max);
        if !volume.is_finite() || volume.abs() <= DEGENERATE_VOLUME_TOLERANCE * longest.powi(3) {
            return Err(TesselError::DegenerateElement { element, volume });
        }

        let basis: [DMat3; NUM_EDGES] = std::array::from_fn(|e| edge_basis(&x, e, volume));
        let first = basis.map(|t| trace(&t));

        let mut second = [[0.0; NUM_EDGES]; NUM_EDGES];
        for (e1, row) in second.iter_mut().enumerate() {
            for (e2, entry) in row.iter_mut().enumerate() {
                *entry = contract(&basis[e1], &basis[e2]);
            }
        }

        Ok(Self {
            volume,
            basis,
            first,
            second,
        })
    }
}

/// Signed volume of a tetrahedron from its four corner positions.
///
/// `((x2 − x0) × (x1 − x0)) · (x3 − x0) / 6`
#[inline]
pub fn tetrahedron_volume(x: &[DVec3; NUM_VERTS]) -> Scalar {
    let e1 = x[1] - x[0];
    let e2 = x[2] - x[0];
    let e3 = x[3] - x[0];
    triple_product(e2, e1, e3) / 6.0
}

/// Unnormalized area normal of a local face: `(f1 − f0) × (f2 − f0)`.
#[inline]
fn face_normal(x: &[DVec3; NUM_VERTS], face: [usize; 3]) -> DVec3 {
    let a = x[face[1]] - x[face[0]];
    let b = x[face[2]] - x[face[0]];
    a.cross(b)
}

/// Strain basis tensor of local edge `e`.
fn edge_basis(x: &[DVec3; NUM_VERTS], e: usize, volume: Scalar) -> DMat3 {
    let (left, right) = stencil::opposite_faces(e);
    let normal_left = face_normal(x, left);
    let normal_right = face_normal(x, right);
    symmetric_outer(normal_left, normal_right) * (1.0 / (72.0 * volume * volume))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corner() -> [DVec3; 4] {
        [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z]
    }

    #[test]
    fn corner_volume_magnitude() {
        assert!((tetrahedron_volume(&corner()).abs() - 1.0 / 6.0).abs() < 1e-15);
    }

    #[test]
    fn swapping_two_vertices_flips_sign() {
        let x = corner();
        let swapped = [x[1], x[0], x[2], x[3]];
        assert!((tetrahedron_volume(&x) + tetrahedron_volume(&swapped)).abs() < 1e-15);
    }

    #[test]
    fn face_normals_have_double_area_length() {
        let x = corner();
        // Face 0 is the z = 0 triangle with area 1/2.
        let n = face_normal(&x, stencil::FACES[0]);
        assert!((n.length() - 1.0).abs() < 1e-15);
        assert!(n.x.abs() < 1e-15 && n.y.abs() < 1e-15);
    }
}
