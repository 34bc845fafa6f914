//! Second-order tensor helpers on `DMat3`.
//!
//! `glam` matrices are column-major: `m.col(j)[i]` is the entry at row `i`,
//! column `j`. The helpers below are written against that convention.

use glam::{DMat3, DVec3};
use tessel_types::Scalar;

/// Outer product `a ⊗ b`, i.e. the matrix with entries `a_i · b_j`.
#[inline]
pub fn outer(a: DVec3, b: DVec3) -> DMat3 {
    DMat3::from_cols(a * b.x, a * b.y, a * b.z)
}

/// Symmetrized outer product `a ⊗ b + b ⊗ a`.
#[inline]
pub fn symmetric_outer(a: DVec3, b: DVec3) -> DMat3 {
    outer(a, b) + outer(b, a)
}

/// Trace of a 3×3 matrix.
#[inline]
pub fn trace(m: &DMat3) -> Scalar {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}

/// Contraction `Σ_ij a_ij · b_ji`, equal to `trace(a · b)`.
///
/// For symmetric operands this is the Frobenius inner product.
#[inline]
pub fn contract(a: &DMat3, b: &DMat3) -> Scalar {
    trace(&(*a * *b))
}

/// Scalar triple product `(a × b) · c`.
#[inline]
pub fn triple_product(a: DVec3, b: DVec3, c: DVec3) -> Scalar {
    a.cross(b).dot(c)
}

/// Returns true if every entry of `m` equals its transposed counterpart
/// within `tolerance`.
pub fn is_symmetric(m: &DMat3, tolerance: Scalar) -> bool {
    let t = m.transpose();
    (0..3).all(|j| (m.col(j) - t.col(j)).abs().max_element() <= tolerance)
}
