//! Squared edge-length bookkeeping.
//!
//! A model instance sources its current edge lengths in exactly one of two
//! ways, fixed at construction:
//!
//! - [`EdgeLengths::FreeBody`] — lengths are recomputed from vertex positions
//!   every step, and the previous step's lengths are kept for damping.
//! - [`EdgeLengths::HostCoupled`] — the host already maintains per-edge
//!   current and rest lengths (a coupled "flex" primitive); the instance only
//!   reads them through an [`EdgeCacheHandle`].

use tessel_math::DVec3;
use tessel_types::{Scalar, TesselError, TesselResult};

/// Writes `|x_a − x_b|²` for every edge into `out`.
pub fn update_squared_lengths(out: &mut [Scalar], edges: &[[u32; 2]], positions: &[DVec3]) {
    for (length, &[a, b]) in out.iter_mut().zip(edges) {
        *length = positions[a as usize].distance_squared(positions[b as usize]);
    }
}

/// Squared lengths owned by a free-body instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeBodyLengths {
    /// Rest lengths. Written once at construction.
    reference: Vec<Scalar>,
    /// Lengths at the current step.
    pub deformed: Vec<Scalar>,
    /// Lengths at the previous step.
    pub previous: Vec<Scalar>,
}

impl FreeBodyLengths {
    /// Measure rest lengths; `deformed` and `previous` start at rest.
    pub fn at_rest(edges: &[[u32; 2]], rest_positions: &[DVec3]) -> Self {
        let mut reference = vec![0.0; edges.len()];
        update_squared_lengths(&mut reference, edges, rest_positions);
        Self {
            deformed: reference.clone(),
            previous: reference.clone(),
            reference,
        }
    }

    /// Rest squared lengths, indexed by edge id.
    #[inline]
    pub fn reference(&self) -> &[Scalar] {
        &self.reference
    }

    /// Recompute `deformed` from current positions.
    pub fn measure(&mut self, edges: &[[u32; 2]], positions: &[DVec3]) {
        update_squared_lengths(&mut self.deformed, edges, positions);
    }

    /// Roll the current lengths into `previous` for the next step.
    pub fn advance(&mut self) {
        self.previous.copy_from_slice(&self.deformed);
    }
}

/// Validated window into the host's per-edge length arrays.
///
/// Edge `e` of the instance lives at host index `offset + e`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeCacheHandle {
    offset: usize,
    len: usize,
}

impl EdgeCacheHandle {
    /// Creates a handle covering `len` host edges starting at `offset`.
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// First host edge index covered by the handle.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of edges covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the handle covers no edges.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Borrow this instance's window of a host array.
    pub fn window<'a>(&self, host: &'a [Scalar]) -> TesselResult<&'a [Scalar]> {
        host.get(self.offset..self.offset + self.len).ok_or_else(|| {
            TesselError::InvariantViolation(format!(
                "Host edge cache has {} entries, instance needs [{}, {})",
                host.len(),
                self.offset,
                self.offset + self.len
            ))
        })
    }
}

/// Per-step view of the host's edge lengths (not squared).
#[derive(Debug, Clone, Copy)]
pub struct HostEdgeCache<'a> {
    /// Current edge lengths.
    pub current: &'a [Scalar],
    /// Rest edge lengths.
    pub rest: &'a [Scalar],
}

/// Source of edge lengths for one model instance.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeLengths {
    /// Lengths tracked by the instance itself.
    FreeBody(FreeBodyLengths),
    /// Lengths read from the host each step.
    HostCoupled(EdgeCacheHandle),
}

impl EdgeLengths {
    /// Short label for logs and reports.
    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::FreeBody(_) => "free_body",
            Self::HostCoupled(_) => "host_coupled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_window_bounds() {
        let host = [1.0, 2.0, 3.0, 4.0, 5.0];
        let handle = EdgeCacheHandle::new(1, 3);
        assert_eq!(handle.window(&host).unwrap(), &[2.0, 3.0, 4.0]);
        assert!(EdgeCacheHandle::new(3, 3).window(&host).is_err());
    }

    #[test]
    fn free_body_starts_at_rest() {
        let positions = [DVec3::ZERO, DVec3::new(3.0, 4.0, 0.0)];
        let lengths = FreeBodyLengths::at_rest(&[[0, 1]], &positions);
        assert_eq!(lengths.reference(), &[25.0]);
        assert_eq!(lengths.deformed, lengths.previous);
    }

    #[test]
    fn advance_copies_deformed() {
        let rest = [DVec3::ZERO, DVec3::X];
        let mut lengths = FreeBodyLengths::at_rest(&[[0, 1]], &rest);
        lengths.measure(&[[0, 1]], &[DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0)]);
        assert_eq!(lengths.deformed, vec![4.0]);
        assert_eq!(lengths.previous, vec![1.0]);
        lengths.advance();
        assert_eq!(lengths.previous, vec![4.0]);
        assert_eq!(lengths.reference(), &[1.0]);
    }
}
