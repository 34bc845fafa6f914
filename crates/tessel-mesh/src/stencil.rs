//! Local tetrahedron numbering.
//!
//! ```text
//!            3
//!           /|\
//!          / | \
//!         /  |  \
//!        0---|---2
//!         \  |  /
//!          \ | /
//!           \|/
//!            1
//! ```
//!
//! Every table below is part of the model's contract: edge ids are
//! allocated in [`EDGES`] order and the per-edge strain basis is built from
//! the two [`FACES`] listed in [`EDGE_FACES`].

/// Vertices per tetrahedron.
pub const NUM_VERTS: usize = 4;

/// Edges per tetrahedron.
pub const NUM_EDGES: usize = 6;

/// Local vertex pairs forming each local edge, in canonical order.
pub const EDGES: [[usize; 2]; NUM_EDGES] = [[0, 1], [1, 2], [2, 0], [2, 3], [0, 3], [1, 3]];

/// Local faces, one opposite each vertex.
pub const FACES: [[usize; 3]; NUM_VERTS] = [[2, 1, 0], [0, 1, 3], [1, 2, 3], [2, 0, 3]];

/// For each local edge, the two faces that do not contain it.
pub const EDGE_FACES: [[usize; 2]; NUM_EDGES] = [[2, 3], [1, 3], [2, 1], [1, 0], [0, 2], [0, 3]];

/// Returns the vertex triples of the two faces opposite local edge `e`.
#[inline]
pub fn opposite_faces(e: usize) -> ([usize; 3], [usize; 3]) {
    let [left, right] = EDGE_FACES[e];
    (FACES[left], FACES[right])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_vertex_pair_appears_once() {
        let mut seen = [[false; NUM_VERTS]; NUM_VERTS];
        for [a, b] in EDGES {
            let (lo, hi) = (a.min(b), a.max(b));
            assert!(!seen[lo][hi], "pair ({lo}, {hi}) listed twice");
            seen[lo][hi] = true;
        }
    }

    #[test]
    fn opposite_faces_never_contain_the_edge() {
        for (e, [a, b]) in EDGES.iter().enumerate() {
            let (left, right) = opposite_faces(e);
            for face in [left, right] {
                assert!(
                    !(face.contains(a) && face.contains(b)),
                    "edge {e} lies in one of its opposite faces"
                );
            }
        }
    }

    #[test]
    fn opposite_faces_are_distinct() {
        for pair in EDGE_FACES {
            assert_ne!(pair[0], pair[1]);
        }
    }
}
