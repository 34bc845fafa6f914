//! Integration tests for tessel-mesh.

use std::collections::HashSet;

use tessel_math::DVec3;
use tessel_mesh::generators::{
    box_lattice, corner_tetrahedron, face_sharing_pair, regular_tetrahedron, vertices_at_min_x,
};
use tessel_mesh::stencil::{EDGES, NUM_EDGES};
use tessel_mesh::{TetMesh, TetTopology};
use tessel_types::{EdgeId, ElementId, TesselError};

// ─── TetMesh Tests ────────────────────────────────────────────

#[test]
fn basic_counts() {
    let mesh = corner_tetrahedron();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.tet_count(), 1);
}

#[test]
fn position_access() {
    let mesh = corner_tetrahedron();
    assert_eq!(mesh.position(1), [1.0, 0.0, 0.0]);
    assert_eq!(mesh.position_dvec3(3), DVec3::Z);
}

#[test]
fn tet_access() {
    let mesh = face_sharing_pair();
    assert_eq!(mesh.tet(1), [1, 2, 3, 4]);
}

#[test]
fn validate_ok() {
    assert!(corner_tetrahedron().validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut mesh = corner_tetrahedron();
    mesh.pos_y.push(99.0);
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_oob_index() {
    let mut mesh = corner_tetrahedron();
    mesh.indices[3] = 99;
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_repeated_vertex() {
    let mut mesh = corner_tetrahedron();
    mesh.indices = vec![0, 1, 1, 3];
    assert!(mesh.validate().is_err());
}

#[test]
fn validate_catches_partial_tet() {
    let mut mesh = corner_tetrahedron();
    mesh.indices.push(0);
    assert!(mesh.validate().is_err());
}

#[test]
fn from_interleaved() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    let mesh = TetMesh::from_interleaved(&positions, &[0, 1, 2, 3]).unwrap();
    assert_eq!(mesh.vertex_count(), 4);
    assert_eq!(mesh.pos_x, vec![0.0, 1.0, 0.0, 0.0]);
    assert_eq!(mesh.pos_z, vec![0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn from_interleaved_rejects_ragged_positions() {
    assert!(TetMesh::from_interleaved(&[0.0, 1.0], &[]).is_err());
}

#[test]
fn mesh_json_roundtrip() {
    let mesh = face_sharing_pair();
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: TetMesh = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, mesh);
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn regular_tetrahedron_edges_are_equal() {
    let mesh = regular_tetrahedron(0.7);
    for [a, b] in EDGES {
        let d = mesh.position_dvec3(a).distance(mesh.position_dvec3(b));
        assert!((d - 0.7).abs() < 1e-12, "edge {a}-{b} has length {d}");
    }
}

#[test]
fn box_lattice_single_cell() {
    let mesh = box_lattice(1, 1, 1, DVec3::ONE, DVec3::ZERO);
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.tet_count(), 6);
    assert!(mesh.validate().is_ok());
}

#[test]
fn box_lattice_volumes_fill_the_box() {
    let size = DVec3::new(2.0, 1.0, 0.5);
    let mesh = box_lattice(3, 2, 2, size, DVec3::new(-1.0, 0.0, 0.0));
    let mut total = 0.0;
    for t in 0..mesh.tet_count() {
        let [a, b, c, d] = mesh.tet(t).map(|v| mesh.position_dvec3(v as usize));
        let volume = (b - a).cross(c - a).dot(d - a).abs() / 6.0;
        assert!(volume > 1e-6, "tet {t} is degenerate");
        total += volume;
    }
    assert!((total - size.x * size.y * size.z).abs() < 1e-10);
}

#[test]
fn min_x_vertices() {
    let mesh = box_lattice(2, 2, 2, DVec3::ONE, DVec3::ZERO);
    assert_eq!(vertices_at_min_x(&mesh, 1e-9).len(), 9);
}

// ─── Topology Tests ───────────────────────────────────────────

#[test]
fn topology_single_tet() {
    let topo = TetTopology::from_mesh(&corner_tetrahedron()).unwrap();
    assert_eq!(topo.element_count(), 1);
    assert_eq!(topo.edge_count(), 6);
    // First-visit order follows the stencil's local edge order.
    assert_eq!(topo.elements[0].edges, [0, 1, 2, 3, 4, 5]);
    assert_eq!(topo.edge(EdgeId(2)), [0, 2]);
    assert_eq!(topo.edge(EdgeId(3)), [2, 3]);
}

#[test]
fn topology_shared_face_dedups_edges() {
    let topo = TetTopology::from_mesh(&face_sharing_pair()).unwrap();
    assert_eq!(topo.edge_count(), 9);
    // Second tet [1, 2, 3, 4]: local edge 0 is (1, 2), already id 1.
    let second = topo.element(ElementId(1));
    assert_eq!(second.edges[0], 1);
    // Local edge 1 is (2, 3), already id 3.
    assert_eq!(second.edges[1], 3);
    // Local edge 3 is (3, 4), new.
    assert_eq!(second.edges[3], 6);
}

#[test]
fn topology_edges_are_canonical_and_unique() {
    let mesh = box_lattice(3, 2, 2, DVec3::ONE, DVec3::ZERO);
    let topo = TetTopology::from_mesh(&mesh).unwrap();

    let mut distinct = HashSet::new();
    for t in 0..mesh.tet_count() {
        let v = mesh.tet(t);
        for [a, b] in EDGES {
            distinct.insert((v[a].min(v[b]), v[a].max(v[b])));
        }
    }
    assert_eq!(topo.edge_count(), distinct.len());

    let unique: HashSet<[u32; 2]> = topo.edges.iter().copied().collect();
    assert_eq!(unique.len(), topo.edge_count());
    assert!(topo.edges.iter().all(|[a, b]| a < b));
}

#[test]
fn topology_element_edges_resolve_to_local_pairs() {
    let mesh = box_lattice(2, 2, 1, DVec3::ONE, DVec3::ZERO);
    let topo = TetTopology::from_mesh(&mesh).unwrap();

    for element in &topo.elements {
        for e in 0..NUM_EDGES {
            let [a, b] = element.edge_vertices(e);
            let expected = [a.min(b), a.max(b)];
            assert_eq!(topo.edge(EdgeId(element.edges[e])), expected);
        }
    }
}

#[test]
fn topology_single_cell_edge_count() {
    let mesh = box_lattice(1, 1, 1, DVec3::ONE, DVec3::ZERO);
    let topo = TetTopology::from_mesh(&mesh).unwrap();
    // 12 cube edges + 6 face diagonals + 1 body diagonal
    assert_eq!(topo.edge_count(), 19);
    assert_eq!(topo.vertex_count(), 8);
}

#[test]
fn topology_is_deterministic() {
    let mesh = box_lattice(2, 3, 2, DVec3::ONE, DVec3::ZERO);
    let a = TetTopology::from_mesh(&mesh).unwrap();
    let b = TetTopology::from_mesh(&mesh).unwrap();
    assert_eq!(a, b);
}

#[test]
fn topology_accepts_matching_edge_check() {
    let mesh = box_lattice(2, 1, 1, DVec3::ONE, DVec3::ZERO);
    let reference = TetTopology::from_mesh(&mesh).unwrap();
    let ids = reference.edge_index_sequence();
    let checked = TetTopology::build(&mesh.indices, Some(&ids)).unwrap();
    assert_eq!(checked, reference);
}

#[test]
fn topology_empty_edge_check_is_ignored() {
    let mesh = corner_tetrahedron();
    assert!(TetTopology::build(&mesh.indices, Some(&[])).is_ok());
}

#[test]
fn topology_reports_edge_mismatch() {
    let mesh = face_sharing_pair();
    let mut ids = TetTopology::from_mesh(&mesh).unwrap().edge_index_sequence();
    ids[7] = 8;

    match TetTopology::build(&mesh.indices, Some(&ids)) {
        Err(TesselError::EdgeMismatch {
            element,
            local_edge,
            expected,
            computed,
        }) => {
            assert_eq!(element, 1);
            assert_eq!(local_edge, 1);
            assert_eq!(expected, 8);
            assert_eq!(computed, 3);
        }
        other => panic!("expected edge mismatch, got {other:?}"),
    }
}

#[test]
fn topology_rejects_wrong_edge_check_length() {
    let mesh = corner_tetrahedron();
    assert!(TetTopology::build(&mesh.indices, Some(&[0, 1, 2])).is_err());
}

#[test]
fn topology_rejects_partial_tet() {
    assert!(TetTopology::build(&[0, 1, 2, 3, 4], None).is_err());
}

#[test]
fn topology_rejects_repeated_vertex() {
    assert!(TetTopology::build(&[0, 1, 2, 2], None).is_err());
}
