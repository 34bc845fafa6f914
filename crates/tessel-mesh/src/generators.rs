//! Procedural tetrahedral mesh generators for benchmarks and testing.
//!
//! These generators produce deterministic, resolution-configurable meshes.
//! Every tetrahedron has non-zero volume.

use tessel_math::DVec3;

use crate::mesh::TetMesh;

/// A single right-corner tetrahedron spanning the unit axes.
///
/// Vertices: origin, `+X`, `+Y`, `+Z`.
pub fn corner_tetrahedron() -> TetMesh {
    let mut mesh = TetMesh::with_capacity(4, 1);
    mesh.push_vertex(DVec3::ZERO);
    mesh.push_vertex(DVec3::X);
    mesh.push_vertex(DVec3::Y);
    mesh.push_vertex(DVec3::Z);
    mesh.indices.extend_from_slice(&[0, 1, 2, 3]);
    mesh
}

/// A regular tetrahedron with the given edge length, centered at the origin.
///
/// # Example
/// ```
/// use tessel_mesh::generators::regular_tetrahedron;
/// let mesh = regular_tetrahedron(1.0);
/// let d = mesh.position_dvec3(0).distance(mesh.position_dvec3(1));
/// assert!((d - 1.0).abs() < 1e-12);
/// ```
pub fn regular_tetrahedron(edge_length: f64) -> TetMesh {
    // Alternate cube corners are pairwise 2·√2 apart.
    let scale = edge_length / (2.0 * std::f64::consts::SQRT_2);
    let corners = [
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(1.0, -1.0, -1.0),
        DVec3::new(-1.0, 1.0, -1.0),
        DVec3::new(-1.0, -1.0, 1.0),
    ];

    let mut mesh = TetMesh::with_capacity(4, 1);
    for c in corners {
        mesh.push_vertex(c * scale);
    }
    mesh.indices.extend_from_slice(&[0, 1, 2, 3]);
    mesh
}

/// Two tetrahedra glued along a shared triangular face.
///
/// 5 vertices, 9 unique edges (3 of them shared).
pub fn face_sharing_pair() -> TetMesh {
    let mut mesh = TetMesh::with_capacity(5, 2);
    mesh.push_vertex(DVec3::ZERO);
    mesh.push_vertex(DVec3::X);
    mesh.push_vertex(DVec3::Y);
    mesh.push_vertex(DVec3::Z);
    mesh.push_vertex(DVec3::new(1.0, 1.0, 1.0));
    mesh.indices.extend_from_slice(&[0, 1, 2, 3, 1, 2, 3, 4]);
    mesh
}

/// Generates an axis-aligned box of `nx × ny × nz` cells starting at `origin`.
///
/// Each cubic cell is split into 6 tetrahedra sharing the cell's main diagonal
/// (Kuhn decomposition), which is conforming across neighboring cells.
///
/// # Arguments
/// - `nx`, `ny`, `nz` — Number of cells along each axis (vertex count per axis = n + 1).
/// - `size` — Total extent along each axis in meters.
/// - `origin` — Minimum corner of the box.
///
/// # Example
/// ```
/// use tessel_mesh::generators::box_lattice;
/// use tessel_math::DVec3;
/// let mesh = box_lattice(2, 1, 1, DVec3::new(2.0, 1.0, 1.0), DVec3::ZERO);
/// assert_eq!(mesh.vertex_count(), 12); // 3×2×2 vertices
/// assert_eq!(mesh.tet_count(), 12);    // 2 cells × 6 tets
/// ```
pub fn box_lattice(nx: usize, ny: usize, nz: usize, size: DVec3, origin: DVec3) -> TetMesh {
    let (vx, vy, vz) = (nx + 1, ny + 1, nz + 1);
    let mut mesh = TetMesh::with_capacity(vx * vy * vz, nx * ny * nz * 6);

    let cell = DVec3::new(
        size.x / nx.max(1) as f64,
        size.y / ny.max(1) as f64,
        size.z / nz.max(1) as f64,
    );

    // Generate vertices, x fastest
    for k in 0..vz {
        for j in 0..vy {
            for i in 0..vx {
                mesh.push_vertex(origin + DVec3::new(i as f64, j as f64, k as f64) * cell);
            }
        }
    }

    let index = |i: usize, j: usize, k: usize| (k * vy * vx + j * vx + i) as u32;

    // Monotone paths from the cell's min corner to its max corner,
    // one tetrahedron per axis ordering.
    const PATHS: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                for path in PATHS {
                    let mut corner = [i, j, k];
                    let mut tet = [index(i, j, k); 4];
                    for (step, &axis) in path.iter().enumerate() {
                        corner[axis] += 1;
                        tet[step + 1] = index(corner[0], corner[1], corner[2]);
                    }
                    mesh.indices.extend_from_slice(&tet);
                }
            }
        }
    }

    mesh
}

/// Indices of all vertices lying on the `x = min` face of a mesh.
///
/// Useful for pinning one side of a lattice in benchmarks.
pub fn vertices_at_min_x(mesh: &TetMesh, tolerance: f64) -> Vec<u32> {
    let min_x = mesh.pos_x.iter().copied().fold(f64::INFINITY, f64::min);
    (0..mesh.vertex_count())
        .filter(|&i| (mesh.pos_x[i] - min_x).abs() <= tolerance)
        .map(|i| i as u32)
        .collect()
}
