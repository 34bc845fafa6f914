//! Benchmark scenarios — procedural mesh + material + pinning for each test case.
//!
//! Three canonical scenarios for regression testing:
//! 1. **Single poke** — one regular tetrahedron released from a stretched pose
//! 2. **Cantilever** — a soft beam clamped at `x = min`, sagging under gravity
//! 3. **Coupled block** — a short clamped beam whose edge lengths come from
//!    the host's flex cache instead of being measured by the plugin

use serde::{Deserialize, Serialize};

use tessel_material::{IsotropicMaterial, MaterialDatabase};
use tessel_math::DVec3;
use tessel_mesh::generators::{box_lattice, regular_tetrahedron, vertices_at_min_x};
use tessel_mesh::TetMesh;
use tessel_types::constants::GRAVITY;

/// Which benchmark scenario to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioKind {
    /// Single tetrahedron oscillating after release.
    SinglePoke,
    /// Clamped beam under gravity.
    Cantilever,
    /// Clamped beam coupled to a host flex.
    CoupledBlock,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[
            ScenarioKind::SinglePoke,
            ScenarioKind::Cantilever,
            ScenarioKind::CoupledBlock,
        ]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::SinglePoke => "single_poke",
            ScenarioKind::Cantilever => "cantilever",
            ScenarioKind::CoupledBlock => "coupled_block",
        }
    }

    /// Parse a name produced by [`ScenarioKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }
}

/// A fully specified benchmark scenario.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Scenario type.
    pub kind: ScenarioKind,
    /// Tetrahedral mesh in its rest pose.
    pub mesh: TetMesh,
    /// Elastic material.
    pub material: IsotropicMaterial,
    /// Per-vertex pinning. Pinned vertices never move.
    pub pinned: Vec<bool>,
    /// Initial offsets from the rest pose, per vertex.
    pub initial_offsets: Vec<(u32, DVec3)>,
    /// Whether the host keeps a flex edge cache for the mesh.
    pub coupled: bool,
    /// Gravitational acceleration.
    pub gravity: DVec3,
    /// Number of timesteps to simulate.
    pub timesteps: u32,
    /// Timestep size (seconds).
    pub dt: f64,
}

fn preset(name: &str) -> IsotropicMaterial {
    MaterialDatabase::with_defaults()
        .get(name)
        .copied()
        .unwrap_or_else(|| IsotropicMaterial::new(1.0e4, 0.45))
}

fn pin_min_x(mesh: &TetMesh) -> Vec<bool> {
    let mut pinned = vec![false; mesh.vertex_count()];
    for v in vertices_at_min_x(mesh, 1e-9) {
        pinned[v as usize] = true;
    }
    pinned
}

impl Scenario {
    /// Create the single poke scenario.
    ///
    /// A 10 cm regular gelatin tetrahedron with one vertex pulled 10% of an
    /// edge length outward, released without gravity.
    pub fn single_poke() -> Self {
        let mesh = regular_tetrahedron(0.1);
        let outward = mesh.position_dvec3(0).normalize() * 0.01;

        Self {
            kind: ScenarioKind::SinglePoke,
            pinned: vec![false; mesh.vertex_count()],
            mesh,
            material: preset("gelatin"),
            initial_offsets: vec![(0, outward)],
            coupled: false,
            gravity: DVec3::ZERO,
            timesteps: 400,
            dt: 5.0e-4,
        }
    }

    /// Create the cantilever scenario.
    ///
    /// A 40 × 10 × 10 cm gelatin beam at 8×2×2 cells, clamped at its `x = 0`
    /// face and sagging under gravity for 0.15 s.
    pub fn cantilever() -> Self {
        let mesh = box_lattice(8, 2, 2, DVec3::new(0.4, 0.1, 0.1), DVec3::ZERO);
        let pinned = pin_min_x(&mesh);

        Self {
            kind: ScenarioKind::Cantilever,
            mesh,
            material: preset("gelatin"),
            pinned,
            initial_offsets: Vec::new(),
            coupled: false,
            gravity: DVec3::new(0.0, 0.0, -GRAVITY),
            timesteps: 300,
            dt: 5.0e-4,
        }
    }

    /// Create the coupled block scenario.
    ///
    /// A 20 × 10 × 10 cm soft-tissue beam clamped at `x = 0`, with edge
    /// lengths supplied by a host flex.
    pub fn coupled_block() -> Self {
        let mesh = box_lattice(4, 2, 2, DVec3::new(0.2, 0.1, 0.1), DVec3::ZERO);
        let pinned = pin_min_x(&mesh);

        Self {
            kind: ScenarioKind::CoupledBlock,
            mesh,
            material: preset("soft_tissue"),
            pinned,
            initial_offsets: Vec::new(),
            coupled: true,
            gravity: DVec3::new(0.0, 0.0, -GRAVITY),
            timesteps: 200,
            dt: 5.0e-4,
        }
    }

    /// Create a scenario by kind.
    pub fn from_kind(kind: ScenarioKind) -> Self {
        match kind {
            ScenarioKind::SinglePoke => Self::single_poke(),
            ScenarioKind::Cantilever => Self::cantilever(),
            ScenarioKind::CoupledBlock => Self::coupled_block(),
        }
    }

    /// Replace the material.
    pub fn with_material(mut self, material: IsotropicMaterial) -> Self {
        self.material = material;
        self
    }
}
