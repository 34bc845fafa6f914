//! Host simulation contract types.
//!
//! [`HostModel`] is the immutable description of a simulation (bodies, flex
//! edge caches, plugin instances); [`HostData`] holds the per-step state the
//! plugins read and write. Both are serializable so scenarios can be stored
//! and replayed.

use serde::{Deserialize, Serialize};
use tessel_math::DVec3;
use tessel_mesh::TetMesh;
use tessel_types::constants::DEFAULT_DT;
use tessel_types::{InstanceId, Scalar};

use crate::config::PluginConfig;
use crate::handles::BodyRange;

/// One body of the host model. Soft-body vertices are point bodies with 3
/// translational dofs each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyInfo {
    /// Plugin instance that owns this body, if any.
    pub plugin: Option<InstanceId>,
    /// Rest position in world coordinates.
    pub rest_position: [Scalar; 3],
    /// Address of the body's first dof; `None` for bodies without dofs.
    pub dof_adr: Option<usize>,
}

impl BodyInfo {
    /// The static world body.
    pub fn world() -> Self {
        Self {
            plugin: None,
            rest_position: [0.0; 3],
            dof_adr: None,
        }
    }
}

/// A host-side flex primitive whose edge lengths the host keeps current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlexInfo {
    /// Body of the flex's first vertex.
    pub first_body: usize,
    /// Index of the flex's first edge in the edge-length arrays.
    pub edge_adr: usize,
    /// Number of flex edges.
    pub edge_count: usize,
}

/// A configured plugin instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginInstanceSpec {
    /// Registered plugin name, e.g. `tessel.elasticity.solid`.
    pub plugin: String,
    /// String attributes.
    pub config: PluginConfig,
}

/// Static model of a host simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostModel {
    /// Timestep in seconds.
    pub timestep: Scalar,
    /// Bodies; index 0 is always the world.
    pub bodies: Vec<BodyInfo>,
    /// Flex primitives.
    pub flexes: Vec<FlexInfo>,
    /// Rest length of every flex edge.
    pub flexedge_length0: Vec<Scalar>,
    /// Plugin instances, identified by position.
    pub instances: Vec<PluginInstanceSpec>,
}

impl Default for HostModel {
    fn default() -> Self {
        Self::new(DEFAULT_DT)
    }
}

impl HostModel {
    /// Empty model containing only the world body.
    pub fn new(timestep: Scalar) -> Self {
        Self {
            timestep,
            bodies: vec![BodyInfo::world()],
            flexes: Vec::new(),
            flexedge_length0: Vec::new(),
            instances: Vec::new(),
        }
    }

    /// Total number of dofs.
    pub fn dof_count(&self) -> usize {
        self.bodies
            .iter()
            .filter_map(|b| b.dof_adr.map(|adr| adr + 3))
            .max()
            .unwrap_or(0)
    }

    /// Register a plugin instance and return its id.
    pub fn add_instance(&mut self, plugin: impl Into<String>, config: PluginConfig) -> InstanceId {
        let id = InstanceId(self.instances.len() as u32);
        self.instances.push(PluginInstanceSpec {
            plugin: plugin.into(),
            config,
        });
        id
    }

    /// Append one 3-dof point body per mesh vertex, owned by `owner`.
    pub fn add_point_bodies(&mut self, mesh: &TetMesh, owner: Option<InstanceId>) -> BodyRange {
        let start = self.bodies.len();
        let mut dof = self.dof_count();
        for i in 0..mesh.vertex_count() {
            self.bodies.push(BodyInfo {
                plugin: owner,
                rest_position: mesh.position(i),
                dof_adr: Some(dof),
            });
            dof += 3;
        }
        BodyRange::new(start, mesh.vertex_count())
    }

    /// Append a flex over consecutive bodies starting at `first_body`, with
    /// one rest length per edge. Returns the flex index.
    pub fn add_flex(&mut self, first_body: usize, rest_lengths: &[Scalar]) -> usize {
        self.flexes.push(FlexInfo {
            first_body,
            edge_adr: self.flexedge_length0.len(),
            edge_count: rest_lengths.len(),
        });
        self.flexedge_length0.extend_from_slice(rest_lengths);
        self.flexes.len() - 1
    }

    /// Flex whose first vertex is `body`, if any.
    pub fn flex_starting_at(&self, body: usize) -> Option<&FlexInfo> {
        self.flexes.iter().find(|f| f.first_body == body)
    }

    /// Rest position of a body as a vector.
    pub fn body_position(&self, body: usize) -> DVec3 {
        DVec3::from_array(self.bodies[body].rest_position)
    }
}

/// Mutable per-step host state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostData {
    /// World positions, 3 scalars per body.
    pub xpos: Vec<Scalar>,
    /// Passive generalized forces, one scalar per dof.
    pub qfrc_passive: Vec<Scalar>,
    /// Current flex edge lengths.
    pub flexedge_length: Vec<Scalar>,
}

impl HostData {
    /// State at the model's rest configuration.
    pub fn new(model: &HostModel) -> Self {
        Self {
            xpos: model.bodies.iter().flat_map(|b| b.rest_position).collect(),
            qfrc_passive: vec![0.0; model.dof_count()],
            flexedge_length: model.flexedge_length0.clone(),
        }
    }

    /// Zero the passive force accumulator before plugins run.
    pub fn clear_passive(&mut self) {
        self.qfrc_passive.fill(0.0);
    }

    /// Current position of a body.
    pub fn body_position(&self, body: usize) -> DVec3 {
        DVec3::new(self.xpos[3 * body], self.xpos[3 * body + 1], self.xpos[3 * body + 2])
    }

    pub fn set_body_position(&mut self, body: usize, p: DVec3) {
        self.xpos[3 * body..3 * body + 3].copy_from_slice(&p.to_array());
    }
}
