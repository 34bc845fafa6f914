//! Passive-force plugin trait and the tetrahedral solid plugin.
//!
//! The host calls plugins in a fixed order:
//!
//! ```text
//! let mut p = P::init(&model, instance)?;   // once
//! loop {
//!     p.compute(&model, &mut data)?;        // every step, after qfrc_passive is cleared
//! }
//! p.destroy();                              // once
//! ```

use tessel_elasticity::{Coupling, EdgeCacheHandle, HostEdgeCache, Solid, StepInput, StepReport};
use tessel_math::DVec3;
use tessel_types::{InstanceId, TesselError, TesselResult};

use crate::config::SolidOptions;
use crate::contract::{HostData, HostModel};
use crate::handles::{BodyRange, DofRange};

/// A plugin that adds passive forces to the host each step.
pub trait PassivePlugin: Send {
    /// Create the state of one plugin instance.
    ///
    /// Recoverable errors (see [`TesselError::is_recoverable`]) make the
    /// host skip the instance; any other error aborts initialization.
    fn init(model: &HostModel, instance: InstanceId) -> TesselResult<Self>
    where
        Self: Sized;

    /// Accumulate this instance's forces into `data.qfrc_passive`.
    fn compute(&mut self, model: &HostModel, data: &mut HostData) -> TesselResult<StepReport>;

    /// Release instance state. Called once before the instance is dropped.
    fn destroy(&mut self) {}
}

/// Registered name of [`SolidPlugin`].
pub const SOLID_PLUGIN_NAME: &str = "tessel.elasticity.solid";

/// Tetrahedral elasticity on a contiguous run of point bodies.
#[derive(Debug, Clone)]
pub struct SolidPlugin {
    instance: InstanceId,
    bodies: BodyRange,
    dofs: DofRange,
    solid: Solid,
}

impl SolidPlugin {
    pub fn instance(&self) -> InstanceId {
        self.instance
    }

    pub fn bodies(&self) -> BodyRange {
        self.bodies
    }

    pub fn dofs(&self) -> DofRange {
        self.dofs
    }

    pub fn solid(&self) -> &Solid {
        &self.solid
    }

    /// Every element vertex must map to a body owned by this instance.
    /// Vertex `v` is body `base + v`.
    fn check_ownership(
        model: &HostModel,
        instance: InstanceId,
        base: usize,
        face: &[u32],
    ) -> TesselResult<()> {
        for (i, &vertex) in face.iter().enumerate() {
            let owner = model.bodies.get(base + vertex as usize).and_then(|b| b.plugin);
            if owner != Some(instance) {
                return Err(TesselError::OwnershipViolation {
                    element: (i / 4) as u32,
                    vertex,
                });
            }
        }
        Ok(())
    }
}

impl PassivePlugin for SolidPlugin {
    fn init(model: &HostModel, instance: InstanceId) -> TesselResult<Self> {
        let spec = model.instances.get(instance.index()).ok_or_else(|| {
            TesselError::InvariantViolation(format!("Unknown plugin instance {instance}"))
        })?;
        let options = SolidOptions::from_config(&spec.config)?;

        // Ownership is checked before layout so a foreign vertex is always fatal.
        let base = BodyRange::base_of(model, instance)?;
        Self::check_ownership(model, instance, base, &options.face)?;
        let bodies = BodyRange::owned_by(model, instance)?;
        let dofs = DofRange::for_bodies(model, &bodies)?;

        let coupling = match model.flex_starting_at(bodies.start()) {
            Some(flex) => Coupling::HostCoupled(EdgeCacheHandle::new(flex.edge_adr, flex.edge_count)),
            None => Coupling::FreeBody,
        };

        let rest: Vec<DVec3> = (0..bodies.len())
            .map(|v| model.body_position(bodies.start() + v))
            .collect();
        let solid = Solid::new(&options.params(), &rest, coupling)?;

        tracing::debug!(
            %instance,
            base = bodies.start(),
            vertices = bodies.len(),
            elements = solid.topology().element_count(),
            mode = solid.lengths().mode_name(),
            "solid plugin initialized"
        );

        Ok(Self {
            instance,
            bodies,
            dofs,
            solid,
        })
    }

    fn compute(&mut self, model: &HostModel, data: &mut HostData) -> TesselResult<StepReport> {
        let positions = self.bodies.window(&data.xpos)?;
        let forces = self.dofs.window_mut(&mut data.qfrc_passive)?;
        let input = StepInput {
            positions,
            timestep: model.timestep,
            edge_cache: Some(HostEdgeCache {
                current: &data.flexedge_length,
                rest: &model.flexedge_length0,
            }),
        };
        self.solid.compute(&input, forces)
    }

    fn destroy(&mut self) {
        tracing::debug!(instance = %self.instance, "solid plugin destroyed");
    }
}
