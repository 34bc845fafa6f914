//! Tetrahedral solid model instance.
//!
//! A [`Solid`] owns everything derived from the rest pose (topology and
//! per-element metrics) plus the mutable edge-length state. Construction
//! performs all validation; [`Solid::compute`] only checks buffer sizes.
//!
//! # Per-step flow
//!
//! ```text
//! gather positions → measure edges → elongation per element
//!     → contract with metric → per-vertex reduction → forces -= f
//! ```

use tessel_material::IsotropicMaterial;
use tessel_math::DVec3;
use tessel_mesh::stencil::NUM_EDGES;
use tessel_mesh::{TetMesh, TetTopology};
use tessel_types::{Scalar, TesselError, TesselResult};

use crate::force::{element_energy_gradient, squared_length_gradients, StepReport};
use crate::lengths::{EdgeCacheHandle, EdgeLengths, FreeBodyLengths, HostEdgeCache};
use crate::metric::{ElementMetric, MetricAssembler};

/// Construction parameters of a solid instance.
#[derive(Debug, Clone, PartialEq)]
pub struct SolidParams {
    /// Elastic constants and Rayleigh damping coefficient.
    pub material: IsotropicMaterial,
    /// Flattened tetrahedron vertex ids, 4 per element, instance-relative.
    pub simplex: Vec<u32>,
    /// Optional precomputed edge ids, 6 per element, checked against the
    /// recomputed topology.
    pub edge_check: Option<Vec<u32>>,
}

impl SolidParams {
    pub fn new(material: IsotropicMaterial, simplex: Vec<u32>) -> Self {
        Self {
            material,
            simplex,
            edge_check: None,
        }
    }

    pub fn with_edge_check(mut self, edges: Vec<u32>) -> Self {
        self.edge_check = Some(edges);
        self
    }
}

/// Where a new instance reads its current edge lengths from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coupling {
    /// Measure edges from vertex positions.
    FreeBody,
    /// Read edges from the host's flex edge cache.
    HostCoupled(EdgeCacheHandle),
}

/// Per-step inputs.
#[derive(Debug, Clone, Copy)]
pub struct StepInput<'a> {
    /// Instance-relative vertex positions, 3 scalars per vertex.
    pub positions: &'a [Scalar],
    /// Host timestep.
    pub timestep: Scalar,
    /// Host edge lengths. Required in host-coupled mode, ignored otherwise.
    pub edge_cache: Option<HostEdgeCache<'a>>,
}

/// Elastic tetrahedral solid with optional Rayleigh damping.
#[derive(Debug, Clone)]
pub struct Solid {
    topology: TetTopology,
    metrics: Vec<ElementMetric>,
    lengths: EdgeLengths,
    damping: Scalar,
    vertex_count: usize,

    // ─── Scratch ───
    positions: Vec<DVec3>,
    nodal: Vec<DVec3>,
    /// Per-edge elongation including the damping term.
    damped: Vec<Scalar>,
    /// Per-edge elongation without damping, for the energy report.
    strain: Vec<Scalar>,
}

impl Solid {
    /// Build a solid from its parameters and instance-relative rest positions.
    ///
    /// Every element vertex must index into `rest_positions`; anything else is
    /// an [`TesselError::OwnershipViolation`].
    pub fn new(
        params: &SolidParams,
        rest_positions: &[DVec3],
        coupling: Coupling,
    ) -> TesselResult<Self> {
        params.material.validate()?;

        let topology = TetTopology::build(&params.simplex, params.edge_check.as_deref())?;
        let metrics = MetricAssembler::new(params.material).assemble_all(&topology, rest_positions)?;

        let lengths = match coupling {
            Coupling::FreeBody => {
                EdgeLengths::FreeBody(FreeBodyLengths::at_rest(&topology.edges, rest_positions))
            }
            Coupling::HostCoupled(handle) => {
                if handle.len() != topology.edge_count() {
                    return Err(TesselError::InvalidConfig(format!(
                        "Host edge cache covers {} edges, mesh has {}",
                        handle.len(),
                        topology.edge_count()
                    )));
                }
                EdgeLengths::HostCoupled(handle)
            }
        };

        let vertex_count = rest_positions.len();
        let edge_count = topology.edge_count();

        tracing::debug!(
            elements = topology.element_count(),
            edges = topology.edge_count(),
            vertices = vertex_count,
            mode = lengths.mode_name(),
            "solid instance created"
        );

        Ok(Self {
            topology,
            metrics,
            lengths,
            damping: params.material.damping,
            vertex_count,
            positions: vec![DVec3::ZERO; vertex_count],
            nodal: vec![DVec3::ZERO; vertex_count],
            damped: vec![0.0; edge_count],
            strain: vec![0.0; edge_count],
        })
    }

    /// Free-body solid straight from a mesh in its rest pose.
    pub fn from_mesh(mesh: &TetMesh, material: IsotropicMaterial) -> TesselResult<Self> {
        mesh.validate()?;
        let params = SolidParams::new(material, mesh.indices.clone());
        Self::new(&params, &mesh.positions(), Coupling::FreeBody)
    }

    pub fn topology(&self) -> &TetTopology {
        &self.topology
    }

    pub fn metrics(&self) -> &[ElementMetric] {
        &self.metrics
    }

    pub fn lengths(&self) -> &EdgeLengths {
        &self.lengths
    }

    pub fn damping(&self) -> Scalar {
        self.damping
    }

    /// Number of vertices owned by the instance.
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Evaluate elastic and damping forces and subtract them from `forces`.
    ///
    /// `forces` holds 3 scalars per owned vertex and is accumulated into,
    /// never overwritten. In free-body mode the current lengths become the
    /// previous lengths once all elements are processed.
    pub fn compute(
        &mut self,
        input: &StepInput<'_>,
        forces: &mut [Scalar],
    ) -> TesselResult<StepReport> {
        let needed = 3 * self.vertex_count;
        if input.positions.len() < needed {
            return Err(TesselError::InvariantViolation(format!(
                "Position buffer has {} scalars, instance needs {}",
                input.positions.len(),
                needed
            )));
        }
        if forces.len() < needed {
            return Err(TesselError::InvariantViolation(format!(
                "Force buffer has {} scalars, instance needs {}",
                forces.len(),
                needed
            )));
        }

        for (p, xyz) in self.positions.iter_mut().zip(input.positions.chunks_exact(3)) {
            *p = DVec3::new(xyz[0], xyz[1], xyz[2]);
        }

        self.update_elongations(input)?;

        self.nodal.fill(DVec3::ZERO);
        let mut elastic_energy = 0.0;

        for (t, element) in self.topology.elements.iter().enumerate() {
            let metric = &self.metrics[t];
            let x = element.vertices.map(|v| self.positions[v as usize]);
            let gradients = squared_length_gradients(&x);

            let pick = |values: &[Scalar]| -> [Scalar; NUM_EDGES] {
                element.edges.map(|e| values[e as usize])
            };
            let elongation = pick(&self.damped);
            let strain = pick(&self.strain);

            elastic_energy += 0.5 * metric.quadratic_form(&strain);

            let nodal = element_energy_gradient(metric, &elongation, &gradients);
            for (v, f) in element.vertices.iter().zip(nodal) {
                self.nodal[*v as usize] += f;
            }
        }

        let mut max_nodal_force: Scalar = 0.0;
        for (v, f) in self.nodal.iter().enumerate() {
            forces[3 * v] -= f.x;
            forces[3 * v + 1] -= f.y;
            forces[3 * v + 2] -= f.z;
            max_nodal_force = max_nodal_force.max(f.length());
        }

        if let EdgeLengths::FreeBody(lengths) = &mut self.lengths {
            lengths.advance();
        }

        tracing::trace!(elastic_energy, max_nodal_force, "solid step");

        Ok(StepReport {
            elastic_energy,
            max_nodal_force,
        })
    }

    /// Fill the per-edge elongation buffers, with and without damping.
    fn update_elongations(&mut self, input: &StepInput<'_>) -> TesselResult<()> {
        match &mut self.lengths {
            EdgeLengths::FreeBody(lengths) => {
                lengths.measure(&self.topology.edges, &self.positions);

                let rate = if self.damping > 0.0 {
                    if input.timestep <= 0.0 {
                        return Err(TesselError::InvariantViolation(format!(
                            "Damping requires a positive timestep, got {}",
                            input.timestep
                        )));
                    }
                    self.damping / input.timestep
                } else {
                    0.0
                };

                let scratch = self.damped.iter_mut().zip(&mut self.strain);
                for (e, (damped, strain)) in scratch.enumerate() {
                    let deformed = lengths.deformed[e];
                    *strain = deformed - lengths.reference()[e];
                    *damped = *strain + rate * (deformed - lengths.previous[e]);
                }
            }
            EdgeLengths::HostCoupled(handle) => {
                let cache = input.edge_cache.ok_or_else(|| {
                    TesselError::InvariantViolation(
                        "Host-coupled instance stepped without an edge cache".into(),
                    )
                })?;
                let current = handle.window(cache.current)?;
                let rest = handle.window(cache.rest)?;
                for (e, (c, r)) in current.iter().zip(rest).enumerate() {
                    self.strain[e] = c * c - r * r;
                }
                self.damped.copy_from_slice(&self.strain);
            }
        }
        Ok(())
    }
}
