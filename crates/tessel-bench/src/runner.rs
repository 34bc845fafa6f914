//! Benchmark runner — a reference host that steps scenarios and collects metrics.
//!
//! The host integrates point-body vertices with semi-implicit Euler and a
//! lumped mass matrix. Passive forces come exclusively from plugin
//! instances created through the [`PluginRegistry`].

use std::time::Instant;

use tessel_host::validator::{validate_data, validate_model};
use tessel_host::{
    BodyRange, DofRange, HostData, HostModel, InstanceTable, PluginRegistry, SolidOptions,
    SOLID_PLUGIN_NAME,
};
use tessel_math::DVec3;
use tessel_mesh::TetTopology;
use tessel_telemetry::{EventBus, EventKind};
use tessel_types::TesselResult;

use crate::metrics::BenchmarkMetrics;
use crate::scenarios::Scenario;

/// Result of one host step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepStats {
    /// Elastic energy summed over instances, at the start of the step.
    pub elastic_energy: f64,
    /// Largest per-vertex passive force of any instance.
    pub max_nodal_force: f64,
    /// Kinetic energy after the position update.
    pub kinetic_energy: f64,
    /// Wall-clock time of the step (seconds).
    pub wall_time: f64,
}

/// Minimal host simulation driving one soft body.
pub struct ReferenceHost {
    model: HostModel,
    data: HostData,
    instances: InstanceTable,
    topology: TetTopology,
    bodies: BodyRange,
    dofs: DofRange,
    coupled: bool,
    inv_mass: Vec<f64>,
    mass: Vec<f64>,
    velocity: Vec<DVec3>,
    gravity: DVec3,
    step_index: u32,
}

impl ReferenceHost {
    /// Build the host model for a scenario and instantiate its plugins.
    ///
    /// Skipped instances are reported on `bus` when one is given.
    pub fn new(scenario: &Scenario, bus: Option<&EventBus>) -> TesselResult<Self> {
        let mesh = &scenario.mesh;
        mesh.validate()?;
        let topology = TetTopology::from_mesh(mesh)?;

        let mut model = HostModel::new(scenario.dt);
        let config = SolidOptions::for_mesh(&mesh.indices, &scenario.material)
            .with_edges(topology.edge_index_sequence())
            .to_config();
        let instance = model.add_instance(SOLID_PLUGIN_NAME, config);
        let bodies = model.add_point_bodies(mesh, Some(instance));
        let dofs = DofRange::for_bodies(&model, &bodies)?;

        if scenario.coupled {
            let rest = mesh.positions();
            let lengths: Vec<f64> = topology
                .edges
                .iter()
                .map(|&[a, b]| rest[a as usize].distance(rest[b as usize]))
                .collect();
            model.add_flex(bodies.start(), &lengths);
        }

        validate_model(&model)?;

        let instances = PluginRegistry::with_defaults().instantiate(&model)?;
        if let Some(bus) = bus {
            for (id, reason) in instances.skipped() {
                bus.emit_at(
                    0,
                    EventKind::InstanceSkipped {
                        instance: *id,
                        reason: reason.clone(),
                    },
                );
            }
        }

        // Lumped mass: each tetrahedron gives a quarter of its mass to each corner.
        let positions = mesh.positions();
        let mut mass = vec![0.0; mesh.vertex_count()];
        for element in &topology.elements {
            let x = element.vertices.map(|v| positions[v as usize]);
            let volume = tessel_elasticity::invariants::tetrahedron_volume(&x).abs();
            for v in element.vertices {
                mass[v as usize] += 0.25 * scenario.material.density * volume;
            }
        }
        let inv_mass = mass
            .iter()
            .zip(&scenario.pinned)
            .map(|(&m, &pinned)| if pinned || m <= 0.0 { 0.0 } else { 1.0 / m })
            .collect();

        let mut data = HostData::new(&model);
        for &(v, offset) in &scenario.initial_offsets {
            let body = bodies.body(v);
            let p = data.body_position(body) + offset;
            data.set_body_position(body, p);
        }
        validate_data(&model, &data)?;

        tracing::debug!(
            scenario = scenario.kind.name(),
            vertices = mesh.vertex_count(),
            tets = mesh.tet_count(),
            coupled = scenario.coupled,
            "reference host ready"
        );

        Ok(Self {
            model,
            data,
            instances,
            topology,
            bodies,
            dofs,
            coupled: scenario.coupled,
            inv_mass,
            mass,
            velocity: vec![DVec3::ZERO; mesh.vertex_count()],
            gravity: scenario.gravity,
            step_index: 0,
        })
    }

    pub fn model(&self) -> &HostModel {
        &self.model
    }

    pub fn data(&self) -> &HostData {
        &self.data
    }

    pub fn instances(&self) -> &InstanceTable {
        &self.instances
    }

    /// Current position of instance vertex `v`.
    pub fn vertex_position(&self, v: u32) -> DVec3 {
        self.data.body_position(self.bodies.body(v))
    }

    /// Kinetic energy of all vertices.
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0;
        for ((v, m), inv_mass) in self.velocity.iter().zip(&self.mass).zip(&self.inv_mass) {
            if *inv_mass > 0.0 {
                energy += 0.5 * m * v.length_squared();
            }
        }
        energy
    }

    /// Recompute the flex edge cache from current positions.
    fn update_flex_lengths(&mut self) {
        let Some(flex) = self.model.flex_starting_at(self.bodies.start()).copied() else {
            return;
        };
        for (e, &[a, b]) in self.topology.edges.iter().enumerate() {
            let pa = self.data.body_position(self.bodies.body(a));
            let pb = self.data.body_position(self.bodies.body(b));
            self.data.flexedge_length[flex.edge_adr + e] = pa.distance(pb);
        }
    }

    /// Advance one timestep.
    pub fn step(&mut self, bus: Option<&EventBus>) -> TesselResult<StepStats> {
        let t = self.step_index;
        let dt = self.model.timestep;
        if let Some(bus) = bus {
            bus.emit_at(t, EventKind::TimestepBegin { sim_time: t as f64 * dt });
        }
        let start = Instant::now();

        if self.coupled {
            self.update_flex_lengths();
        }
        self.data.clear_passive();
        let reports = self.instances.compute(&self.model, &mut self.data)?;

        for (v, velocity) in self.velocity.iter_mut().enumerate() {
            let inv_mass = self.inv_mass[v];
            if inv_mass == 0.0 {
                continue;
            }
            let dof = self.dofs.start() + 3 * v;
            let force = DVec3::new(
                self.data.qfrc_passive[dof],
                self.data.qfrc_passive[dof + 1],
                self.data.qfrc_passive[dof + 2],
            );
            *velocity += (force * inv_mass + self.gravity) * dt;

            let body = self.bodies.body(v as u32);
            let p = self.data.body_position(body) + *velocity * dt;
            self.data.set_body_position(body, p);
        }

        let stats = StepStats {
            elastic_energy: reports.iter().map(|(_, r)| r.elastic_energy).sum(),
            max_nodal_force: reports
                .iter()
                .map(|(_, r)| r.max_nodal_force)
                .fold(0.0, f64::max),
            kinetic_energy: self.kinetic_energy(),
            wall_time: start.elapsed().as_secs_f64(),
        };

        if let Some(bus) = bus {
            for (instance, report) in &reports {
                bus.emit_at(
                    t,
                    EventKind::PassiveForce {
                        instance: *instance,
                        elastic_energy: report.elastic_energy,
                        max_nodal_force: report.max_nodal_force,
                    },
                );
            }
            bus.emit_at(
                t,
                EventKind::Energy {
                    kinetic: stats.kinetic_energy,
                    elastic: stats.elastic_energy,
                },
            );
            bus.emit_at(t, EventKind::TimestepEnd { wall_time: stats.wall_time });
        }

        self.step_index += 1;
        Ok(stats)
    }

    /// Largest distance of any vertex from its rest position.
    pub fn max_displacement(&self) -> f64 {
        (0..self.bodies.len())
            .map(|v| {
                let body = self.bodies.start() + v;
                self.data
                    .body_position(body)
                    .distance(self.model.body_position(body))
            })
            .fold(0.0, f64::max)
    }
}

/// Runs benchmark scenarios and collects metrics.
pub struct BenchmarkRunner;

impl BenchmarkRunner {
    /// Run a single scenario. Events go to `bus` when one is given and are
    /// flushed after every step.
    pub fn run(scenario: &Scenario, mut bus: Option<&mut EventBus>) -> TesselResult<BenchmarkMetrics> {
        let mut host = ReferenceHost::new(scenario, bus.as_deref())?;

        let mut step_times: Vec<f64> = Vec::with_capacity(scenario.timesteps as usize);
        let mut last = StepStats::default();
        let mut peak_elastic: f64 = 0.0;
        let mut peak_force: f64 = 0.0;

        let total_start = Instant::now();

        for _ in 0..scenario.timesteps {
            last = host.step(bus.as_deref())?;
            step_times.push(last.wall_time);
            peak_elastic = peak_elastic.max(last.elastic_energy);
            peak_force = peak_force.max(last.max_nodal_force);
            if let Some(bus) = bus.as_deref_mut() {
                bus.flush();
            }
        }

        let total_wall_time = total_start.elapsed().as_secs_f64();

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().copied().fold(f64::MAX, f64::min)
        };
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        Ok(BenchmarkMetrics {
            scenario: scenario.kind.name().to_string(),
            vertex_count: scenario.mesh.vertex_count(),
            tet_count: scenario.mesh.tet_count(),
            edge_count: host.topology.edge_count(),
            timesteps: scenario.timesteps,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: min_step,
            max_step_time: max_step,
            final_kinetic_energy: host.kinetic_energy(),
            final_elastic_energy: last.elastic_energy,
            peak_elastic_energy: peak_elastic,
            peak_nodal_force: peak_force,
            max_displacement: host.max_displacement(),
        })
    }

    /// Run all scenarios and return metrics for each.
    pub fn run_all(mut bus: Option<&mut EventBus>) -> TesselResult<Vec<BenchmarkMetrics>> {
        use crate::scenarios::ScenarioKind;
        let mut results = Vec::new();
        for &kind in ScenarioKind::all() {
            let scenario = Scenario::from_kind(kind);
            results.push(Self::run(&scenario, bus.as_deref_mut())?);
        }
        Ok(results)
    }
}
