//! Integration tests for tessel-host.

use tessel_material::IsotropicMaterial;
use tessel_math::DVec3;
use tessel_mesh::generators::{box_lattice, corner_tetrahedron};
use tessel_mesh::{TetMesh, TetTopology};
use tessel_host::validator::{validate_data, validate_model};
use tessel_host::{
    BodyRange, DofRange, HostData, HostModel, PluginConfig, PluginRegistry, SolidOptions,
    SOLID_PLUGIN_NAME,
};
use tessel_types::{InstanceId, TesselError};

fn material() -> IsotropicMaterial {
    IsotropicMaterial::new(1000.0, 0.3)
}

/// Model with one solid instance covering `mesh`.
fn solid_model(mesh: &TetMesh, material: &IsotropicMaterial) -> (HostModel, InstanceId) {
    let mut model = HostModel::new(0.01);
    let config = SolidOptions::for_mesh(&mesh.indices, material).to_config();
    let id = model.add_instance(SOLID_PLUGIN_NAME, config);
    model.add_point_bodies(mesh, Some(id));
    (model, id)
}

fn solid_config() -> PluginConfig {
    PluginConfig::new()
        .with("face", "0 1 2 3")
        .with("young", "1000")
        .with("poisson", "0.3")
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn options_parse_required_fields() {
    let options = SolidOptions::from_config(&solid_config()).unwrap();
    assert_eq!(options.face, vec![0, 1, 2, 3]);
    assert_eq!(options.edge, None);
    assert_eq!(options.young, 1000.0);
    assert_eq!(options.poisson, 0.3);
    assert_eq!(options.damping, 0.0);
}

#[test]
fn options_accept_extra_whitespace() {
    let config = solid_config().with("face", "  0\t1\n2   3 ").with("damping", " 0.25 ");
    let options = SolidOptions::from_config(&config).unwrap();
    assert_eq!(options.face, vec![0, 1, 2, 3]);
    assert_eq!(options.damping, 0.25);
}

#[test]
fn options_missing_required() {
    for key in ["face", "young", "poisson"] {
        let mut config = PluginConfig::new();
        for (k, v) in [("face", "0 1 2 3"), ("young", "1000"), ("poisson", "0.3")] {
            if k != key {
                config.set(k, v);
            }
        }
        match SolidOptions::from_config(&config) {
            Err(TesselError::MissingOption(name)) => assert_eq!(name, key),
            other => panic!("expected missing '{key}', got {other:?}"),
        }
    }
}

#[test]
fn options_reject_garbage() {
    let config = solid_config().with("face", "0 1 two 3");
    assert!(matches!(
        SolidOptions::from_config(&config),
        Err(TesselError::InvalidConfig(_))
    ));

    let config = solid_config().with("face", "0 1 -2 3");
    assert!(SolidOptions::from_config(&config).is_err());

    let config = solid_config().with("young", "stiff");
    assert!(matches!(
        SolidOptions::from_config(&config),
        Err(TesselError::InvalidConfig(_))
    ));
}

#[test]
fn options_reject_partial_tetrahedron() {
    let config = solid_config().with("face", "0 1 2 3 4");
    assert!(matches!(
        SolidOptions::from_config(&config),
        Err(TesselError::InvalidConfig(_))
    ));
}

#[test]
fn options_validate_material() {
    let config = solid_config().with("poisson", "0.5");
    assert!(matches!(
        SolidOptions::from_config(&config),
        Err(TesselError::InvalidMaterial(_))
    ));

    let config = solid_config().with("damping", "-1");
    assert!(matches!(
        SolidOptions::from_config(&config),
        Err(TesselError::InvalidMaterial(_))
    ));
}

#[test]
fn options_empty_edge_is_ignored() {
    let options = SolidOptions::from_config(&solid_config().with("edge", "")).unwrap();
    assert_eq!(options.edge, None);

    let options = SolidOptions::from_config(&solid_config().with("edge", "0 1 2 3 4 5")).unwrap();
    assert_eq!(options.edge, Some(vec![0, 1, 2, 3, 4, 5]));
}

#[test]
fn options_config_roundtrip() {
    let options = SolidOptions::for_mesh(&[0, 1, 2, 3], &material().with_damping(0.1))
        .with_edges(vec![0, 1, 2, 3, 4, 5]);
    let parsed = SolidOptions::from_config(&options.to_config()).unwrap();
    assert_eq!(parsed, options);
}

// ─── Handle Tests ─────────────────────────────────────────────

#[test]
fn body_range_of_instance() {
    let mut model = HostModel::new(0.01);
    let first = model.add_instance(SOLID_PLUGIN_NAME, solid_config());
    let second = model.add_instance(SOLID_PLUGIN_NAME, solid_config());
    model.add_point_bodies(&corner_tetrahedron(), Some(first));
    model.add_point_bodies(&corner_tetrahedron(), Some(second));

    let range = BodyRange::owned_by(&model, second).unwrap();
    assert_eq!(range.start(), 5);
    assert_eq!(range.len(), 4);
    assert_eq!(range.body(2), 7);
    assert!(range.contains(8) && !range.contains(4));
}

#[test]
fn body_range_requires_contiguous_bodies() {
    let mut model = HostModel::new(0.01);
    let a = model.add_instance(SOLID_PLUGIN_NAME, solid_config());
    let b = model.add_instance(SOLID_PLUGIN_NAME, solid_config());
    model.add_point_bodies(&corner_tetrahedron(), Some(a));
    model.bodies[2].plugin = Some(b);

    assert!(BodyRange::owned_by(&model, a).is_err());
    assert!(BodyRange::owned_by(&model, InstanceId(7)).is_err());
}

#[test]
fn body_window_bounds() {
    let range = BodyRange::new(1, 2);
    let xpos: Vec<f64> = (0..9).map(f64::from).collect();
    assert_eq!(range.window(&xpos).unwrap(), &[3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    assert!(range.window(&xpos[..8]).is_err());
}

#[test]
fn dof_range_of_bodies() {
    let (model, id) = solid_model(&corner_tetrahedron(), &material());
    let bodies = BodyRange::owned_by(&model, id).unwrap();
    let dofs = DofRange::for_bodies(&model, &bodies).unwrap();
    assert_eq!(dofs.start(), 0);
    assert_eq!(dofs.len(), 12);

    let mut qfrc = vec![0.0; 12];
    assert_eq!(dofs.window_mut(&mut qfrc).unwrap().len(), 12);
    assert!(DofRange::new(6, 12).window_mut(&mut qfrc).is_err());
}

#[test]
fn dof_range_rejects_gaps() {
    let (mut model, id) = solid_model(&corner_tetrahedron(), &material());
    model.bodies[3].dof_adr = Some(100);
    let bodies = BodyRange::owned_by(&model, id).unwrap();
    assert!(DofRange::for_bodies(&model, &bodies).is_err());
}

// ─── Validator Tests ──────────────────────────────────────────

#[test]
fn valid_model_passes() {
    let (model, _) = solid_model(&box_lattice(2, 1, 1, DVec3::ONE, DVec3::ZERO), &material());
    assert!(validate_model(&model).is_ok());
    assert!(validate_data(&model, &HostData::new(&model)).is_ok());
}

#[test]
fn validator_rejects_bad_timestep() {
    let (mut model, _) = solid_model(&corner_tetrahedron(), &material());
    model.timestep = 0.0;
    assert!(validate_model(&model).is_err());
}

#[test]
fn validator_rejects_overlapping_dofs() {
    let (mut model, _) = solid_model(&corner_tetrahedron(), &material());
    model.bodies[2].dof_adr = Some(1);
    assert!(validate_model(&model).is_err());
}

#[test]
fn validator_rejects_flex_out_of_range() {
    let (mut model, _) = solid_model(&corner_tetrahedron(), &material());
    model.add_flex(1, &[1.0; 6]);
    model.flexes[0].edge_count = 7;
    assert!(validate_model(&model).is_err());
}

#[test]
fn validator_rejects_mismatched_data() {
    let (model, _) = solid_model(&corner_tetrahedron(), &material());
    let mut data = HostData::new(&model);
    data.qfrc_passive.pop();
    assert!(validate_data(&model, &data).is_err());
}

#[test]
fn model_json_roundtrip() {
    let (model, _) = solid_model(&corner_tetrahedron(), &material());
    let json = serde_json::to_string(&model).unwrap();
    let recovered: HostModel = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, model);
}

// ─── Registry Tests ───────────────────────────────────────────

#[test]
fn registry_knows_solid_plugin() {
    let registry = PluginRegistry::with_defaults();
    let descriptor = registry.get(SOLID_PLUGIN_NAME).unwrap();
    assert_eq!(descriptor.attributes, SolidOptions::ATTRIBUTES);
    assert_eq!(registry.names().collect::<Vec<_>>(), vec![SOLID_PLUGIN_NAME]);
}

#[test]
fn registry_rejects_duplicate_names() {
    let mut registry = PluginRegistry::with_defaults();
    let descriptor = *registry.get(SOLID_PLUGIN_NAME).unwrap();
    assert!(registry.register(descriptor).is_err());
}

#[test]
fn free_body_instance_at_rest() {
    let mesh = box_lattice(2, 1, 1, DVec3::ONE, DVec3::ZERO);
    let (model, id) = solid_model(&mesh, &material());
    let mut table = PluginRegistry::with_defaults().instantiate(&model).unwrap();
    assert!(table.contains(id));
    assert!(table.skipped().is_empty());

    let mut data = HostData::new(&model);
    let reports = table.compute(&model, &mut data).unwrap();
    assert_eq!(reports.len(), 1);
    assert!(data.qfrc_passive.iter().all(|&f| f == 0.0));
}

#[test]
fn forces_stay_inside_instance_dofs() {
    let mut model = HostModel::new(0.01);
    let mesh = corner_tetrahedron();
    let spectator = model.add_instance(
        SOLID_PLUGIN_NAME,
        SolidOptions::for_mesh(&mesh.indices, &material()).to_config(),
    );
    let active = model.add_instance(
        SOLID_PLUGIN_NAME,
        SolidOptions::for_mesh(&mesh.indices, &material()).to_config(),
    );
    model.add_point_bodies(&mesh, Some(spectator));
    let bodies = model.add_point_bodies(&mesh, Some(active));

    let mut table = PluginRegistry::with_defaults().instantiate(&model).unwrap();
    assert_eq!(table.len(), 2);

    let mut data = HostData::new(&model);
    let moved = data.body_position(bodies.body(1)) + DVec3::new(0.2, 0.0, 0.0);
    data.set_body_position(bodies.body(1), moved);

    let reports = table.compute(&model, &mut data).unwrap();
    assert_eq!(reports[0].1.max_nodal_force, 0.0);
    assert!(reports[1].1.max_nodal_force > 0.0);
    assert!(data.qfrc_passive[..12].iter().all(|&f| f == 0.0));
    // Stretched along +x: pulled back along -x.
    assert!(data.qfrc_passive[12 + 3] < 0.0);
}

#[test]
fn recoverable_errors_skip_instance() {
    let mut model = HostModel::new(0.01);
    let mesh = corner_tetrahedron();
    let missing = model.add_instance(
        SOLID_PLUGIN_NAME,
        PluginConfig::new().with("face", "0 1 2 3").with("young", "1000"),
    );
    let unknown = model.add_instance("tessel.elasticity.shell", solid_config());
    let extra = model.add_instance(SOLID_PLUGIN_NAME, solid_config().with("thickness", "1"));
    let good = model.add_instance(SOLID_PLUGIN_NAME, solid_config());
    for id in [missing, unknown, extra, good] {
        model.add_point_bodies(&mesh, Some(id));
    }

    let mut table = PluginRegistry::with_defaults().instantiate(&model).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.contains(good));
    let skipped: Vec<InstanceId> = table.skipped().iter().map(|(id, _)| *id).collect();
    assert_eq!(skipped, vec![missing, unknown, extra]);

    // Skipped instances never write forces.
    let mut data = HostData::new(&model);
    for body in 1..model.bodies.len() {
        let p = data.body_position(body) * 1.1;
        data.set_body_position(body, p);
    }
    table.compute(&model, &mut data).unwrap();
    assert!(data.qfrc_passive[..36].iter().all(|&f| f == 0.0));
    assert!(data.qfrc_passive[36..].iter().any(|&f| f != 0.0));
}

#[test]
fn degenerate_mesh_is_skipped() {
    let mut mesh = corner_tetrahedron();
    mesh.set_position(3, DVec3::new(0.5, 0.5, 0.0));
    let (model, id) = solid_model(&mesh, &material());

    let table = PluginRegistry::with_defaults().instantiate(&model).unwrap();
    assert!(table.is_empty());
    assert_eq!(table.skipped()[0].0, id);
}

#[test]
fn foreign_vertex_is_fatal() {
    let mut model = HostModel::new(0.01);
    let mesh = corner_tetrahedron();
    let greedy = model.add_instance(SOLID_PLUGIN_NAME, solid_config().with("face", "0 1 2 4"));
    let other = model.add_instance(SOLID_PLUGIN_NAME, solid_config());
    model.add_point_bodies(&mesh, Some(greedy));
    model.add_point_bodies(&mesh, Some(other));

    match PluginRegistry::with_defaults().instantiate(&model) {
        Err(TesselError::OwnershipViolation { element, vertex }) => {
            assert_eq!(element, 0);
            assert_eq!(vertex, 4);
        }
        other => panic!("expected ownership violation, got {other:?}"),
    }
}

#[test]
fn interleaved_owner_vertex_is_fatal() {
    let mut model = HostModel::new(0.01);
    let mesh = corner_tetrahedron();
    let a = model.add_instance(SOLID_PLUGIN_NAME, solid_config());
    let b = model.add_instance(SOLID_PLUGIN_NAME, solid_config());
    model.add_point_bodies(&mesh, Some(a));
    model.add_point_bodies(&mesh, Some(b));
    // Owners of bodies 1..=8: a b a a a b b b.
    model.bodies[2].plugin = Some(b);
    model.bodies[5].plugin = Some(a);

    assert_eq!(BodyRange::base_of(&model, a).unwrap(), 1);
    match PluginRegistry::with_defaults().instantiate(&model) {
        Err(TesselError::OwnershipViolation { element, vertex }) => {
            assert_eq!(element, 0);
            assert_eq!(vertex, 1);
        }
        other => panic!("expected ownership violation, got {other:?}"),
    }
}

#[test]
fn flex_switches_to_host_coupled() {
    let mesh = box_lattice(1, 1, 1, DVec3::ONE, DVec3::ZERO);
    let topo = TetTopology::from_mesh(&mesh).unwrap();
    let rest = mesh.positions();
    let rest_lengths: Vec<f64> = topo
        .edges
        .iter()
        .map(|&[a, b]| rest[a as usize].distance(rest[b as usize]))
        .collect();

    let (mut coupled, _) = solid_model(&mesh, &material().with_damping(0.3));
    coupled.add_flex(1, &rest_lengths);
    let (free, _) = solid_model(&mesh, &material());

    let registry = PluginRegistry::with_defaults();
    let mut coupled_table = registry.instantiate(&coupled).unwrap();
    let mut free_table = registry.instantiate(&free).unwrap();

    let mut coupled_data = HostData::new(&coupled);
    let mut free_data = HostData::new(&free);
    let moved = DVec3::new(1.1, 1.0, 0.95);
    coupled_data.set_body_position(8, moved);
    free_data.set_body_position(8, moved);

    // The host keeps the flex cache current.
    let mut current = rest.clone();
    current[7] = moved;
    for (length, &[a, b]) in coupled_data.flexedge_length.iter_mut().zip(&topo.edges) {
        *length = current[a as usize].distance(current[b as usize]);
    }

    coupled_table.compute(&coupled, &mut coupled_data).unwrap();
    free_table.compute(&free, &mut free_data).unwrap();

    // No damping in host-coupled mode: matches the undamped free body.
    for (a, b) in coupled_data.qfrc_passive.iter().zip(&free_data.qfrc_passive) {
        assert!((a - b).abs() < 1e-9 * (1.0 + b.abs()), "{a} vs {b}");
    }
}

#[test]
fn flex_with_wrong_edge_count_is_skipped() {
    let mesh = corner_tetrahedron();
    let (mut model, _) = solid_model(&mesh, &material());
    model.add_flex(1, &[1.0; 5]);
    let table = PluginRegistry::with_defaults().instantiate(&model).unwrap();
    assert!(table.is_empty());
}

#[test]
fn instances_are_destroyed() {
    let (model, id) = solid_model(&corner_tetrahedron(), &material());
    let mut table = PluginRegistry::with_defaults().instantiate(&model).unwrap();
    assert!(table.remove(id));
    assert!(!table.remove(id));
    assert!(table.is_empty());
}
