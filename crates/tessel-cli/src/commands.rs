//! CLI command implementations.

use tessel_bench::metrics::BenchmarkMetrics;
use tessel_bench::runner::BenchmarkRunner;
use tessel_bench::scenarios::{Scenario, ScenarioKind};
use tessel_elasticity::invariants::tetrahedron_volume;
use tessel_elasticity::{EdgeLengths, Solid};
use tessel_material::{IsotropicMaterial, MaterialDatabase};
use tessel_mesh::TetMesh;
use tessel_telemetry::{EventBus, TracingSink};

use crate::OutputFormat;

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Arguments of the `benchmark` command.
pub struct BenchmarkArgs {
    pub scenario: String,
    pub material: Option<String>,
    pub timesteps: Option<u32>,
    pub output: Option<String>,
    pub format: OutputFormat,
    pub events: bool,
}

fn preset(name: &str) -> Result<IsotropicMaterial, Box<dyn std::error::Error>> {
    let db = MaterialDatabase::with_defaults();
    let material = db.get(name).copied().ok_or_else(|| {
        format!(
            "Unknown material: '{name}'. Available: {}",
            db.names().join(", ")
        )
    })?;
    Ok(material)
}

fn load_mesh(path: &str) -> Result<TetMesh, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Run benchmark suite.
pub fn benchmark(args: &BenchmarkArgs) -> CliResult {
    println!("Tessel Benchmark Suite");
    println!("══════════════════════");
    println!();

    let material = match &args.material {
        Some(name) => {
            println!("Material: {name}");
            println!();
            Some(preset(name)?)
        }
        None => None,
    };

    let scenarios: Vec<ScenarioKind> = if args.scenario == "all" {
        ScenarioKind::all().to_vec()
    } else {
        match ScenarioKind::from_name(&args.scenario) {
            Some(kind) => vec![kind],
            None => {
                let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
                eprintln!("Unknown scenario: {}", args.scenario);
                eprintln!("Available: {}, all", available.join(", "));
                return Err("Unknown scenario".into());
            }
        }
    };

    let mut bus = EventBus::new();
    if args.events {
        bus.add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
    } else {
        bus.set_enabled(false);
    }

    let mut all_metrics = Vec::new();

    for &kind in &scenarios {
        let mut scenario = Scenario::from_kind(kind);
        if let Some(material) = material {
            scenario = scenario.with_material(material);
        }
        if let Some(timesteps) = args.timesteps {
            scenario.timesteps = timesteps;
        }

        println!(
            "Running: {} ({} verts, {} tets, {} steps{})",
            kind.name(),
            scenario.mesh.vertex_count(),
            scenario.mesh.tet_count(),
            scenario.timesteps,
            if scenario.coupled { ", host-coupled" } else { "" },
        );

        let metrics = BenchmarkRunner::run(&scenario, Some(&mut bus))
            .map_err(|e| format!("Benchmark failed: {e}"))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.3}ms", metrics.avg_step_time * 1000.0);
        println!("  Final KE:      {:.6e}", metrics.final_kinetic_energy);
        println!("  Peak elastic:  {:.6e}", metrics.peak_elastic_energy);
        println!("  Max displace:  {:.4}m", metrics.max_displacement);
        println!();

        all_metrics.push(metrics);
    }
    bus.finish();

    let rendered = match args.format {
        OutputFormat::Csv => BenchmarkMetrics::to_csv(&all_metrics),
        OutputFormat::Json => BenchmarkMetrics::to_json(&all_metrics)?,
    };

    if let Some(path) = &args.output {
        std::fs::write(path, &rendered)?;
        println!("Results written to: {path}");
    } else {
        println!("{rendered}");
    }

    Ok(())
}

/// Print topology and metric statistics.
pub fn inspect(path: &str, material_name: &str) -> CliResult {
    println!("Tessel Mesh Inspector");
    println!("─────────────────────");
    println!();

    let mesh = load_mesh(path)?;
    let material = preset(material_name)?;
    let solid = Solid::from_mesh(&mesh, material)?;
    let topology = solid.topology();

    println!("Vertices:     {}", mesh.vertex_count());
    println!("Tetrahedra:   {}", topology.element_count());
    println!("Edges:        {}", topology.edge_count());

    let positions = mesh.positions();
    let volumes: Vec<f64> = topology
        .elements
        .iter()
        .map(|e| tetrahedron_volume(&e.vertices.map(|v| positions[v as usize])).abs())
        .collect();
    let min_volume = volumes.iter().copied().fold(f64::INFINITY, f64::min);
    let max_volume = volumes.iter().copied().fold(0.0, f64::max);
    println!(
        "Volume:       [{min_volume:.4e}, {max_volume:.4e}] (total {:.4e})",
        volumes.iter().sum::<f64>()
    );

    if let EdgeLengths::FreeBody(lengths) = solid.lengths() {
        // Reference lengths are stored squared.
        let squared = lengths.reference();
        let min_len = squared.iter().copied().fold(f64::INFINITY, f64::min).sqrt();
        let max_len = squared.iter().copied().fold(0.0, f64::max).sqrt();
        println!("Edge length:  [{min_len:.4e}, {max_len:.4e}]");
    }

    let diagonal: Vec<f64> = solid
        .metrics()
        .iter()
        .flat_map(|m| (0..6).map(move |e| m.get(e, e)))
        .collect();
    let min_diag = diagonal.iter().copied().fold(f64::INFINITY, f64::min);
    let max_diag = diagonal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    println!();
    println!(
        "Material:     {material_name} (E = {:.3e}, ν = {})",
        material.young, material.poisson
    );
    println!("Metric diag:  [{min_diag:.4e}, {max_diag:.4e}]");
    println!(
        "Symmetric:    {}",
        if solid.metrics().iter().all(|m| m.is_symmetric()) { "yes" } else { "no" }
    );

    Ok(())
}

/// Validate a mesh or material file.
pub fn validate(path: &str) -> CliResult {
    println!("Tessel Validator");
    println!("────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating material: {path}");
        let content = std::fs::read_to_string(path)?;
        let material: IsotropicMaterial = toml::from_str(&content)?;
        match material.validate() {
            Ok(()) => println!(
                "✅ Material is valid (E = {:.3e}, ν = {}).",
                material.young, material.poisson
            ),
            Err(e) => println!("❌ Material validation failed: {e}"),
        }
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let mesh = load_mesh(path)?;
        // Degenerate elements only show up once the metric is assembled.
        match Solid::from_mesh(&mesh, IsotropicMaterial::new(1.0, 0.0)) {
            Ok(solid) => println!(
                "✅ Mesh is valid ({} verts, {} tets, {} edges).",
                mesh.vertex_count(),
                mesh.tet_count(),
                solid.topology().edge_count()
            ),
            Err(e) => println!("❌ Mesh validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (material) or .json (mesh).");
    }

    Ok(())
}
