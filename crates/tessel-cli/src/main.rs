//! Tessel CLI — benchmarking, mesh inspection, and validation.

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(name = "tessel")]
#[command(version, about = "Tessel — edge-based tetrahedral elasticity for host simulations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Benchmark output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Run benchmark suite.
    Benchmark {
        /// Which scenario to run (single_poke, cantilever, coupled_block, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Material preset to use instead of the scenario's own.
        #[arg(short, long)]
        material: Option<String>,

        /// Override the number of timesteps.
        #[arg(short, long)]
        timesteps: Option<u32>,

        /// Output file path. Printed to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
        format: OutputFormat,

        /// Forward simulation events to `tracing`.
        #[arg(long)]
        events: bool,
    },

    /// Print topology and metric statistics of a mesh.
    Inspect {
        /// Path to mesh file (JSON).
        path: String,

        /// Material preset used to assemble the metrics.
        #[arg(short, long, default_value = "gelatin")]
        material: String,
    },

    /// Validate a mesh (.json) or material (.toml).
    Validate {
        /// Path to mesh or material file.
        path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Benchmark {
            scenario,
            material,
            timesteps,
            output,
            format,
            events,
        } => commands::benchmark(&commands::BenchmarkArgs {
            scenario,
            material,
            timesteps,
            output,
            format,
            events,
        }),
        Commands::Inspect { path, material } => commands::inspect(&path, &material),
        Commands::Validate { path } => commands::validate(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
