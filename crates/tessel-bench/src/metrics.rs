//! Benchmark metrics — data collected during a benchmark run.

use serde::{Deserialize, Serialize};
use tessel_types::{TesselError, TesselResult};

/// Metrics collected from a benchmark scenario run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Vertex count.
    pub vertex_count: usize,
    /// Tetrahedron count.
    pub tet_count: usize,
    /// Unique edge count.
    pub edge_count: usize,
    /// Number of timesteps executed.
    pub timesteps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per timestep (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Kinetic energy after the last step.
    pub final_kinetic_energy: f64,
    /// Elastic energy at the last step.
    pub final_elastic_energy: f64,
    /// Largest elastic energy seen during the run.
    pub peak_elastic_energy: f64,
    /// Largest per-vertex passive force seen during the run.
    pub peak_nodal_force: f64,
    /// Maximum vertex displacement from the rest pose.
    pub max_displacement: f64,
}

impl BenchmarkMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,vertex_count,tet_count,edge_count,timesteps,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,final_ke,final_elastic,peak_elastic,peak_force,max_displacement".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.6e},{:.6e},{:.6e},{:.6e},{:.6}",
            self.scenario,
            self.vertex_count,
            self.tet_count,
            self.edge_count,
            self.timesteps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.final_kinetic_energy,
            self.final_elastic_energy,
            self.peak_elastic_energy,
            self.peak_nodal_force,
            self.max_displacement,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }

    /// Pretty-printed JSON array.
    pub fn to_json(metrics: &[BenchmarkMetrics]) -> TesselResult<String> {
        serde_json::to_string_pretty(metrics).map_err(|e| TesselError::Serialization(e.to_string()))
    }
}
