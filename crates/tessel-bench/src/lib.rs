//! # tessel-bench
//!
//! Benchmark suite for the Tessel elasticity plugin.
//!
//! Provides 3 procedural benchmark scenarios, a reference host that steps
//! them, metric collection, and CSV/JSON export for regression tracking.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::{BenchmarkRunner, ReferenceHost, StepStats};
pub use scenarios::{Scenario, ScenarioKind};
