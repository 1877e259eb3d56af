//! # pathbench-harness
//!
//! Measurement and aggregation pipeline for driving external shortest-path
//! executables across a sweep of configurations. The shortest-path algorithm
//! itself is an opaque subprocess; this crate builds invocations, runs them
//! synchronously, extracts trustworthy timings, and assembles comparable
//! datasets from runs that may partially fail.

pub mod compare;
pub mod error;
pub mod invocation;
pub mod report;
pub mod runner;
pub mod sweep;
pub mod timing;
pub mod workload;

pub use compare::{ComparisonAssembler, ComparisonDataset, ScalingDataset};
pub use error::HarnessError;
pub use invocation::{ExecutionRequest, InvocationBuilder};
pub use runner::{ExecutionResult, ProcessRunner};
pub use sweep::{BenchmarkRow, SweepController, SweepOutcome};
pub use workload::WorkloadDescriptor;
