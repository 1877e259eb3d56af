//! Report emission boundary.
//!
//! Plotting is not this crate's business; emitters persist the dataset in a
//! render-ready form and callers decide what draws it. Each emit call is
//! self-contained: no rendering state survives between calls.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use crate::compare::{ComparisonDataset, ScalingDataset};
use crate::error::HarnessError;

/// File name of the persisted comparison dataset.
pub const COMPARISON_REPORT: &str = "sssp_comparison.json";
/// File name of the persisted scaling dataset.
pub const SCALING_REPORT: &str = "sssp_scaling.json";

/// Boundary to whatever renders the final datasets.
pub trait ReportEmitter {
    /// Persist or display the serial-vs-parallel dataset.
    fn emit_comparison(&self, dataset: &ComparisonDataset) -> Result<(), HarnessError>;

    /// Persist or display the scaling dataset.
    fn emit_scaling(&self, dataset: &ScalingDataset) -> Result<(), HarnessError>;
}

/// Emits datasets as pretty-printed JSON files in a fixed directory.
#[derive(Debug, Clone)]
pub struct JsonReportEmitter {
    dir: PathBuf,
}

impl JsonReportEmitter {
    /// Emit into `dir` (created on demand).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the comparison dataset is written to.
    #[must_use]
    pub fn comparison_path(&self) -> PathBuf {
        self.dir.join(COMPARISON_REPORT)
    }

    /// Path the scaling dataset is written to.
    #[must_use]
    pub fn scaling_path(&self) -> PathBuf {
        self.dir.join(SCALING_REPORT)
    }

    fn write<T: serde::Serialize>(&self, value: &T, path: &Path) -> Result<(), HarnessError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| HarnessError::Rendering(format!("{}: {e}", self.dir.display())))?;
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| HarnessError::Rendering(e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| HarnessError::Rendering(format!("{}: {e}", path.display())))?;
        tracing::info!(path = %path.display(), "report written");
        Ok(())
    }
}

impl ReportEmitter for JsonReportEmitter {
    fn emit_comparison(&self, dataset: &ComparisonDataset) -> Result<(), HarnessError> {
        self.write(dataset, &self.comparison_path())
    }

    fn emit_scaling(&self, dataset: &ScalingDataset) -> Result<(), HarnessError> {
        self.write(dataset, &self.scaling_path())
    }
}

/// Plain-text table of the comparison dataset, the best-effort display used
/// when persisting fails.
#[must_use]
pub fn comparison_table(dataset: &ComparisonDataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:>10} {:>12} {:>14}", "workload", "updates", "serial (ms)", "parallel (ms)");
    for p in &dataset.points {
        let _ = writeln!(
            out,
            "{:<20} {:>10} {:>12} {:>14}",
            p.workload, p.item_count, p.serial_ms, p.parallel_ms
        );
    }
    out
}

/// Plain-text table of the scaling dataset.
#[must_use]
pub fn scaling_table(dataset: &ScalingDataset) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "workload: {}", dataset.workload);
    let _ = writeln!(out, "{:>10} {:>14}", "processes", "duration (ms)");
    for p in &dataset.points {
        let _ = writeln!(out, "{:>10} {:>14}", p.processes, p.duration_ms);
    }
    out
}
