//! Sweep control: one run per (workload, configuration) cell.

use std::path::{Path, PathBuf};

use crate::error::HarnessError;
use crate::invocation::InvocationBuilder;
use crate::runner::{ExecutionResult, ProcessRunner};
use crate::workload::WorkloadDescriptor;

/// Accumulated measurements for one workload.
///
/// Failed results are kept for diagnostics; the accessors expose only the
/// successful ones, which is all downstream aggregation may see.
#[derive(Debug, Clone)]
pub struct BenchmarkRow {
    /// The workload this row measures.
    pub workload: WorkloadDescriptor,
    /// Serial baseline, when the sweep ran one.
    pub serial: Option<ExecutionResult>,
    /// Distributed measurements in ascending process-count order.
    pub parallel: Vec<(u32, ExecutionResult)>,
}

impl BenchmarkRow {
    /// The serial result, only if it succeeded.
    #[must_use]
    pub fn serial_success(&self) -> Option<&ExecutionResult> {
        self.serial.as_ref().filter(|r| r.success)
    }

    /// Successful distributed measurements, in measured order.
    pub fn parallel_successes(&self) -> impl Iterator<Item = (u32, &ExecutionResult)> {
        self.parallel
            .iter()
            .filter(|(_, r)| r.success)
            .map(|(np, r)| (*np, r))
    }

    /// Whether the row can take part in a serial-vs-parallel comparison.
    #[must_use]
    pub fn is_comparable(&self) -> bool {
        self.serial_success().is_some() && self.parallel_successes().next().is_some()
    }
}

/// Outcome of a full sweep, with cell bookkeeping for the summary line.
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// One row per workload, in sequencer order.
    pub rows: Vec<BenchmarkRow>,
    /// Cells enumerated (including skipped ones).
    pub attempted: usize,
    /// Cells whose process ran and exited zero.
    pub succeeded: usize,
}

/// Enumerates the workload x configuration cross-product and runs each cell
/// exactly once, strictly one at a time.
///
/// Per-cell failures (missing inputs, spawn errors, non-zero exits,
/// timeouts) are converted into skips; a sweep always runs to completion.
#[derive(Debug)]
pub struct SweepController {
    builder: InvocationBuilder,
    runner: ProcessRunner,
    process_counts: Vec<u32>,
    include_serial: bool,
    output_dir: PathBuf,
}

impl SweepController {
    /// Create a controller over the given configurations. Process counts
    /// are run in ascending order regardless of the order supplied;
    /// duplicates collapse to one cell so no two runs share an artifact.
    #[must_use]
    pub fn new(
        builder: InvocationBuilder,
        runner: ProcessRunner,
        mut process_counts: Vec<u32>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        process_counts.sort_unstable();
        process_counts.dedup();
        Self {
            builder,
            runner,
            process_counts,
            include_serial: true,
            output_dir: output_dir.into(),
        }
    }

    /// Toggle the serial baseline run (on by default). Scaling-only sweeps
    /// turn it off.
    #[must_use]
    pub fn with_serial_baseline(mut self, include: bool) -> Self {
        self.include_serial = include;
        self
    }

    /// Cells a full sweep over `workloads` will enumerate.
    #[must_use]
    pub fn cell_count(&self, workloads: usize) -> usize {
        workloads * (usize::from(self.include_serial) + self.process_counts.len())
    }

    /// Run the full sweep. `progress` is invoked once per cell with a short
    /// label, after that cell has been resolved.
    pub fn run<F>(&self, workloads: &[WorkloadDescriptor], mut progress: F) -> SweepOutcome
    where
        F: FnMut(&str),
    {
        let mut rows = Vec::with_capacity(workloads.len());
        let mut attempted = 0;
        let mut succeeded = 0;

        for workload in workloads {
            let stem = workload.stem();
            tracing::info!(workload = %workload.path.display(), "sweeping workload");

            let serial = if self.include_serial {
                attempted += 1;
                let output = self.output_dir.join(format!("output_serial_{stem}.txt"));
                let result = self.run_cell(workload, None, &output);
                if result.as_ref().is_some_and(|r| r.success) {
                    succeeded += 1;
                }
                progress(&format!("{stem} serial"));
                result
            } else {
                None
            };

            let mut parallel = Vec::with_capacity(self.process_counts.len());
            for &np in &self.process_counts {
                attempted += 1;
                let output = self
                    .output_dir
                    .join(format!("output_parallel_{stem}_{np}.txt"));
                if let Some(result) = self.run_cell(workload, Some(np), &output) {
                    if result.success {
                        succeeded += 1;
                    }
                    parallel.push((np, result));
                }
                progress(&format!("{stem} np={np}"));
            }

            rows.push(BenchmarkRow {
                workload: workload.clone(),
                serial,
                parallel,
            });
        }

        SweepOutcome {
            rows,
            attempted,
            succeeded,
        }
    }

    /// Resolve one cell: build, run, and classify. Returns `None` when the
    /// cell was skipped before or during the spawn.
    fn run_cell(
        &self,
        workload: &WorkloadDescriptor,
        processes: Option<u32>,
        output: &Path,
    ) -> Option<ExecutionResult> {
        let request = match processes {
            None => self.builder.serial(&workload.path, output),
            Some(np) => self.builder.distributed(&workload.path, np, output),
        };
        let request = match request {
            Ok(req) => req,
            Err(HarnessError::MissingInput(path)) => {
                tracing::warn!(path = %path.display(), "skipping cell: missing input");
                return None;
            }
            Err(err) => {
                tracing::warn!(%err, "skipping cell: invocation failed");
                return None;
            }
        };

        match self.runner.run(&request) {
            Ok(result) => Some(result),
            Err(err) => {
                tracing::warn!(command = %request.command_line(), %err, "skipping cell: run failed");
                None
            }
        }
    }
}
