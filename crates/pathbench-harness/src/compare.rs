//! Assembly of comparable datasets from accumulated benchmark rows.

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::sweep::BenchmarkRow;

/// One measured distributed point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingPoint {
    /// Process count of this run.
    pub processes: u32,
    /// Chosen duration in milliseconds.
    pub duration_ms: u128,
}

/// One comparable row: a workload with its serial baseline and the
/// designated representative parallel measurement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    /// Workload file stem.
    pub workload: String,
    /// Approximate update item count, the x-axis value.
    pub item_count: usize,
    /// Serial duration in milliseconds.
    pub serial_ms: u128,
    /// Representative parallel duration in milliseconds.
    pub parallel_ms: u128,
    /// Process count of the representative parallel run.
    pub parallel_processes: u32,
    /// Every successful parallel measurement, for scaling analysis.
    pub scaling: Vec<ScalingPoint>,
}

/// Final comparison dataset, ordered ascending by item count.
///
/// Owns plain numbers only; the `ExecutionResult`s it was derived from can
/// be dropped. Built once per harness run and handed to the report emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonDataset {
    /// Rows in presentation order.
    pub points: Vec<ComparisonPoint>,
}

impl ComparisonDataset {
    /// Parallel arrays (item count, serial ms, parallel ms) for rendering.
    #[must_use]
    pub fn triples(&self) -> (Vec<usize>, Vec<u128>, Vec<u128>) {
        let counts = self.points.iter().map(|p| p.item_count).collect();
        let serial = self.points.iter().map(|p| p.serial_ms).collect();
        let parallel = self.points.iter().map(|p| p.parallel_ms).collect();
        (counts, serial, parallel)
    }
}

/// Scaling dataset for a baseline-less sweep: one workload across process
/// counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingDataset {
    /// Workload file stem.
    pub workload: String,
    /// Successful measurements in ascending process-count order.
    pub points: Vec<ScalingPoint>,
}

/// Joins serial baselines and parallel measurements into ordered datasets,
/// filtering out incomplete rows.
pub struct ComparisonAssembler;

impl ComparisonAssembler {
    /// Build the serial-vs-parallel dataset.
    ///
    /// Rows without a successful serial result or without any successful
    /// parallel result are dropped. The representative parallel point is
    /// the first successful measurement in process-count order; the rest
    /// stay available in `scaling`. Rows are re-sorted ascending by item
    /// count, which is independent of the discovery order.
    pub fn assemble(rows: &[BenchmarkRow]) -> Result<ComparisonDataset, HarnessError> {
        let mut points: Vec<ComparisonPoint> = rows
            .iter()
            .filter_map(|row| {
                let serial = row.serial_success()?;
                let (processes, representative) = row.parallel_successes().next()?;
                let scaling = row
                    .parallel_successes()
                    .map(|(np, r)| ScalingPoint {
                        processes: np,
                        duration_ms: r.duration().as_millis(),
                    })
                    .collect();
                Some(ComparisonPoint {
                    workload: row.workload.stem(),
                    item_count: row.workload.item_count,
                    serial_ms: serial.duration().as_millis(),
                    parallel_ms: representative.duration().as_millis(),
                    parallel_processes: processes,
                    scaling,
                })
            })
            .collect();

        if points.is_empty() {
            return Err(HarnessError::InsufficientData);
        }

        points.sort_by_key(|p| p.item_count);
        Ok(ComparisonDataset { points })
    }

    /// Build the scaling dataset for a baseline-less sweep over one
    /// workload.
    pub fn scaling(rows: &[BenchmarkRow]) -> Result<ScalingDataset, HarnessError> {
        let row = rows
            .iter()
            .find(|r| r.parallel_successes().next().is_some())
            .ok_or(HarnessError::InsufficientData)?;
        Ok(ScalingDataset {
            workload: row.workload.stem(),
            points: row
                .parallel_successes()
                .map(|(np, r)| ScalingPoint {
                    processes: np,
                    duration_ms: r.duration().as_millis(),
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::ExecutionResult;
    use crate::workload::WorkloadDescriptor;
    use std::path::PathBuf;
    use std::time::Duration;

    fn result(success: bool, ms: u64) -> ExecutionResult {
        ExecutionResult {
            success,
            timed_out: false,
            exit_code: Some(i32::from(!success)),
            stdout: String::new(),
            stderr: String::new(),
            wall_clock: Duration::from_millis(ms),
            reported: None,
        }
    }

    fn row(stem: &str, items: usize, serial_ms: Option<u64>, parallel: &[(u32, u64)]) -> BenchmarkRow {
        BenchmarkRow {
            workload: WorkloadDescriptor {
                path: PathBuf::from(format!("{stem}.txt")),
                order_key: None,
                item_count: items,
            },
            serial: serial_ms.map(|ms| result(true, ms)),
            parallel: parallel
                .iter()
                .map(|&(np, ms)| (np, result(true, ms)))
                .collect(),
        }
    }

    #[test]
    fn sorts_by_item_count_not_discovery_order() {
        let rows = vec![
            row("update1", 50, Some(500), &[(4, 200)]),
            row("update2", 10, Some(100), &[(4, 50)]),
        ];
        let dataset = ComparisonAssembler::assemble(&rows).unwrap();
        let (counts, serial, parallel) = dataset.triples();
        assert_eq!(counts, vec![10, 50]);
        assert_eq!(serial, vec![100, 500]);
        assert_eq!(parallel, vec![50, 200]);
        assert_eq!(dataset.points[0].workload, "update2");
    }

    #[test]
    fn representative_is_first_parallel_point() {
        let rows = vec![row("update1", 5, Some(400), &[(2, 300), (4, 150), (8, 90)])];
        let dataset = ComparisonAssembler::assemble(&rows).unwrap();
        let p = &dataset.points[0];
        assert_eq!(p.parallel_processes, 2);
        assert_eq!(p.parallel_ms, 300);
        assert_eq!(p.scaling.len(), 3);
        assert_eq!(p.scaling[2].duration_ms, 90);
    }

    #[test]
    fn incomplete_rows_are_dropped() {
        let mut no_serial = row("update1", 5, None, &[(4, 100)]);
        no_serial.serial = Some(result(false, 100));
        let no_parallel = row("update2", 6, Some(100), &[]);
        let mut failed_parallel = row("update3", 7, Some(100), &[]);
        failed_parallel.parallel = vec![(4, result(false, 10))];
        let good = row("update4", 8, Some(100), &[(4, 50)]);

        let rows = vec![no_serial, no_parallel, failed_parallel, good];
        let dataset = ComparisonAssembler::assemble(&rows).unwrap();
        assert_eq!(dataset.points.len(), 1);
        assert_eq!(dataset.points[0].workload, "update4");
    }

    #[test]
    fn empty_filtered_set_is_insufficient_data() {
        let rows = vec![row("update1", 5, None, &[(4, 100)])];
        assert!(matches!(
            ComparisonAssembler::assemble(&rows),
            Err(HarnessError::InsufficientData)
        ));
        assert!(matches!(
            ComparisonAssembler::assemble(&[]),
            Err(HarnessError::InsufficientData)
        ));
    }

    #[test]
    fn scaling_accepts_baseline_less_rows() {
        let rows = vec![row("update1", 5, None, &[(2, 300), (4, 150)])];
        assert!(matches!(
            ComparisonAssembler::assemble(&rows),
            Err(HarnessError::InsufficientData)
        ));
        let scaling = ComparisonAssembler::scaling(&rows).unwrap();
        assert_eq!(scaling.workload, "update1");
        assert_eq!(scaling.points.len(), 2);
    }

    #[test]
    fn dataset_serializes_in_order() {
        let rows = vec![
            row("update1", 50, Some(500), &[(4, 200)]),
            row("update2", 10, Some(100), &[(4, 50)]),
        ];
        let dataset = ComparisonAssembler::assemble(&rows).unwrap();
        let json = serde_json::to_string_pretty(&dataset).unwrap();
        let back: ComparisonDataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dataset);
        assert!(json.find("update2").unwrap() < json.find("update1").unwrap());
    }
}
