//! Workload descriptors and deterministic sequencing.

use std::path::{Path, PathBuf};

/// One update workload file, with its ordering key and size estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadDescriptor {
    /// Path to the workload file.
    pub path: PathBuf,
    /// Numeric suffix of the file stem; `None` is the sentinel that sorts
    /// after every numeric key.
    pub order_key: Option<u64>,
    /// Non-empty, non-comment line count. Approximate by construction.
    pub item_count: usize,
}

impl WorkloadDescriptor {
    /// Describe a workload file, reading it to estimate the item count.
    /// An unreadable file counts as 0 items; the existence precondition in
    /// the invocation builder rejects it before any run.
    #[must_use]
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let order_key = numeric_suffix(&path);
        let item_count = count_items(&path);
        Self {
            path,
            order_key,
            item_count,
        }
    }

    /// File stem used in output artifact names.
    #[must_use]
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map_or_else(String::new, |s| s.to_string_lossy().into_owned())
    }
}

/// Order workloads ascending by numeric suffix, suffix-less paths last,
/// ties broken by discovery order. The sort is stable and total, so the
/// resulting order doubles as the x-axis order downstream.
#[must_use]
pub fn sequence<I, P>(paths: I) -> Vec<WorkloadDescriptor>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut workloads: Vec<WorkloadDescriptor> =
        paths.into_iter().map(WorkloadDescriptor::from_path).collect();
    workloads.sort_by_key(|w| (w.order_key.is_none(), w.order_key));
    workloads
}

/// Extract the trailing decimal digits of the file stem, e.g.
/// `update12.txt` -> 12. Overlong suffixes that overflow `u64` are treated
/// as unordered.
fn numeric_suffix(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let digits_start = stem
        .rfind(|c: char| !c.is_ascii_digit())
        .map_or(0, |i| i + 1);
    let digits = &stem[digits_start..];
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

fn count_items(path: &Path) -> usize {
    match std::fs::read_to_string(path) {
        Ok(content) => content
            .lines()
            .filter(|line| {
                let trimmed = line.trim();
                !trimmed.is_empty() && !trimmed.starts_with('#')
            })
            .count(),
        Err(_) => 0,
    }
}
