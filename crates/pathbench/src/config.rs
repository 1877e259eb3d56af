//! Application configuration from CLI flags and environment.

use std::path::PathBuf;

use clap::Parser;

/// PathBench — benchmark harness for external SSSP executables.
#[derive(Parser, Debug)]
#[command(name = "pathbench", version)]
#[allow(clippy::struct_excessive_bools)]
pub struct AppConfig {
    /// Input graph file.
    #[arg(short, long, default_value = "sample_graph.txt", env = "PATHBENCH_GRAPH")]
    pub graph: PathBuf,

    /// Update workload file; repeat for each workload.
    #[arg(short = 'u', long = "update")]
    pub updates: Vec<PathBuf>,

    /// Source vertex for the shortest-path computation.
    #[arg(long, default_value = "10000")]
    pub source_vertex: u64,

    /// Process counts to sweep, comma separated.
    #[arg(long, value_delimiter = ',', default_values_t = [1, 2, 4, 6, 8])]
    pub procs: Vec<u32>,

    /// Serial executable.
    #[arg(long, default_value = "./serial_sssp")]
    pub serial_bin: PathBuf,

    /// Distributed executable.
    #[arg(long, default_value = "./sssp")]
    pub parallel_bin: PathBuf,

    /// Distributed launcher.
    #[arg(long, default_value = "mpirun", env = "PATHBENCH_LAUNCHER")]
    pub launcher: PathBuf,

    /// Enable the executable's OpenMP path.
    #[arg(long)]
    pub openmp: bool,

    /// Enable the executable's OpenCL path.
    #[arg(long)]
    pub opencl: bool,

    /// Asynchronous pipelining depth passed as --async=<level>.
    #[arg(long)]
    pub async_level: Option<u32>,

    /// Per-run deadline (e.g., "30s", "5m", "1h").
    #[arg(long, default_value = "5m")]
    pub timeout: String,

    /// Directory for per-run output artifacts.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Directory for report datasets.
    #[arg(long, default_value = ".")]
    pub report_dir: PathBuf,

    /// Sweep process counts only, without a serial baseline.
    #[arg(long)]
    pub scaling: bool,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode (summary line only).
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate shell completion.
    #[arg(long, value_enum)]
    pub completion: Option<clap_complete::Shell>,
}

impl AppConfig {
    /// Parse CLI arguments.
    #[must_use]
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse the timeout string into a Duration.
    #[must_use]
    pub fn timeout_duration(&self) -> std::time::Duration {
        parse_duration(&self.timeout).unwrap_or(std::time::Duration::from_secs(300))
    }
}

/// Parse a duration string like "5m", "1h", "30s".
fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    if let Some(mins) = s.strip_suffix('m') {
        let n: u64 = mins.parse().ok()?;
        Some(std::time::Duration::from_secs(n * 60))
    } else if let Some(hours) = s.strip_suffix('h') {
        let n: u64 = hours.parse().ok()?;
        Some(std::time::Duration::from_secs(n * 3600))
    } else if let Some(ms) = s.strip_suffix("ms") {
        let n: u64 = ms.parse().ok()?;
        Some(std::time::Duration::from_millis(n))
    } else if let Some(secs) = s.strip_suffix('s') {
        let n: u64 = secs.parse().ok()?;
        Some(std::time::Duration::from_secs(n))
    } else {
        let n: u64 = s.parse().ok()?;
        Some(std::time::Duration::from_secs(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_formats() {
        assert_eq!(
            parse_duration("5m"),
            Some(std::time::Duration::from_secs(300))
        );
        assert_eq!(
            parse_duration("1h"),
            Some(std::time::Duration::from_secs(3600))
        );
        assert_eq!(
            parse_duration("30s"),
            Some(std::time::Duration::from_secs(30))
        );
        assert_eq!(
            parse_duration("250ms"),
            Some(std::time::Duration::from_millis(250))
        );
    }

    #[test]
    fn bad_timeout_falls_back_to_default() {
        let config = AppConfig::try_parse_from(["pathbench", "--timeout", "soon"]).unwrap();
        assert_eq!(
            config.timeout_duration(),
            std::time::Duration::from_secs(300)
        );
    }

    #[test]
    fn procs_parse_from_comma_list() {
        let config = AppConfig::try_parse_from(["pathbench", "--procs", "2,3,4"]).unwrap();
        assert_eq!(config.procs, vec![2, 3, 4]);
    }

    #[test]
    fn default_procs_sweep() {
        let config = AppConfig::try_parse_from(["pathbench"]).unwrap();
        assert_eq!(config.procs, vec![1, 2, 4, 6, 8]);
        assert_eq!(config.source_vertex, 10_000);
        assert!(!config.scaling);
    }

    #[test]
    fn repeated_updates_accumulate() {
        let config = AppConfig::try_parse_from([
            "pathbench",
            "-u",
            "update1.txt",
            "-u",
            "update2.txt",
        ])
        .unwrap();
        assert_eq!(config.updates.len(), 2);
    }
}
