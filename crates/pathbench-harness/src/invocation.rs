//! Invocation construction for the external SSSP executables.

use std::path::{Path, PathBuf};

use crate::error::HarnessError;

/// Launcher arguments preceding the distributed executable, in order.
const LAUNCHER_TOPOLOGY_ARGS: [&str; 3] = ["--use-hwthread-cpus", "--bind-to", "core:overload-allowed"];

/// Optional feature flags forwarded to the distributed executable.
///
/// Flags are emitted in a stable order: `--openmp`, `--opencl`,
/// `--async=<level>`, each only when enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Enable the executable's OpenMP path.
    pub openmp: bool,
    /// Enable the executable's OpenCL path.
    pub opencl: bool,
    /// Asynchronous pipelining depth; must be positive when set.
    pub async_level: Option<u32>,
}

impl FeatureFlags {
    fn tokens(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.openmp {
            out.push("--openmp".to_string());
        }
        if self.opencl {
            out.push("--opencl".to_string());
        }
        if let Some(level) = self.async_level {
            out.push(format!("--async={level}"));
        }
        out
    }
}

/// A fully built command description for one external run.
///
/// Immutable once built; the runner consumes it by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    program: PathBuf,
    args: Vec<String>,
    processes: u32,
}

impl ExecutionRequest {
    /// Program to spawn (the serial binary, or the distributed launcher).
    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Arguments in spawn order.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Requested process count (1 for the serial executable).
    #[must_use]
    pub fn processes(&self) -> u32 {
        self.processes
    }

    /// Full command line for diagnostics.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut s = self.program.display().to_string();
        for a in &self.args {
            s.push(' ');
            s.push_str(a);
        }
        s
    }
}

/// Builds [`ExecutionRequest`]s for the serial and distributed executables.
///
/// Construction is pure: the only side effect is the precondition check that
/// the graph and workload files exist, performed before any spawn.
#[derive(Debug, Clone)]
pub struct InvocationBuilder {
    graph: PathBuf,
    source_vertex: u64,
    serial_bin: PathBuf,
    parallel_bin: PathBuf,
    launcher: PathBuf,
    flags: FeatureFlags,
}

impl InvocationBuilder {
    /// Create a builder for the given input graph and source vertex.
    #[must_use]
    pub fn new(graph: impl Into<PathBuf>, source_vertex: u64) -> Self {
        Self {
            graph: graph.into(),
            source_vertex,
            serial_bin: PathBuf::from("./serial_sssp"),
            parallel_bin: PathBuf::from("./sssp"),
            launcher: PathBuf::from("mpirun"),
            flags: FeatureFlags::default(),
        }
    }

    /// Override the serial executable path.
    #[must_use]
    pub fn with_serial_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.serial_bin = path.into();
        self
    }

    /// Override the distributed executable path.
    #[must_use]
    pub fn with_parallel_bin(mut self, path: impl Into<PathBuf>) -> Self {
        self.parallel_bin = path.into();
        self
    }

    /// Override the distributed launcher (defaults to `mpirun`).
    #[must_use]
    pub fn with_launcher(mut self, path: impl Into<PathBuf>) -> Self {
        self.launcher = path.into();
        self
    }

    /// Set the feature flags appended to distributed invocations.
    #[must_use]
    pub fn with_flags(mut self, flags: FeatureFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Build a serial invocation: positional arguments only, no topology or
    /// feature flags.
    pub fn serial(
        &self,
        workload: &Path,
        output: &Path,
    ) -> Result<ExecutionRequest, HarnessError> {
        self.check_inputs(workload)?;
        Ok(ExecutionRequest {
            program: self.serial_bin.clone(),
            args: self.positional(workload, output),
            processes: 1,
        })
    }

    /// Build a distributed invocation: launcher topology arguments, then the
    /// executable with positionals, then feature flags.
    pub fn distributed(
        &self,
        workload: &Path,
        processes: u32,
        output: &Path,
    ) -> Result<ExecutionRequest, HarnessError> {
        self.check_inputs(workload)?;
        let mut args: Vec<String> = LAUNCHER_TOPOLOGY_ARGS
            .iter()
            .map(ToString::to_string)
            .collect();
        args.push("-np".to_string());
        args.push(processes.to_string());
        args.push(self.parallel_bin.display().to_string());
        args.extend(self.positional(workload, output));
        args.extend(self.flags.tokens());
        Ok(ExecutionRequest {
            program: self.launcher.clone(),
            args,
            processes,
        })
    }

    fn positional(&self, workload: &Path, output: &Path) -> Vec<String> {
        vec![
            self.graph.display().to_string(),
            workload.display().to_string(),
            self.source_vertex.to_string(),
            output.display().to_string(),
        ]
    }

    fn check_inputs(&self, workload: &Path) -> Result<(), HarnessError> {
        if !self.graph.exists() {
            return Err(HarnessError::MissingInput(self.graph.clone()));
        }
        if !workload.exists() {
            return Err(HarnessError::MissingInput(workload.to_path_buf()));
        }
        Ok(())
    }
}
