//! Harness error taxonomy.

use std::path::PathBuf;

/// Errors produced by the benchmark harness.
///
/// Everything below the sweep level is converted into a "skip this cell"
/// decision by the controller; only [`HarnessError::InsufficientData`] ends
/// a run, because there is no report worth producing from an empty dataset.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A required input file is absent; no process was spawned.
    #[error("missing input file: {0}")]
    MissingInput(PathBuf),

    /// The external process ran but exited non-zero.
    #[error("external process failed with {status}: {stderr}")]
    Execution {
        /// Exit status description (code or signal).
        status: String,
        /// Captured diagnostic text from the error stream.
        stderr: String,
    },

    /// The external process exceeded the bounded wait and was killed.
    #[error("external process timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The assembler has no comparable rows; reporting is skipped.
    #[error("no comparable benchmark rows; nothing to report")]
    InsufficientData,

    /// A report artifact could not be persisted.
    #[error("failed to persist report: {0}")]
    Rendering(String),

    /// Underlying I/O failure (spawn, stream capture, artifact write).
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
