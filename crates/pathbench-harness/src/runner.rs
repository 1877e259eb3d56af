//! Synchronous execution of one external invocation.

use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use crate::error::HarnessError;
use crate::invocation::ExecutionRequest;
use crate::timing;

/// Poll interval for the bounded wait.
const WAIT_POLL: Duration = Duration::from_millis(10);

/// Structured outcome of one external run.
///
/// The wall-clock duration always reflects the full spawn-to-reap interval;
/// the self-reported duration is present only when the executable emitted a
/// parseable completion line. Failed results carry their captured streams
/// for diagnostics and are excluded from all downstream aggregation.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Process exited with status zero within the deadline.
    pub success: bool,
    /// Process exceeded the bounded wait and was killed.
    pub timed_out: bool,
    /// Exit code if the process exited normally.
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Elapsed time around the whole spawn-to-reap interval.
    pub wall_clock: Duration,
    /// Duration the executable reported about itself, when parseable.
    pub reported: Option<Duration>,
}

impl ExecutionResult {
    /// The chosen duration: self-report when present, wall-clock otherwise.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.reported.unwrap_or(self.wall_clock)
    }

    /// Classify a failed result as the harness error it represents.
    #[must_use]
    pub fn failure(&self) -> Option<HarnessError> {
        if self.success {
            None
        } else if self.timed_out {
            Some(HarnessError::Timeout(self.wall_clock))
        } else {
            let status = self
                .exit_code
                .map_or_else(|| "signal".to_string(), |c| format!("exit code {c}"));
            Some(HarnessError::Execution {
                status,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs one [`ExecutionRequest`] to completion, synchronously.
///
/// Runs are deliberately issued one at a time: concurrent children would
/// contend for the CPU/accelerator resources the measurement is trying to
/// characterize.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    deadline: Duration,
}

impl ProcessRunner {
    /// Create a runner with the given per-run deadline.
    #[must_use]
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    /// Spawn the request, drain both streams, and wait for termination or
    /// the deadline. A non-zero exit or a timeout yields a failed result,
    /// not an error; only spawn/capture failures are escalated.
    pub fn run(&self, request: &ExecutionRequest) -> Result<ExecutionResult, HarnessError> {
        tracing::debug!(command = %request.command_line(), "spawning");
        let start = Instant::now();

        let mut child = Command::new(request.program())
            .args(request.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Drain on dedicated threads so a chatty child can't fill a pipe
        // and deadlock the wait loop.
        let stdout_pipe = child.stdout.take();
        let stderr_pipe = child.stderr.take();
        let out_handle = std::thread::spawn(move || drain(stdout_pipe));
        let err_handle = std::thread::spawn(move || drain(stderr_pipe));

        let (status, timed_out) = self.bounded_wait(&mut child, start)?;
        let wall_clock = start.elapsed();

        let stdout = out_handle.join().unwrap_or_default();
        let stderr = err_handle.join().unwrap_or_default();

        let exit_code = status.and_then(|s| s.code());
        let success = !timed_out && status.is_some_and(|s| s.success());

        let reported = if success {
            timing::reported_duration(&stdout)
        } else {
            None
        };

        let result = ExecutionResult {
            success,
            timed_out,
            exit_code,
            stdout,
            stderr,
            wall_clock,
            reported,
        };
        if let Some(err) = result.failure() {
            tracing::warn!(command = %request.command_line(), %err, "run failed");
        }
        Ok(result)
    }

    /// Poll until exit or deadline; kill and reap on expiry.
    fn bounded_wait(
        &self,
        child: &mut Child,
        start: Instant,
    ) -> Result<(Option<std::process::ExitStatus>, bool), HarnessError> {
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok((Some(status), false));
            }
            if start.elapsed() >= self.deadline {
                // The child may have exited between the poll and the
                // deadline check; record that exit instead of a timeout.
                if let Some(status) = child.try_wait()? {
                    return Ok((Some(status), false));
                }
                if let Err(err) = child.kill() {
                    tracing::debug!(%err, "kill after deadline failed; child already exited");
                }
                child.wait()?;
                return Ok((None, true));
            }
            std::thread::sleep(WAIT_POLL);
        }
    }
}

fn drain(pipe: Option<impl Read>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::invocation::InvocationBuilder;
    use tempfile::TempDir;

    fn runner() -> ProcessRunner {
        ProcessRunner::new(Duration::from_secs(30))
    }

    // Build a request pointing the serial builder at a shell script that
    // ignores the positional arguments.
    fn sh_request(dir: &TempDir, script: &str) -> ExecutionRequest {
        let fake = dir.path().join("fake.sh");
        std::fs::write(&fake, format!("#!/bin/sh\n{script}\n")).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        let graph = dir.path().join("graph.txt");
        let workload = dir.path().join("update1.txt");
        std::fs::write(&graph, "g\n").unwrap();
        std::fs::write(&workload, "w\n").unwrap();
        InvocationBuilder::new(&graph, 0)
            .with_serial_bin(&fake)
            .serial(&workload, &dir.path().join("out.txt"))
            .unwrap()
    }

    #[test]
    fn successful_run_captures_stdout() {
        let dir = TempDir::new().unwrap();
        let req = sh_request(&dir, "echo hello");
        let result = runner().run(&req).unwrap();
        assert!(result.success);
        assert!(!result.timed_out);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn nonzero_exit_is_failed_not_error() {
        let dir = TempDir::new().unwrap();
        let req = sh_request(&dir, "echo oops >&2; exit 3");
        let result = runner().run(&req).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert!(result.stderr.contains("oops"));
        assert!(result.reported.is_none());
        let err = result.failure().unwrap();
        assert!(matches!(err, HarnessError::Execution { .. }));
        assert!(err.to_string().contains("oops"));
    }

    #[test]
    fn self_report_preferred_on_success() {
        let dir = TempDir::new().unwrap();
        let req = sh_request(&dir, "echo 'SSSP update completed in 2 seconds'");
        let result = runner().run(&req).unwrap();
        assert!(result.success);
        assert_eq!(result.reported, Some(Duration::from_millis(2000)));
        assert_eq!(result.duration(), Duration::from_millis(2000));
    }

    #[test]
    fn wall_clock_fallback_without_self_report() {
        let dir = TempDir::new().unwrap();
        let req = sh_request(&dir, "echo 'no timing here'");
        let result = runner().run(&req).unwrap();
        assert!(result.reported.is_none());
        assert_eq!(result.duration(), result.wall_clock);
    }

    #[test]
    #[cfg(unix)]
    fn deadline_kills_hung_process() {
        let dir = TempDir::new().unwrap();
        let req = sh_request(&dir, "sleep 30");
        let result = ProcessRunner::new(Duration::from_millis(200))
            .run(&req)
            .unwrap();
        assert!(!result.success);
        assert!(result.timed_out);
        assert!(result.wall_clock >= Duration::from_millis(200));
        assert!(matches!(
            result.failure(),
            Some(HarnessError::Timeout(_))
        ));
    }

    #[test]
    #[cfg(unix)]
    fn exit_racing_the_deadline_never_escalates() {
        // A zero deadline drives every run straight into the expiry branch
        // while the child may already be gone; the runner must still return
        // a result, never an I/O error.
        let dir = TempDir::new().unwrap();
        let req = sh_request(&dir, "exit 0");
        for _ in 0..5 {
            let result = ProcessRunner::new(Duration::ZERO).run(&req).unwrap();
            // Either the exit won the race (recorded as success) or the
            // kill did (recorded as timeout); both are valid outcomes.
            assert!(result.success || result.timed_out);
        }
    }

    #[test]
    fn spawn_failure_is_an_error() {
        let dir = TempDir::new().unwrap();
        let graph = dir.path().join("graph.txt");
        let workload = dir.path().join("update1.txt");
        std::fs::write(&graph, "g\n").unwrap();
        std::fs::write(&workload, "w\n").unwrap();
        let req = InvocationBuilder::new(&graph, 0)
            .with_serial_bin(dir.path().join("does_not_exist"))
            .serial(&workload, &dir.path().join("out.txt"))
            .unwrap();
        assert!(matches!(runner().run(&req), Err(HarnessError::Io(_))));
    }
}
