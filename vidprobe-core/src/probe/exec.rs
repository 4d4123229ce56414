//! Child process execution with a bounded wait.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{CoreError, CoreResult};

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Spawn `cmd`, discard its stdout and collect its stderr in full.
///
/// The prober writes its report to stderr and exits nonzero when invoked
/// without an output file, so the exit status is deliberately ignored;
/// only a failure to spawn or a run that outlives `timeout` is an error.
pub(crate) fn capture_stderr(
    mut cmd: Command,
    tool: &str,
    timeout: Duration,
) -> CoreResult<String> {
    log::debug!("running: {:?}", cmd);

    let mut child = cmd
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| CoreError::ProbeExecutionFailed(format!("failed to start {}: {}", tool, e)))?;

    // Drain stderr on a separate thread so a chatty child cannot fill the
    // pipe and deadlock against the wait loop below.
    let mut stderr = child.stderr.take().ok_or_else(|| {
        CoreError::ProbeExecutionFailed(format!("no stderr stream from {}", tool))
    })?;
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stderr.read_to_end(&mut buf);
        buf
    });

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                log::debug!("{} exited with {}", tool, status);
                break;
            }
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(CoreError::ProbeExecutionFailed(format!(
                        "{} timed out after {} seconds",
                        tool,
                        timeout.as_secs()
                    )));
                }
                thread::sleep(WAIT_POLL_INTERVAL);
            }
            Err(e) => {
                return Err(CoreError::ProbeExecutionFailed(format!(
                    "error waiting for {}: {}",
                    tool, e
                )));
            }
        }
    }

    let bytes = reader.join().unwrap_or_default();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
