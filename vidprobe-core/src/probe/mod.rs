//! Locating and running the external media prober.
//!
//! The report we parse is whatever the prober writes to its error stream:
//! `avprobe <file>` where available, otherwise the older `ffmpeg -i <file>`
//! invocation, which produces an equivalent report. Which tool actually ran
//! is invisible to the extraction layer.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use crate::error::{CoreError, CoreResult};
use crate::metadata::{MediaMetadata, ProbeOutput};

mod exec;

/// Default bound on how long a prober run may take.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// The candidate probing executables, in preference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prober {
    /// Standalone prober, invoked as `avprobe <file>`
    AvProbe,
    /// Legacy fallback, invoked as `ffmpeg -i <file>`
    Ffmpeg,
}

impl Prober {
    /// Name of the executable on the PATH.
    pub fn executable(&self) -> &'static str {
        match self {
            Prober::AvProbe => "avprobe",
            Prober::Ffmpeg => "ffmpeg",
        }
    }

    /// Build the probe invocation for a source file.
    fn command(&self, source: &Path) -> Command {
        let mut cmd = Command::new(self.executable());
        if let Prober::Ffmpeg = self {
            cmd.arg("-i");
        }
        cmd.arg(source);
        cmd
    }
}

/// Abstraction over running a prober against a source path.
///
/// Production code uses [`SystemProber`]; tests substitute an
/// implementation returning canned report text so that no external
/// process is launched.
pub trait ProbeRunner {
    /// Capture the prober's diagnostic output for `source`.
    fn run(&self, source: &Path) -> CoreResult<ProbeOutput>;
}

/// Runs the first available prober as a child process.
#[derive(Debug, Clone)]
pub struct SystemProber {
    timeout: Duration,
}

impl SystemProber {
    pub fn new() -> Self {
        SystemProber {
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        SystemProber { timeout }
    }
}

impl Default for SystemProber {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeRunner for SystemProber {
    fn run(&self, source: &Path) -> CoreResult<ProbeOutput> {
        let prober = locate_prober()?;
        log::debug!(
            "probing {} with {}",
            source.display(),
            prober.executable()
        );
        let text = exec::capture_stderr(prober.command(source), prober.executable(), self.timeout)?;
        Ok(ProbeOutput::new(text))
    }
}

/// Probe a source file and extract its metadata in one step.
pub fn probe_file<R: ProbeRunner>(runner: &R, source: &Path) -> CoreResult<MediaMetadata> {
    let output = runner.run(source)?;
    Ok(MediaMetadata::extract(&output))
}

/// Find the first available prober, in preference order.
pub fn locate_prober() -> CoreResult<Prober> {
    const CANDIDATES: [Prober; 2] = [Prober::AvProbe, Prober::Ffmpeg];

    for prober in CANDIDATES {
        if is_available(prober.executable()) {
            return Ok(prober);
        }
        log::debug!("{} not found on PATH", prober.executable());
    }

    let names = CANDIDATES
        .iter()
        .map(|p| p.executable())
        .collect::<Vec<_>>()
        .join(", ");
    log::warn!("no media prober found (looked for {})", names);
    Err(CoreError::ProbeUnavailable(names))
}

/// Check whether an executable can be launched, by spawning
/// `<name> -version` with its output discarded. The exit status does not
/// matter, only that the process could start.
fn is_available(name: &str) -> bool {
    Command::new(name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok()
}
