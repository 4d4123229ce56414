use thiserror::Error;

/// Custom error types for vidprobe
#[derive(Error, Debug)]
pub enum CoreError {
    /// No candidate probing executable could be resolved on the PATH.
    #[error("no media prober found (looked for {0})")]
    ProbeUnavailable(String),

    /// A prober was found but could not be launched, hung past the
    /// configured timeout, or yielded no readable diagnostic stream.
    #[error("prober execution failed: {0}")]
    ProbeExecutionFailed(String),
}

/// Result type for vidprobe operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;
