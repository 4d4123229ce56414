//! Core library for vidprobe.
//!
//! Runs an external media prober (avprobe, or ffmpeg as a fallback)
//! against a source file and extracts structured metadata from the
//! human-readable report the prober writes to its error stream.

// Core modules
pub mod error;
pub mod metadata;
pub mod probe;

pub use error::{CoreError, CoreResult};
pub use metadata::{MediaMetadata, ProbeOutput};
pub use probe::{probe_file, ProbeRunner, Prober, SystemProber};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
