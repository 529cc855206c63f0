//! Error taxonomy for the harness.
//!
//! Three families of failure exist and none of them is recovered from:
//! configuration errors (bad flags or shapes, detected before anything runs),
//! setup failures (capture data, templates, host libraries), and workload
//! failures (an error raised while the runner is invoking the workload).

use std::path::PathBuf;

/// Errors produced by the harness.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid run configuration or workload shape.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A required file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// A capture file exists but is not valid JSON of the expected shape.
    #[error("malformed capture file {}", path.display())]
    Capture {
        /// The capture file.
        path: PathBuf,
        /// Deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// Host setup referenced a helper library that does not exist.
    #[error("unknown template library '{0}' (available: builtins, review)")]
    UnknownLibrary(String),

    /// Template loading, compilation or rendering failed.
    #[error(transparent)]
    Template(#[from] minijinja::Error),

    /// Writing results to the output stream failed.
    #[error("failed to write output")]
    Output(#[source] std::io::Error),
}

impl Error {
    /// True for errors that are detected before any setup or measurement.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
