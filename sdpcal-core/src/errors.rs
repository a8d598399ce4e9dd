//! Error Types for the Calibration Pipeline
//!
//! ## Error Categories
//!
//! A run is a single-shot batch computation, so every error here is terminal
//! for the run that raised it. Errors fall into three groups:
//!
//! ### Argument Errors
//! - `InvalidArgument`: configuration rejected before any computation
//!   (zero iterations, unknown output variant, empty ensemble)
//!
//! ### Resource Errors
//! - `Allocation`: the Monte Carlo sample buffer could not be reserved. Carries
//!   the source location of the reservation so the report matches what a
//!   checked allocator would print.
//!
//! ### Output Errors
//! - `Io`: writing a report file failed. Anything already printed to the
//!   terminal stays intact; only the exit status changes.
//! - `Serialization`: the JSON document could not be rendered.
//!
//! Numeric edge cases (division by zero, the sign of zero) are *not* errors.
//! They follow IEEE-754 and the explicit policy in [`crate::calibration::sign`].
//!
//! ## Handling Strategy
//!
//! ```rust
//! use sdpcal_core::{CalibrationError, RunConfig};
//!
//! let config = RunConfig::default().with_iterations(0);
//! match config.validate() {
//!     Ok(()) => {}
//!     Err(CalibrationError::InvalidArgument(reason)) => {
//!         // Reject before allocating anything
//!         assert!(reason.contains("iteration"));
//!     }
//!     Err(other) => panic!("unexpected error: {other}"),
//! }
//! ```

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for pipeline operations
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Errors that abort a calibration run
#[derive(Error, Debug)]
pub enum CalibrationError {
    /// Malformed or inconsistent run configuration
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Sample buffer reservation failed
    #[error("Allocation of {requested} samples failed at {file}:{line}")]
    Allocation {
        /// Number of samples the buffer was asked to hold
        requested: usize,
        /// Source file of the reservation site
        file: &'static str,
        /// Source line of the reservation site
        line: u32,
    },

    /// A report or data file could not be read or written
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// JSON report rendering failed
    #[error("Failed to render JSON report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CalibrationError {
    /// Wrap an I/O error with the path it concerned
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
