//! Run configuration
//!
//! A [`RunConfig`] is built once at startup (from the command line or in
//! code) and never changes during a run. Builder methods follow the usual
//! `with_*` pattern:
//!
//! ```rust
//! use sdpcal_core::{OutputSelection, ReportMode, RunConfig};
//!
//! let config = RunConfig::default()
//!     .with_monte_carlo(true)
//!     .with_iterations(100_000)
//!     .with_benchmarking(true);
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.report_mode(), ReportMode::Benchmark);
//! ```
//!
//! ## Report Mode Resolution
//!
//! The reporting path is chosen once, in priority order:
//!
//! | Flags set            | Mode                          |
//! |----------------------|-------------------------------|
//! | benchmarking         | `Benchmark`                   |
//! | JSON (no benchmark)  | `Json`                        |
//! | otherwise            | `Plain`, plus CSV if a path was given |

use std::path::{Path, PathBuf};

use crate::calibration::OutputSelection;
use crate::constants::sampling::{DEFAULT_DATA_FILE, DEFAULT_ENSEMBLE_SIZE, DEFAULT_ITERATIONS};
use crate::errors::{CalibrationError, CalibrationResult};

/// Mutually exclusive reporting paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportMode {
    /// One machine-readable line: value and elapsed microseconds
    Benchmark,
    /// Structured JSON document
    Json,
    /// Human-readable blocks, optionally mirrored to a CSV file
    Plain {
        /// CSV destination
        csv: Option<PathBuf>,
    },
}

impl ReportMode {
    /// Resolve the reporting path from the individual flags
    pub fn resolve(benchmarking: bool, json: bool, csv: Option<&Path>) -> Self {
        if benchmarking {
            ReportMode::Benchmark
        } else if json {
            ReportMode::Json
        } else {
            ReportMode::Plain {
                csv: csv.map(Path::to_path_buf),
            }
        }
    }
}

/// Everything a run needs to know up front
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Variants to compute and report
    pub selection: OutputSelection,
    /// Loop iterations (Monte Carlo sample count)
    pub iterations: usize,
    /// Sample scalars and reduce them, instead of propagating distributions
    pub monte_carlo: bool,
    /// Emit a JSON document
    pub json: bool,
    /// Emit only the benchmark line
    pub benchmarking: bool,
    /// Report elapsed processing time
    pub timing: bool,
    /// CSV destination for the output table
    pub output_path: Option<PathBuf>,
    /// Auxiliary file for raw Monte Carlo samples
    pub data_file: PathBuf,
    /// RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Particles per distributional value
    pub ensemble_size: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            selection: OutputSelection::All,
            iterations: DEFAULT_ITERATIONS,
            monte_carlo: false,
            json: false,
            benchmarking: false,
            timing: false,
            output_path: None,
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            seed: None,
            ensemble_size: DEFAULT_ENSEMBLE_SIZE,
        }
    }
}

impl RunConfig {
    /// Variants to compute
    pub fn with_selection(mut self, selection: OutputSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Loop iteration count
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Switch to Monte Carlo sampling
    pub fn with_monte_carlo(mut self, enabled: bool) -> Self {
        self.monte_carlo = enabled;
        self
    }

    /// Report as JSON
    pub fn with_json(mut self, enabled: bool) -> Self {
        self.json = enabled;
        self
    }

    /// Report only the benchmark line
    pub fn with_benchmarking(mut self, enabled: bool) -> Self {
        self.benchmarking = enabled;
        self
    }

    /// Report elapsed processing time
    pub fn with_timing(mut self, enabled: bool) -> Self {
        self.timing = enabled;
        self
    }

    /// Mirror the plain report to a CSV file
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Where Monte Carlo samples are saved
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = path.into();
        self
    }

    /// Fixed RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Particles per distributional value
    pub fn with_ensemble_size(mut self, size: usize) -> Self {
        self.ensemble_size = size;
        self
    }

    /// Reject configurations that cannot run
    pub fn validate(&self) -> CalibrationResult<()> {
        if self.iterations == 0 {
            return Err(CalibrationError::InvalidArgument(
                "iteration count must be at least 1".into(),
            ));
        }

        if !self.monte_carlo && self.ensemble_size == 0 {
            return Err(CalibrationError::InvalidArgument(
                "ensemble size must be at least 1".into(),
            ));
        }

        if let Some(path) = &self.output_path {
            if path.as_os_str().is_empty() {
                return Err(CalibrationError::InvalidArgument("output path is empty".into()));
            }
        }

        Ok(())
    }

    /// Reporting path for this run
    pub fn report_mode(&self) -> ReportMode {
        ReportMode::resolve(self.benchmarking, self.json, self.output_path.as_deref())
    }

    /// Whether the loop must be timed
    pub fn needs_timing(&self) -> bool {
        self.timing || self.benchmarking
    }
}
