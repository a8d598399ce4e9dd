//! Calibration engine for SDP8x6 analog differential-pressure sensors
//!
//! Converts ratiometric analog readings (output voltage `Aout` against supply
//! `Vdd`) into pressure in Pascal using the four datasheet transfer curves,
//! and aggregates repeated evaluations under input uncertainty.
//!
//! Two execution modes share one engine:
//! - **Distributional**: inputs are particle ensembles, so each output is a
//!   full distribution reduced to mean, spread and tail statistics.
//! - **Monte Carlo**: inputs are scalar uniform draws; the tracked output of
//!   every iteration is kept and reduced to mean and unbiased variance.
//!
//! ```
//! use sdpcal_core::{CalibrationEngine, InputSample, OutputVariant};
//!
//! let engine = CalibrationEngine::default();
//! let sample = InputSample { aout: 1.5, vdd: 3.7 };
//! let dp: f64 = engine.evaluate(OutputVariant::Linear500Pa, &sample);
//! assert!((dp - 154.054).abs() < 1e-3);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod aggregator;
pub mod calibration;
pub mod config;
pub mod constants;
pub mod errors;
pub mod pipeline;
pub mod report;
pub mod sampling;
pub mod stats;
pub mod time;
pub mod traits;

// Public API
pub use aggregator::{Aggregate, MonteCarloRun, MonteCarloSamples, SampleAggregator};
pub use calibration::{
    CalibrationEngine, CalibrationTable, CurveCoefficients, InputSample, OutputSelection,
    OutputTable, OutputVariant,
};
pub use config::{ReportMode, RunConfig};
pub use errors::{CalibrationError, CalibrationResult};
pub use pipeline::{run, RunOutcome};
pub use sampling::{Ensemble, EnsembleSampler, InputBounds, ScalarSampler};
pub use time::{CpuClock, ElapsedTime, FixedClock, ProcessClock, Stopwatch};
pub use traits::{InputSampler, Quantity};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
