//! Iteration and Aggregation Driver
//!
//! ## Overview
//!
//! The aggregator runs the configured number of iterations. Each iteration
//! pulls a fresh `(Aout, Vdd)` pair from the sampling backend and passes it
//! through the [`CalibrationEngine`]. What happens to the result depends on
//! the execution mode:
//!
//! ```text
//! Distributional ── 1 iteration ──▶ output table holds full distributions
//!
//! Monte Carlo ──── N iterations ──▶ tracked scalar appended to sample buffer
//!                                   │
//!                                   ▼
//!                           mean / variance reduction
//!                           (mean becomes the reported output)
//! ```
//!
//! ## Sample Buffer Lifecycle
//!
//! The Monte Carlo buffer is reserved once, before the first iteration, for
//! exactly N samples. If the reservation fails the run stops with
//! [`CalibrationError::Allocation`] and the sampler is never touched. The
//! buffer is written sequentially and handed to the caller inside
//! [`MonteCarloRun`] so the reporting path can persist it; it is freed when
//! that value drops.
//!
//! ## Tracked Value
//!
//! The scalar appended per iteration is the engine's return value: the
//! selected variant, or `Sqrt125Pa` when all variants are selected.

use core::num::NonZeroUsize;

use crate::calibration::{CalibrationEngine, InputSample, OutputSelection, OutputTable};
use crate::errors::{CalibrationError, CalibrationResult};
use crate::sampling::InputBounds;
use crate::stats::{self, MeanAndVariance};
use crate::traits::{InputSampler, Quantity};

/// Preallocated storage for Monte Carlo samples
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloSamples {
    samples: Vec<f64>,
    capacity: usize,
}

impl MonteCarloSamples {
    /// Reserve room for exactly `count` samples.
    ///
    /// Fails without aborting when the request cannot be satisfied, including
    /// byte-size overflow for counts near `usize::MAX`.
    pub fn allocate(count: usize) -> CalibrationResult<Self> {
        let mut samples = Vec::new();
        samples
            .try_reserve_exact(count)
            .map_err(|_| CalibrationError::Allocation {
                requested: count,
                file: file!(),
                line: line!(),
            })?;

        Ok(Self {
            samples,
            capacity: count,
        })
    }

    /// Append the next sample
    ///
    /// Samples beyond the reserved count are dropped.
    pub fn push(&mut self, sample: f64) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        }
    }

    /// Samples in iteration order
    pub fn as_slice(&self) -> &[f64] {
        &self.samples
    }

    /// Number of samples stored
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether no samples are stored
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean and variance of the stored samples
    pub fn reduce(&self) -> MeanAndVariance {
        stats::mean_and_variance(&self.samples)
    }

    /// Give up the buffer
    pub fn into_vec(self) -> Vec<f64> {
        self.samples
    }
}

/// Monte Carlo output: raw samples plus their reduction
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloRun {
    /// Tracked scalar from every iteration
    pub samples: MonteCarloSamples,
    /// Reduction of `samples`
    pub statistics: MeanAndVariance,
}

/// Result of the aggregation loop
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate<V> {
    /// Values from the final iteration, one per selected variant
    pub outputs: OutputTable<V>,
    /// Engine return value from the final iteration
    pub tracked: V,
    /// Present in Monte Carlo mode only
    pub monte_carlo: Option<MonteCarloRun>,
}

impl<V: Quantity> Aggregate<V> {
    /// The single reported calibrated output.
    ///
    /// The Monte Carlo mean when sampling, otherwise the tracked value's
    /// representative point.
    pub fn calibrated_output(&self) -> f64 {
        match &self.monte_carlo {
            Some(run) => run.statistics.mean,
            None => self.tracked.point(),
        }
    }
}

/// Drives the sampler and engine for a fixed number of iterations
#[derive(Debug, Clone)]
pub struct SampleAggregator<'e> {
    engine: &'e CalibrationEngine,
    bounds: InputBounds,
    selection: OutputSelection,
    iterations: NonZeroUsize,
    monte_carlo: bool,
}

impl<'e> SampleAggregator<'e> {
    /// Aggregator over `engine` with default input bounds.
    ///
    /// Rejects a zero iteration count.
    pub fn new(
        engine: &'e CalibrationEngine,
        selection: OutputSelection,
        iterations: usize,
    ) -> CalibrationResult<Self> {
        let iterations = NonZeroUsize::new(iterations).ok_or_else(|| {
            CalibrationError::InvalidArgument("iteration count must be at least 1".into())
        })?;

        Ok(Self {
            engine,
            bounds: InputBounds::default(),
            selection,
            iterations,
            monte_carlo: false,
        })
    }

    /// Collect and reduce samples
    pub fn with_monte_carlo(mut self, enabled: bool) -> Self {
        self.monte_carlo = enabled;
        self
    }

    /// Override the input distributions
    pub fn with_bounds(mut self, bounds: InputBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Iterations this aggregator runs
    pub fn iterations(&self) -> usize {
        self.iterations.get()
    }

    /// Reserve the sample buffer when Monte Carlo mode is on.
    ///
    /// Call before timing starts; allocation is not part of the timed work.
    pub fn prepare(&self) -> CalibrationResult<Option<MonteCarloSamples>> {
        if self.monte_carlo {
            MonteCarloSamples::allocate(self.iterations.get()).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Run the loop with a buffer from [`prepare`](Self::prepare)
    pub fn run_prepared<S: InputSampler>(
        &self,
        sampler: &mut S,
        mut buffer: Option<MonteCarloSamples>,
    ) -> Aggregate<S::Value> {
        let mut outputs = self.engine.new_table();

        let mut tracked = self.step(sampler, &mut outputs, buffer.as_mut());
        for _ in 1..self.iterations.get() {
            tracked = self.step(sampler, &mut outputs, buffer.as_mut());
        }

        let monte_carlo = buffer.map(|samples| {
            let statistics = samples.reduce();
            MonteCarloRun { samples, statistics }
        });

        Aggregate {
            outputs,
            tracked,
            monte_carlo,
        }
    }

    /// Prepare and run in one step
    pub fn run<S: InputSampler>(&self, sampler: &mut S) -> CalibrationResult<Aggregate<S::Value>> {
        let buffer = self.prepare()?;
        Ok(self.run_prepared(sampler, buffer))
    }

    fn step<S: InputSampler>(
        &self,
        sampler: &mut S,
        outputs: &mut OutputTable<S::Value>,
        buffer: Option<&mut MonteCarloSamples>,
    ) -> S::Value {
        let sample: InputSample<S::Value> = self.bounds.draw(sampler);
        let value = self.engine.calibrate(&sample, self.selection, outputs);

        if let Some(buffer) = buffer {
            buffer.push(value.point());
        }
        value
    }
}
