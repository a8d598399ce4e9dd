//! End-to-End Calibration Run
//!
//! ## Flow
//!
//! ```text
//! RunConfig ──validate──▶ ReportMode resolved once
//!     │
//!     ▼
//! reserve Monte Carlo buffer (fails fast, before timing or sampling)
//!     │
//!     ▼
//! ┌──────────── timed region ─────────────┐
//! │ N × (draw inputs → calibrate → store) │
//! │ mean / variance reduction (MC only)   │
//! └───────────────────────────────────────┘
//!     │
//!     ▼
//! report: Benchmark │ JSON │ Plain (+ CSV)
//!     │
//!     ▼
//! auxiliary data file (MC only, every mode)
//! ```
//!
//! The backend follows the execution mode: scalar draws for Monte Carlo,
//! particle ensembles for distributional runs. Both go through the same
//! aggregator and engine.
//!
//! ## Failure Semantics
//!
//! - Invalid configuration and allocation failure return before anything is
//!   printed.
//! - A CSV write failure is returned *after* the plain report was written and
//!   after the auxiliary data file was saved.
//! - Failing to save the auxiliary data file is logged and does not fail the
//!   run.

use std::io::Write;

use log::{debug, info, warn};

use crate::aggregator::{Aggregate, SampleAggregator};
use crate::calibration::CalibrationEngine;
use crate::config::{ReportMode, RunConfig};
use crate::errors::{CalibrationError, CalibrationResult};
use crate::report::{self, JsonReport, ReportedValue};
use crate::sampling::{EnsembleSampler, ScalarSampler};
use crate::time::{CpuClock, ElapsedTime, Stopwatch};
use crate::traits::{InputSampler, Quantity};

/// What a finished run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    /// Reporting path taken
    pub mode: ReportMode,
    /// The single tracked result (Monte Carlo mean or distribution mean)
    pub calibrated_output: f64,
    /// Duration of the timed region, zero when not timed
    pub elapsed: ElapsedTime,
    /// Values that were reported
    pub values: Vec<ReportedValue>,
}

/// Run the full pipeline, writing terminal output to `out`
pub fn run<W, C>(config: &RunConfig, clock: &C, out: &mut W) -> CalibrationResult<RunOutcome>
where
    W: Write,
    C: CpuClock + ?Sized,
{
    config.validate()?;

    let engine = CalibrationEngine::default();
    let aggregator = SampleAggregator::new(&engine, config.selection, config.iterations)?
        .with_monte_carlo(config.monte_carlo);

    debug!(
        "Run: selection={} iterations={} monte_carlo={} mode={:?}",
        config.selection,
        config.iterations,
        config.monte_carlo,
        config.report_mode()
    );

    if config.monte_carlo {
        execute(config, &aggregator, ScalarSampler::new(config.seed), clock, out)
    } else {
        let sampler = EnsembleSampler::new(config.ensemble_size, config.seed);
        execute(config, &aggregator, sampler, clock, out)
    }
}

fn execute<S, W, C>(
    config: &RunConfig,
    aggregator: &SampleAggregator<'_>,
    mut sampler: S,
    clock: &C,
    out: &mut W,
) -> CalibrationResult<RunOutcome>
where
    S: InputSampler,
    W: Write,
    C: CpuClock + ?Sized,
{
    let mode = config.report_mode();
    let buffer = aggregator.prepare()?;

    let watch = Stopwatch::start(clock, config.needs_timing());
    let aggregate = aggregator.run_prepared(&mut sampler, buffer);
    let elapsed = watch.stop();

    if let Some(run) = &aggregate.monte_carlo {
        debug!(
            "Reduced {} samples: mean={} variance={}",
            run.samples.len(),
            run.statistics.mean,
            run.statistics.variance
        );
    }
    info!("Completed {} iterations in {:.6}s", aggregator.iterations(), elapsed.seconds());

    let calibrated_output = aggregate.calibrated_output();
    let values = report::reported_values(config.selection, &aggregate);

    let reported = emit(config, &mode, &aggregate, &values, elapsed, out);

    if let Some(run) = &aggregate.monte_carlo {
        match report::write_monte_carlo_data(&config.data_file, run.samples.as_slice(), elapsed.micros()) {
            Ok(()) => debug!("Saved {} samples to {}", run.samples.len(), config.data_file.display()),
            Err(e) => warn!("Could not save Monte Carlo samples: {e}"),
        }
    }

    reported?;

    Ok(RunOutcome {
        mode,
        calibrated_output,
        elapsed,
        values,
    })
}

fn emit<V, W>(
    config: &RunConfig,
    mode: &ReportMode,
    aggregate: &Aggregate<V>,
    values: &[ReportedValue],
    elapsed: ElapsedTime,
    out: &mut W,
) -> CalibrationResult<()>
where
    V: Quantity,
    W: Write,
{
    let timing = config.timing.then_some(elapsed);

    match mode {
        ReportMode::Benchmark => {
            report::write_benchmark(out, aggregate.calibrated_output(), elapsed).map_err(stdout_error)
        }
        ReportMode::Json => {
            let document = JsonReport::new(
                config.selection,
                config.iterations,
                values,
                aggregate.monte_carlo.as_ref(),
                timing,
            );
            report::write_json(out, &document)
        }
        ReportMode::Plain { csv } => {
            report::write_plain(out, values, timing).map_err(stdout_error)?;

            if let Some(path) = csv {
                report::write_output_csv(path, values)?;
                info!("Wrote {} rows to {}", values.len(), path.display());
            }
            Ok(())
        }
    }
}

fn stdout_error(source: std::io::Error) -> CalibrationError {
    CalibrationError::io("<stdout>", source)
}
