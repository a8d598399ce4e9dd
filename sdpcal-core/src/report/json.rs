//! JSON report
//!
//! ```json
//! {
//!   "selection": "all",
//!   "mode": "monte_carlo",
//!   "iterations": 3,
//!   "outputs": {
//!     "Calibrated Sensor Output SDP8x6 Linear 500Pa": { "value": 154.2 }
//!   },
//!   "monte_carlo": { "samples": [-29.1, -30.4, -28.8], "mean": -29.43, "variance": 0.73 },
//!   "cpu_time_seconds": 0.000012
//! }
//! ```
//!
//! `monte_carlo` appears only in Monte Carlo mode and `cpu_time_seconds` only
//! when timing was requested. Distributional outputs carry a `distribution`
//! object next to `value`. Non-finite numbers serialize as `null`.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;

use crate::aggregator::MonteCarloRun;
use crate::calibration::OutputSelection;
use crate::errors::{CalibrationError, CalibrationResult};
use crate::sampling::DistributionSummary;
use crate::time::ElapsedTime;

use super::ReportedValue;

/// Top-level JSON document
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// `all` or the selected variant's CLI name
    pub selection: String,
    /// `distributional` or `monte_carlo`
    pub mode: &'static str,
    /// Loop iterations
    pub iterations: usize,
    /// Reported values keyed by display name
    pub outputs: BTreeMap<&'static str, JsonOutput>,
    /// Raw samples and reduction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo: Option<JsonMonteCarlo<'a>>,
    /// Elapsed time of the timed region
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu_time_seconds: Option<f64>,
}

/// One entry of the output table
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    /// Calibrated value (mean for distributions)
    pub value: f64,
    /// Distribution statistics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionSummary>,
}

/// Monte Carlo section
#[derive(Debug, Serialize)]
pub struct JsonMonteCarlo<'a> {
    /// Tracked scalar from every iteration
    pub samples: &'a [f64],
    /// Sample mean
    pub mean: f64,
    /// Unbiased sample variance
    pub variance: f64,
}

impl<'a> JsonReport<'a> {
    /// Assemble the document from a finished run
    pub fn new(
        selection: OutputSelection,
        iterations: usize,
        values: &[ReportedValue],
        monte_carlo: Option<&'a MonteCarloRun>,
        elapsed: Option<ElapsedTime>,
    ) -> Self {
        let outputs = values
            .iter()
            .map(|v| {
                (
                    v.variant.display_name(),
                    JsonOutput {
                        value: v.value,
                        distribution: v.distribution,
                    },
                )
            })
            .collect();

        Self {
            selection: selection.to_string(),
            mode: if monte_carlo.is_some() { "monte_carlo" } else { "distributional" },
            iterations,
            outputs,
            monte_carlo: monte_carlo.map(|run| JsonMonteCarlo {
                samples: run.samples.as_slice(),
                mean: run.statistics.mean,
                variance: run.statistics.variance,
            }),
            cpu_time_seconds: elapsed.map(|e| e.seconds()),
        }
    }
}

/// Render `report` as pretty-printed JSON followed by a newline.
///
/// A failing writer surfaces as [`CalibrationError::Io`], not as a
/// serialization error.
pub fn write_json<W: Write>(out: &mut W, report: &JsonReport<'_>) -> CalibrationResult<()> {
    serde_json::to_writer_pretty(&mut *out, report).map_err(|e| {
        if e.is_io() {
            CalibrationError::io("<stdout>", io::Error::from(e))
        } else {
            CalibrationError::Serialization(e)
        }
    })?;
    writeln!(out).map_err(|e| CalibrationError::io("<stdout>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::MonteCarloSamples;
    use crate::calibration::OutputVariant;
    use crate::stats::MeanAndVariance;

    fn value(variant: OutputVariant, value: f64) -> ReportedValue {
        ReportedValue {
            variant,
            value,
            distribution: None,
        }
    }

    #[test]
    fn distributional_document() {
        let values = [value(OutputVariant::Linear500Pa, 154.0)];
        let report = JsonReport::new(
            OutputSelection::Single(OutputVariant::Linear500Pa),
            1,
            &values,
            None,
            None,
        );

        let json: serde_json::Value = serde_json::to_value(&report).unwrap();
        assert_eq!(json["selection"], "linear-500pa");
        assert_eq!(json["mode"], "distributional");
        assert_eq!(
            json["outputs"]["Calibrated Sensor Output SDP8x6 Linear 500Pa"]["value"],
            154.0
        );
        assert!(json.get("monte_carlo").is_none());
        assert!(json.get("cpu_time_seconds").is_none());
    }

    #[test]
    fn monte_carlo_document() {
        let mut samples = MonteCarloSamples::allocate(3).unwrap();
        for s in [1.0, 2.0, 3.0] {
            samples.push(s);
        }
        let run = MonteCarloRun {
            samples,
            statistics: MeanAndVariance {
                mean: 2.0,
                variance: 1.0,
            },
        };
        let values = [value(OutputVariant::Sqrt125Pa, 2.0)];
        let report = JsonReport::new(
            OutputSelection::All,
            3,
            &values,
            Some(&run),
            Some(ElapsedTime::from_seconds(0.25)),
        );

        let mut out = Vec::new();
        write_json(&mut out, &report).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(json["mode"], "monte_carlo");
        assert_eq!(json["monte_carlo"]["samples"], serde_json::json!([1.0, 2.0, 3.0]));
        assert_eq!(json["monte_carlo"]["variance"], 1.0);
        assert_eq!(json["cpu_time_seconds"], 0.25);
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failing_writer_is_io_error() {
        let values = [value(OutputVariant::Linear125Pa, 39.0)];
        let report = JsonReport::new(OutputSelection::All, 1, &values, None, None);

        match write_json(&mut BrokenPipe, &report) {
            Err(CalibrationError::Io { source, .. }) => {
                assert_eq!(source.kind(), io::ErrorKind::BrokenPipe)
            }
            other => panic!("expected I/O error, got {other:?}"),
        }
    }
}
