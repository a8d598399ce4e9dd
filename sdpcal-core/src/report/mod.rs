//! Result Reporting
//!
//! ## Output Formats
//!
//! | Mode      | Destination | Content                                      |
//! |-----------|-------------|----------------------------------------------|
//! | Benchmark | stdout      | `<value> <microseconds>` on one line         |
//! | JSON      | stdout      | selection, per-variant table, Monte Carlo data |
//! | Plain     | stdout      | one block per reported variant, timing line  |
//! | CSV       | file        | one row per reported variant                 |
//!
//! In Monte Carlo mode the raw samples are additionally written to an
//! auxiliary data file ([`datafile`]) whatever the report mode.
//!
//! ## Which Values Are Reported
//!
//! With a single selected variant the reported value is the run's calibrated
//! output: the Monte Carlo mean, or the distribution itself. With all variants
//! selected every populated table entry is reported as computed in the final
//! iteration.

pub mod csv;
pub mod datafile;
pub mod json;
pub mod plain;

use std::io::Write;

use crate::aggregator::Aggregate;
use crate::calibration::{OutputSelection, OutputVariant};
use crate::sampling::DistributionSummary;
use crate::time::ElapsedTime;
use crate::traits::Quantity;

pub use self::csv::{read_output_csv, write_output_csv, CsvRow};
pub use self::datafile::{read_monte_carlo_data, write_monte_carlo_data};
pub use self::json::{write_json, JsonReport};
pub use self::plain::write_plain;

/// One reported variant, reduced to numbers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportedValue {
    /// Which curve
    pub variant: OutputVariant,
    /// Calibrated value (mean for distributions)
    pub value: f64,
    /// Present when the value is a full distribution
    pub distribution: Option<DistributionSummary>,
}

/// Values to report for a finished run, in table order
pub fn reported_values<V: Quantity>(
    selection: OutputSelection,
    aggregate: &Aggregate<V>,
) -> Vec<ReportedValue> {
    match selection {
        OutputSelection::Single(variant) => vec![ReportedValue {
            variant,
            value: aggregate.calibrated_output(),
            distribution: aggregate.tracked.distribution_summary(),
        }],
        OutputSelection::All => aggregate
            .outputs
            .iter()
            .map(|(variant, value)| ReportedValue {
                variant,
                value: value.point(),
                distribution: value.distribution_summary(),
            })
            .collect(),
    }
}

/// Format the benchmark line: value, then truncated microseconds
pub fn benchmark_line(value: f64, elapsed: ElapsedTime) -> String {
    format!("{:.6} {}\n", value, elapsed.micros())
}

/// Write the benchmark line
pub fn write_benchmark<W: Write>(out: &mut W, value: f64, elapsed: ElapsedTime) -> std::io::Result<()> {
    out.write_all(benchmark_line(value, elapsed).as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::SampleAggregator;
    use crate::calibration::CalibrationEngine;
    use crate::sampling::{EnsembleSampler, ScalarSampler};

    #[test]
    fn benchmark_line_format() {
        let line = benchmark_line(-29.361_075_6, ElapsedTime::from_seconds(0.001_234_9));
        assert_eq!(line, "-29.361076 1234\n");
    }

    #[test]
    fn all_selection_reports_every_variant() {
        let engine = CalibrationEngine::default();
        let aggregate = SampleAggregator::new(&engine, OutputSelection::All, 1)
            .unwrap()
            .run(&mut ScalarSampler::seeded(1))
            .unwrap();

        let values = reported_values(OutputSelection::All, &aggregate);
        let variants: Vec<_> = values.iter().map(|v| v.variant).collect();
        assert_eq!(variants, OutputVariant::ALL.to_vec());
        assert!(values.iter().all(|v| v.distribution.is_none()));
    }

    #[test]
    fn single_monte_carlo_selection_reports_mean() {
        let engine = CalibrationEngine::default();
        let selection = OutputSelection::Single(OutputVariant::Linear500Pa);
        let aggregate = SampleAggregator::new(&engine, selection, 500)
            .unwrap()
            .with_monte_carlo(true)
            .run(&mut ScalarSampler::seeded(1))
            .unwrap();

        let values = reported_values(selection, &aggregate);
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].value, aggregate.monte_carlo.as_ref().unwrap().statistics.mean);
    }

    #[test]
    fn distributional_values_carry_summary() {
        let engine = CalibrationEngine::default();
        let selection = OutputSelection::Single(OutputVariant::Sqrt500Pa);
        let aggregate = SampleAggregator::new(&engine, selection, 1)
            .unwrap()
            .run(&mut EnsembleSampler::new(128, Some(1)))
            .unwrap();

        let values = reported_values(selection, &aggregate);
        let summary = values[0].distribution.unwrap();
        assert_eq!(summary.mean, values[0].value);
        assert!(summary.p05 <= summary.p95);
    }
}
