//! CSV output table
//!
//! One line per reported variant, no header:
//!
//! ```csv
//! Calibrated Sensor Output SDP8x6 Linear 500Pa,154.05405405405406
//! Calibrated Sensor Output SDP8x6 Square 500Pa,-29.4,8.2,-45.1,-16.3,1
//! ```
//!
//! Scalar values have two columns. Distributional values append standard
//! deviation, 5th and 95th percentiles and the probability of a negative
//! reading. Numbers use Rust's shortest round-trip formatting so a read-back
//! reproduces the written values exactly.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{CalibrationError, CalibrationResult};

use super::ReportedValue;

/// A parsed CSV line
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    /// Variant display name
    pub name: String,
    /// Calibrated value
    pub value: f64,
    /// Distribution columns, empty for scalars
    pub extra: Vec<f64>,
}

/// Format one reported value as a CSV line (without newline)
pub fn format_row(value: &ReportedValue) -> String {
    let mut line = format!("{},{}", value.variant.display_name(), value.value);
    if let Some(dist) = &value.distribution {
        line.push_str(&format!(
            ",{},{},{},{}",
            dist.std_dev, dist.p05, dist.p95, dist.prob_negative
        ));
    }
    line
}

/// Write the output table to any writer
pub fn write_rows<W: Write>(out: &mut W, values: &[ReportedValue]) -> io::Result<()> {
    for value in values {
        writeln!(out, "{}", format_row(value))?;
    }
    out.flush()
}

/// Write the output table to `path`, truncating any existing file
pub fn write_output_csv(path: &Path, values: &[ReportedValue]) -> CalibrationResult<()> {
    let file = File::create(path).map_err(|e| CalibrationError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    write_rows(&mut writer, values).map_err(|e| CalibrationError::io(path, e))
}

/// Read a table written by [`write_output_csv`]
pub fn read_output_csv(path: &Path) -> CalibrationResult<Vec<CsvRow>> {
    let file = File::open(path).map_err(|e| CalibrationError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut rows = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CalibrationError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(&line).ok_or_else(|| {
            CalibrationError::io(
                path,
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("malformed CSV at line {}", line_no + 1),
                ),
            )
        })?);
    }

    Ok(rows)
}

fn parse_row(line: &str) -> Option<CsvRow> {
    let mut fields = line.split(',');
    let name = fields.next()?.to_string();
    let value = fields.next()?.trim().parse().ok()?;
    let extra = fields
        .map(|f| f.trim().parse())
        .collect::<Result<Vec<f64>, _>>()
        .ok()?;

    Some(CsvRow { name, value, extra })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::OutputVariant;
    use crate::sampling::DistributionSummary;

    #[test]
    fn scalar_row() {
        let row = format_row(&ReportedValue {
            variant: OutputVariant::Linear500Pa,
            value: 154.5,
            distribution: None,
        });
        assert_eq!(row, "Calibrated Sensor Output SDP8x6 Linear 500Pa,154.5");
    }

    #[test]
    fn distribution_row_has_extra_columns() {
        let row = format_row(&ReportedValue {
            variant: OutputVariant::Sqrt125Pa,
            value: -7.5,
            distribution: Some(DistributionSummary {
                mean: -7.5,
                std_dev: 2.0,
                p05: -11.0,
                p95: -4.25,
                prob_negative: 1.0,
            }),
        });
        assert_eq!(row, "Calibrated Sensor Output SDP8x6 Square 125Pa,-7.5,2,-11,-4.25,1");

        let parsed = parse_row(&row).unwrap();
        assert_eq!(parsed.value, -7.5);
        assert_eq!(parsed.extra, vec![2.0, -11.0, -4.25, 1.0]);
    }

    #[test]
    fn malformed_rows_rejected() {
        assert!(parse_row("only-a-name").is_none());
        assert!(parse_row("name,not-a-number").is_none());
        assert!(parse_row("name,1.0,bad").is_none());
    }

    #[test]
    fn unwritable_path_is_io_error() {
        let result = write_output_csv(Path::new("/nonexistent-dir/out.csv"), &[]);
        assert!(matches!(result, Err(CalibrationError::Io { .. })));
    }
}
