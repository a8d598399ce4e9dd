//! Auxiliary Monte Carlo data file
//!
//! Raw samples for downstream analysis tooling. The first line holds the
//! elapsed time in whole microseconds; every following line holds one sample
//! in iteration order.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{CalibrationError, CalibrationResult};

/// Write samples and elapsed microseconds to `path`
pub fn write_monte_carlo_data(path: &Path, samples: &[f64], elapsed_micros: u64) -> CalibrationResult<()> {
    let file = File::create(path).map_err(|e| CalibrationError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    write_data(&mut writer, samples, elapsed_micros).map_err(|e| CalibrationError::io(path, e))
}

fn write_data<W: Write>(out: &mut W, samples: &[f64], elapsed_micros: u64) -> io::Result<()> {
    writeln!(out, "{elapsed_micros}")?;
    for sample in samples {
        writeln!(out, "{sample}")?;
    }
    out.flush()
}

/// Read a file written by [`write_monte_carlo_data`]
///
/// Returns the samples and the elapsed microseconds.
pub fn read_monte_carlo_data(path: &Path) -> CalibrationResult<(Vec<f64>, u64)> {
    let invalid = |what: &str| {
        CalibrationError::io(path, io::Error::new(io::ErrorKind::InvalidData, what.to_string()))
    };

    let file = File::open(path).map_err(|e| CalibrationError::io(path, e))?;
    let mut lines = BufReader::new(file).lines();

    let elapsed: u64 = lines
        .next()
        .ok_or_else(|| invalid("missing elapsed time"))?
        .map_err(|e| CalibrationError::io(path, e))?
        .trim()
        .parse()
        .map_err(|_| invalid("malformed elapsed time"))?;

    let mut samples = Vec::new();
    for line in lines {
        let line = line.map_err(|e| CalibrationError::io(path, e))?;
        let sample: f64 = line.trim().parse().map_err(|_| invalid("malformed sample"))?;
        samples.push(sample);
    }

    Ok((samples, elapsed))
}
