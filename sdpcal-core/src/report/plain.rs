//! Human-readable report

use std::io::{self, Write};

use crate::time::ElapsedTime;

use super::ReportedValue;

/// Write one block per value, then the timing line if `elapsed` is given
pub fn write_plain<W: Write>(
    out: &mut W,
    values: &[ReportedValue],
    elapsed: Option<ElapsedTime>,
) -> io::Result<()> {
    for value in values {
        writeln!(out, "{}: {:.6}", value.variant.display_name(), value.value)?;

        if let Some(dist) = &value.distribution {
            writeln!(
                out,
                "    std dev: {:.6}, 90% interval: [{:.6}, {:.6}], Pr(dP < 0 Pa): {:.6}",
                dist.std_dev, dist.p05, dist.p95, dist.prob_negative
            )?;
        }
    }

    if let Some(elapsed) = elapsed {
        writeln!(out, "\nCPU time used: {:.6} seconds", elapsed.seconds())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::OutputVariant;
    use crate::sampling::DistributionSummary;

    #[test]
    fn scalar_block() {
        let values = [ReportedValue {
            variant: OutputVariant::Linear125Pa,
            value: 39.027_027,
            distribution: None,
        }];
        let mut out = Vec::new();
        write_plain(&mut out, &values, None).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Calibrated Sensor Output SDP8x6 Linear 125Pa: 39.027027\n"
        );
    }

    #[test]
    fn distribution_block_and_timing() {
        let values = [ReportedValue {
            variant: OutputVariant::Sqrt500Pa,
            value: -29.5,
            distribution: Some(DistributionSummary {
                mean: -29.5,
                std_dev: 8.25,
                p05: -45.0,
                p95: -16.5,
                prob_negative: 1.0,
            }),
        }];
        let mut out = Vec::new();
        write_plain(&mut out, &values, Some(ElapsedTime::from_seconds(0.5))).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Calibrated Sensor Output SDP8x6 Square 500Pa: -29.500000");
        assert_eq!(
            lines[1],
            "    std dev: 8.250000, 90% interval: [-45.000000, -16.500000], Pr(dP < 0 Pa): 1.000000"
        );
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "CPU time used: 0.500000 seconds");
    }
}
