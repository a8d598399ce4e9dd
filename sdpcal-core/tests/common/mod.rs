//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::cell::Cell;
use std::path::Path;
use std::time::Duration;

use sdpcal_core::{run, CalibrationResult, CpuClock, OutputVariant, RunConfig, RunOutcome};

/// Expected value of each curve at the input means (Aout 1.5 V, Vdd 3.7 V)
pub fn expected_at_means(variant: OutputVariant) -> f64 {
    match variant {
        OutputVariant::Linear500Pa => 154.054_054_054_054_06,
        OutputVariant::Linear125Pa => 39.027_027_027_027_02,
        OutputVariant::Sqrt500Pa => -29.361_075_602_629_69,
        OutputVariant::Sqrt125Pa => -7.438_139_152_666_188,
    }
}

/// Clock that advances by a fixed step on every reading
pub struct SteppingClock {
    now: Cell<Duration>,
    step: Duration,
}

impl SteppingClock {
    pub fn new(step: Duration) -> Self {
        Self {
            now: Cell::new(Duration::ZERO),
            step,
        }
    }
}

impl CpuClock for SteppingClock {
    fn now(&self) -> Duration {
        let now = self.now.get();
        self.now.set(now + self.step);
        now
    }
}

/// Config whose auxiliary data file lands in `dir`
pub fn config_in(dir: &Path) -> RunConfig {
    RunConfig::default().with_data_file(dir.join("data.out"))
}

/// Run with a clock stepping `step` per reading and capture stdout
pub fn run_captured(config: &RunConfig, step: Duration) -> (CalibrationResult<RunOutcome>, String) {
    let clock = SteppingClock::new(step);
    let mut out = Vec::new();
    let result = run(config, &clock, &mut out);
    (result, String::from_utf8(out).expect("report is UTF-8"))
}

/// Relative closeness check
pub fn assert_within(actual: f64, expected: f64, relative: f64) {
    let error = ((actual - expected) / expected).abs();
    assert!(
        error <= relative,
        "{actual} differs from {expected} by {:.4}% (allowed {:.4}%)",
        error * 100.0,
        relative * 100.0
    );
}
