//! Algebraic properties of the calibration curves

use proptest::prelude::*;
use sdpcal_core::calibration::sign;
use sdpcal_core::constants::{AOUT_HIGH_V, AOUT_LOW_V, VDD_HIGH_V, VDD_LOW_V};
use sdpcal_core::{CalibrationEngine, InputSample, OutputSelection, OutputVariant};

fn in_range_sample() -> impl Strategy<Value = InputSample<f64>> {
    (AOUT_LOW_V..=AOUT_HIGH_V, VDD_LOW_V..=VDD_HIGH_V).prop_map(|(aout, vdd)| InputSample { aout, vdd })
}

proptest! {
    #[test]
    fn sign_recovers_value(x in prop::num::f64::NORMAL) {
        prop_assert_eq!(sign(x) * x.abs(), x);
    }

    #[test]
    fn linear_curves_follow_formula(sample in in_range_sample()) {
        let engine = CalibrationEngine::default();
        let ratio = sample.aout / sample.vdd;

        let linear_500: f64 = engine.evaluate(OutputVariant::Linear500Pa, &sample);
        let linear_125: f64 = engine.evaluate(OutputVariant::Linear125Pa, &sample);

        prop_assert!((linear_500 - (ratio * 750.0 - 150.0)).abs() < 1e-9);
        prop_assert!((linear_125 - (ratio * 190.0 - 38.0)).abs() < 1e-9);
    }

    #[test]
    fn square_root_curves_negative_below_fold(sample in in_range_sample()) {
        let engine = CalibrationEngine::default();

        let sqrt_500: f64 = engine.evaluate(OutputVariant::Sqrt500Pa, &sample);
        let sqrt_125: f64 = engine.evaluate(OutputVariant::Sqrt125Pa, &sample);

        prop_assert!(sqrt_500 < 0.0);
        prop_assert!(sqrt_125 < 0.0);
        // Same shape, different gain
        prop_assert!((sqrt_500 / sqrt_125 - 525.0 / 133.0).abs() < 1e-9);
    }

    #[test]
    fn selection_populates_expected_slots(index in 0usize..=4, sample in in_range_sample()) {
        let engine = CalibrationEngine::default();
        let selection: OutputSelection = index.to_string().parse().unwrap();
        let mut outputs = engine.new_table();

        let last: f64 = engine.calibrate(&sample, selection, &mut outputs);

        match selection {
            OutputSelection::All => {
                prop_assert!(outputs.is_complete());
                prop_assert_eq!(Some(&last), outputs.get(OutputVariant::Sqrt125Pa));
            }
            OutputSelection::Single(variant) => {
                prop_assert_eq!(variant.index(), index);
                prop_assert_eq!(outputs.populated(), 1);
                prop_assert_eq!(Some(&last), outputs.get(variant));
            }
        }
    }
}

#[test]
fn sign_of_zero_is_zero() {
    assert_eq!(sign(0.0), 0.0);
    assert_eq!(sign(-0.0), 0.0);
}
