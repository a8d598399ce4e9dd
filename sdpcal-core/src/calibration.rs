//! Differential Pressure Calibration for SDP8x6 Analog Sensors
//!
//! ## Sensor Background
//!
//! The SDP8x6 analog parts report differential pressure as a voltage `Aout`
//! that is *ratiometric* to the supply `Vdd`: halving the supply halves the
//! output. Every calibration curve therefore works on `Aout / Vdd`.
//!
//! Two transfer characteristics are sold, each at two full-scale ranges:
//!
//! ```text
//! Linear:      dP = c1 · Aout / Vdd − c2
//! Square root: dP = sign(Aout/Vdd − k1) · (Aout / (Vdd · k2) − k3)² · k4
//! ```
//!
//! | Variant        | Curve       | Constants                          |
//! |----------------|-------------|------------------------------------|
//! | `Linear500Pa`  | linear      | c1 = 750, c2 = 150                 |
//! | `Linear125Pa`  | linear      | c1 = 190, c2 = 38                  |
//! | `Sqrt500Pa`    | square root | k1 = 0.5, k2 = 0.4, k3 = 1.25, k4 = 525 |
//! | `Sqrt125Pa`    | square root | k1 = 0.5, k2 = 0.4, k3 = 1.25, k4 = 133 |
//!
//! ### The Sign of Zero
//!
//! The square-root curve folds around `Aout/Vdd = 0.5`. Computing the sign as
//! `x / |x|` gives NaN exactly at the fold, so [`sign`] returns `0` there and
//! the curve passes through zero pressure.
//!
//! ### Division by Zero
//!
//! Not trapped. A zero supply propagates as IEEE-754 infinity or NaN; callers
//! whose `Vdd` support includes zero must guard it themselves.
//!
//! ## Usage
//!
//! ```rust
//! use sdpcal_core::calibration::{CalibrationEngine, InputSample, OutputSelection, OutputVariant};
//!
//! let engine = CalibrationEngine::default();
//! let sample = InputSample { aout: 1.5, vdd: 3.7 };
//!
//! let mut table = engine.new_table();
//! let tracked = engine.calibrate(&sample, OutputSelection::All, &mut table);
//!
//! // "All" tracks the last variant in table order
//! assert_eq!(Some(&tracked), table.get(OutputVariant::Sqrt125Pa));
//! assert!(table.is_complete());
//! ```

use core::fmt;
use core::str::FromStr;

use crate::constants::sensors::*;
use crate::errors::CalibrationError;
use crate::traits::Quantity;

/// Sign function with an explicit zero case.
///
/// Returns `0` for `0` (either signed zero) and `x / |x|` otherwise.
#[inline]
pub fn sign(x: f64) -> f64 {
    x.sign()
}

/// One of the four calibration curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OutputVariant {
    /// Linear configuration, 500 Pa full scale
    Linear500Pa,
    /// Linear configuration, 125 Pa full scale
    Linear125Pa,
    /// Square-root configuration, 500 Pa full scale
    Sqrt500Pa,
    /// Square-root configuration, 125 Pa full scale
    Sqrt125Pa,
}

impl OutputVariant {
    /// All variants in table order
    pub const ALL: [OutputVariant; 4] = [
        OutputVariant::Linear500Pa,
        OutputVariant::Linear125Pa,
        OutputVariant::Sqrt500Pa,
        OutputVariant::Sqrt125Pa,
    ];

    /// Position in the output table
    pub const fn index(self) -> usize {
        match self {
            OutputVariant::Linear500Pa => 0,
            OutputVariant::Linear125Pa => 1,
            OutputVariant::Sqrt500Pa => 2,
            OutputVariant::Sqrt125Pa => 3,
        }
    }

    /// Variant at a table position
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-readable name used in every report
    pub const fn display_name(self) -> &'static str {
        match self {
            OutputVariant::Linear500Pa => "Calibrated Sensor Output SDP8x6 Linear 500Pa",
            OutputVariant::Linear125Pa => "Calibrated Sensor Output SDP8x6 Linear 125Pa",
            OutputVariant::Sqrt500Pa => "Calibrated Sensor Output SDP8x6 Square 500Pa",
            OutputVariant::Sqrt125Pa => "Calibrated Sensor Output SDP8x6 Square 125Pa",
        }
    }

    /// Short command-line name
    pub const fn cli_name(self) -> &'static str {
        match self {
            OutputVariant::Linear500Pa => "linear-500pa",
            OutputVariant::Linear125Pa => "linear-125pa",
            OutputVariant::Sqrt500Pa => "sqrt-500pa",
            OutputVariant::Sqrt125Pa => "sqrt-125pa",
        }
    }

    /// Look up a variant by its display name
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.display_name() == name)
    }
}

impl fmt::Display for OutputVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Which variants a run computes and reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputSelection {
    /// Compute every variant
    #[default]
    All,
    /// Compute exactly one variant
    Single(OutputVariant),
}

impl OutputSelection {
    /// Whether this selection computes `variant`
    pub fn includes(self, variant: OutputVariant) -> bool {
        match self {
            OutputSelection::All => true,
            OutputSelection::Single(selected) => selected == variant,
        }
    }

    /// Selected variants in table order
    pub fn variants(self) -> impl Iterator<Item = OutputVariant> {
        OutputVariant::ALL
            .into_iter()
            .filter(move |variant| self.includes(*variant))
    }
}

impl fmt::Display for OutputSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSelection::All => f.write_str("all"),
            OutputSelection::Single(variant) => f.write_str(variant.cli_name()),
        }
    }
}

impl FromStr for OutputSelection {
    type Err = CalibrationError;

    /// Accepts a variant name, `all`, or a table index where 4 means all
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();

        if normalized == "all" {
            return Ok(OutputSelection::All);
        }

        if let Ok(index) = normalized.parse::<usize>() {
            if index == OutputVariant::ALL.len() {
                return Ok(OutputSelection::All);
            }
            return OutputVariant::from_index(index)
                .map(OutputSelection::Single)
                .ok_or_else(|| {
                    CalibrationError::InvalidArgument(format!(
                        "output index {index} out of range 0..={}",
                        OutputVariant::ALL.len()
                    ))
                });
        }

        OutputVariant::ALL
            .into_iter()
            .find(|variant| variant.cli_name() == normalized)
            .map(OutputSelection::Single)
            .ok_or_else(|| CalibrationError::InvalidArgument(format!("unknown output variant '{s}'")))
    }
}

/// Shape and constants of one calibration curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurveCoefficients {
    /// `gain · Aout / Vdd − offset`
    Linear {
        /// Pa per unit ratio
        gain: f64,
        /// Pa
        offset: f64,
    },
    /// `sign(Aout/Vdd − midpoint) · (Aout / (Vdd · scale) − offset)² · gain`
    SquareRoot {
        /// Ratio at zero pressure
        midpoint: f64,
        /// Supply scaling
        scale: f64,
        /// Offset inside the square
        offset: f64,
        /// Pa
        gain: f64,
    },
}

impl CurveCoefficients {
    /// Evaluate the curve for one input pair
    pub fn evaluate<V: Quantity>(&self, aout: &V, vdd: &V) -> V {
        match *self {
            CurveCoefficients::Linear { gain, offset } => {
                (aout.clone() * gain) / vdd.clone() - offset
            }
            CurveCoefficients::SquareRoot {
                midpoint,
                scale,
                offset,
                gain,
            } => {
                let direction = (aout.clone() / vdd.clone() - midpoint).sign();
                let magnitude = (aout.clone() / (vdd.clone() * scale) - offset).powi(2);
                direction * magnitude * gain
            }
        }
    }
}

/// The four curves, indexed by [`OutputVariant::index`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationTable {
    curves: [CurveCoefficients; 4],
}

impl CalibrationTable {
    /// Datasheet constants (SDP8xx Analog Datasheet, 2024-07-03)
    pub const DATASHEET: CalibrationTable = CalibrationTable {
        curves: [
            CurveCoefficients::Linear {
                gain: LINEAR_500PA_GAIN,
                offset: LINEAR_500PA_OFFSET,
            },
            CurveCoefficients::Linear {
                gain: LINEAR_125PA_GAIN,
                offset: LINEAR_125PA_OFFSET,
            },
            CurveCoefficients::SquareRoot {
                midpoint: SQRT_RATIO_MIDPOINT,
                scale: SQRT_SUPPLY_SCALE,
                offset: SQRT_OFFSET,
                gain: SQRT_500PA_GAIN,
            },
            CurveCoefficients::SquareRoot {
                midpoint: SQRT_RATIO_MIDPOINT,
                scale: SQRT_SUPPLY_SCALE,
                offset: SQRT_OFFSET,
                gain: SQRT_125PA_GAIN,
            },
        ],
    };

    /// Coefficients for one variant
    pub fn curve(&self, variant: OutputVariant) -> &CurveCoefficients {
        &self.curves[variant.index()]
    }
}

impl Default for CalibrationTable {
    fn default() -> Self {
        Self::DATASHEET
    }
}

/// One `(Aout, Vdd)` draw
#[derive(Debug, Clone, PartialEq)]
pub struct InputSample<V> {
    /// Analog output voltage (V)
    pub aout: V,
    /// Supply voltage (V)
    pub vdd: V,
}

/// Calibrated values, one slot per variant
///
/// Slots for variants outside the selection stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTable<V> {
    slots: [Option<V>; 4],
}

impl<V> OutputTable<V> {
    /// Empty table
    pub fn new() -> Self {
        Self {
            slots: [None, None, None, None],
        }
    }

    /// Value for one variant, if computed
    pub fn get(&self, variant: OutputVariant) -> Option<&V> {
        self.slots[variant.index()].as_ref()
    }

    /// Store a value
    pub fn set(&mut self, variant: OutputVariant, value: V) {
        self.slots[variant.index()] = Some(value);
    }

    /// Populated entries in table order
    pub fn iter(&self) -> impl Iterator<Item = (OutputVariant, &V)> {
        OutputVariant::ALL
            .into_iter()
            .filter_map(move |variant| self.get(variant).map(|value| (variant, value)))
    }

    /// Number of populated entries
    pub fn populated(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether every variant has a value
    pub fn is_complete(&self) -> bool {
        self.populated() == self.slots.len()
    }
}

impl<V> Default for OutputTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Stateless evaluator for the calibration curves
#[derive(Debug, Clone, Default)]
pub struct CalibrationEngine {
    table: CalibrationTable,
}

impl CalibrationEngine {
    /// Engine over a custom coefficient table
    pub fn new(table: CalibrationTable) -> Self {
        Self { table }
    }

    /// Coefficient table in use
    pub fn table(&self) -> &CalibrationTable {
        &self.table
    }

    /// Fresh output table sized for this engine
    pub fn new_table<V>(&self) -> OutputTable<V> {
        OutputTable::new()
    }

    /// Evaluate a single variant
    pub fn evaluate<V: Quantity>(&self, variant: OutputVariant, sample: &InputSample<V>) -> V {
        self.table.curve(variant).evaluate(&sample.aout, &sample.vdd)
    }

    /// Evaluate every selected variant into `outputs`.
    ///
    /// Returns the value of the last variant computed in table order. For
    /// [`OutputSelection::All`] that is always `Sqrt125Pa`; callers wanting a
    /// particular variant should read it from `outputs`.
    pub fn calibrate<V: Quantity>(
        &self,
        sample: &InputSample<V>,
        selection: OutputSelection,
        outputs: &mut OutputTable<V>,
    ) -> V {
        let (leading, last): (&[OutputVariant], OutputVariant) = match selection {
            OutputSelection::All => (&OutputVariant::ALL[..3], OutputVariant::Sqrt125Pa),
            OutputSelection::Single(variant) => (&[], variant),
        };

        for &variant in leading {
            outputs.set(variant, self.evaluate(variant, sample));
        }

        let value = self.evaluate(last, sample);
        outputs.set(last, value.clone());
        value
    }
}
