//! Sensor Calibration Coefficients
//!
//! Transfer-function constants for the Sensirion SDP8x6 analog differential
//! pressure sensors. The analog output is ratiometric: every curve depends on
//! `Aout / Vdd`, never on either voltage alone.
//!
//! Source: SDP8xx Analog Datasheet, 2024-07-03, page 4.

// ===== LINEAR CONFIGURATION =====
//
// dP = gain · Aout / Vdd − offset

/// Linear curve gain for the 500 Pa full-scale part (Pa).
pub const LINEAR_500PA_GAIN: f64 = 750.0;

/// Linear curve offset for the 500 Pa full-scale part (Pa).
pub const LINEAR_500PA_OFFSET: f64 = 150.0;

/// Linear curve gain for the 125 Pa full-scale part (Pa).
pub const LINEAR_125PA_GAIN: f64 = 190.0;

/// Linear curve offset for the 125 Pa full-scale part (Pa).
pub const LINEAR_125PA_OFFSET: f64 = 38.0;

// ===== SQUARE-ROOT CONFIGURATION =====
//
// dP = sign(Aout/Vdd − midpoint) · (Aout / (Vdd · scale) − offset)² · gain
//
// Midpoint, scale and offset are shared between both full-scale ranges.

/// Ratiometric output at zero differential pressure (dimensionless).
pub const SQRT_RATIO_MIDPOINT: f64 = 0.5;

/// Supply scaling of the square-root curve (dimensionless).
pub const SQRT_SUPPLY_SCALE: f64 = 0.4;

/// Offset inside the squared term (dimensionless).
pub const SQRT_OFFSET: f64 = 1.25;

/// Square-root curve gain for the 500 Pa full-scale part (Pa).
pub const SQRT_500PA_GAIN: f64 = 525.0;

/// Square-root curve gain for the 125 Pa full-scale part (Pa).
pub const SQRT_125PA_GAIN: f64 = 133.0;
