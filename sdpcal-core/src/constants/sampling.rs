//! Input Distribution Bounds and Run Defaults

/// Lower bound of the analog output voltage distribution (V).
pub const AOUT_LOW_V: f64 = 1.3;

/// Upper bound of the analog output voltage distribution (V).
pub const AOUT_HIGH_V: f64 = 1.7;

/// Lower bound of the supply voltage distribution (V).
///
/// Strictly positive, so the ratiometric division never sees zero.
pub const VDD_LOW_V: f64 = 3.5;

/// Upper bound of the supply voltage distribution (V).
pub const VDD_HIGH_V: f64 = 3.9;

/// Iterations when none are requested. Distributional mode needs exactly one.
pub const DEFAULT_ITERATIONS: usize = 1;

/// Particles per distributional value.
pub const DEFAULT_ENSEMBLE_SIZE: usize = 4096;

/// Auxiliary file receiving raw Monte Carlo samples.
pub const DEFAULT_DATA_FILE: &str = "data.out";
