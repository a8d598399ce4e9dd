//! Constants for the SDP8x6 Calibration Pipeline
//!
//! Every numeric literal the pipeline depends on lives here, with its unit
//! and its source.
//!
//! ## Organization
//!
//! - **Sensors**: Datasheet calibration coefficients for each output curve
//! - **Sampling**: Input distribution bounds and run defaults
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Reference the datasheet page when adding coefficients
//! 3. Use descriptive names that include units

/// Calibration coefficients from the SDP8xx analog datasheet.
pub mod sensors;

/// Input distribution bounds and execution defaults.
pub mod sampling;

pub use sensors::{
    LINEAR_500PA_GAIN, LINEAR_500PA_OFFSET,
    LINEAR_125PA_GAIN, LINEAR_125PA_OFFSET,
    SQRT_RATIO_MIDPOINT, SQRT_SUPPLY_SCALE, SQRT_OFFSET,
    SQRT_500PA_GAIN, SQRT_125PA_GAIN,
};

pub use sampling::{
    AOUT_LOW_V, AOUT_HIGH_V, VDD_LOW_V, VDD_HIGH_V,
    DEFAULT_ITERATIONS, DEFAULT_ENSEMBLE_SIZE, DEFAULT_DATA_FILE,
};
