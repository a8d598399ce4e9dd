//! Input Sampling Backends
//!
//! ## Overview
//!
//! Every iteration of a run asks the backend for one fresh `(Aout, Vdd)` pair.
//! Two backends implement [`InputSampler`]:
//!
//! | Backend            | Value        | Used by                         |
//! |--------------------|--------------|---------------------------------|
//! | [`ScalarSampler`]   | `f64`        | Monte Carlo mode (N iterations) |
//! | [`EnsembleSampler`] | [`Ensemble`] | Distributional mode (1 iteration) |
//!
//! The scalar backend returns one uniform draw per call. The ensemble backend
//! returns a whole particle set, so a single pass through the calibration
//! formulas propagates the full input distribution.
//!
//! ## Reproducibility
//!
//! Both backends wrap a seedable `StdRng`. With a seed, runs are bit-for-bit
//! reproducible on the same platform; without one the generator is seeded
//! from OS entropy.
//!
//! ```rust
//! use sdpcal_core::sampling::{InputBounds, ScalarSampler};
//!
//! let mut sampler = ScalarSampler::seeded(7);
//! let sample = InputBounds::default().draw(&mut sampler);
//! assert!((1.3..=1.7).contains(&sample.aout));
//! assert!((3.5..=3.9).contains(&sample.vdd));
//! ```

mod ensemble;

pub use ensemble::{DistributionSummary, Ensemble, EnsembleSampler};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::calibration::InputSample;
use crate::constants::sampling::{AOUT_HIGH_V, AOUT_LOW_V, VDD_HIGH_V, VDD_LOW_V};
pub use crate::traits::InputSampler;

/// Closed interval a uniform input is drawn from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformBounds {
    /// Lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}

impl UniformBounds {
    /// Interval `[low, high]`
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// Mean of the uniform distribution
    pub fn mean(&self) -> f64 {
        (self.low + self.high) / 2.0
    }
}

/// Distributions of both calibration inputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputBounds {
    /// Analog output voltage (V)
    pub aout: UniformBounds,
    /// Supply voltage (V)
    pub vdd: UniformBounds,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            aout: UniformBounds::new(AOUT_LOW_V, AOUT_HIGH_V),
            vdd: UniformBounds::new(VDD_LOW_V, VDD_HIGH_V),
        }
    }
}

impl InputBounds {
    /// Draw one input pair: `Aout` first, then `Vdd`
    pub fn draw<S: InputSampler>(&self, sampler: &mut S) -> InputSample<S::Value> {
        let aout = sampler.uniform(self.aout.low, self.aout.high);
        let vdd = sampler.uniform(self.vdd.low, self.vdd.high);
        InputSample { aout, vdd }
    }

    /// Input pair at the analytic means
    pub fn means(&self) -> InputSample<f64> {
        InputSample {
            aout: self.aout.mean(),
            vdd: self.vdd.mean(),
        }
    }
}

/// Draw a uniform value, tolerating degenerate `low == high` intervals
pub(crate) fn draw_uniform<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low < high {
        rng.gen_range(low..=high)
    } else {
        low
    }
}

/// Monte Carlo backend: one scalar draw per call
#[derive(Debug, Clone)]
pub struct ScalarSampler {
    rng: StdRng,
}

impl ScalarSampler {
    /// Reproducible sampler
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Sampler seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded if a seed is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl InputSampler for ScalarSampler {
    type Value = f64;

    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        draw_uniform(&mut self.rng, low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_draws_stay_in_bounds() {
        let mut sampler = ScalarSampler::seeded(1);
        for _ in 0..10_000 {
            let value = sampler.uniform(1.3, 1.7);
            assert!((1.3..=1.7).contains(&value));
        }
    }

    #[test]
    fn seeded_samplers_repeat() {
        let mut a = ScalarSampler::seeded(99);
        let mut b = ScalarSampler::seeded(99);
        for _ in 0..100 {
            assert_eq!(a.uniform(0.0, 1.0), b.uniform(0.0, 1.0));
        }
    }

    #[test]
    fn degenerate_interval_returns_bound() {
        let mut sampler = ScalarSampler::seeded(3);
        assert_eq!(sampler.uniform(3.7, 3.7), 3.7);
    }

    #[test]
    fn default_bounds_match_datasheet_ranges() {
        let bounds = InputBounds::default();
        assert_eq!(bounds.aout, UniformBounds::new(1.3, 1.7));
        assert_eq!(bounds.vdd, UniformBounds::new(3.5, 3.9));

        let means = bounds.means();
        assert!((means.aout - 1.5).abs() < 1e-12);
        assert!((means.vdd - 3.7).abs() < 1e-12);
    }
}
