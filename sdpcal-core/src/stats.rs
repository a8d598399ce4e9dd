//! Sample statistics
//!
//! Reductions used after the Monte Carlo loop and when summarizing a
//! distributional value. The running (Welford) update stays accurate far
//! from zero and never produces a negative variance.

use serde::Serialize;

/// Mean and unbiased variance of a sample set
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeanAndVariance {
    /// Arithmetic mean
    pub mean: f64,
    /// Unbiased (n − 1) sample variance, `0` for fewer than two samples
    pub variance: f64,
}

impl MeanAndVariance {
    /// Square root of the variance
    pub fn std_dev(&self) -> f64 {
        libm::sqrt(self.variance)
    }
}

/// Mean and variance in one pass (Welford's update).
///
/// Constant input yields exactly zero variance. An empty slice yields a NaN
/// mean and zero variance.
pub fn mean_and_variance(samples: &[f64]) -> MeanAndVariance {
    if samples.is_empty() {
        return MeanAndVariance {
            mean: f64::NAN,
            variance: 0.0,
        };
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (k, &x) in samples.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (k + 1) as f64;
        m2 += delta * (x - mean);
    }

    let n = samples.len();
    let variance = if n > 1 { m2 / (n - 1) as f64 } else { 0.0 };

    MeanAndVariance { mean, variance }
}

/// Quantile of an ascending-sorted slice using linear interpolation.
///
/// `q` is clamped to `[0, 1]`. Returns NaN for an empty slice.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }

    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let lower = libm::floor(position) as usize;
    let upper = libm::ceil(position) as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Fraction of samples strictly below `threshold`
pub fn fraction_below(samples: &[f64], threshold: f64) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }

    let below = samples.iter().filter(|&&x| x < threshold).count();
    below as f64 / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_and_variance_basic() {
        let stats = mean_and_variance(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.mean - 5.0).abs() < 1e-12);
        // Sum of squared deviations is 32 over 7 degrees of freedom
        assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn single_sample_has_zero_variance() {
        let stats = mean_and_variance(&[3.5]);
        assert_eq!(stats.mean, 3.5);
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn constant_samples_have_exactly_zero_variance() {
        for value in [39.027_027_027_027_02, -7.438_139_152_666_188, 0.1] {
            let stats = mean_and_variance(&[value; 10]);
            assert_eq!(stats.mean, value);
            assert_eq!(stats.variance, 0.0);
        }
    }

    #[test]
    fn empty_samples() {
        let stats = mean_and_variance(&[]);
        assert!(stats.mean.is_nan());
        assert_eq!(stats.variance, 0.0);
    }

    #[test]
    fn variance_stable_far_from_zero() {
        let samples: Vec<f64> = (0..1000).map(|i| 1e9 + (i % 2) as f64).collect();
        let stats = mean_and_variance(&samples);
        assert!(stats.variance > 0.0);
        assert!((stats.variance - 0.25025).abs() < 1e-3);
    }

    #[test]
    fn quantile_interpolates() {
        let sorted = [0.0, 10.0, 20.0, 30.0, 40.0];
        assert_eq!(quantile(&sorted, 0.0), 0.0);
        assert_eq!(quantile(&sorted, 0.5), 20.0);
        assert_eq!(quantile(&sorted, 1.0), 40.0);
        assert!((quantile(&sorted, 0.125) - 5.0).abs() < 1e-12);
        assert!(quantile(&[], 0.5).is_nan());
    }

    #[test]
    fn fraction_below_threshold() {
        assert_eq!(fraction_below(&[-1.0, -0.5, 0.0, 2.0], 0.0), 0.5);
    }
}
