//! Core traits for the calibration pipeline
//!
//! Two seams keep the formulas independent of how uncertainty is represented:
//! [`Quantity`] is the arithmetic a calibration curve needs, and
//! [`InputSampler`] is the backend that produces fresh input values.
//! Keep them small - the formulas only need a handful of operations.

use core::ops::{Add, Div, Mul, Sub};

use crate::sampling::DistributionSummary;

/// A real value that may carry uncertainty.
///
/// Implemented for plain `f64` (one Monte Carlo draw) and for
/// [`Ensemble`](crate::sampling::Ensemble) (a whole distribution). The
/// calibration formulas are written once against this trait.
pub trait Quantity:
    Clone
    + Add<f64, Output = Self>
    + Sub<f64, Output = Self>
    + Mul<f64, Output = Self>
    + Div<f64, Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// Sign with an explicit zero: `0` at `0`, otherwise `±1`.
    ///
    /// NaN stays NaN.
    fn sign(&self) -> Self;

    /// Integer power
    fn powi(&self, exponent: i32) -> Self;

    /// Single representative value (the value itself, or the mean)
    fn point(&self) -> f64;

    /// Spread and tail statistics, for values that carry a distribution
    fn distribution_summary(&self) -> Option<DistributionSummary> {
        None
    }
}

impl Quantity for f64 {
    fn sign(&self) -> Self {
        if *self == 0.0 {
            return 0.0;
        }

        *self / libm::fabs(*self)
    }

    fn powi(&self, exponent: i32) -> Self {
        libm::pow(*self, f64::from(exponent))
    }

    fn point(&self) -> f64 {
        *self
    }
}

/// Source of input values for one calibration step.
///
/// This is the uncertainty-tracking backend: each call returns a fresh
/// uniform draw over `[low, high]`, either as one scalar sample or as a full
/// distributional value.
pub trait InputSampler {
    /// Value type produced by this backend
    type Value: Quantity;

    /// Draw a value uniformly distributed over `[low, high]`
    fn uniform(&mut self, low: f64, high: f64) -> Self::Value;
}

impl<S: InputSampler + ?Sized> InputSampler for &mut S {
    type Value = S::Value;

    fn uniform(&mut self, low: f64, high: f64) -> Self::Value {
        (**self).uniform(low, high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_sign_has_explicit_zero() {
        assert_eq!(0.0f64.sign(), 0.0);
        assert_eq!((-0.0f64).sign(), 0.0);
        assert_eq!(3.2f64.sign(), 1.0);
        assert_eq!((-0.001f64).sign(), -1.0);
    }

    #[test]
    fn scalar_sign_propagates_nan() {
        assert!(f64::NAN.sign().is_nan());
    }

    #[test]
    fn scalar_powi() {
        assert_eq!(3.0f64.powi(2), 9.0);
        assert_eq!((-0.5f64).powi(2), 0.25);
    }

    #[test]
    fn scalar_is_its_own_point() {
        assert_eq!(1.25f64.point(), 1.25);
        assert!(1.25f64.distribution_summary().is_none());
    }
}
