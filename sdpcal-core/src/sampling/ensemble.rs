//! Particle-ensemble distributional values
//!
//! An [`Ensemble`] represents a random variable by a fixed number of
//! particles. Arithmetic is particle-wise, so `a / b` pairs particle `i` of
//! `a` with particle `i` of `b`. Inputs drawn independently by the same
//! [`EnsembleSampler`] therefore combine as independent random variables, and
//! an expression evaluated once yields the distribution of its result.
//!
//! All ensembles produced by one sampler share the same particle count.
//! Combining ensembles of different sizes truncates to the shorter one.

use core::ops::{Add, Div, Mul, Sub};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::stats;
use crate::traits::{InputSampler, Quantity};

use super::draw_uniform;

/// Distribution carried as equally weighted particles
#[derive(Debug, Clone, PartialEq)]
pub struct Ensemble {
    particles: Vec<f64>,
}

/// Summary statistics of a distributional value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DistributionSummary {
    /// Expected value
    pub mean: f64,
    /// Standard deviation
    pub std_dev: f64,
    /// 5th percentile
    pub p05: f64,
    /// 95th percentile
    pub p95: f64,
    /// Probability of a negative reading
    pub prob_negative: f64,
}

impl Ensemble {
    /// Ensemble from explicit particles
    pub fn from_particles(particles: Vec<f64>) -> Self {
        Self { particles }
    }

    /// Every particle equal to `value`
    pub fn constant(value: f64, size: usize) -> Self {
        Self {
            particles: vec![value; size],
        }
    }

    /// Particles in draw order
    pub fn particles(&self) -> &[f64] {
        &self.particles
    }

    /// Number of particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the ensemble has no particles
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Expected value
    pub fn mean(&self) -> f64 {
        stats::mean_and_variance(&self.particles).mean
    }

    /// Mean, spread, tails and sign probability
    pub fn summary(&self) -> DistributionSummary {
        let moments = stats::mean_and_variance(&self.particles);

        let mut sorted = self.particles.clone();
        sorted.sort_by(f64::total_cmp);

        DistributionSummary {
            mean: moments.mean,
            std_dev: moments.std_dev(),
            p05: stats::quantile(&sorted, 0.05),
            p95: stats::quantile(&sorted, 0.95),
            prob_negative: stats::fraction_below(&self.particles, 0.0),
        }
    }

    fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        for particle in &mut self.particles {
            *particle = f(*particle);
        }
        self
    }

    fn zip_with(self, rhs: Ensemble, f: impl Fn(f64, f64) -> f64) -> Self {
        let particles = self
            .particles
            .into_iter()
            .zip(rhs.particles)
            .map(|(a, b)| f(a, b))
            .collect();
        Self { particles }
    }
}

impl Add<f64> for Ensemble {
    type Output = Ensemble;

    fn add(self, rhs: f64) -> Ensemble {
        self.map(|x| x + rhs)
    }
}

impl Sub<f64> for Ensemble {
    type Output = Ensemble;

    fn sub(self, rhs: f64) -> Ensemble {
        self.map(|x| x - rhs)
    }
}

impl Mul<f64> for Ensemble {
    type Output = Ensemble;

    fn mul(self, rhs: f64) -> Ensemble {
        self.map(|x| x * rhs)
    }
}

impl Div<f64> for Ensemble {
    type Output = Ensemble;

    fn div(self, rhs: f64) -> Ensemble {
        self.map(|x| x / rhs)
    }
}

impl Mul for Ensemble {
    type Output = Ensemble;

    fn mul(self, rhs: Ensemble) -> Ensemble {
        self.zip_with(rhs, |a, b| a * b)
    }
}

impl Div for Ensemble {
    type Output = Ensemble;

    fn div(self, rhs: Ensemble) -> Ensemble {
        self.zip_with(rhs, |a, b| a / b)
    }
}

impl Quantity for Ensemble {
    fn sign(&self) -> Self {
        self.clone().map(|x| x.sign())
    }

    fn powi(&self, exponent: i32) -> Self {
        self.clone().map(|x| Quantity::powi(&x, exponent))
    }

    fn point(&self) -> f64 {
        self.mean()
    }

    fn distribution_summary(&self) -> Option<DistributionSummary> {
        Some(self.summary())
    }
}

/// Distributional backend: each call yields a fresh particle set
#[derive(Debug, Clone)]
pub struct EnsembleSampler {
    rng: StdRng,
    size: usize,
}

impl EnsembleSampler {
    /// Sampler producing `size` particles per value
    pub fn new(size: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, size }
    }

    /// Particles per value
    pub fn size(&self) -> usize {
        self.size
    }
}

impl InputSampler for EnsembleSampler {
    type Value = Ensemble;

    fn uniform(&mut self, low: f64, high: f64) -> Ensemble {
        let particles = (0..self.size)
            .map(|_| draw_uniform(&mut self.rng, low, high))
            .collect();
        Ensemble { particles }
    }
}
