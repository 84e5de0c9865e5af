//! First-order autoregressive model, ARIMA(1, 0, 0)
//!
//! The series is modeled as `y_t - μ = φ (y_{t-1} - μ) + ε_t` with
//! `ε_t ~ N(0, σ²)`. Parameters are fitted by exact Gaussian maximum
//! likelihood: the first observation is drawn from the stationary
//! distribution `N(μ, σ² / (1 - φ²))`. For a fixed `φ` both `μ` (by GLS) and
//! `σ²` have closed forms, so the likelihood is concentrated onto `φ` alone
//! and maximized over the stationary interval with a grid search followed by
//! golden-section refinement.

use serde::Serialize;
use thiserror::Error;

/// Largest |φ| considered; keeps the model strictly stationary
const PHI_BOUND: f64 = 0.99;

/// Grid spacing for the coarse φ search
const GRID_STEP: f64 = 0.01;

/// Golden-section stopping width
const TOLERANCE: f64 = 1e-10;

const MAX_ITERATIONS: usize = 200;

/// Minimum observations for a fit (two lagged pairs)
pub const MIN_OBSERVATIONS: usize = 3;

/// Why a series could not be modeled
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("insufficient data: need {needed} observations, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("series contains non-finite values")]
    NonFinite,

    #[error("series is constant; autoregression is not identifiable")]
    ConstantSeries,

    #[error("likelihood maximization did not converge")]
    DidNotConverge,

    #[error("projection produced non-finite values")]
    NonFiniteForecast,
}

/// A fitted AR(1) model
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Ar1Model {
    /// Process mean μ
    mean: f64,
    /// Autoregressive coefficient φ
    phi: f64,
    /// Innovation variance σ²
    sigma2: f64,
    log_likelihood: f64,
    /// Last observed value, the starting point for projection
    last: f64,
    observations: usize,
}

impl Ar1Model {
    /// Fit the model to a series, oldest value first
    pub fn fit(series: &[f64]) -> Result<Self, ModelError> {
        let n = series.len();
        if n < MIN_OBSERVATIONS {
            return Err(ModelError::InsufficientData {
                needed: MIN_OBSERVATIONS,
                got: n,
            });
        }
        if series.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::NonFinite);
        }

        let sample_mean = running_mean(series);
        let (min, max) = series
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        if max - min <= 1e-9 * sample_mean.abs().max(1.0) {
            return Err(ModelError::ConstantSeries);
        }

        let objective = |phi: f64| {
            concentrated(series, phi)
                .map(|c| c.neg_log_likelihood)
                .unwrap_or(f64::INFINITY)
        };

        // Coarse grid over the stationary interval
        let steps = (2.0 * PHI_BOUND / GRID_STEP).round() as usize;
        let (grid_phi, grid_value) = (0..=steps)
            .map(|i| -PHI_BOUND + i as f64 * GRID_STEP)
            .map(|phi| (phi, objective(phi)))
            .fold((0.0, f64::INFINITY), |best, candidate| {
                if candidate.1 < best.1 {
                    candidate
                } else {
                    best
                }
            });
        if !grid_value.is_finite() {
            return Err(ModelError::DidNotConverge);
        }

        let lo = (grid_phi - GRID_STEP).max(-PHI_BOUND);
        let hi = (grid_phi + GRID_STEP).min(PHI_BOUND);
        let refined = golden_section_min(&objective, lo, hi);
        let phi = if objective(refined) <= grid_value {
            refined
        } else {
            grid_phi
        };

        let fit = concentrated(series, phi).ok_or(ModelError::DidNotConverge)?;
        let sigma2 = fit.sum_of_squares / n as f64;
        let constant = (2.0 * std::f64::consts::PI).ln() + 1.0;
        let log_likelihood = -0.5 * n as f64 * constant - fit.neg_log_likelihood;

        if !(fit.mean.is_finite() && sigma2.is_finite() && log_likelihood.is_finite()) {
            return Err(ModelError::DidNotConverge);
        }

        Ok(Self {
            mean: fit.mean,
            phi,
            sigma2,
            log_likelihood,
            last: series[n - 1],
            observations: n,
        })
    }

    /// Project `horizon` values past the end of the fitted series
    ///
    /// The h-step forecast is `μ + φ^h (y_n - μ)`.
    pub fn forecast(&self, horizon: usize) -> Result<Vec<f64>, ModelError> {
        let mut deviation = self.last - self.mean;
        let values: Vec<f64> = (0..horizon)
            .map(|_| {
                deviation *= self.phi;
                self.mean + deviation
            })
            .collect();

        if values.iter().all(|v| v.is_finite()) {
            Ok(values)
        } else {
            Err(ModelError::NonFiniteForecast)
        }
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    /// Regression constant `c = μ (1 - φ)`
    pub fn intercept(&self) -> f64 {
        self.mean * (1.0 - self.phi)
    }

    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }

    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    /// Akaike information criterion with μ, φ and σ² as free parameters
    pub fn aic(&self) -> f64 {
        -2.0 * self.log_likelihood + 2.0 * 3.0
    }

    pub fn observations(&self) -> usize {
        self.observations
    }
}

/// Arithmetic mean, accumulated incrementally so large finite inputs stay finite
///
/// Zero for an empty series.
pub(crate) fn running_mean(series: &[f64]) -> f64 {
    series
        .iter()
        .enumerate()
        .fold(0.0, |mean, (i, v)| mean + (v - mean) / (i + 1) as f64)
}

/// Likelihood terms for a fixed φ with μ and σ² profiled out
struct Concentrated {
    mean: f64,
    sum_of_squares: f64,
    neg_log_likelihood: f64,
}

fn concentrated(series: &[f64], phi: f64) -> Option<Concentrated> {
    let n = series.len();
    let a = 1.0 - phi;
    let w = 1.0 - phi * phi;
    if w <= 0.0 {
        return None;
    }

    let sum_z: f64 = series.windows(2).map(|p| p[1] - phi * p[0]).sum();
    let mean = (w * series[0] + a * sum_z) / (w + (n - 1) as f64 * a * a);

    let first = series[0] - mean;
    let sum_of_squares = w * first * first
        + series
            .windows(2)
            .map(|p| {
                let e = (p[1] - mean) - phi * (p[0] - mean);
                e * e
            })
            .sum::<f64>();

    if !(sum_of_squares.is_finite() && sum_of_squares > 0.0) {
        return None;
    }

    let neg_log_likelihood = 0.5 * n as f64 * (sum_of_squares / n as f64).ln() - 0.5 * w.ln();
    neg_log_likelihood.is_finite().then_some(Concentrated {
        mean,
        sum_of_squares,
        neg_log_likelihood,
    })
}

/// Minimize a unimodal function on `[lo, hi]`
fn golden_section_min(f: impl Fn(f64) -> f64, lo: f64, hi: f64) -> f64 {
    let ratio = (5f64.sqrt() - 1.0) / 2.0;
    let (mut a, mut b) = (lo, hi);
    let mut c = b - ratio * (b - a);
    let mut d = a + ratio * (b - a);
    let mut fc = f(c);
    let mut fd = f(d);

    for _ in 0..MAX_ITERATIONS {
        if (b - a).abs() < TOLERANCE {
            break;
        }
        if fc < fd {
            b = d;
            d = c;
            fd = fc;
            c = b - ratio * (b - a);
            fc = f(c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + ratio * (b - a);
            fd = f(d);
        }
    }

    (a + b) / 2.0
}
