//! Common interface of the lifetime distributions
//!
//! Shared helpers for the exponential and Erlang models.

use crate::error::ModelError;

/// A lifetime distribution evaluated at a time `t` in hours
pub trait FailureModel {
    /// Survival probability R(t)
    fn reliability(&self, t: f64) -> f64;

    /// Probability density of failing at `t`
    fn pdf(&self, t: f64) -> f64;

    /// Expected lifetime in hours
    fn mean_lifetime(&self) -> f64;

    /// Probability of having failed by `t`
    fn cdf(&self, t: f64) -> f64 {
        1.0 - self.reliability(t)
    }

    /// Instantaneous failure rate h(t) = f(t) / R(t)
    ///
    /// Returns `f64::INFINITY` once the survival probability underflows.
    fn hazard_rate_at(&self, t: f64) -> f64 {
        let r = self.reliability(t);
        if r <= 0.0 {
            return f64::INFINITY;
        }
        self.pdf(t) / r
    }
}

/// ln(n!), summed term by term so large n stays finite
pub(crate) fn ln_factorial(n: u32) -> f64 {
    (2..=n).map(|i| (i as f64).ln()).sum()
}

/// Poisson probability of exactly `n` events for the given mean
///
/// Evaluated in log space: e^(−m)·m^n / n! overflows and underflows term
/// by term long before the product itself leaves the f64 range.
pub(crate) fn poisson_pmf(n: u32, mean: f64) -> f64 {
    if mean <= 0.0 {
        return if n == 0 { 1.0 } else { 0.0 };
    }
    (n as f64 * mean.ln() - mean - ln_factorial(n)).exp()
}

/// Check a strictly positive rate
pub(crate) fn positive_rate(parameter: &'static str, value: f64) -> Result<f64, ModelError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::non_positive(parameter, value));
    }
    Ok(value)
}
