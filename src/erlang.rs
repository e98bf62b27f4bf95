//! Erlang-k failure model
//!
//! A sensor that fails only after `k` sequential sub-failures, each
//! exponential with the same rate λ. The lifetime is the sum of the k
//! stages, i.e. a Gamma(k, λ) with integer shape.

use crate::error::{ModelError, Result};
use crate::model::{poisson_pmf, positive_rate, FailureModel};

/// k-stage lifetime with per-stage rate λ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErlangModel {
    k: u32,
    lambda: f64,
}

impl ErlangModel {
    /// Create a model from a stage count and a per-stage failure rate
    pub fn new(stages: u32, failure_rate: f64) -> Result<Self> {
        if stages == 0 {
            return Err(ModelError::InvalidStages(stages).into());
        }
        let lambda = positive_rate("failure rate", failure_rate)?;
        Ok(Self { k: stages, lambda })
    }

    /// Stage count k
    pub fn stages(&self) -> u32 {
        self.k
    }

    /// Per-stage rate λ
    pub fn rate(&self) -> f64 {
        self.lambda
    }

    /// Probability of failure by `t`
    pub fn cdf(&self, t: f64) -> f64 {
        1.0 - self.reliability(t)
    }

    /// Survival probability at `t` hours
    ///
    /// Poisson partial sum: the unit survives while fewer than k stages have
    /// failed, so R(t) = Σ_{i<k} e^(−λt)(λt)^i / i!. Each term is derived
    /// from the previous one in log space, so e^(−λt) may underflow while
    /// the later terms still carry the mass.
    pub fn reliability(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        let lt = self.lambda * t;
        let ln_lt = lt.ln();
        let mut ln_term = -lt;
        let mut survivors = ln_term.exp();
        for i in 1..self.k {
            ln_term += ln_lt - (i as f64).ln();
            survivors += ln_term.exp();
        }
        survivors.min(1.0)
    }

    /// Density λ^k · t^(k−1) · e^(−λt) / (k−1)!
    ///
    /// Computed as λ times the Poisson probability of k−1 stage failures.
    pub fn pdf(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        self.lambda * poisson_pmf(self.k - 1, self.lambda * t)
    }

    /// Mean time to failure, k/λ
    pub fn mttf(&self) -> f64 {
        self.k as f64 / self.lambda
    }
}

impl FailureModel for ErlangModel {
    fn reliability(&self, t: f64) -> f64 {
        ErlangModel::reliability(self, t)
    }

    fn pdf(&self, t: f64) -> f64 {
        ErlangModel::pdf(self, t)
    }

    fn mean_lifetime(&self) -> f64 {
        self.mttf()
    }

    fn cdf(&self, t: f64) -> f64 {
        ErlangModel::cdf(self, t)
    }
}
