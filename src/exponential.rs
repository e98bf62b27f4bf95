//! Exponential (constant hazard) failure model

use crate::error::Result;
use crate::model::{positive_rate, FailureModel};

/// Memoryless lifetime with failure rate λ
///
/// R(t) = e^(−λt), MTBF = 1/λ.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExponentialModel {
    lambda: f64,
}

impl ExponentialModel {
    /// Create a model from a failure rate per hour
    pub fn new(failure_rate: f64) -> Result<Self> {
        let lambda = positive_rate("failure rate", failure_rate)?;
        Ok(Self { lambda })
    }

    /// Survival probability at `t` hours
    ///
    /// Times before zero count as not yet deployed, so R = 1.
    pub fn reliability(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        (-self.lambda * t).exp()
    }

    /// Density λ·e^(−λt), zero before deployment
    pub fn pdf(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        self.lambda * (-self.lambda * t).exp()
    }

    /// Constant hazard λ
    pub fn hazard_rate(&self) -> f64 {
        self.lambda
    }

    /// Mean time between failures, 1/λ
    pub fn mtbf(&self) -> f64 {
        1.0 / self.lambda
    }
}

impl FailureModel for ExponentialModel {
    fn reliability(&self, t: f64) -> f64 {
        ExponentialModel::reliability(self, t)
    }

    fn pdf(&self, t: f64) -> f64 {
        ExponentialModel::pdf(self, t)
    }

    fn mean_lifetime(&self) -> f64 {
        self.mtbf()
    }

    fn hazard_rate_at(&self, _t: f64) -> f64 {
        self.lambda
    }
}
