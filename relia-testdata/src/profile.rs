// RELIA Testdata - Fleet profiles
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Parameter ranges a generated fleet is sampled from.

use crate::error::{GeneratorError, Result};
use serde::{Deserialize, Serialize};

/// Closed-open sampling range `[min, max)`. `min == max` yields `min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Create a new range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Check bounds are finite and ordered.
    pub fn validate(&self, field: &'static str) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min <= self.max {
            Ok(())
        } else {
            Err(GeneratorError::InvalidRange {
                field,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// How sensor health scores are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HealthModel {
    /// Uniform over a range.
    Uniform(ValueRange),
    /// Gaussian, clamped to 0..=100.
    Normal { mean: f64, std_dev: f64 },
}

impl HealthModel {
    fn validate(&self) -> Result<()> {
        match *self {
            HealthModel::Uniform(range) => {
                range.validate("health")?;
                if range.min < 0.0 || range.max > 100.0 {
                    return Err(GeneratorError::InvalidRange {
                        field: "health",
                        min: range.min,
                        max: range.max,
                    });
                }
                Ok(())
            }
            HealthModel::Normal { mean, std_dev } => {
                if !mean.is_finite() {
                    return Err(GeneratorError::InvalidRange {
                        field: "health mean",
                        min: mean,
                        max: mean,
                    });
                }
                if !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(GeneratorError::InvalidSpread(std_dev));
                }
                Ok(())
            }
        }
    }
}

/// Fleet generation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetProfile {
    /// Number of sensors.
    pub sensor_count: usize,
    /// Health score distribution.
    pub health: HealthModel,
    /// Failure rate λ per hour.
    pub failure_rate: ValueRange,
    /// Erlang stage count, inclusive.
    pub k_stages: (u32, u32),
    /// Horizontal coordinates (x and y).
    pub xy: ValueRange,
    /// Elevation.
    pub z: ValueRange,
    /// Uptime of the first sensor in hours.
    pub base_uptime_hours: f64,
    /// Uptime added per sensor index.
    pub uptime_step_hours: f64,
    /// Queue position, inclusive.
    pub queue_position: (u32, u32),
    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for FleetProfile {
    fn default() -> Self {
        Self {
            sensor_count: 50,
            health: HealthModel::Uniform(ValueRange::new(20.0, 100.0)),
            failure_rate: ValueRange::new(0.0003, 0.0008),
            k_stages: (2, 5),
            xy: ValueRange::new(5.0, 95.0),
            z: ValueRange::new(0.0, 3.0),
            base_uptime_hours: 1000.0,
            uptime_step_hours: 100.0,
            queue_position: (0, 9),
            seed: None,
        }
    }
}

impl FleetProfile {
    /// Create the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of sensors.
    pub fn with_sensor_count(mut self, count: usize) -> Self {
        self.sensor_count = count;
        self
    }

    /// Set health distribution.
    pub fn with_health(mut self, health: HealthModel) -> Self {
        self.health = health;
        self
    }

    /// Set failure rate range.
    pub fn with_failure_rate(mut self, min: f64, max: f64) -> Self {
        self.failure_rate = ValueRange::new(min, max);
        self
    }

    /// Set Erlang stage range (inclusive).
    pub fn with_k_stages(mut self, min: u32, max: u32) -> Self {
        self.k_stages = (min, max);
        self
    }

    /// Set uptime progression.
    pub fn with_uptime(mut self, base_hours: f64, step_hours: f64) -> Self {
        self.base_uptime_hours = base_hours;
        self.uptime_step_hours = step_hours;
        self
    }

    /// Set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Uptime of the sensor at `index`.
    pub fn uptime_at(&self, index: usize) -> f64 {
        self.base_uptime_hours + index as f64 * self.uptime_step_hours
    }

    /// Check every range before sampling.
    pub fn validate(&self) -> Result<()> {
        if self.sensor_count == 0 {
            return Err(GeneratorError::NoSensors);
        }
        self.health.validate()?;
        self.failure_rate.validate("failure rate")?;
        if self.failure_rate.min <= 0.0 {
            return Err(GeneratorError::InvalidRange {
                field: "failure rate",
                min: self.failure_rate.min,
                max: self.failure_rate.max,
            });
        }
        let (k_min, k_max) = self.k_stages;
        if k_min == 0 || k_min > k_max {
            return Err(GeneratorError::InvalidRange {
                field: "k stages",
                min: k_min as f64,
                max: k_max as f64,
            });
        }
        self.xy.validate("xy")?;
        self.z.validate("z")?;
        ValueRange::new(self.base_uptime_hours, self.uptime_at(self.sensor_count - 1))
            .validate("uptime")?;
        if self.base_uptime_hours < 0.0 {
            return Err(GeneratorError::InvalidRange {
                field: "uptime",
                min: self.base_uptime_hours,
                max: self.uptime_at(self.sensor_count - 1),
            });
        }
        let (q_min, q_max) = self.queue_position;
        if q_min > q_max {
            return Err(GeneratorError::InvalidRange {
                field: "queue position",
                min: q_min as f64,
                max: q_max as f64,
            });
        }
        Ok(())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| GeneratorError::Serialization(e.to_string()))
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GeneratorError::Serialization(e.to_string()))
    }
}
