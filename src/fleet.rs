//! Fleet management for sensor reliability analysis
//!
//! Owns the deployed sensors and computes cross-fleet summaries:
//! - Mean MTBF (exponential) and MTTF (Erlang) across sensors
//! - Mean Erlang reliability at a time horizon
//! - Health bucket counts
//! - Cascade failure risk
//!
//! Failure models are derived from each sensor on demand, so model `i`
//! always belongs to sensor `i`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{FleetError, Result};
use crate::maintenance::MaintenanceConfig;
use crate::queueing::QueueConfig;
use crate::sensor::Sensor;
use crate::thresholds::{
    HealthBucket, RiskLevel, DEPENDENCY_MULTIPLIERS, HEALTH_BUCKETS, RISK_LEVELS,
};

/// Sensors below this health count as current failures in cascade analysis
pub const CASCADE_FAILURE_HEALTH: f64 = 30.0;

/// Sensors with more stages than this are counted as multi-stage
pub const MULTI_STAGE_THRESHOLD: u32 = 2;

/// Share of amplified failures expected to propagate to other sensors
pub const CASCADE_PROPAGATION: f64 = 0.3;

/// Fleet configuration
#[derive(Debug, Clone)]
pub struct FleetConfig {
    /// Horizon for the fleet reliability figure (hours)
    pub reliability_horizon: f64,
    /// Horizon for the single-sensor sample analysis (hours)
    pub sample_horizon: f64,
    /// Maintenance crew queue
    pub queue: QueueConfig,
    /// Routing and replacement planning
    pub maintenance: MaintenanceConfig,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            reliability_horizon: 1000.0,
            sample_horizon: 500.0,
            queue: QueueConfig::default(),
            maintenance: MaintenanceConfig::default(),
        }
    }
}

/// Health bucket counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorStats {
    pub total: usize,
    /// Health above 70
    pub active: usize,
    /// Health in (30, 70]
    pub warning: usize,
    /// Health at or below 30
    pub failed: usize,
}

impl SensorStats {
    fn record(&mut self, bucket: HealthBucket) {
        self.total += 1;
        match bucket {
            HealthBucket::Active => self.active += 1,
            HealthBucket::Warning => self.warning += 1,
            HealthBucket::Failed => self.failed += 1,
        }
    }
}

/// Cascade failure estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CascadeRisk {
    /// Sensors currently considered failed
    pub current_failures: usize,
    /// Failed share of the fleet
    pub risk_factor: f64,
    /// Amplification applied to current failures
    pub dependency_multiplier: f64,
    /// Additional failures expected to follow
    pub expected_additional: usize,
    pub risk_level: RiskLevel,
}

impl CascadeRisk {
    /// Current failures plus the additional failures expected to follow
    pub fn total_predicted(&self) -> usize {
        self.current_failures + self.expected_additional
    }
}

/// Erlang parameters across the fleet
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ErlangSummary {
    /// Sensors with more than two failure stages
    pub multi_stage_sensors: usize,
    pub mean_k_stages: f64,
    /// Mean per-stage failure rate λ
    pub mean_failure_rate: f64,
}

/// Manages a fleet of sensors
#[derive(Debug, Default)]
pub struct FleetManager {
    sensors: Vec<Sensor>,
    config: FleetConfig,
}

impl FleetManager {
    /// Create an empty fleet with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: FleetConfig) -> Self {
        Self {
            sensors: Vec::new(),
            config,
        }
    }

    /// Register a sensor
    ///
    /// Fails if the id is already taken, if the health is outside 0..=100,
    /// or if its failure models cannot be built (λ ≤ 0, k < 1).
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        if self.get_sensor(sensor.id()).is_some() {
            return Err(FleetError::DuplicateSensor(sensor.id().to_string()).into());
        }
        check_health(sensor.id(), sensor.health())?;
        sensor.exponential_model()?;
        sensor.erlang_model()?;

        log::debug!(
            "Added sensor {} ({}, lambda={}, k={})",
            sensor.id(),
            sensor.sensor_type(),
            sensor.failure_rate(),
            sensor.k_stages()
        );
        self.sensors.push(sensor);
        Ok(())
    }

    /// Register several sensors, stopping at the first rejected one
    pub fn add_sensors<I>(&mut self, sensors: I) -> Result<()>
    where
        I: IntoIterator<Item = Sensor>,
    {
        sensors.into_iter().try_for_each(|s| self.add_sensor(s))
    }

    /// Set a sensor's health score
    pub fn update_health(&mut self, id: &str, health: f64) -> Result<()> {
        check_health(id, health)?;
        let sensor = self
            .sensors
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| FleetError::SensorNotFound(id.to_string()))?;
        log::debug!("Sensor {} health {:.1} -> {:.1}", id, sensor.health(), health);
        sensor.set_health(health);
        Ok(())
    }

    /// Get a sensor by id
    pub fn get_sensor(&self, id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id() == id)
    }

    /// All sensors, in registration order
    pub fn sensors(&self) -> &[Sensor] {
        &self.sensors
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn config(&self) -> &FleetConfig {
        &self.config
    }

    /// Mean of the exponential MTBF over all sensors
    pub fn fleet_mtbf(&self) -> Result<f64> {
        self.mean_over("fleet MTBF", |s| Ok(s.exponential_model()?.mtbf()))
    }

    /// Mean of the Erlang MTTF over all sensors
    pub fn fleet_mttf(&self) -> Result<f64> {
        self.mean_over("fleet MTTF", |s| Ok(s.erlang_model()?.mttf()))
    }

    /// Mean Erlang survival probability at `time_horizon` hours
    pub fn fleet_reliability(&self, time_horizon: f64) -> Result<f64> {
        self.mean_over("fleet reliability", |s| {
            Ok(s.erlang_model()?.reliability(time_horizon))
        })
    }

    /// Stage count and failure rate summary
    pub fn erlang_summary(&self) -> Result<ErlangSummary> {
        Ok(ErlangSummary {
            multi_stage_sensors: self
                .sensors
                .iter()
                .filter(|s| s.k_stages() > MULTI_STAGE_THRESHOLD)
                .count(),
            mean_k_stages: self.mean_over("mean stage count", |s| Ok(s.k_stages() as f64))?,
            mean_failure_rate: self.mean_over("mean failure rate", |s| Ok(s.failure_rate()))?,
        })
    }

    /// Count sensors per health bucket
    pub fn sensor_stats(&self) -> SensorStats {
        self.sensors
            .iter()
            .fold(SensorStats::default(), |mut stats, sensor| {
                stats.record(HEALTH_BUCKETS.classify(sensor.health()));
                stats
            })
    }

    /// Sensors below the cascade failure health
    pub fn failing_sensors(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors
            .iter()
            .filter(|s| s.health() < CASCADE_FAILURE_HEALTH)
    }

    /// Cascade risk from the sensors currently below 30 health
    pub fn analyze_cascade_risk(&self) -> Result<CascadeRisk> {
        self.cascade_from_failures(self.failing_sensors().count())
    }

    /// Cascade risk for an explicit set of failed sensors
    ///
    /// Every id must belong to the fleet; repeated ids count once.
    pub fn cascade_risk_for(&self, failed_ids: &[&str]) -> Result<CascadeRisk> {
        let mut unique = HashSet::new();
        for id in failed_ids {
            if self.get_sensor(id).is_none() {
                return Err(FleetError::SensorNotFound(id.to_string()).into());
            }
            unique.insert(*id);
        }
        self.cascade_from_failures(unique.len())
    }

    fn cascade_from_failures(&self, current_failures: usize) -> Result<CascadeRisk> {
        if self.sensors.is_empty() {
            log::warn!("Cascade risk requested on an empty fleet");
            return Err(FleetError::EmptyFleet {
                operation: "cascade risk",
            }
            .into());
        }

        let risk_factor = current_failures as f64 / self.sensors.len() as f64;
        let dependency_multiplier = DEPENDENCY_MULTIPLIERS.classify(risk_factor);
        let amplified = current_failures as f64 * dependency_multiplier;
        let expected_additional = (amplified * CASCADE_PROPAGATION).floor() as usize;

        Ok(CascadeRisk {
            current_failures,
            risk_factor,
            dependency_multiplier,
            expected_additional,
            risk_level: RISK_LEVELS.classify(risk_factor),
        })
    }

    /// Arithmetic mean of a per-sensor quantity
    fn mean_over<F>(&self, operation: &'static str, per_sensor: F) -> Result<f64>
    where
        F: Fn(&Sensor) -> Result<f64>,
    {
        if self.sensors.is_empty() {
            log::warn!("{} requested on an empty fleet", operation);
            return Err(FleetError::EmptyFleet { operation }.into());
        }
        let sum = self.sensors.iter().map(per_sensor).sum::<Result<f64>>()?;
        Ok(sum / self.sensors.len() as f64)
    }
}

fn check_health(id: &str, health: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&health) {
        return Err(FleetError::InvalidHealth {
            id: id.to_string(),
            health,
        }
        .into());
    }
    Ok(())
}
