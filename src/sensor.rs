//! Sensor records
//!
//! Static attributes of a deployed sensor: category, position, failure
//! parameters and the mutable health score.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::erlang::ErlangModel;
use crate::error::Result;
use crate::exponential::ExponentialModel;

/// Sensor category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SensorType {
    /// Road traffic counter
    Traffic,
    /// Air quality monitor
    AirQuality,
    /// Water flow meter
    WaterFlow,
}

impl SensorType {
    /// All categories, in deployment rotation order
    pub const ALL: [SensorType; 3] = [Self::Traffic, Self::AirQuality, Self::WaterFlow];

    /// Upper-case label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Traffic => "TRAFFIC",
            Self::AirQuality => "AIR_QUALITY",
            Self::WaterFlow => "WATER_FLOW",
        }
    }
}

impl fmt::Display for SensorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a sensor in site coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Location {
    /// Create a new location
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A deployed sensor
///
/// Everything except `health` is fixed once the sensor is built. Failure
/// models are not stored; they are derived from `failure_rate` and
/// `k_stages` whenever needed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sensor {
    id: String,
    sensor_type: SensorType,
    location: Location,
    health: f64,
    uptime_hours: f64,
    failure_rate: f64,
    k_stages: u32,
    queue_position: u32,
}

impl Sensor {
    /// Create a sensor at full health, origin location and zero uptime
    pub fn new(
        id: impl Into<String>,
        sensor_type: SensorType,
        failure_rate: f64,
        k_stages: u32,
    ) -> Self {
        Self {
            id: id.into(),
            sensor_type,
            location: Location::default(),
            health: 100.0,
            uptime_hours: 0.0,
            failure_rate,
            k_stages,
            queue_position: 0,
        }
    }

    /// Set the location
    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Set the initial health score
    pub fn with_health(mut self, health: f64) -> Self {
        self.health = health;
        self
    }

    /// Set the cumulative uptime in hours
    pub fn with_uptime(mut self, hours: f64) -> Self {
        self.uptime_hours = hours;
        self
    }

    /// Set the maintenance queue position tag
    pub fn with_queue_position(mut self, position: u32) -> Self {
        self.queue_position = position;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sensor_type(&self) -> SensorType {
        self.sensor_type
    }

    pub fn location(&self) -> Location {
        self.location
    }

    /// Health score, 0 (dead) to 100 (nominal)
    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn uptime_hours(&self) -> f64 {
        self.uptime_hours
    }

    /// Failure rate λ, per hour
    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    /// Erlang stage count k
    pub fn k_stages(&self) -> u32 {
        self.k_stages
    }

    pub fn queue_position(&self) -> u32 {
        self.queue_position
    }

    /// Health is the only attribute that changes after deployment.
    pub(crate) fn set_health(&mut self, health: f64) {
        self.health = health;
    }

    /// Constant-hazard model of this sensor
    pub fn exponential_model(&self) -> Result<ExponentialModel> {
        ExponentialModel::new(self.failure_rate)
    }

    /// k-stage model of this sensor
    pub fn erlang_model(&self) -> Result<ErlangModel> {
        ErlangModel::new(self.k_stages, self.failure_rate)
    }
}
