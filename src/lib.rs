//! # RELIA - Reliability models for IoT sensor fleets
//!
//! Closed-form reliability and maintenance-load estimates for a fleet of
//! sensors.
//!
//! ## Key Features
//!
//! - **Exponential model**: constant hazard, MTBF = 1/λ
//! - **Erlang model**: k sequential failure stages, MTTF = k/λ
//! - **M/M/c queue**: repair crew backlog, undefined (`None`) when unstable
//! - **Fleet aggregation**: mean MTBF/MTTF/reliability, health buckets, cascade risk
//! - **Maintenance planning**: crew routing, crew workload and replacement schedule
//!
//! ## Quick Start
//!
//! ```rust
//! use relia::{FleetManager, QueueingModel, RiskLevel, Sensor, SensorType};
//!
//! let mut fleet = FleetManager::new();
//! fleet
//!     .add_sensor(Sensor::new("SNS-0001", SensorType::Traffic, 0.0005, 3).with_health(50.0))
//!     .unwrap();
//!
//! assert!((fleet.fleet_mtbf().unwrap() - 2000.0).abs() < 1e-9);
//! assert!((fleet.fleet_mttf().unwrap() - 6000.0).abs() < 1e-9);
//! assert_eq!(fleet.analyze_cascade_risk().unwrap().risk_level, RiskLevel::Low);
//!
//! let queue = QueueingModel::new(0.05, 0.15, 3).unwrap();
//! if let Some(wait) = queue.avg_wait_time() {
//!     assert!(wait >= 0.0);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`exponential`]: Constant-hazard model
//! - [`erlang`]: k-stage model
//! - [`queueing`]: M/M/c maintenance queue
//! - [`fleet`]: Fleet aggregation
//! - [`thresholds`]: Ordered threshold tables behind every tiered classification
//! - [`maintenance`]: Crew routing and replacement planning
//! - [`report`]: Text and JSON fleet report

// Modules
pub mod erlang;
pub mod error;
pub mod exponential;
pub mod fleet;
pub mod maintenance;
pub mod model;
pub mod queueing;
pub mod report;
pub mod sensor;
pub mod thresholds;

// Re-exports for convenient access
pub use erlang::ErlangModel;
pub use error::{FleetError, ModelError, ReliaError, Result};
pub use exponential::ExponentialModel;
pub use fleet::{CascadeRisk, ErlangSummary, FleetConfig, FleetManager, SensorStats};
pub use maintenance::{
    crew_status, plan_routes, replacement_schedule, CrewStatus, MaintenanceConfig,
    MaintenanceTask, ReplacementEntry,
};
pub use model::FailureModel;
pub use queueing::{QueueConfig, QueueingModel};
pub use report::FleetReport;
pub use sensor::{Location, Sensor, SensorType};
pub use thresholds::{HealthBucket, RiskLevel, ThresholdTable, Urgency};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
