// RELIA Testdata - Synthetic fleet generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! # RELIA Testdata
//!
//! Synthetic sensor fleets for exercising the RELIA models.
//!
//! - **Profiles**: sampling ranges for health, failure rate, stage count,
//!   location and queue position
//! - **Scenarios**: nominal, aging and degraded presets
//! - **Reproducibility**: a fixed seed yields the same fleet
//!
//! ## Quick Start
//!
//! ```rust
//! use relia_testdata::{generate_fleet, FleetScenario};
//!
//! let profile = FleetScenario::Nominal.profile().with_seed(42);
//! let fleet = generate_fleet(&profile).unwrap();
//!
//! assert_eq!(fleet.len(), 50);
//! assert!(fleet.get_sensor("SNS-0001").is_some());
//! ```

pub mod error;
pub mod generator;
pub mod profile;
pub mod scenario;

// Re-exports for convenience
pub use error::GeneratorError;
pub use generator::{generate_fleet, generate_fleet_with_config, generate_sensors, sensor_id};
pub use profile::{FleetProfile, HealthModel, ValueRange};
pub use scenario::FleetScenario;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
