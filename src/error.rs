//! Error types for RELIA
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for RELIA operations
pub type Result<T> = std::result::Result<T, ReliaError>;

/// Main error type for RELIA operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReliaError {
    /// Model construction error
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Fleet aggregation error
    #[error("Fleet error: {0}")]
    Fleet(#[from] FleetError),

    /// Report serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised when a model is built from invalid parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A rate is negative, zero where it must be positive, NaN or infinite
    #[error("Invalid {parameter}: {value} (must be {requirement})")]
    InvalidRate {
        parameter: &'static str,
        value: f64,
        requirement: &'static str,
    },

    /// Erlang stage count below one
    #[error("Invalid stage count: {0} (must be >= 1)")]
    InvalidStages(u32),

    /// M/M/c queue without servers
    #[error("Invalid server count: {0} (must be >= 1)")]
    InvalidServerCount(u32),

    /// Offered load needs more servers than a `u32` can count
    #[error("Offered load {0} exceeds any representable crew size")]
    CrewTooLarge(f64),
}

impl ModelError {
    /// Failure or service rate that must be strictly positive
    pub(crate) fn non_positive(parameter: &'static str, value: f64) -> Self {
        Self::InvalidRate {
            parameter,
            value,
            requirement: "finite and > 0",
        }
    }

    /// Arrival rate that may be zero but not negative
    pub(crate) fn negative(parameter: &'static str, value: f64) -> Self {
        Self::InvalidRate {
            parameter,
            value,
            requirement: "finite and >= 0",
        }
    }
}

/// Errors related to fleet aggregation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FleetError {
    /// Aggregate requested over a fleet without sensors
    #[error("Empty fleet: {operation} needs at least one sensor")]
    EmptyFleet { operation: &'static str },

    /// No sensor with this id
    #[error("Sensor not found: {0}")]
    SensorNotFound(String),

    /// A sensor with this id is already registered
    #[error("Sensor already registered: {0}")]
    DuplicateSensor(String),

    /// Health outside 0..=100
    #[error("Invalid health for {id}: {health} (must be within 0..=100)")]
    InvalidHealth { id: String, health: f64 },
}
