// RELIA Testdata - Generator errors
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Errors raised while generating a fleet.

use relia::ReliaError;
use thiserror::Error;

/// Generator error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    /// A sampling range is empty, reversed or not finite.
    #[error("Invalid range for {field}: [{min}, {max}]")]
    InvalidRange {
        field: &'static str,
        min: f64,
        max: f64,
    },

    /// Normal health distribution with a negative or non-finite spread.
    #[error("Invalid health spread: {0}")]
    InvalidSpread(f64),

    /// Profile asks for no sensors.
    #[error("Profile must generate at least one sensor")]
    NoSensors,

    /// The fleet rejected a generated sensor.
    #[error("Fleet rejected generated sensor: {0}")]
    Fleet(#[from] ReliaError),

    /// Profile could not be (de)serialized.
    #[error("Profile serialization failed: {0}")]
    Serialization(String),
}

/// Result alias for generator operations.
pub type Result<T> = std::result::Result<T, GeneratorError>;
