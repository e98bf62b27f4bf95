// RELIA Testdata - Fleet scenarios
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Preset fleet profiles.

use crate::profile::{FleetProfile, HealthModel, ValueRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fleet scenario preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FleetScenario {
    /// Freshly commissioned mix of healthy and worn sensors.
    #[default]
    Nominal,
    /// Long-running fleet close to end of life.
    Aging,
    /// Widespread low health, stressing cascade analysis.
    Degraded,
}

impl FleetScenario {
    /// All presets.
    pub const ALL: [FleetScenario; 3] = [Self::Nominal, Self::Aging, Self::Degraded];

    /// Short name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::Aging => "aging",
            Self::Degraded => "degraded",
        }
    }

    /// Profile for this scenario.
    pub fn profile(&self) -> FleetProfile {
        match self {
            Self::Nominal => FleetProfile::default(),
            Self::Aging => FleetProfile::default()
                .with_uptime(6000.0, 150.0)
                .with_health(HealthModel::Uniform(ValueRange::new(20.0, 80.0))),
            Self::Degraded => FleetProfile::default().with_health(HealthModel::Normal {
                mean: 30.0,
                std_dev: 15.0,
            }),
        }
    }
}

impl fmt::Display for FleetScenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FleetScenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scenario| scenario.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown scenario: {}", s))
    }
}
