//! Ordered threshold tables
//!
//! Every tiered classification in the crate (health buckets, cascade
//! dependency multiplier, cascade risk level, replacement urgency) is a
//! table scanned top to bottom: the first tier whose bound admits the value
//! wins, and the fallback applies when none does.
//!
//! The dependency-multiplier and risk-level tables are both keyed on the
//! cascade risk factor but use different cut points (0.2/0.1 versus
//! 0.15/0.08). They model different sensitivities and are kept separate.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison applied by a tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Value strictly greater than the limit
    Above(f64),
    /// Value strictly less than the limit
    Below(f64),
}

impl Bound {
    /// Check whether `value` falls inside this bound
    pub fn admits(&self, value: f64) -> bool {
        match *self {
            Bound::Above(limit) => value > limit,
            Bound::Below(limit) => value < limit,
        }
    }
}

/// One row of a threshold table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier<T> {
    pub bound: Bound,
    pub value: T,
}

/// Tiers evaluated in order, with a fallback
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdTable<T: 'static> {
    tiers: &'static [Tier<T>],
    fallback: T,
}

impl<T: Copy> ThresholdTable<T> {
    pub const fn new(tiers: &'static [Tier<T>], fallback: T) -> Self {
        Self { tiers, fallback }
    }

    /// Value of the first tier admitting `value`, else the fallback
    pub fn classify(&self, value: f64) -> T {
        self.tiers
            .iter()
            .find(|tier| tier.bound.admits(value))
            .map_or(self.fallback, |tier| tier.value)
    }

    pub fn tiers(&self) -> &'static [Tier<T>] {
        self.tiers
    }

    pub fn fallback(&self) -> T {
        self.fallback
    }
}

/// Health bucket of a sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthBucket {
    /// Health above 70
    Active,
    /// Health in (30, 70]
    Warning,
    /// Health at or below 30
    Failed,
}

/// Qualitative cascade risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How soon a sensor should be replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }

    /// Days between planning and the scheduled replacement
    pub fn lead_days(&self) -> u64 {
        match self {
            Self::Critical => 7,
            Self::High => 30,
            Self::Medium => 90,
            Self::Low => 180,
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Health score → bucket
pub const HEALTH_BUCKETS: ThresholdTable<HealthBucket> = ThresholdTable::new(
    &[
        Tier {
            bound: Bound::Above(70.0),
            value: HealthBucket::Active,
        },
        Tier {
            bound: Bound::Above(30.0),
            value: HealthBucket::Warning,
        },
    ],
    HealthBucket::Failed,
);

/// Cascade risk factor → dependency multiplier
pub const DEPENDENCY_MULTIPLIERS: ThresholdTable<f64> = ThresholdTable::new(
    &[
        Tier {
            bound: Bound::Above(0.2),
            value: 1.5,
        },
        Tier {
            bound: Bound::Above(0.1),
            value: 1.2,
        },
    ],
    1.0,
);

/// Cascade risk factor → risk level
pub const RISK_LEVELS: ThresholdTable<RiskLevel> = ThresholdTable::new(
    &[
        Tier {
            bound: Bound::Above(0.15),
            value: RiskLevel::High,
        },
        Tier {
            bound: Bound::Above(0.08),
            value: RiskLevel::Medium,
        },
    ],
    RiskLevel::Low,
);

/// Expected remaining life in hours → replacement urgency
pub const REPLACEMENT_URGENCY: ThresholdTable<Urgency> = ThresholdTable::new(
    &[
        Tier {
            bound: Bound::Below(500.0),
            value: Urgency::Critical,
        },
        Tier {
            bound: Bound::Below(1000.0),
            value: Urgency::High,
        },
        Tier {
            bound: Bound::Below(2000.0),
            value: Urgency::Medium,
        },
    ],
    Urgency::Low,
);
