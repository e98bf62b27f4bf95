// RELIA Testdata - Core generator
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Sensor and fleet generation from a [`FleetProfile`].

use crate::error::{GeneratorError, Result};
use crate::profile::{FleetProfile, HealthModel, ValueRange};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use relia::{FleetConfig, FleetManager, Location, Sensor, SensorType};

/// Identifier of the sensor at `index` (zero-based).
pub fn sensor_id(index: usize) -> String {
    format!("SNS-{:04}", index + 1)
}

/// Generate sensors from a profile.
///
/// Sensor types rotate TRAFFIC, AIR_QUALITY, WATER_FLOW by index; uptime
/// grows linearly with the index. Everything else is sampled.
pub fn generate_sensors(profile: &FleetProfile) -> Result<Vec<Sensor>> {
    profile.validate()?;

    let mut rng: Box<dyn RngCore> = match profile.seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(StdRng::from_entropy()),
    };

    let health_noise = match profile.health {
        HealthModel::Normal { mean, std_dev } => Some(
            Normal::new(mean, std_dev).map_err(|_| GeneratorError::InvalidSpread(std_dev))?,
        ),
        HealthModel::Uniform(_) => None,
    };

    let (k_min, k_max) = profile.k_stages;
    let (q_min, q_max) = profile.queue_position;

    let sensors = (0..profile.sensor_count)
        .map(|i| {
            let health = match (&health_noise, profile.health) {
                (Some(dist), _) => dist.sample(&mut *rng).clamp(0.0, 100.0),
                (None, HealthModel::Uniform(range)) => sample(range, &mut *rng),
                (None, HealthModel::Normal { mean, .. }) => mean.clamp(0.0, 100.0),
            };
            let failure_rate = sample(profile.failure_rate, &mut *rng);
            let k_stages = rng.gen_range(k_min..=k_max);
            let location = Location::new(
                sample(profile.xy, &mut *rng),
                sample(profile.xy, &mut *rng),
                sample(profile.z, &mut *rng),
            );
            let queue_position = rng.gen_range(q_min..=q_max);

            Sensor::new(
                sensor_id(i),
                SensorType::ALL[i % SensorType::ALL.len()],
                failure_rate,
                k_stages,
            )
            .with_location(location)
            .with_health(health)
            .with_uptime(profile.uptime_at(i))
            .with_queue_position(queue_position)
        })
        .collect();

    Ok(sensors)
}

/// Generate sensors and register them in a fleet with default configuration.
pub fn generate_fleet(profile: &FleetProfile) -> Result<FleetManager> {
    generate_fleet_with_config(profile, FleetConfig::default())
}

/// Generate sensors and register them in a fleet.
pub fn generate_fleet_with_config(
    profile: &FleetProfile,
    config: FleetConfig,
) -> Result<FleetManager> {
    let mut fleet = FleetManager::with_config(config);
    fleet.add_sensors(generate_sensors(profile)?)?;
    Ok(fleet)
}

fn sample(range: ValueRange, rng: &mut dyn RngCore) -> f64 {
    if range.min < range.max {
        rng.gen_range(range.min..range.max)
    } else {
        range.min
    }
}
