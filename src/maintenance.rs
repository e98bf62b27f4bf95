// RELIA - IoT sensor fleet reliability
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Maintenance planning
//!
//! Turns fleet health and Erlang lifetimes into work for the repair crews:
//! - crew routing for critical and warning sensors
//! - per-crew workload derived from the routing plan
//! - a replacement schedule ranked by expected remaining life

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::fleet::{FleetManager, CASCADE_FAILURE_HEALTH};
use crate::sensor::{Location, Sensor, SensorType};
use crate::thresholds::{Urgency, REPLACEMENT_URGENCY};

/// Upper health bound of sensors worth a preventive visit
pub const WARNING_VISIT_HEALTH: f64 = 70.0;

/// Maintenance planning configuration
#[derive(Debug, Clone)]
pub struct MaintenanceConfig {
    /// Crew names, assigned round robin
    pub crews: Vec<String>,
    /// Maximum number of warning sensors scheduled per plan
    pub max_warning_tasks: usize,
    /// Extra delay for each full rotation through the crews (minutes)
    pub rotation_minutes: u32,
    /// Travel time jitter range, inclusive lower / exclusive upper (minutes)
    pub travel_minutes: (u32, u32),
    /// Repair time of a critical sensor (minutes)
    pub critical_repair_minutes: u32,
    /// Repair time of a warning sensor (minutes)
    pub warning_repair_minutes: u32,
    /// Cost of replacing one sensor
    pub replacement_cost: f64,
    /// Window for the near-term failure probability (hours)
    pub failure_window_hours: f64,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            crews: vec![
                "CREW-A".to_string(),
                "CREW-B".to_string(),
                "CREW-C".to_string(),
            ],
            max_warning_tasks: 10,
            rotation_minutes: 45,
            travel_minutes: (10, 30),
            critical_repair_minutes: 60,
            warning_repair_minutes: 30,
            replacement_cost: 5000.0,
            failure_window_hours: 720.0, // 30 days
        }
    }
}

/// One crew visit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaintenanceTask {
    pub sensor_id: String,
    pub sensor_type: SensorType,
    pub location: Location,
    pub health: f64,
    pub assigned_crew: String,
    /// 1 for failed sensors, 2 for warnings
    pub priority: u8,
    pub estimated_arrival_minutes: u32,
    pub estimated_repair_minutes: u32,
}

/// One row of the replacement schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplacementEntry {
    pub sensor_id: String,
    pub sensor_type: SensorType,
    pub current_health: f64,
    pub uptime_hours: f64,
    /// MTTF minus uptime, never negative
    pub expected_remaining_life_hours: f64,
    pub urgency: Urgency,
    pub scheduled_date: NaiveDate,
    pub estimated_cost: f64,
    /// Probability of having failed by the end of the failure window
    pub failure_probability_30d: f64,
}

/// Build the crew routing plan
///
/// Failed sensors (health below 30) come first, ordered by queue position,
/// followed by up to `max_warning_tasks` warning sensors (health 30 to 70)
/// ordered from least to most healthy.
pub fn plan_routes<R: Rng + ?Sized>(
    fleet: &FleetManager,
    config: &MaintenanceConfig,
    rng: &mut R,
) -> Vec<MaintenanceTask> {
    if config.crews.is_empty() {
        log::warn!("No maintenance crews configured, routing plan is empty");
        return Vec::new();
    }

    let mut critical: Vec<&Sensor> = fleet.failing_sensors().collect();
    critical.sort_by_key(|s| s.queue_position());

    let mut warning: Vec<&Sensor> = fleet
        .sensors()
        .iter()
        .filter(|s| (CASCADE_FAILURE_HEALTH..=WARNING_VISIT_HEALTH).contains(&s.health()))
        .collect();
    warning.sort_by(|a, b| a.health().total_cmp(&b.health()));
    warning.truncate(config.max_warning_tasks);

    let (min_travel, max_travel) = config.travel_minutes;
    let crew_count = config.crews.len();

    let tasks: Vec<MaintenanceTask> = critical
        .into_iter()
        .chain(warning)
        .enumerate()
        .map(|(idx, sensor)| {
            let is_critical = sensor.health() < CASCADE_FAILURE_HEALTH;
            let travel = if max_travel > min_travel {
                rng.gen_range(min_travel..max_travel)
            } else {
                min_travel
            };
            MaintenanceTask {
                sensor_id: sensor.id().to_string(),
                sensor_type: sensor.sensor_type(),
                location: sensor.location(),
                health: sensor.health(),
                assigned_crew: config.crews[idx % crew_count].clone(),
                priority: if is_critical { 1 } else { 2 },
                estimated_arrival_minutes: (idx / crew_count) as u32 * config.rotation_minutes
                    + travel,
                estimated_repair_minutes: if is_critical {
                    config.critical_repair_minutes
                } else {
                    config.warning_repair_minutes
                },
            }
        })
        .collect();

    log::debug!("Planned {} maintenance tasks over {} crews", tasks.len(), crew_count);
    tasks
}

/// Workload of one crew in a routing plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewStatus {
    pub crew: String,
    pub assigned_tasks: usize,
    /// Arrival estimate of the crew's first task, `None` when idle
    pub first_eta_minutes: Option<u32>,
}

/// Summarize a routing plan per crew, in configuration order
///
/// Idle crews are listed with no tasks. Tasks naming a crew outside the
/// configuration are skipped.
pub fn crew_status(config: &MaintenanceConfig, tasks: &[MaintenanceTask]) -> Vec<CrewStatus> {
    let mut status: Vec<CrewStatus> = config
        .crews
        .iter()
        .map(|crew| CrewStatus {
            crew: crew.clone(),
            assigned_tasks: 0,
            first_eta_minutes: None,
        })
        .collect();

    for task in tasks {
        match status.iter_mut().find(|s| s.crew == task.assigned_crew) {
            Some(entry) => {
                entry.assigned_tasks += 1;
                entry
                    .first_eta_minutes
                    .get_or_insert(task.estimated_arrival_minutes);
            }
            None => log::warn!(
                "Task for {} names unknown crew {}",
                task.sensor_id,
                task.assigned_crew
            ),
        }
    }
    status
}

/// Build the replacement schedule, most urgent first
///
/// Remaining life is the Erlang MTTF minus the sensor's uptime. Scheduled
/// dates are offset from `reference_date` by the urgency lead time.
pub fn replacement_schedule(
    fleet: &FleetManager,
    config: &MaintenanceConfig,
    reference_date: NaiveDate,
) -> Result<Vec<ReplacementEntry>> {
    let mut entries = fleet
        .sensors()
        .iter()
        .map(|sensor| {
            let model = sensor.erlang_model()?;
            let remaining_life = model.mttf() - sensor.uptime_hours();
            let urgency = REPLACEMENT_URGENCY.classify(remaining_life);
            let scheduled_date = reference_date
                .checked_add_days(Days::new(urgency.lead_days()))
                .unwrap_or(NaiveDate::MAX);

            Ok(ReplacementEntry {
                sensor_id: sensor.id().to_string(),
                sensor_type: sensor.sensor_type(),
                current_health: sensor.health(),
                uptime_hours: sensor.uptime_hours(),
                expected_remaining_life_hours: remaining_life.max(0.0),
                urgency,
                scheduled_date,
                estimated_cost: config.replacement_cost,
                failure_probability_30d: model
                    .cdf(sensor.uptime_hours() + config.failure_window_hours),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    entries.sort_by(|a, b| {
        a.expected_remaining_life_hours
            .total_cmp(&b.expected_remaining_life_hours)
    });
    Ok(entries)
}
