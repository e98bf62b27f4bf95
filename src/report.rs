// RELIA - IoT sensor fleet reliability
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Fleet report
//!
//! Snapshot of every fleet-level figure, renderable as plain text for the
//! console or serialized to JSON.

use serde::Serialize;

use crate::error::{ReliaError, Result};
use crate::fleet::{CascadeRisk, ErlangSummary, FleetManager, SensorStats};
use crate::maintenance::{CrewStatus, MaintenanceTask, ReplacementEntry};
use crate::queueing::QueueingModel;
use crate::sensor::{Location, SensorType};

/// Maintenance queue figures
///
/// Waiting metrics are `None` when the queue is unstable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueueSummary {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub servers: u32,
    pub utilization: f64,
    pub stable: bool,
    pub avg_queue_length: Option<f64>,
    pub avg_wait_hours: Option<f64>,
    pub probability_of_wait: Option<f64>,
}

impl QueueSummary {
    fn from_model(model: &QueueingModel) -> Self {
        Self {
            arrival_rate: model.arrival_rate(),
            service_rate: model.service_rate(),
            servers: model.servers(),
            utilization: model.utilization(),
            stable: model.is_stable(),
            avg_queue_length: model.avg_queue_length(),
            avg_wait_hours: model.avg_wait_time(),
            probability_of_wait: model.probability_of_wait(),
        }
    }
}

/// Exponential versus Erlang view of one sensor
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleAnalysis {
    pub sensor_id: String,
    pub sensor_type: SensorType,
    pub horizon_hours: f64,
    pub exponential_reliability: f64,
    pub erlang_reliability: f64,
    pub mtbf_hours: f64,
    pub mttf_hours: f64,
}

/// Per-sensor row of the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorRow {
    pub id: String,
    #[serde(rename = "type")]
    pub sensor_type: SensorType,
    pub location: Location,
    pub health: f64,
    pub uptime_hours: f64,
    pub failure_rate: f64,
    pub k_stages: u32,
    pub mtbf: f64,
    pub mttf: f64,
}

/// Fleet-wide statistics snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetReport {
    pub stats: SensorStats,
    pub fleet_mtbf_hours: f64,
    pub fleet_mttf_hours: f64,
    pub reliability_horizon_hours: f64,
    pub fleet_reliability: f64,
    pub maintenance_queue: QueueSummary,
    pub cascade_risk: CascadeRisk,
    pub erlang_analysis: ErlangSummary,
    pub sample: Option<SampleAnalysis>,
    pub sensors: Vec<SensorRow>,
}

impl FleetReport {
    /// Run every fleet analysis with the fleet's configuration
    pub fn build(fleet: &FleetManager) -> Result<Self> {
        let config = fleet.config();
        let queue = config.queue.model()?;
        if !queue.is_stable() {
            log::warn!(
                "Maintenance queue unstable (rho = {:.3}), waiting metrics undefined",
                queue.utilization()
            );
        }

        let sample = match fleet.sensors().first() {
            Some(sensor) => {
                let exp = sensor.exponential_model()?;
                let erl = sensor.erlang_model()?;
                Some(SampleAnalysis {
                    sensor_id: sensor.id().to_string(),
                    sensor_type: sensor.sensor_type(),
                    horizon_hours: config.sample_horizon,
                    exponential_reliability: exp.reliability(config.sample_horizon),
                    erlang_reliability: erl.reliability(config.sample_horizon),
                    mtbf_hours: exp.mtbf(),
                    mttf_hours: erl.mttf(),
                })
            }
            None => None,
        };

        let sensors = fleet
            .sensors()
            .iter()
            .map(|s| {
                Ok(SensorRow {
                    id: s.id().to_string(),
                    sensor_type: s.sensor_type(),
                    location: s.location(),
                    health: s.health(),
                    uptime_hours: s.uptime_hours(),
                    failure_rate: s.failure_rate(),
                    k_stages: s.k_stages(),
                    mtbf: s.exponential_model()?.mtbf(),
                    mttf: s.erlang_model()?.mttf(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let report = Self {
            stats: fleet.sensor_stats(),
            fleet_mtbf_hours: fleet.fleet_mtbf()?,
            fleet_mttf_hours: fleet.fleet_mttf()?,
            reliability_horizon_hours: config.reliability_horizon,
            fleet_reliability: fleet.fleet_reliability(config.reliability_horizon)?,
            maintenance_queue: QueueSummary::from_model(&queue),
            cascade_risk: fleet.analyze_cascade_risk()?,
            erlang_analysis: fleet.erlang_summary()?,
            sample,
            sensors,
        };

        log::info!(
            "Fleet report: {} sensors, MTBF {:.1} h, cascade risk {}",
            report.stats.total,
            report.fleet_mtbf_hours,
            report.cascade_risk.risk_level
        );
        Ok(report)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ReliaError::Serialization(e.to_string()))
    }

    /// Generate a human-readable report
    pub fn render_text(&self) -> String {
        let mut report = String::new();

        report.push_str("=== Fleet Reliability Metrics ===\n");
        report.push_str(&format!("Fleet MTBF: {:.2} hours\n", self.fleet_mtbf_hours));
        report.push_str(&format!("Fleet MTTF: {:.2} hours\n", self.fleet_mttf_hours));
        report.push_str(&format!(
            "Fleet Reliability ({}h): {:.2}%\n\n",
            self.reliability_horizon_hours,
            self.fleet_reliability * 100.0
        ));

        report.push_str("=== Sensor Statistics ===\n");
        report.push_str(&format!("Total Sensors: {}\n", self.stats.total));
        report.push_str(&format!("Active (>70%): {}\n", self.stats.active));
        report.push_str(&format!("Warning (30-70%): {}\n", self.stats.warning));
        report.push_str(&format!("Failed (<=30%): {}\n\n", self.stats.failed));

        let queue = &self.maintenance_queue;
        report.push_str(&format!(
            "=== Maintenance Queue Analysis (M/M/{}) ===\n",
            queue.servers
        ));
        match (queue.avg_queue_length, queue.avg_wait_hours) {
            (Some(lq), Some(wq)) if queue.stable => {
                report.push_str(&format!(
                    "System Utilization: {:.2}%\n",
                    queue.utilization * 100.0
                ));
                report.push_str(&format!("Average Queue Length: {:.4}\n", lq));
                report.push_str(&format!("Average Wait Time: {:.2} minutes\n\n", wq * 60.0));
            }
            _ => report.push_str("Queue system unstable (rho >= 1)\n\n"),
        }

        let risk = &self.cascade_risk;
        report.push_str("=== Cascade Failure Risk ===\n");
        report.push_str(&format!("Current Failures: {}\n", risk.current_failures));
        report.push_str(&format!("Cascade Risk Factor: {:.3}\n", risk.risk_factor));
        report.push_str(&format!(
            "Dependency Multiplier: {:.1}\n",
            risk.dependency_multiplier
        ));
        report.push_str(&format!(
            "Expected Additional Failures: {}\n",
            risk.expected_additional
        ));
        report.push_str(&format!(
            "Total Predicted Failures: {}\n",
            risk.total_predicted()
        ));
        report.push_str(&format!("Risk Level: {}\n\n", risk.risk_level));

        let erlang = &self.erlang_analysis;
        report.push_str("=== Erlang Analysis ===\n");
        report.push_str(&format!(
            "Multi-stage sensors (k > 2): {}\n",
            erlang.multi_stage_sensors
        ));
        report.push_str(&format!("Average k: {:.2}\n", erlang.mean_k_stages));
        report.push_str(&format!(
            "Average lambda: {:.6} per hour\n\n",
            erlang.mean_failure_rate
        ));

        if let Some(sample) = &self.sample {
            report.push_str("=== Sample Sensor Analysis ===\n");
            report.push_str(&format!("Sensor ID: {}\n", sample.sensor_id));
            report.push_str(&format!("Type: {}\n", sample.sensor_type));
            report.push_str(&format!(
                "Exponential R({}h): {:.4}\n",
                sample.horizon_hours, sample.exponential_reliability
            ));
            report.push_str(&format!(
                "Erlang R({}h): {:.4}\n",
                sample.horizon_hours, sample.erlang_reliability
            ));
            report.push_str(&format!("MTBF: {:.2} hours\n", sample.mtbf_hours));
            report.push_str(&format!("MTTF: {:.2} hours\n\n", sample.mttf_hours));
        }

        report
    }
}

/// Render the first `limit` routing tasks
pub fn render_routes(tasks: &[MaintenanceTask], limit: usize) -> String {
    let mut report = String::new();
    report.push_str("=== Maintenance Routing ===\n");
    report.push_str(&format!("Generated {} maintenance tasks\n", tasks.len()));
    for task in tasks.iter().take(limit) {
        report.push_str(&format!(
            "  {} -> {} (P{}, ETA: {} min, repair: {} min)\n",
            task.sensor_id,
            task.assigned_crew,
            task.priority,
            task.estimated_arrival_minutes,
            task.estimated_repair_minutes
        ));
    }
    report.push('\n');
    report
}

/// Render per-crew workload
pub fn render_crews(status: &[CrewStatus]) -> String {
    let mut report = String::new();
    report.push_str("=== Crew Status ===\n");
    for crew in status {
        let eta = crew
            .first_eta_minutes
            .map_or_else(|| "idle".to_string(), |m| format!("first ETA {} min", m));
        report.push_str(&format!(
            "  {}: {} tasks ({})\n",
            crew.crew, crew.assigned_tasks, eta
        ));
    }
    report.push('\n');
    report
}

/// Render the first `limit` rows of a replacement schedule
pub fn render_replacements(entries: &[ReplacementEntry], limit: usize) -> String {
    let mut report = String::new();
    report.push_str("=== Replacement Schedule ===\n");
    report.push_str(&format!(
        "{:<10} {:<12} {:>8} {:>10} {:>12} {:<9} {:<10} {:>8}\n",
        "sensor", "type", "health", "uptime", "remaining", "urgency", "date", "p(30d)"
    ));
    for entry in entries.iter().take(limit) {
        report.push_str(&format!(
            "{:<10} {:<12} {:>8.1} {:>10.0} {:>12.0} {:<9} {:<10} {:>8.4}\n",
            entry.sensor_id,
            entry.sensor_type.as_str(),
            entry.current_health,
            entry.uptime_hours,
            entry.expected_remaining_life_hours,
            entry.urgency.as_str(),
            entry.scheduled_date.to_string(),
            entry.failure_probability_30d
        ));
    }
    report.push('\n');
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fleet::FleetConfig;
    use crate::queueing::QueueConfig;
    use crate::sensor::Sensor;

    fn sample_fleet(config: FleetConfig) -> FleetManager {
        let mut fleet = FleetManager::with_config(config);
        let healths = [95.0, 80.0, 55.0, 20.0, 10.0];
        for (i, health) in healths.iter().enumerate() {
            fleet
                .add_sensor(
                    Sensor::new(
                        format!("SNS-{:04}", i + 1),
                        SensorType::ALL[i % 3],
                        0.0005,
                        3,
                    )
                    .with_health(*health)
                    .with_uptime(1000.0 + i as f64 * 100.0),
                )
                .unwrap();
        }
        fleet
    }

    #[test]
    fn test_build_report() {
        let fleet = sample_fleet(FleetConfig::default());
        let report = FleetReport::build(&fleet).unwrap();

        assert_eq!(report.stats.total, 5);
        assert!((report.fleet_mtbf_hours - 2000.0).abs() < 1e-6);
        assert!((report.fleet_mttf_hours - 6000.0).abs() < 1e-6);
        assert!(report.maintenance_queue.stable);
        assert!(report.maintenance_queue.avg_wait_hours.is_some());
        assert_eq!(report.cascade_risk.current_failures, 2);
        assert_eq!(report.sensors.len(), 5);
        assert_eq!(report.sample.as_ref().unwrap().sensor_id, "SNS-0001");
    }

    #[test]
    fn test_build_report_on_empty_fleet() {
        let fleet = FleetManager::new();
        assert!(FleetReport::build(&fleet).is_err());
    }

    #[test]
    fn test_render_text_sections() {
        let fleet = sample_fleet(FleetConfig::default());
        let text = FleetReport::build(&fleet).unwrap().render_text();
        assert!(text.contains("=== Fleet Reliability Metrics ==="));
        assert!(text.contains("Fleet MTBF: 2000.00 hours"));
        assert!(text.contains("Total Sensors: 5"));
        assert!(text.contains("(M/M/3)"));
        assert!(text.contains("System Utilization: 11.11%"));
        assert!(text.contains("Risk Level: HIGH"));
        // 2 of 5 failed: 2 × 1.5 × 0.3 = 0.9 -> none more
        assert!(text.contains("Total Predicted Failures: 2"));
        assert!(text.contains("Multi-stage sensors (k > 2): 5"));
        assert!(text.contains("Average k: 3.00"));
        assert!(text.contains("Sensor ID: SNS-0001"));
    }

    #[test]
    fn test_render_text_unstable_queue() {
        let config = FleetConfig {
            queue: QueueConfig {
                arrival_rate: 1.0,
                service_rate: 0.1,
                servers: 1,
            },
            ..Default::default()
        };
        let report = FleetReport::build(&sample_fleet(config)).unwrap();
        assert!(!report.maintenance_queue.stable);
        assert_eq!(report.maintenance_queue.avg_queue_length, None);
        assert!(report
            .render_text()
            .contains("Queue system unstable (rho >= 1)"));
    }

    #[test]
    fn test_json_snapshot() {
        let fleet = sample_fleet(FleetConfig::default());
        let json = FleetReport::build(&fleet).unwrap().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["stats"]["total"], 5);
        assert_eq!(value["cascade_risk"]["risk_level"], "HIGH");
        assert_eq!(value["sensors"][1]["type"], "AIR_QUALITY");
        assert_eq!(value["sensors"][0]["location"]["x"], 0.0);
        assert_eq!(value["erlang_analysis"]["multi_stage_sensors"], 5);
        assert_eq!(value["erlang_analysis"]["mean_k_stages"], 3.0);
    }

    #[test]
    fn test_render_crews() {
        let status = vec![
            CrewStatus {
                crew: "CREW-A".to_string(),
                assigned_tasks: 2,
                first_eta_minutes: Some(14),
            },
            CrewStatus {
                crew: "CREW-B".to_string(),
                assigned_tasks: 0,
                first_eta_minutes: None,
            },
        ];
        let text = render_crews(&status);
        assert!(text.contains("CREW-A: 2 tasks (first ETA 14 min)"));
        assert!(text.contains("CREW-B: 0 tasks (idle)"));
    }

    #[test]
    fn test_render_routes_limit() {
        let tasks: Vec<MaintenanceTask> = (0..8)
            .map(|i| MaintenanceTask {
                sensor_id: format!("SNS-{:04}", i),
                sensor_type: SensorType::Traffic,
                location: Location::default(),
                health: 10.0,
                assigned_crew: "CREW-A".to_string(),
                priority: 1,
                estimated_arrival_minutes: 12,
                estimated_repair_minutes: 60,
            })
            .collect();
        let text = render_routes(&tasks, 5);
        assert!(text.contains("Generated 8 maintenance tasks"));
        assert_eq!(text.matches("CREW-A").count(), 5);
    }
}
