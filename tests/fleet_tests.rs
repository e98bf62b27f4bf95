// RELIA - Integration Tests
//
// End-to-end checks of the public API, organized as:
// 1. Failure models
// 2. Maintenance queue
// 3. Fleet aggregation
// 4. Maintenance planning
// 5. Report

use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use relia::{
    crew_status, plan_routes, replacement_schedule, ErlangModel, ExponentialModel, FailureModel,
    FleetError, FleetManager, FleetReport, MaintenanceConfig, ModelError, QueueingModel,
    ReliaError, RiskLevel, Sensor, SensorType, Urgency,
};

fn sensor(id: &str, health: f64) -> Sensor {
    Sensor::new(id, SensorType::Traffic, 0.0005, 3).with_health(health)
}

fn fleet_with_health(healths: &[f64]) -> FleetManager {
    let mut fleet = FleetManager::new();
    fleet
        .add_sensors(
            healths
                .iter()
                .enumerate()
                .map(|(i, h)| sensor(&format!("SNS-{:04}", i + 1), *h)),
        )
        .unwrap();
    fleet
}

// ============================================================================
// Failure Model Tests
// ============================================================================

#[test]
fn test_exponential_reliability_curve() {
    let mut rng = StdRng::seed_from_u64(11);
    for _ in 0..50 {
        let lambda = rng.gen_range(1e-5..1e-2);
        let model = ExponentialModel::new(lambda).unwrap();
        assert_eq!(model.reliability(0.0), 1.0);

        let mut previous = 1.0;
        for step in 1..=20 {
            let r = model.reliability(step as f64 * 100.0);
            assert!(r < previous, "R must strictly decrease (lambda={})", lambda);
            previous = r;
        }
        assert!(model.reliability(1e9) < 1e-12);
    }
}

#[test]
fn test_erlang_single_stage_matches_exponential() {
    let mut rng = StdRng::seed_from_u64(12);
    for _ in 0..50 {
        let lambda = rng.gen_range(1e-4..1e-2);
        let exp = ExponentialModel::new(lambda).unwrap();
        let erl = ErlangModel::new(1, lambda).unwrap();
        for t in [0.0, 10.0, 250.0, 1000.0, 5000.0] {
            assert_abs_diff_eq!(erl.reliability(t), exp.reliability(t), epsilon = 1e-9);
            assert_abs_diff_eq!(erl.pdf(t), exp.pdf(t), epsilon = 1e-9);
        }
    }
}

#[test]
fn test_erlang_mttf_is_k_over_lambda() {
    for k in 1..=8 {
        let model = ErlangModel::new(k, 0.0005).unwrap();
        assert_relative_eq!(model.mttf(), k as f64 / 0.0005, max_relative = 1e-12);
        assert_relative_eq!(model.mean_lifetime(), model.mttf());
    }
}

#[test]
fn test_more_stages_survive_longer() {
    let t = 3000.0;
    let survival: Vec<f64> = (1..=5)
        .map(|k| ErlangModel::new(k, 0.0005).unwrap().reliability(t))
        .collect();
    assert!(survival.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_invalid_model_parameters() {
    assert!(matches!(
        ExponentialModel::new(0.0),
        Err(ReliaError::Model(ModelError::InvalidRate { .. }))
    ));
    assert!(ExponentialModel::new(f64::NAN).is_err());
    assert_eq!(
        ErlangModel::new(0, 0.001),
        Err(ReliaError::Model(ModelError::InvalidStages(0)))
    );
    assert!(ErlangModel::new(2, -0.001).is_err());
}

// ============================================================================
// Maintenance Queue Tests
// ============================================================================

#[test]
fn test_stability_matches_capacity() {
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..200 {
        let arrival = rng.gen_range(0.0..2.0);
        let service = rng.gen_range(0.05..1.0);
        let servers = rng.gen_range(1..=6);
        let queue = QueueingModel::new(arrival, service, servers).unwrap();

        assert_eq!(queue.is_stable(), queue.utilization() < 1.0);
        assert_eq!(queue.is_stable(), arrival < servers as f64 * service);
        assert_eq!(queue.avg_wait_time().is_some(), queue.is_stable());
    }
}

#[test]
fn test_littles_law() {
    let mut rng = StdRng::seed_from_u64(22);
    let mut checked = 0;
    while checked < 100 {
        let servers = rng.gen_range(1..=5);
        let service = rng.gen_range(0.1..1.0);
        let arrival = rng.gen_range(0.01..(servers as f64 * service));
        let queue = QueueingModel::new(arrival, service, servers).unwrap();
        if !queue.is_stable() {
            continue;
        }
        let lq = queue.avg_queue_length().unwrap();
        let wq = queue.avg_wait_time().unwrap();
        assert_relative_eq!(wq * arrival, lq, max_relative = 1e-9);
        checked += 1;
    }
}

#[test]
fn test_unstable_queue_is_undefined() {
    let queue = QueueingModel::new(1.0, 0.1, 1).unwrap();
    assert_relative_eq!(queue.utilization(), 10.0);
    assert!(!queue.is_stable());
    assert_eq!(queue.avg_queue_length(), None);
    assert_eq!(queue.avg_wait_time(), None);
}

#[test]
fn test_default_crew_queue() {
    let queue = QueueingModel::new(0.05, 0.15, 3).unwrap();
    assert!(queue.is_stable());
    assert_relative_eq!(queue.utilization(), 0.05 / 0.45, max_relative = 1e-12);
    assert!(queue.avg_wait_time().unwrap() >= 0.0);
}

#[test]
fn test_city_scale_crew() {
    let queue = QueueingModel::new(240.0, 1.0, 250).unwrap();
    let lq = queue.avg_queue_length().unwrap();
    let wq = queue.avg_wait_time().unwrap();
    assert!(queue.p0().unwrap().is_finite());
    assert!(lq.is_finite() && lq >= 0.0);
    assert_relative_eq!(wq * 240.0, lq, max_relative = 1e-9);
    assert!(queue.probability_of_wait().unwrap() < 1.0);
}

// ============================================================================
// Fleet Aggregation Tests
// ============================================================================

#[test]
fn test_single_sensor_fleet_figures() {
    let fleet = fleet_with_health(&[50.0]);
    assert_relative_eq!(fleet.fleet_mtbf().unwrap(), 2000.0, max_relative = 1e-12);
    assert_relative_eq!(fleet.fleet_mttf().unwrap(), 6000.0, max_relative = 1e-12);

    let expected = ErlangModel::new(3, 0.0005).unwrap().reliability(1000.0);
    assert_relative_eq!(fleet.fleet_reliability(1000.0).unwrap(), expected);
}

#[test]
fn test_bucket_counts_partition_fleet() {
    let mut rng = StdRng::seed_from_u64(31);
    let healths: Vec<f64> = (0..500).map(|_| rng.gen_range(0.0..=100.0)).collect();
    let stats = fleet_with_health(&healths).sensor_stats();
    assert_eq!(stats.total, 500);
    assert_eq!(stats.active + stats.warning + stats.failed, stats.total);
}

#[test]
fn test_bucket_boundaries() {
    let stats = fleet_with_health(&[70.0, 70.0001, 30.0, 30.0001]).sensor_stats();
    assert_eq!(stats.active, 1);
    assert_eq!(stats.warning, 2);
    assert_eq!(stats.failed, 1);
}

#[test]
fn test_cascade_three_of_ten() {
    let fleet = fleet_with_health(&[10.0, 20.0, 29.0, 50.0, 60.0, 80.0, 90.0, 95.0, 75.0, 40.0]);
    let risk = fleet.analyze_cascade_risk().unwrap();
    assert_eq!(risk.current_failures, 3);
    assert_relative_eq!(risk.risk_factor, 0.3);
    assert_eq!(risk.dependency_multiplier, 1.5);
    assert_eq!(risk.expected_additional, 1);
    assert_eq!(risk.total_predicted(), 4);
    assert_eq!(risk.risk_level, RiskLevel::High);
}

#[test]
fn test_cascade_follows_health_updates() {
    let mut fleet = fleet_with_health(&[90.0; 10]);
    assert_eq!(fleet.analyze_cascade_risk().unwrap().risk_level, RiskLevel::Low);

    fleet.update_health("SNS-0001", 5.0).unwrap();
    let risk = fleet.analyze_cascade_risk().unwrap();
    assert_eq!(risk.current_failures, 1);
    assert_eq!(risk.risk_level, RiskLevel::Medium);
    assert_eq!(risk.dependency_multiplier, 1.0);

    fleet.update_health("SNS-0002", 5.0).unwrap();
    let risk = fleet.analyze_cascade_risk().unwrap();
    assert_eq!(risk.risk_level, RiskLevel::High);
    assert_eq!(risk.dependency_multiplier, 1.2);
}

#[test]
fn test_empty_fleet_errors() {
    let fleet = FleetManager::new();
    for result in [
        fleet.fleet_mtbf(),
        fleet.fleet_mttf(),
        fleet.fleet_reliability(1000.0),
    ] {
        assert!(matches!(
            result,
            Err(ReliaError::Fleet(FleetError::EmptyFleet { .. }))
        ));
    }
    assert!(fleet.analyze_cascade_risk().is_err());
    assert_eq!(fleet.sensor_stats().total, 0);
    assert!(FleetReport::build(&fleet).is_err());
}

#[test]
fn test_rejected_sensors_leave_fleet_unchanged() {
    let mut fleet = fleet_with_health(&[50.0]);
    assert!(fleet.add_sensor(sensor("SNS-0001", 60.0)).is_err());
    assert!(fleet.add_sensor(sensor("SNS-0002", 101.0)).is_err());
    assert!(fleet
        .add_sensor(Sensor::new("SNS-0003", SensorType::WaterFlow, 0.0, 2))
        .is_err());
    assert!(fleet
        .add_sensor(Sensor::new("SNS-0004", SensorType::WaterFlow, 0.001, 0))
        .is_err());
    assert_eq!(fleet.len(), 1);
}

// ============================================================================
// Maintenance Planning Tests
// ============================================================================

#[test]
fn test_routing_order_and_crew_rotation() {
    let mut fleet = FleetManager::new();
    fleet
        .add_sensors([
            sensor("SNS-0001", 10.0).with_queue_position(5),
            sensor("SNS-0002", 60.0),
            sensor("SNS-0003", 95.0),
            sensor("SNS-0004", 20.0).with_queue_position(1),
            sensor("SNS-0005", 40.0),
        ])
        .unwrap();

    let config = MaintenanceConfig::default();
    let mut rng = StdRng::seed_from_u64(41);
    let tasks = plan_routes(&fleet, &config, &mut rng);

    let order: Vec<&str> = tasks.iter().map(|t| t.sensor_id.as_str()).collect();
    assert_eq!(order, vec!["SNS-0004", "SNS-0001", "SNS-0005", "SNS-0002"]);

    let crews: Vec<&str> = tasks.iter().map(|t| t.assigned_crew.as_str()).collect();
    assert_eq!(crews, vec!["CREW-A", "CREW-B", "CREW-C", "CREW-A"]);

    assert_eq!(tasks[0].priority, 1);
    assert_eq!(tasks[2].priority, 2);
    assert_eq!(tasks[0].estimated_repair_minutes, 60);
    assert_eq!(tasks[3].estimated_repair_minutes, 30);

    for task in &tasks[..3] {
        assert!((10..30).contains(&task.estimated_arrival_minutes));
    }
    assert!((55..75).contains(&tasks[3].estimated_arrival_minutes));

    let status = crew_status(&config, &tasks);
    assert_eq!(status.len(), 3);
    assert_eq!(status[0].assigned_tasks, 2);
    assert_eq!(
        status[0].first_eta_minutes,
        Some(tasks[0].estimated_arrival_minutes)
    );
    assert_eq!(status[2].assigned_tasks, 1);
}

#[test]
fn test_replacement_urgency_and_order() {
    let make = |id: &str, uptime: f64| {
        Sensor::new(id, SensorType::AirQuality, 0.001, 2)
            .with_health(60.0)
            .with_uptime(uptime)
    };
    let mut fleet = FleetManager::new();
    fleet
        .add_sensors([
            make("SNS-LOW", 0.0),
            make("SNS-MED", 500.0),
            make("SNS-CRIT", 1800.0),
            make("SNS-HIGH", 1200.0),
            make("SNS-OLD", 2600.0),
        ])
        .unwrap();

    let reference = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let schedule =
        replacement_schedule(&fleet, &MaintenanceConfig::default(), reference).unwrap();

    let order: Vec<&str> = schedule.iter().map(|e| e.sensor_id.as_str()).collect();
    assert_eq!(
        order,
        vec!["SNS-OLD", "SNS-CRIT", "SNS-HIGH", "SNS-MED", "SNS-LOW"]
    );

    let urgencies: Vec<Urgency> = schedule.iter().map(|e| e.urgency).collect();
    assert_eq!(
        urgencies,
        vec![
            Urgency::Critical,
            Urgency::Critical,
            Urgency::High,
            Urgency::Medium,
            Urgency::Low,
        ]
    );

    assert_eq!(schedule[0].expected_remaining_life_hours, 0.0);
    assert_eq!(
        schedule[1].scheduled_date,
        NaiveDate::from_ymd_opt(2025, 1, 8).unwrap()
    );
    assert_eq!(
        schedule[4].scheduled_date,
        NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
    );

    let model = ErlangModel::new(2, 0.001).unwrap();
    assert_relative_eq!(schedule[2].failure_probability_30d, model.cdf(1200.0 + 720.0));
    assert!(schedule.iter().all(|e| e.estimated_cost == 5000.0));
}

// ============================================================================
// Report Tests
// ============================================================================

#[test]
fn test_report_json_sections() {
    let fleet = fleet_with_health(&[10.0, 50.0, 90.0]);
    let report = FleetReport::build(&fleet).unwrap();
    let json = report.to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    for section in [
        "stats",
        "fleet_mtbf_hours",
        "fleet_mttf_hours",
        "fleet_reliability",
        "maintenance_queue",
        "cascade_risk",
        "erlang_analysis",
        "sensors",
    ] {
        assert!(value.get(section).is_some(), "missing section {}", section);
    }
    assert_eq!(value["stats"]["total"], 3);
    assert_eq!(value["cascade_risk"]["risk_level"], "HIGH");
    assert_eq!(value["sensors"][0]["type"], "TRAFFIC");
}

#[test]
fn test_report_text_mentions_every_figure() {
    let fleet = fleet_with_health(&[10.0, 50.0, 90.0]);
    let text = FleetReport::build(&fleet).unwrap().render_text();
    assert!(text.contains("2000.00"));
    assert!(text.contains("6000.00"));
    assert!(text.contains("HIGH"));
}
