use super::*;
use lpg_core::models::common::Location;
use lpg_core::models::problem::{Order, Vehicle, VehicleState};
use lpg_core::models::solution::{Solution as CoreSolution, UnassignedOrder as CoreUnassignedOrder};
use lpg_core::prelude::RunState;
use lpg_core::solver::IterationRecord;
use lpg_core::validation::ValidationWarning;
use std::fs;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn create_order(id: &str, destination: (i32, i32)) -> Arc<Order> {
    Arc::new(Order {
        id: id.to_string(),
        destination: destination.into(),
        volume: 5.,
        registered_at: 0.,
        deadline: 480.,
    })
}

fn create_leg(path: &[(i32, i32)], arrival: f64, kind: LegKind) -> RouteLeg {
    let path = path.iter().map(|&location| Location::from(location)).collect::<Vec<_>>();

    RouteLeg { origin: path[0], destination: path[path.len() - 1], path, arrival, kind }
}

fn create_run_result(metrics: Option<Metrics>) -> RunResult {
    let delivered = create_order("c-1", (0, 2));
    let pending = create_order("c-2", (15, 15));
    let vehicle = Vehicle {
        id: "TA01".to_string(),
        capacity: 25.,
        fuel_capacity: 25.,
        fuel: 25.,
        tare_weight: 2.5,
        gross_weight: 15.,
        position: Location::new(0, 0),
        state: VehicleState::Available,
    };
    let legs = vec![
        create_leg(&[(0, 0), (0, 1), (0, 2)], 2.4, LegKind::Delivery(delivered.clone())),
        create_leg(&[(0, 2), (0, 1), (0, 0)], 19.8, LegKind::Return { depot_id: "central".to_string() }),
    ];

    RunResult {
        solution: CoreSolution {
            assignments: vec![VehicleAssignment {
                vehicle,
                orders: vec![delivered.clone()],
                legs,
                total_distance: 4,
                fuel_consumed: 0.25,
            }],
            unassigned: vec![CoreUnassignedOrder {
                order: pending.clone(),
                reason: UnassignedReason::NoFittingVehicle,
            }],
            quality: 0.5,
        },
        state: RunState::Converged,
        iterations: 7,
        final_time: 35.,
        order_states: vec![(delivered, OrderState::Delivered), (pending, OrderState::Pending)],
        warnings: vec![ValidationWarning::OrderDuplicateId { order_id: "c-3".to_string() }],
        seed: 42,
        metrics,
    }
}

#[test]
fn can_create_solution_from_run_result() {
    let solution = create_solution(&create_run_result(None));

    assert_eq!(solution.state, "converged");
    assert_eq!((solution.iterations, solution.final_time, solution.seed), (7, 35., 42));
    assert_eq!(solution.quality, 0.5);
    assert_eq!((solution.statistic.distance, solution.statistic.fuel), (4, 0.25));
    assert_eq!((solution.statistic.assigned, solution.statistic.unassigned), (1, 1));

    let tour = &solution.tours[0];
    assert_eq!(tour.vehicle_id, "TA01");
    assert_eq!(tour.orders, vec!["c-1".to_string()]);
    assert_eq!(tour.legs.len(), 2);
    assert_eq!(tour.legs[0].activity, Activity::Delivery { order_id: "c-1".to_string() });
    assert_eq!(tour.legs[0].path, vec![(0, 0), (0, 1), (0, 2)]);
    assert_eq!((tour.legs[0].origin, tour.legs[0].destination), ((0, 0), (0, 2)));
    assert_eq!(tour.legs[1].activity, Activity::Return { depot_id: "central".to_string() });
    assert_eq!(tour.legs[1].arrival, 19.8);

    assert_eq!(solution.unassigned.len(), 1);
    assert_eq!(solution.unassigned[0].order_id, "c-2");
    assert_eq!(solution.unassigned[0].code, "NO_FITTING_VEHICLE");
    assert_eq!(solution.unassigned[0].description, "no fitting vehicle");

    let states = solution.orders.iter().map(|status| (status.id.as_str(), status.state.as_str())).collect::<Vec<_>>();
    assert_eq!(states, vec![("c-1", "delivered"), ("c-2", "pending")]);
    assert_eq!(solution.warnings, vec!["order id 'c-3' is duplicated".to_string()]);
    assert!(solution.metrics.is_none());
}

#[test]
fn can_get_reason_codes() {
    let cases = [
        (UnassignedReason::InvalidInput, "INVALID_INPUT"),
        (UnassignedReason::NoFittingVehicle, "NO_FITTING_VEHICLE"),
        (UnassignedReason::Unreachable, "UNREACHABLE"),
        (UnassignedReason::InsufficientFuel, "INSUFFICIENT_FUEL"),
    ];

    for (reason, expected) in cases {
        assert_eq!(get_reason_code(&reason), expected);
    }
}

#[test]
fn can_map_metrics() {
    let metrics = Metrics {
        duration: 1,
        iterations: 2,
        speed: 2.,
        evolution: (0..2)
            .map(|number| IterationRecord {
                number,
                timestamp: number as f64 * 0.5,
                best_quality: 0.5,
                is_improvement: number == 0,
                assigned: 1,
                unassigned: 1,
                distance: 4,
                fuel: 0.25,
                ants: 20,
                q0: 0.85,
            })
            .collect(),
    };

    let solution = create_solution(&create_run_result(Some(metrics)));

    let metrics = solution.metrics.expect("no metrics");
    assert_eq!((metrics.duration, metrics.iterations, metrics.speed), (1, 2, 2.));
    assert_eq!(metrics.evolution.len(), 2);
    assert!(metrics.evolution[0].is_improvement);
    assert!(!metrics.evolution[1].is_improvement);
    assert_eq!(metrics.evolution[1].timestamp, 0.5);
    assert_eq!(metrics.evolution[1].ants, 20);
}

#[test]
fn can_write_and_read_solution_json() {
    let file = NamedTempFile::new().expect("cannot create temp file");

    create_run_result(None)
        .write_json(BufWriter::new(file.reopen().expect("cannot reopen temp file")))
        .expect("cannot write solution");

    let content = fs::read_to_string(file.path()).expect("cannot read temp file");
    assert!(content.contains(r#""type": "delivery""#));
    assert!(content.contains(r#""orderId": "c-1""#));
    assert!(content.contains(r#""depotId": "central""#));
    assert!(!content.contains("metrics"));

    let solution = deserialize_solution(BufReader::new(content.as_bytes())).expect("cannot read solution");
    assert_eq!(solution.tours[0].legs[0].activity, Activity::Delivery { order_id: "c-1".to_string() });
    assert_eq!(solution.unassigned[0].code, "NO_FITTING_VEHICLE");
    assert_eq!(solution.orders.len(), 2);
}
