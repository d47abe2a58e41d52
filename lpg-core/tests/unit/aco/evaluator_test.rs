use super::*;
use crate::helpers::models::{test_blockage, test_order_with_window, test_vehicle};
use crate::models::common::{Location, TimeWindow};
use crate::models::problem::{Blockage, GridSize, Order};
use crate::models::solution::{RouteLeg, UnassignedOrder, UnassignedReason};
use std::sync::Arc;

fn vertical_path(length: i32) -> Vec<Location> {
    (0..=length).map(|y| Location::new(0, y)).collect()
}

fn create_assignment(order: Arc<Order>) -> VehicleAssignment {
    let forward = vertical_path(4);
    let backward = forward.iter().rev().cloned().collect::<Vec<_>>();

    VehicleAssignment {
        vehicle: test_vehicle("v1"),
        orders: vec![order.clone()],
        legs: vec![
            RouteLeg {
                origin: Location::new(0, 0),
                destination: Location::new(0, 4),
                path: forward,
                arrival: 4.,
                kind: LegKind::Delivery(order),
            },
            RouteLeg {
                origin: Location::new(0, 4),
                destination: Location::new(0, 0),
                path: backward,
                arrival: 23.,
                kind: LegKind::Return { depot_id: "central".to_string() },
            },
        ],
        total_distance: 8,
        fuel_consumed: 0.,
    }
}

fn create_solution(deadline: f64) -> Solution {
    let order = test_order_with_window("c1", (0, 4), 5., 0., deadline);

    Solution { assignments: vec![create_assignment(order)], unassigned: vec![], quality: 0. }
}

fn create_graph(blockages: Vec<Blockage>) -> RouteGraph {
    RouteGraph::new(GridSize::new(10, 10), blockages, 60.)
}

#[test]
fn can_estimate_fuel_by_carried_weight() {
    let graph = create_graph(vec![]);
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);

    let cost = evaluator.cost(&create_solution(480.), 0.);

    assert!((cost.fuel - (4. * 5. + 4. * 2.5) / 180.).abs() < 1e-9);
    assert_eq!(cost.lateness, 0.);
    assert_eq!(cost.blockage, 0.);
    assert_eq!(cost.maintenance, 0.);
    assert_eq!(cost.unassigned, 0.);
}

#[test]
fn can_penalize_late_delivery_per_minute() {
    let graph = create_graph(vec![]);
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);

    let cost = evaluator.cost(&create_solution(2.), 0.);

    assert_eq!(cost.lateness, 2. * 100.);
}

parameterized_test! {can_penalize_leg_crossing_active_blockage, (start, end, expected), {
    can_penalize_leg_crossing_active_blockage_impl(start, end, expected);
}}

can_penalize_leg_crossing_active_blockage! {
    case_01_active_during_traversal: (0., 10., 50_000.),
    case_02_active_later: (100., 200., 0.),
    case_03_expired_before_traversal: (0., 0.5, 0.),
}

fn can_penalize_leg_crossing_active_blockage_impl(start: f64, end: f64, expected: f64) {
    let graph = create_graph(vec![test_blockage(start, end, &[(0, 2)])]);
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);

    let cost = evaluator.cost(&create_solution(480.), 0.);

    assert_eq!(cost.blockage, expected);
}

parameterized_test! {can_penalize_route_overlapping_maintenance, (vehicle_id, start, end, expected), {
    can_penalize_route_overlapping_maintenance_impl(vehicle_id, start, end, expected);
}}

can_penalize_route_overlapping_maintenance! {
    case_01_overlaps: ("v1", 10., 50., 200_000.),
    case_02_after_route_end: ("v1", 30., 50., 0.),
    case_03_other_vehicle: ("v2", 10., 50., 0.),
}

fn can_penalize_route_overlapping_maintenance_impl(vehicle_id: &str, start: f64, end: f64, expected: f64) {
    let graph = create_graph(vec![]);
    let maintenances = vec![Maintenance { vehicle_id: vehicle_id.to_string(), window: TimeWindow::new(start, end) }];
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, maintenances.as_slice(), &routing, &penalties);

    let cost = evaluator.cost(&create_solution(480.), 0.);

    assert_eq!(cost.maintenance, expected);
}

#[test]
fn can_penalize_unassigned_orders() {
    let graph = create_graph(vec![]);
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);
    let solution = Solution {
        assignments: vec![],
        unassigned: vec![UnassignedOrder {
            order: test_order_with_window("c1", (0, 4), 5., 0., 480.),
            reason: UnassignedReason::NoFittingVehicle,
        }],
        quality: 0.,
    };

    let cost = evaluator.cost(&solution, 0.);

    assert_eq!(cost.unassigned, 1e6);
    assert_eq!(evaluator.evaluate(&solution, 0.), 1. / (1. + 1e6));
}

#[test]
fn can_return_quality_of_empty_solution() {
    let graph = create_graph(vec![]);
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);

    assert_eq!(evaluator.evaluate(&Solution::default(), 0.), 1.);
}

#[test]
fn can_estimate_delivery_times_from_start() {
    let graph = create_graph(vec![]);
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);

    let times = evaluator.delivery_times(&create_solution(480.), 100.);

    assert_eq!(times.len(), 1);
    assert_eq!(times.get("c1").copied(), Some(104.));
}

#[test]
fn can_prefer_solution_without_lateness() {
    let graph = create_graph(vec![]);
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);

    let on_time = evaluator.evaluate(&create_solution(480.), 0.);
    let late = evaluator.evaluate(&create_solution(3.), 0.);

    assert!(on_time > late);
    assert!(late > 0.);
}

parameterized_test! {can_let_vehicle_leave_blocked_node, (first_step, expected), {
    can_let_vehicle_leave_blocked_node_impl(first_step, expected);
}}

can_let_vehicle_leave_blocked_node! {
    case_01_leaves_blockage: ((1, 2), 0.),
    case_02_moves_along_blockage: ((0, 3), 50_000.),
}

fn can_let_vehicle_leave_blocked_node_impl(first_step: (i32, i32), expected: f64) {
    let graph = create_graph(vec![test_blockage(0., 10_000., &[(0, 0), (0, 5)])]);
    let (routing, penalties) = (RoutingConfig::default(), PenaltyConfig::default());
    let evaluator = SolutionEvaluator::new(&graph, &[], &routing, &penalties);
    let order = test_order_with_window("c1", first_step, 1., 0., 480.);
    let path = vec![Location::new(0, 2), first_step.into()];
    let solution = Solution {
        assignments: vec![VehicleAssignment {
            vehicle: test_vehicle("v1"),
            orders: vec![order.clone()],
            legs: vec![RouteLeg {
                origin: Location::new(0, 2),
                destination: first_step.into(),
                path,
                arrival: 1.,
                kind: LegKind::Delivery(order),
            }],
            total_distance: 1,
            fuel_consumed: 0.,
        }],
        unassigned: vec![],
        quality: 0.,
    };

    let cost = evaluator.cost(&solution, 0.);

    assert_eq!(cost.blockage, expected);
}
