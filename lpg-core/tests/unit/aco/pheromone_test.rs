use super::*;
use crate::models::solution::*;
use crate::helpers::models::{test_order, test_vehicle};
use crate::utils::DefaultRandom;
use proptest::prelude::*;

fn location(x: i32, y: i32) -> Location {
    Location::new(x, y)
}

fn solution_with_path(path: Vec<Location>, quality: f64) -> Solution {
    let order = test_order("c1", (path.last().unwrap().x, path.last().unwrap().y), 1.);
    let leg = RouteLeg {
        origin: path[0],
        destination: *path.last().unwrap(),
        path,
        arrival: 0.,
        kind: LegKind::Delivery(order.clone()),
    };

    Solution {
        assignments: vec![VehicleAssignment {
            vehicle: test_vehicle("v1"),
            orders: vec![order],
            legs: vec![leg],
            total_distance: 0,
            fuel_consumed: 0.,
        }],
        unassigned: vec![],
        quality,
    }
}

#[test]
fn can_initialize_with_constant() {
    let field = PheromoneField::new(GridSize::new(5, 5), 0.1, 1e-4);

    assert_eq!(field.get(&location(0, 0), &location(1, 0)), 0.1);
    assert_eq!(field.get(&location(0, 0), &location(2, 0)), 0.);
}

#[test]
fn can_evaporate_down_to_floor() {
    let mut field = PheromoneField::new(GridSize::new(5, 5), 0.1, 0.05);

    field.evaporate(0.1);
    assert!((field.get(&location(0, 0), &location(1, 0)) - 0.09).abs() < 1e-12);

    (0..100).for_each(|_| field.evaporate(0.5));
    assert_eq!(field.min_value(), 0.05);
}

#[test]
fn can_reinforce_used_edges_once_in_both_directions() {
    let mut field = PheromoneField::new(GridSize::new(5, 5), 0.1, 1e-4);
    // the path goes forth and back over the same edge
    let solution = solution_with_path(vec![location(0, 0), location(1, 0), location(0, 0), location(0, 1)], 0.5);

    field.reinforce(std::iter::once(&solution), 10.);

    assert!((field.get(&location(1, 0), &location(0, 0)) - 5.1).abs() < 1e-12);
    assert!((field.get(&location(0, 1), &location(0, 0)) - 5.1).abs() < 1e-12);
    assert_eq!(field.get(&location(2, 0), &location(3, 0)), 0.1);
}

#[test]
fn can_reinforce_proportionally_to_quality() {
    let mut field = PheromoneField::new(GridSize::new(5, 5), 0.1, 1e-4);
    let good = solution_with_path(vec![location(0, 0), location(1, 0)], 0.8);
    let bad = solution_with_path(vec![location(0, 1), location(1, 1)], 0.2);

    field.reinforce([&good, &bad], 1.);

    assert!(field.get(&location(0, 0), &location(1, 0)) > field.get(&location(0, 1), &location(1, 1)));
}

#[test]
fn can_boost_share_of_edges_on_perturb() {
    let mut field = PheromoneField::new(GridSize::new(10, 10), 1., 1e-4);
    let random = DefaultRandom::new_with_seed(3);

    field.perturb(0., 0.1, 3., &random);

    let boosted = field.table().values().filter(|value| (*value - 3.).abs() < 1e-12).count();
    assert_eq!(boosted, (field.table().len() as f64 * 0.1).round() as usize);
}

proptest! {
    #[test]
    fn can_keep_values_above_half_floor_after_perturb(
        seed in any::<u64>(),
        rounds in 1_usize..20,
        evaporations in 0_usize..50,
    ) {
        let floor = 1e-4;
        let mut field = PheromoneField::new(GridSize::new(6, 6), floor, floor);
        let random = DefaultRandom::new_with_seed(seed);

        (0..evaporations).for_each(|_| field.evaporate(0.3));
        prop_assert!(field.min_value() >= floor);

        (0..rounds).for_each(|_| field.perturb(0.2, 0.1, 3., &random));
        prop_assert!(field.min_value() >= floor / 2.);
    }
}
