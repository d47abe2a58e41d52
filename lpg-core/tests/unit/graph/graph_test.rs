use super::*;
use crate::helpers::models::test_blockage;

fn create_graph(blockages: Vec<Blockage>) -> RouteGraph {
    RouteGraph::new(GridSize::new(10, 10), blockages, 60.)
}

parameterized_test! {can_get_neighbors, (location, expected), {
    let graph = create_graph(vec![]);

    let mut neighbors = graph.neighbors(&Location::from(location));
    neighbors.sort();

    assert_eq!(neighbors, expected.into_iter().map(Location::from).collect::<Vec<_>>());
}}

can_get_neighbors! {
    case_01_corner: ((0, 0), vec![(0, 1), (1, 0)]),
    case_02_border: ((10, 5), vec![(9, 5), (10, 4), (10, 6)]),
    case_03_inner: ((5, 5), vec![(4, 5), (5, 4), (5, 6), (6, 5)]),
    case_04_outside: ((11, 5), Vec::<(i32, i32)>::new()),
}

#[test]
fn can_tag_depots() {
    let depots = vec![Depot::central("c", Location::new(0, 0)), Depot::intermediate("t", Location::new(5, 5), 10.)];

    let graph = create_graph(vec![]).with_depots(depots.as_slice());

    assert_eq!(graph.depot_at(&Location::new(0, 0)), Some(DepotKind::Central));
    assert_eq!(graph.depot_at(&Location::new(5, 5)), Some(DepotKind::Intermediate));
    assert_eq!(graph.depot_at(&Location::new(1, 1)), None);
}

#[test]
fn can_check_blocked_node_by_time() {
    let graph = create_graph(vec![test_blockage(60., 120., &[(3, 0), (3, 5)])]);

    assert!(graph.is_blocked(&Location::new(3, 2), 60.));
    assert!(!graph.is_blocked(&Location::new(3, 2), 59.));
    assert!(!graph.is_blocked(&Location::new(3, 2), 120.));
    assert!(!graph.is_blocked(&Location::new(4, 2), 90.));
}

#[test]
fn can_check_blocked_edge_by_time() {
    let graph = create_graph(vec![test_blockage(60., 120., &[(3, 0), (3, 5)])]);

    assert!(graph.is_blocked_edge(&Location::new(2, 2), &Location::new(3, 2), 90.));
    assert!(graph.is_blocked_edge(&Location::new(3, 2), &Location::new(3, 3), 90.));
    assert!(!graph.is_blocked_edge(&Location::new(2, 2), &Location::new(3, 2), 30.));
    assert!(!graph.is_blocked_edge(&Location::new(2, 6), &Location::new(3, 6), 90.));
}

#[test]
fn can_detect_blockages_within_interval() {
    let graph = create_graph(vec![test_blockage(60., 120., &[(3, 0), (3, 5)])]);

    assert!(graph.has_blockage_within(0., 60.));
    assert!(graph.has_blockage_within(100., 200.));
    assert!(!graph.has_blockage_within(0., 59.));
    assert!(!graph.has_blockage_within(120., 200.));

    assert!(graph.is_blocked_edge_within(&Location::new(2, 2), &Location::new(3, 2), 0., 100.));
    assert!(!graph.is_blocked_edge_within(&Location::new(2, 2), &Location::new(3, 2), 0., 40.));
}

#[test]
fn can_detect_future_crossing_on_path() {
    let graph = create_graph(vec![test_blockage(100., 200., &[(3, 0), (3, 5)])]);
    let path = (0..=5).map(|x| Location::new(x, 2)).collect::<Vec<_>>();

    assert!(graph.crosses_future_blockage(path.as_slice(), 0., 240.));
    assert!(!graph.crosses_future_blockage(path.as_slice(), 0., 50.));
    assert!(!graph.crosses_future_blockage(path.as_slice(), 200., 240.));
}

#[test]
fn can_calculate_travel_time() {
    let graph = RouteGraph::new(GridSize::new(10, 10), vec![], 50.);

    assert!((graph.travel_minutes(10) - 12.).abs() < 1e-9);
}

#[test]
fn can_build_corridor() {
    let path = corridor(Location::new(3, 1), Location::new(1, 2));

    assert_eq!(path, vec![Location::new(3, 1), Location::new(2, 1), Location::new(1, 1), Location::new(1, 2)]);
    assert_eq!(corridor(Location::new(1, 1), Location::new(1, 1)), vec![Location::new(1, 1)]);
}
