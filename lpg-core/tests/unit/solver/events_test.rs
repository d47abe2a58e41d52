use super::*;
use crate::helpers::models::{test_blockage, test_grid, test_vehicle};
use crate::models::common::TimeWindow;
use crate::models::problem::{IncidentKind, TankReservation};

fn create_graph() -> RouteGraph {
    RouteGraph::new(
        test_grid(),
        vec![test_blockage(10., 20., &[(1, 1), (1, 5)]), test_blockage(15., 30., &[(3, 1), (3, 5)])],
        50.,
    )
}

fn breakdown(vehicle_id: &str, at: Timestamp) -> Breakdown {
    Breakdown { vehicle_id: vehicle_id.to_string(), at, kind: IncidentKind::Minor }
}

fn maintenance(vehicle_id: &str, start: Timestamp, end: Timestamp) -> Maintenance {
    Maintenance { vehicle_id: vehicle_id.to_string(), window: TimeWindow::new(start, end) }
}

#[test]
fn can_report_blockage_activation_and_deactivation() {
    let graph = create_graph();
    let mut tracker = EventTracker::new(0.);

    let events = [5., 12., 16., 25., 40.]
        .into_iter()
        .map(|time| tracker.apply(time, &graph, &mut [], &mut [], &[], &[]))
        .collect::<Vec<_>>();

    assert_eq!(
        events,
        vec![
            vec![],
            vec![DynamicEvent::BlockageActivated(0)],
            vec![DynamicEvent::BlockageActivated(1)],
            vec![DynamicEvent::BlockageDeactivated(0)],
            vec![DynamicEvent::BlockageDeactivated(1)],
        ]
    );
}

parameterized_test! {can_determine_vehicle_state_at_time, (time, expected), {
    can_determine_vehicle_state_at_time_impl(time, expected);
}}

can_determine_vehicle_state_at_time! {
    case_01_before_incidents: (5., VehicleState::Available),
    case_02_broken: (10., VehicleState::Broken),
    case_03_broken_during_maintenance: (60., VehicleState::Broken),
    case_04_maintenance_after_repair: (130., VehicleState::UnderMaintenance),
    case_05_back_after_maintenance: (300., VehicleState::Available),
}

fn can_determine_vehicle_state_at_time_impl(time: Timestamp, expected: VehicleState) {
    let vehicle = test_vehicle("v1");

    let state = vehicle_state_at(&vehicle, time, &[breakdown("v1", 10.)], &[maintenance("v1", 50., 300.)]);

    assert_eq!(state, expected);
}

#[test]
fn can_keep_state_of_vehicle_without_schedule() {
    let mut vehicle = test_vehicle("v2");
    vehicle.state = VehicleState::UnderMaintenance;

    let state = vehicle_state_at(&vehicle, 100., &[breakdown("v1", 10.)], &[maintenance("v1", 50., 300.)]);

    assert_eq!(state, VehicleState::UnderMaintenance);
}

#[test]
fn can_apply_vehicle_state_changes() {
    let graph = RouteGraph::new(test_grid(), vec![], 50.);
    let mut vehicles = vec![test_vehicle("v1"), test_vehicle("v2")];
    let breakdowns = vec![breakdown("v1", 10.)];
    let mut tracker = EventTracker::new(0.);

    let broken = tracker.apply(15., &graph, vehicles.as_mut_slice(), &mut [], breakdowns.as_slice(), &[]);
    let repaired = tracker.apply(200., &graph, vehicles.as_mut_slice(), &mut [], breakdowns.as_slice(), &[]);

    assert_eq!(
        broken,
        vec![DynamicEvent::VehicleStateChanged {
            vehicle_id: "v1".to_string(),
            from: VehicleState::Available,
            to: VehicleState::Broken
        }]
    );
    assert_eq!(
        repaired,
        vec![DynamicEvent::VehicleStateChanged {
            vehicle_id: "v1".to_string(),
            from: VehicleState::Broken,
            to: VehicleState::Available
        }]
    );
    assert_eq!(vehicles[1].state, VehicleState::Available);
}

#[test]
fn can_refill_tanks_at_day_start_keeping_reservations() {
    let graph = RouteGraph::new(test_grid(), vec![], 50.);
    let mut tank = Depot::intermediate("tank", (5, 5).into(), 50.);
    tank.available = 10.;
    tank.reserve(TankReservation { vehicle_id: "v1".to_string(), volume: 5., arrival: 1500. });
    let mut depots = vec![tank];
    let mut tracker = EventTracker::new(1000.);

    let same_day = tracker.apply(1430., &graph, &mut [], depots.as_mut_slice(), &[], &[]);
    assert!(same_day.is_empty());
    assert_eq!(depots[0].available, 10.);

    let next_day = tracker.apply(1445., &graph, &mut [], depots.as_mut_slice(), &[], &[]);
    assert_eq!(next_day, vec![DynamicEvent::TanksRefilled { day: 1 }]);
    assert_eq!(depots[0].available, 50.);
    assert_eq!(depots[0].reservations.len(), 1);
}

#[test]
fn can_display_events() {
    assert_eq!(DynamicEvent::BlockageActivated(3).to_string(), "blockage #3 activated");
    assert_eq!(DynamicEvent::TanksRefilled { day: 2 }.to_string(), "intermediate tanks refilled on day 2");
}
