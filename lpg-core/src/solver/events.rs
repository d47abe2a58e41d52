#[cfg(test)]
#[path = "../../tests/unit/solver/events_test.rs"]
mod events_test;

use crate::graph::RouteGraph;
use crate::models::common::{MINUTES_PER_DAY, Timestamp};
use crate::models::problem::{Breakdown, Depot, Maintenance, Vehicle, VehicleState};
use rustc_hash::FxHashSet;
use std::fmt;

/// A change of the operational state caused by the simulated clock.
#[derive(Clone, Debug, PartialEq)]
pub enum DynamicEvent {
    /// Blockage became active.
    BlockageActivated(usize),
    /// Blockage is not active anymore.
    BlockageDeactivated(usize),
    /// Vehicle state has changed.
    VehicleStateChanged {
        /// Vehicle id.
        vehicle_id: String,
        /// Previous state.
        from: VehicleState,
        /// New state.
        to: VehicleState,
    },
    /// Intermediate tanks were refilled at the start of a day.
    TanksRefilled {
        /// Day number.
        day: i64,
    },
}

impl fmt::Display for DynamicEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlockageActivated(index) => write!(f, "blockage #{index} activated"),
            Self::BlockageDeactivated(index) => write!(f, "blockage #{index} deactivated"),
            Self::VehicleStateChanged { vehicle_id, from, to } => {
                write!(f, "vehicle '{vehicle_id}' changed state: {from:?} -> {to:?}")
            }
            Self::TanksRefilled { day } => write!(f, "intermediate tanks refilled on day {day}"),
        }
    }
}

/// Applies time driven events to the orchestrator owned state.
pub struct EventTracker {
    active_blockages: FxHashSet<usize>,
    day: i64,
}

impl EventTracker {
    /// Creates a new instance of `EventTracker`.
    pub fn new(start_time: Timestamp) -> Self {
        Self { active_blockages: FxHashSet::default(), day: day_of(start_time) }
    }

    /// Brings vehicles and tanks to the state at given time and returns what has changed.
    pub fn apply(
        &mut self,
        time: Timestamp,
        graph: &RouteGraph,
        vehicles: &mut [Vehicle],
        depots: &mut [Depot],
        breakdowns: &[Breakdown],
        maintenances: &[Maintenance],
    ) -> Vec<DynamicEvent> {
        let mut events = Vec::new();

        let active = graph.active_blockages(time).map(|(index, _)| index).collect::<FxHashSet<_>>();
        let mut activated = active.difference(&self.active_blockages).cloned().collect::<Vec<_>>();
        let mut deactivated = self.active_blockages.difference(&active).cloned().collect::<Vec<_>>();
        activated.sort_unstable();
        deactivated.sort_unstable();
        events.extend(activated.into_iter().map(DynamicEvent::BlockageActivated));
        events.extend(deactivated.into_iter().map(DynamicEvent::BlockageDeactivated));
        self.active_blockages = active;

        vehicles.iter_mut().for_each(|vehicle| {
            let state = vehicle_state_at(vehicle, time, breakdowns, maintenances);
            if state != vehicle.state {
                events.push(DynamicEvent::VehicleStateChanged {
                    vehicle_id: vehicle.id.clone(),
                    from: vehicle.state,
                    to: state,
                });
                vehicle.state = state;
            }
        });

        let day = day_of(time);
        if day > self.day {
            self.day = day;
            depots.iter_mut().for_each(Depot::refill);
            events.push(DynamicEvent::TanksRefilled { day });
        }

        events
    }
}

/// Returns vehicle state at given time: a breakdown takes precedence over maintenance; once both are
/// over the vehicle is available again. A vehicle without scheduled incidents keeps its state.
pub fn vehicle_state_at(
    vehicle: &Vehicle,
    time: Timestamp,
    breakdowns: &[Breakdown],
    maintenances: &[Maintenance],
) -> VehicleState {
    let is_broken = breakdowns
        .iter()
        .any(|breakdown| breakdown.vehicle_id == vehicle.id && breakdown.window().contains(time));
    let is_maintained = maintenances
        .iter()
        .any(|maintenance| maintenance.vehicle_id == vehicle.id && maintenance.window.contains(time));

    let has_schedule = breakdowns.iter().any(|breakdown| breakdown.vehicle_id == vehicle.id)
        || maintenances.iter().any(|maintenance| maintenance.vehicle_id == vehicle.id);

    match (is_broken, is_maintained, vehicle.state) {
        (true, _, _) => VehicleState::Broken,
        (false, true, _) => VehicleState::UnderMaintenance,
        (false, false, VehicleState::Broken | VehicleState::UnderMaintenance) if has_schedule => {
            VehicleState::Available
        }
        (false, false, state) => state,
    }
}

fn day_of(time: Timestamp) -> i64 {
    (time / MINUTES_PER_DAY).floor() as i64
}
