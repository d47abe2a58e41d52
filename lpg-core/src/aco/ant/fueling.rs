#[cfg(test)]
#[path = "../../../tests/unit/aco/ant/fueling_test.rs"]
mod fueling_test;

use super::{RouteBuilder, RouteState};
use crate::models::common::{Distance, Location, Timestamp, Volume};
use crate::models::problem::{Depot, Order, TankReservation};
use crate::models::solution::UnassignedReason;

/// Returns fuel needed to drive given distance with given combined weight.
pub fn fuel_for(distance: Distance, weight: f64, efficiency: f64) -> Volume {
    distance as f64 * weight / efficiency
}

/// Returns depot indices ordered by preference for a refuel stop near the midpoint of a leg:
/// closer is better, more spare volume is better, tanks which are about to run out are avoided.
pub fn rank_tanks(depots: &[Depot], midpoint: Location) -> Vec<usize> {
    let mut ranked = depots
        .iter()
        .enumerate()
        .map(|(idx, depot)| {
            let distance = depot.location.manhattan(&midpoint) as f64;
            (idx, (1. + distance) * (1. + depot.exhaustion_pressure()) / (0.5 + depot.spare_ratio()))
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|(_, a), (_, b)| a.total_cmp(b));

    ranked.into_iter().map(|(idx, _)| idx).collect()
}

/// A way back to a depot after the last delivery.
#[derive(Clone, Debug)]
pub(super) struct ReturnLeg {
    pub depot_id: String,
    pub path: Vec<Location>,
    pub fuel: Volume,
}

/// A planned refuel stop before a delivery.
#[derive(Clone, Debug)]
pub(super) struct RefuelDetour {
    pub depot_id: String,
    pub to_tank: Vec<Location>,
    pub tank_arrival: Timestamp,
    pub tank_fuel: Volume,
    pub volume: Volume,
    pub to_order: Vec<Location>,
    pub order_fuel: Volume,
}

impl RouteBuilder<'_> {
    /// Finds a tank to top up at before driving to the order. Fuel is reserved on the builder's
    /// private copy of the tank.
    pub(super) fn plan_refuel(
        &mut self,
        state: &RouteState,
        order: &Order,
        path: &[Location],
        return_fuel: Volume,
    ) -> Result<RefuelDetour, UnassignedReason> {
        let context = self.context;
        let (graph, routing) = (context.graph, &context.config.routing);
        let weight = state.weight();
        let midpoint = path.get(path.len() / 2).copied().unwrap_or(state.position);

        let mut reason = UnassignedReason::InsufficientFuel;

        for depot_idx in rank_tanks(self.depots.as_slice(), midpoint) {
            let tank = &self.depots[depot_idx];

            let to_tank = graph.find_path(state.position, tank.location, state.time);
            if to_tank.is_empty() {
                reason = UnassignedReason::Unreachable;
                continue;
            }

            let tank_fuel = fuel_for(path_distance(&to_tank), weight, routing.fuel_efficiency);
            let volume = state.vehicle.fuel_capacity - (state.fuel - tank_fuel);
            if tank_fuel > state.fuel || volume <= f64::EPSILON || !tank.can_supply(volume) {
                continue;
            }

            let tank_arrival = state.time + graph.travel_minutes(path_distance(&to_tank));
            let to_order = graph.find_path(tank.location, order.destination, tank_arrival + routing.refuel_minutes);
            if to_order.is_empty() {
                reason = UnassignedReason::Unreachable;
                continue;
            }

            let order_fuel = fuel_for(path_distance(&to_order), weight, routing.fuel_efficiency);
            if order_fuel + return_fuel > state.vehicle.fuel_capacity {
                continue;
            }

            let depot_id = tank.id.clone();
            let reservation =
                TankReservation { vehicle_id: state.vehicle.id.clone(), volume, arrival: tank_arrival };
            if !self.depots[depot_idx].reserve(reservation) {
                continue;
            }

            return Ok(RefuelDetour { depot_id, to_tank, tank_arrival, tank_fuel, volume, to_order, order_fuel });
        }

        Err(reason)
    }

    /// Estimates fuel needed to get back to the closest depot.
    pub(super) fn return_estimate(&self, from: &Location, weight: f64) -> Volume {
        self.depots
            .iter()
            .map(|depot| depot.location.manhattan(from))
            .min()
            .map_or(0., |distance| fuel_for(distance, weight, self.context.config.routing.fuel_efficiency))
    }

    /// Finds a way back to the nearest depot reachable with the fuel left.
    pub(super) fn find_return(&self, state: &RouteState) -> Option<ReturnLeg> {
        let graph = self.context.graph;
        let efficiency = self.context.config.routing.fuel_efficiency;
        let weight = state.weight();

        let mut depots = self.depots.iter().collect::<Vec<_>>();
        depots.sort_by_key(|depot| depot.location.manhattan(&state.position));

        depots.into_iter().find_map(|depot| {
            let path = graph.find_path(state.position, depot.location, state.time);
            let fuel = fuel_for(path_distance(&path), weight, efficiency);

            (!path.is_empty() && fuel <= state.fuel).then(|| ReturnLeg { depot_id: depot.id.clone(), path, fuel })
        })
    }
}

/// Returns amount of grid steps in the path.
pub(super) fn path_distance(path: &[Location]) -> Distance {
    path.len().saturating_sub(1) as Distance
}
