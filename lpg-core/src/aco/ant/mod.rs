//! A route builder ("ant") constructs one complete candidate solution: it clusters orders, assigns
//! clusters to vehicles and threads a fuel feasible path with refuel detours through each vehicle's
//! deliveries using the ant colony decision rule.

#[cfg(test)]
#[path = "../../../tests/unit/aco/ant/builder_test.rs"]
mod builder_test;

mod clustering;
pub use self::clustering::{OrderCluster, cluster_orders};

mod fueling;
pub use self::fueling::{fuel_for, rank_tanks};

mod selection;
pub use self::selection::{Candidate, VehiclePlan, apply_lookahead, assign_clusters, choose_candidate};

use self::fueling::{ReturnLeg, path_distance};
use crate::aco::{AcoConfig, HeuristicField, PheromoneField};
use crate::graph::{RouteGraph, corridor};
use crate::models::common::{Distance, Location, Timestamp, Volume};
use crate::models::problem::{Depot, Order, Vehicle};
use crate::models::solution::*;
use crate::utils::Random;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Shared read only state for all route builders of one iteration.
pub struct BuildContext<'a> {
    /// City graph.
    pub graph: &'a RouteGraph,
    /// Learned desirability.
    pub pheromone: &'a PheromoneField,
    /// Derived desirability.
    pub heuristic: &'a HeuristicField,
    /// Orders to plan.
    pub orders: &'a [Arc<Order>],
    /// Fleet, only plannable vehicles are used.
    pub vehicles: &'a [Vehicle],
    /// Depots with their committed state, builders work on private snapshots.
    pub depots: &'a [Depot],
    /// Planning start time.
    pub time: Timestamp,
    /// Exploitation probability.
    pub q0: f64,
    /// Algorithm configuration.
    pub config: &'a AcoConfig,
}

/// Builds one candidate solution.
pub struct RouteBuilder<'a> {
    context: &'a BuildContext<'a>,
    random: &'a dyn Random,
    depots: Vec<Depot>,
}

impl<'a> RouteBuilder<'a> {
    /// Creates a new instance of `RouteBuilder`.
    pub fn new(context: &'a BuildContext<'a>, random: &'a dyn Random) -> Self {
        Self { context, random, depots: context.depots.iter().map(Depot::snapshot).collect() }
    }

    /// Builds a solution. Its quality is left for the evaluator.
    pub fn build(mut self) -> Solution {
        let context = self.context;
        let mut rng = self.random.get_rng();

        let mut orders = context.orders.to_vec();
        orders.shuffle(&mut rng);

        let mut vehicles =
            context.vehicles.iter().filter(|vehicle| vehicle.is_plannable()).cloned().collect::<Vec<_>>();
        vehicles.shuffle(&mut rng);

        let clusters = cluster_orders(orders.as_slice(), &context.config.grouping, context.time, self.random);
        let (plans, mut unassigned) =
            assign_clusters(clusters, vehicles.as_slice(), context.config.routing.low_fuel_bonus);

        let assignments = plans
            .into_iter()
            .filter_map(|plan| {
                let (assignment, dropped) = self.route(plan);
                unassigned.extend(dropped);
                assignment
            })
            .collect();

        Solution { assignments, unassigned, quality: 0. }
    }

    /// Returns the tank state with reservations made by this builder.
    pub fn depots(&self) -> &[Depot] {
        self.depots.as_slice()
    }

    fn route(&mut self, plan: VehiclePlan) -> (Option<VehicleAssignment>, Vec<UnassignedOrder>) {
        let load = plan.clusters.iter().map(|cluster| cluster.volume).sum();
        let mut state = RouteState::new(plan.vehicle, self.context.time, load);
        let mut dropped = Vec::new();
        let mut way_back = None;

        for cluster in plan.clusters {
            let mut remaining = cluster.orders;

            while !remaining.is_empty() {
                let (mut candidates, unreachable) = self.candidates(&state, remaining);
                unreachable.into_iter().for_each(|order| {
                    state.load -= order.volume;
                    dropped.push(UnassignedOrder { order, reason: UnassignedReason::Unreachable });
                });

                let lookahead_weight = self.context.config.routing.lookahead_weight;
                apply_lookahead(candidates.as_mut_slice(), lookahead_weight, |current, next| {
                    self.desirability(&corridor(current.order.destination, next.order.destination))
                });

                let Some(chosen_idx) = choose_candidate(candidates.as_slice(), self.context.q0, self.random) else {
                    break;
                };

                let chosen = candidates.remove(chosen_idx);
                remaining = candidates.into_iter().map(|candidate| candidate.order).collect();

                let order = chosen.order.clone();
                let checkpoint = (state.clone(), self.depots.clone());

                let delivered = self.deliver(&mut state, chosen).and_then(|_| {
                    self.find_return(&state).ok_or(UnassignedReason::InsufficientFuel)
                });

                match delivered {
                    Ok(leg) => way_back = Some(leg),
                    Err(reason) => {
                        (state, self.depots) = checkpoint;
                        state.load -= order.volume;
                        dropped.push(UnassignedOrder { order, reason });
                    }
                }
            }
        }

        match way_back {
            Some(ReturnLeg { depot_id, path, fuel }) if !state.orders.is_empty() => {
                let arrival = state.time + self.context.graph.travel_minutes(path_distance(&path));
                state.push_return(depot_id, path, arrival, fuel);

                (Some(state.into_assignment()), dropped)
            }
            _ => (None, dropped),
        }
    }

    /// Splits orders into reachable candidates and unreachable ones.
    fn candidates(&self, state: &RouteState, orders: Vec<Arc<Order>>) -> (Vec<Candidate>, Vec<Arc<Order>>) {
        let graph = self.context.graph;
        let routing = &self.context.config.routing;

        let mut unreachable = Vec::new();
        let candidates = orders
            .into_iter()
            .filter_map(|order| {
                let path = graph.find_path(state.position, order.destination, state.time);
                if path.is_empty() {
                    unreachable.push(order);
                    return None;
                }

                let mut score = self.desirability(&path);
                if graph.crosses_future_blockage(&path, state.time, routing.planning_window_minutes) {
                    score *= routing.future_penalty;
                }

                Some(Candidate { order, path, score })
            })
            .collect();

        (candidates, unreachable)
    }

    /// Returns `tau^alpha * eta^beta` averaged over path edges and divided by path length.
    fn desirability(&self, path: &[Location]) -> f64 {
        let edges = path_distance(path);
        if edges == 0 {
            return 1.;
        }

        let search = &self.context.config.search;
        let tau = self.context.pheromone.path_mean(path).unwrap_or(self.context.config.pheromone.floor);
        let eta = self.context.heuristic.path_mean(path).unwrap_or(self.context.config.heuristic.floor);

        tau.powf(search.alpha) * eta.powf(search.beta) / edges as f64
    }

    /// Drives to the order, inserting a refuel detour when projected consumption exceeds the
    /// safety margin of the fuel left.
    fn deliver(&mut self, state: &mut RouteState, candidate: Candidate) -> Result<(), UnassignedReason> {
        let context = self.context;
        let routing = &context.config.routing;
        let Candidate { order, path, .. } = candidate;
        let path = self.lookahead_path(state, &order.destination, path);

        let leg_fuel = fuel_for(path_distance(&path), state.weight(), routing.fuel_efficiency);
        let remaining_weight = state.vehicle.weight_with(state.load - order.volume);
        let return_fuel = self.return_estimate(&order.destination, remaining_weight);

        if leg_fuel + return_fuel <= routing.fuel_safety_margin * state.fuel {
            self.push_delivery(state, order, path, leg_fuel);
            return Ok(());
        }

        let detour = self.plan_refuel(state, &order, &path, return_fuel)?;
        let volume = detour.volume;
        state.push_refuel(detour.depot_id, detour.to_tank, detour.tank_arrival, detour.tank_fuel, volume);
        state.time += routing.refuel_minutes;
        self.push_delivery(state, order, detour.to_order, detour.order_fuel);

        Ok(())
    }

    /// Replaces a path which runs into a blockage within the planning window with one avoiding it,
    /// if such exists.
    fn lookahead_path(&self, state: &RouteState, destination: &Location, path: Vec<Location>) -> Vec<Location> {
        let (graph, window) = (self.context.graph, self.context.config.routing.planning_window_minutes);
        if !graph.crosses_future_blockage(&path, state.time, window) {
            return path;
        }

        let detour = graph.find_path_avoiding_future_blockages(state.position, *destination, state.time, window);
        if detour.is_empty() { path } else { detour }
    }

    fn push_delivery(&self, state: &mut RouteState, order: Arc<Order>, path: Vec<Location>, fuel: Volume) {
        let arrival = state.time + self.context.graph.travel_minutes(path_distance(&path));
        state.push_delivery(order, path, arrival, fuel);
        state.time += self.context.config.routing.unloading_minutes;
    }
}

/// A vehicle's route under construction.
#[derive(Clone)]
struct RouteState {
    vehicle: Vehicle,
    position: Location,
    time: Timestamp,
    fuel: Volume,
    load: Volume,
    legs: Vec<RouteLeg>,
    orders: Vec<Arc<Order>>,
    distance: Distance,
    fuel_consumed: Volume,
}

impl RouteState {
    fn new(vehicle: Vehicle, time: Timestamp, load: Volume) -> Self {
        Self {
            position: vehicle.position,
            fuel: vehicle.fuel,
            vehicle,
            time,
            load,
            legs: vec![],
            orders: vec![],
            distance: 0,
            fuel_consumed: 0.,
        }
    }

    fn weight(&self) -> f64 {
        self.vehicle.weight_with(self.load)
    }

    fn push_delivery(&mut self, order: Arc<Order>, path: Vec<Location>, arrival: Timestamp, fuel: Volume) {
        self.load -= order.volume;
        self.orders.push(order.clone());
        self.push_leg(path, arrival, fuel, LegKind::Delivery(order));
    }

    fn push_refuel(&mut self, depot_id: String, path: Vec<Location>, arrival: Timestamp, fuel: Volume, volume: Volume) {
        self.push_leg(path, arrival, fuel, LegKind::Refuel { depot_id, volume });
        self.fuel = (self.fuel + volume).min(self.vehicle.fuel_capacity);
    }

    fn push_return(&mut self, depot_id: String, path: Vec<Location>, arrival: Timestamp, fuel: Volume) {
        self.push_leg(path, arrival, fuel, LegKind::Return { depot_id });
    }

    fn push_leg(&mut self, path: Vec<Location>, arrival: Timestamp, fuel: Volume, kind: LegKind) {
        let origin = self.position;
        let destination = path.last().copied().unwrap_or(origin);

        self.distance += path_distance(&path);
        self.fuel = (self.fuel - fuel).max(0.);
        self.fuel_consumed += fuel;
        self.position = destination;
        self.time = arrival;

        self.legs.push(RouteLeg { origin, destination, path, arrival, kind });
    }

    fn into_assignment(self) -> VehicleAssignment {
        VehicleAssignment {
            vehicle: self.vehicle,
            orders: self.orders,
            legs: self.legs,
            total_distance: self.distance,
            fuel_consumed: self.fuel_consumed,
        }
    }
}
