#[cfg(test)]
#[path = "../../tests/unit/aco/heuristic_test.rs"]
mod heuristic_test;

use super::HeuristicConfig;
use crate::graph::{EdgeTable, RouteGraph, corridor};
use crate::models::common::{Location, Timestamp};
use crate::models::problem::{Depot, DepotKind, GridSize, Order};
use crate::utils::parallel_collect;
use std::sync::Arc;

/// A base desirability of a single grid step: the inverse of its manhattan length.
const BASE_VALUE: f64 = 1.;

/// A desirability per undirected edge derived from the current operational state.
#[derive(Clone, Debug)]
pub struct HeuristicField {
    table: EdgeTable,
    floor: f64,
}

impl HeuristicField {
    /// Creates a new instance of `HeuristicField` with base values.
    pub fn new(grid: GridSize, floor: f64) -> Self {
        Self { table: EdgeTable::new(grid, BASE_VALUE), floor }
    }

    /// Returns edge value, zero for non adjacent locations.
    pub fn get(&self, from: &Location, to: &Location) -> f64 {
        self.table.get(from, to).unwrap_or(0.)
    }

    /// Returns a mean value over path edges.
    pub fn path_mean(&self, path: &[Location]) -> Option<f64> {
        self.table.path_mean(path)
    }

    /// Returns the underlying edge table.
    pub fn table(&self) -> &EdgeTable {
        &self.table
    }

    /// Recomputes the whole field for the given time. Adjustments are applied in order: blockage
    /// suppression, urgency amplification, tank priority and empty leg minimization.
    pub fn refresh(
        &mut self,
        graph: &RouteGraph,
        orders: &[Arc<Order>],
        depots: &[Depot],
        time: Timestamp,
        config: &HeuristicConfig,
    ) {
        self.table.values_mut().for_each(|value| *value = BASE_VALUE);

        self.suppress_blocked(graph, time, config);
        self.amplify_urgent(graph, orders, depots, time, config);
        self.amplify_tanks(depots, config);
        self.amplify_chains(orders, time, config);

        let floor = self.floor;
        self.table.values_mut().for_each(|value| *value = value.max(floor));
    }

    fn suppress_blocked(&mut self, graph: &RouteGraph, time: Timestamp, config: &HeuristicConfig) {
        if graph.active_blockages(time).next().is_none() {
            return;
        }

        let blocked = self
            .table
            .edges()
            .filter(|(from, to, _)| graph.is_blocked_edge(from, to, time))
            .map(|(from, to, _)| (from, to))
            .collect::<Vec<_>>();

        self.multiply_edges(blocked.iter().map(|(from, to)| (*from, *to)), config.blocked_multiplier);
    }

    fn amplify_urgent(
        &mut self,
        graph: &RouteGraph,
        orders: &[Arc<Order>],
        depots: &[Depot],
        time: Timestamp,
        config: &HeuristicConfig,
    ) {
        let urgent = orders
            .iter()
            .map(|order| (order.clone(), order.urgency(time)))
            .filter(|(_, urgency)| *urgency > config.urgency_threshold)
            .collect::<Vec<_>>();

        let approaches = parallel_collect(&urgent, |(order, urgency)| {
            let path = depots
                .iter()
                .min_by_key(|depot| depot.location.manhattan(&order.destination))
                .map(|depot| graph.find_path(depot.location, order.destination, time))
                .unwrap_or_default();

            (path, *urgency)
        });

        approaches.into_iter().for_each(|(path, urgency)| {
            self.multiply_path(&path, 1. + config.urgency_boost * urgency);
        });
    }

    fn amplify_tanks(&mut self, depots: &[Depot], config: &HeuristicConfig) {
        depots
            .iter()
            .filter(|depot| depot.kind == DepotKind::Intermediate)
            .map(|depot| (depot.location, depot.spare_ratio()))
            .filter(|(_, spare_ratio)| *spare_ratio > config.tank_min_spare_ratio)
            .for_each(|(location, spare_ratio)| {
                let nearby = self
                    .table
                    .edges()
                    .filter(|(from, to, _)| {
                        from.manhattan(&location) <= config.tank_radius && to.manhattan(&location) <= config.tank_radius
                    })
                    .map(|(from, to, _)| (from, to))
                    .collect::<Vec<_>>();

                self.multiply_edges(nearby.into_iter(), 1. + config.tank_boost * spare_ratio);
            });
    }

    fn amplify_chains(&mut self, orders: &[Arc<Order>], time: Timestamp, config: &HeuristicConfig) {
        let max_distance = config.chain_distance.max(0);

        orders.iter().enumerate().for_each(|(idx, first)| {
            orders.iter().skip(idx + 1).for_each(|second| {
                let distance = first.destination.manhattan(&second.destination);
                if distance == 0 || distance > max_distance {
                    return;
                }

                let closeness = 1. - distance as f64 / (max_distance + 1) as f64;
                let urgency = (first.urgency(time) + second.urgency(time)) / 2.;

                self.multiply_path(
                    &corridor(first.destination, second.destination),
                    1. + config.chain_boost * closeness * urgency,
                );
            })
        });
    }

    fn multiply_path(&mut self, path: &[Location], factor: f64) {
        self.multiply_edges(path.windows(2).map(|pair| (pair[0], pair[1])), factor);
    }

    fn multiply_edges<I>(&mut self, edges: I, factor: f64)
    where
        I: Iterator<Item = (Location, Location)>,
    {
        edges.for_each(|(from, to)| {
            self.table.update(&from, &to, |value| value * factor);
        });
    }
}
