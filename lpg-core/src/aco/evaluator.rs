#[cfg(test)]
#[path = "../../tests/unit/aco/evaluator_test.rs"]
mod evaluator_test;

use super::{PenaltyConfig, RoutingConfig};
use crate::aco::ant::fuel_for;
use crate::graph::RouteGraph;
use crate::models::common::{Timestamp, Volume};
use crate::models::problem::Maintenance;
use crate::models::solution::{LegKind, Solution, VehicleAssignment};
use rustc_hash::FxHashMap;

/// Cost components of a solution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CostBreakdown {
    /// Total fuel consumed.
    pub fuel: Volume,
    /// Penalty for late deliveries.
    pub lateness: f64,
    /// Penalty for legs crossing active blockages.
    pub blockage: f64,
    /// Penalty for routes overlapping maintenance.
    pub maintenance: f64,
    /// Penalty for unassigned orders.
    pub unassigned: f64,
}

impl CostBreakdown {
    /// Returns total cost.
    pub fn total(&self) -> f64 {
        self.fuel + self.lateness + self.blockage + self.maintenance + self.unassigned
    }
}

/// Scores candidate solutions. Holds no mutable state.
pub struct SolutionEvaluator<'a> {
    graph: &'a RouteGraph,
    maintenances: &'a [Maintenance],
    routing: &'a RoutingConfig,
    penalties: &'a PenaltyConfig,
}

impl<'a> SolutionEvaluator<'a> {
    /// Creates a new instance of `SolutionEvaluator`.
    pub fn new(
        graph: &'a RouteGraph,
        maintenances: &'a [Maintenance],
        routing: &'a RoutingConfig,
        penalties: &'a PenaltyConfig,
    ) -> Self {
        Self { graph, maintenances, routing, penalties }
    }

    /// Returns quality `1 / (1 + cost)`: always positive, higher is better.
    pub fn evaluate(&self, solution: &Solution, time: Timestamp) -> f64 {
        1. / (1. + self.cost(solution, time).total())
    }

    /// Returns cost components of the solution when execution starts at given time.
    pub fn cost(&self, solution: &Solution, time: Timestamp) -> CostBreakdown {
        let mut cost = solution
            .assignments
            .iter()
            .map(|assignment| self.route_cost(assignment, time))
            .fold(CostBreakdown::default(), |acc, route| CostBreakdown {
                fuel: acc.fuel + route.fuel,
                lateness: acc.lateness + route.lateness,
                blockage: acc.blockage + route.blockage,
                maintenance: acc.maintenance + route.maintenance,
                unassigned: 0.,
            });

        cost.unassigned = solution.unassigned.len() as f64 * self.penalties.unassigned;

        cost
    }

    /// Returns estimated delivery time per order id.
    pub fn delivery_times(&self, solution: &Solution, time: Timestamp) -> FxHashMap<String, Timestamp> {
        let mut times = FxHashMap::default();

        solution.assignments.iter().for_each(|assignment| {
            self.walk(assignment, time, |kind, arrival| {
                if let LegKind::Delivery(order) = kind {
                    times.insert(order.id.clone(), arrival);
                }
            });
        });

        times
    }

    fn route_cost(&self, assignment: &VehicleAssignment, time: Timestamp) -> CostBreakdown {
        let mut cost = CostBreakdown::default();
        let mut load = assignment.load();

        let end = self.walk(assignment, time, |_, _| {});
        let mut clock = time;

        assignment.legs.iter().for_each(|leg| {
            let weight = assignment.vehicle.weight_with(load);
            cost.fuel += fuel_for(leg.distance(), weight, self.routing.fuel_efficiency);

            let is_blocked = leg.path.windows(2).enumerate().any(|(step, pair)| {
                let at = clock + self.graph.travel_minutes(step as i32);
                // leaving a blocked node is allowed, only the next one counts
                if step == 0 {
                    self.graph.is_blocked(&pair[1], at)
                } else {
                    self.graph.is_blocked_edge(&pair[0], &pair[1], at)
                }
            });
            if is_blocked {
                cost.blockage += self.penalties.blockage;
            }

            clock += self.graph.travel_minutes(leg.distance());

            match &leg.kind {
                LegKind::Delivery(order) => {
                    cost.lateness += (clock - order.deadline).max(0.) * self.penalties.late_minute;
                    load -= order.volume;
                    clock += self.routing.unloading_minutes;
                }
                LegKind::Refuel { .. } => clock += self.routing.refuel_minutes,
                LegKind::Return { .. } => {}
            }
        });

        let has_maintenance = self
            .maintenances
            .iter()
            .filter(|maintenance| maintenance.vehicle_id == assignment.vehicle.id)
            .any(|maintenance| maintenance.window.intersects(time, end));
        if has_maintenance {
            cost.maintenance = self.penalties.maintenance;
        }

        cost
    }

    /// Walks legs calling the visitor with arrival time at each leg end. Returns route end time.
    fn walk<F>(&self, assignment: &VehicleAssignment, time: Timestamp, mut visitor: F) -> Timestamp
    where
        F: FnMut(&LegKind, Timestamp),
    {
        assignment.legs.iter().fold(time, |clock, leg| {
            let arrival = clock + self.graph.travel_minutes(leg.distance());
            visitor(&leg.kind, arrival);

            arrival
                + match &leg.kind {
                    LegKind::Delivery(_) => self.routing.unloading_minutes,
                    LegKind::Refuel { .. } => self.routing.refuel_minutes,
                    LegKind::Return { .. } => 0.,
                }
        })
    }
}
