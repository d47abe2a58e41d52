//! Json solution format: the best plan with its legs, unassigned orders with reason codes, final
//! order states and optional metrics.

#[cfg(test)]
#[path = "../../tests/unit/format/solution_test.rs"]
mod solution_test;

use super::{Coordinate, to_coordinate, to_format_error};
use lpg_core::models::problem::OrderState;
use lpg_core::models::solution::{LegKind, RouteLeg, UnassignedReason, VehicleAssignment};
use lpg_core::prelude::{GenericResult, Metrics, RunResult};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};

/// A solution of the dispatch problem.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Solution {
    /// Terminal state of the search.
    pub state: String,
    /// Amount of completed iterations.
    pub iterations: usize,
    /// Simulated time at the end of the run.
    pub final_time: f64,
    /// Seed which replays the run.
    pub seed: u64,
    /// Quality of the best plan, higher is better.
    pub quality: f64,
    /// Totals of the best plan.
    pub statistic: Statistic,
    /// Vehicle tours.
    pub tours: Vec<Tour>,
    /// Orders which are not a part of any tour.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unassigned: Vec<UnassignedOrder>,
    /// Final state of every order.
    pub orders: Vec<OrderStatus>,
    /// Input inconsistencies found by validation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Search progress if metrics are collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsInfo>,
}

/// Plan totals.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Statistic {
    /// Total distance in grid units.
    pub distance: i64,
    /// Total estimated fuel.
    pub fuel: f64,
    /// Amount of assigned orders.
    pub assigned: usize,
    /// Amount of unassigned orders.
    pub unassigned: usize,
}

/// A route of one vehicle.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    /// Vehicle id.
    pub vehicle_id: String,
    /// Order ids in visiting order.
    pub orders: Vec<String>,
    /// Tour distance.
    pub distance: i32,
    /// Estimated tour fuel.
    pub fuel: f64,
    /// Tour legs.
    pub legs: Vec<Leg>,
}

/// A single leg of a tour.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Leg {
    /// Leg activity.
    #[serde(flatten)]
    pub activity: Activity,
    /// Leg origin.
    pub origin: Coordinate,
    /// Leg destination.
    pub destination: Coordinate,
    /// Estimated arrival at destination.
    pub arrival: f64,
    /// Grid path, both ends included.
    pub path: Vec<Coordinate>,
}

/// A purpose of the leg.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Activity {
    /// Delivers an order.
    #[serde(rename_all = "camelCase")]
    Delivery {
        /// Order id.
        order_id: String,
    },
    /// Refuels at a tank.
    #[serde(rename_all = "camelCase")]
    Refuel {
        /// Depot id.
        depot_id: String,
        /// Refueled volume.
        volume: f64,
    },
    /// Returns to a depot.
    #[serde(rename_all = "camelCase")]
    Return {
        /// Depot id.
        depot_id: String,
    },
}

/// An unassigned order with a reason code.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnassignedOrder {
    /// Order id.
    pub order_id: String,
    /// Reason code.
    pub code: String,
    /// Human readable description.
    pub description: String,
}

/// A final state of an order.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct OrderStatus {
    /// Order id.
    pub id: String,
    /// One of `pending`, `assigned`, `delivered` or `unassignable`.
    pub state: String,
}

/// Search metrics.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MetricsInfo {
    /// Run duration in seconds.
    pub duration: usize,
    /// Amount of iterations.
    pub iterations: usize,
    /// Iterations per second.
    pub speed: f64,
    /// Per iteration progress.
    pub evolution: Vec<IterationInfo>,
}

/// Progress of a single iteration.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationInfo {
    /// Iteration number.
    pub number: usize,
    /// Elapsed seconds.
    pub timestamp: f64,
    /// Best quality so far.
    pub best_quality: f64,
    /// Whether the best plan has improved.
    pub is_improvement: bool,
    /// Assigned orders of the best plan.
    pub assigned: usize,
    /// Unassigned orders of the best plan.
    pub unassigned: usize,
    /// Amount of route builders used.
    pub ants: usize,
    /// Exploitation probability used.
    pub q0: f64,
}

/// Writes a run outcome in json format.
pub trait JsonSolution {
    /// Serializes the best plan into the writer.
    fn write_json<W: Write>(&self, writer: BufWriter<W>) -> GenericResult<()>;
}

impl JsonSolution for RunResult {
    fn write_json<W: Write>(&self, writer: BufWriter<W>) -> GenericResult<()> {
        serialize_solution(&create_solution(self), writer)
    }
}

/// Creates a json solution from the run outcome.
pub fn create_solution(result: &RunResult) -> Solution {
    let solution = &result.solution;

    Solution {
        state: result.state.to_string(),
        iterations: result.iterations,
        final_time: result.final_time,
        seed: result.seed,
        quality: solution.quality,
        statistic: Statistic {
            distance: solution.total_distance(),
            fuel: solution.total_fuel(),
            assigned: solution.assigned_count(),
            unassigned: solution.unassigned.len(),
        },
        tours: solution.assignments.iter().map(create_tour).collect(),
        unassigned: solution
            .unassigned
            .iter()
            .map(|unassigned| UnassignedOrder {
                order_id: unassigned.order.id.clone(),
                code: get_reason_code(&unassigned.reason).to_string(),
                description: unassigned.reason.to_string(),
            })
            .collect(),
        orders: result
            .order_states
            .iter()
            .map(|(order, state)| OrderStatus { id: order.id.clone(), state: get_state_name(state).to_string() })
            .collect(),
        warnings: result.warnings.iter().map(|warning| warning.to_string()).collect(),
        metrics: result.metrics.as_ref().map(create_metrics),
    }
}

/// Serializes a solution as pretty json.
pub fn serialize_solution<W: Write>(solution: &Solution, writer: BufWriter<W>) -> GenericResult<()> {
    serde_json::to_writer_pretty(writer, solution).map_err(|err| format!("cannot serialize solution: '{err}'").into())
}

/// Deserializes a solution from json.
pub fn deserialize_solution<R: Read>(reader: BufReader<R>) -> GenericResult<Solution> {
    serde_json::from_reader(reader).map_err(|err| to_format_error(err, "solution"))
}

/// Returns a reason code used in json output.
pub fn get_reason_code(reason: &UnassignedReason) -> &'static str {
    match reason {
        UnassignedReason::InvalidInput => "INVALID_INPUT",
        UnassignedReason::NoFittingVehicle => "NO_FITTING_VEHICLE",
        UnassignedReason::Unreachable => "UNREACHABLE",
        UnassignedReason::InsufficientFuel => "INSUFFICIENT_FUEL",
    }
}

fn get_state_name(state: &OrderState) -> &'static str {
    match state {
        OrderState::Pending => "pending",
        OrderState::Assigned => "assigned",
        OrderState::Delivered => "delivered",
        OrderState::Unassignable => "unassignable",
    }
}

fn create_tour(assignment: &VehicleAssignment) -> Tour {
    Tour {
        vehicle_id: assignment.vehicle.id.clone(),
        orders: assignment.orders.iter().map(|order| order.id.clone()).collect(),
        distance: assignment.total_distance,
        fuel: assignment.fuel_consumed,
        legs: assignment.legs.iter().map(create_leg).collect(),
    }
}

fn create_leg(leg: &RouteLeg) -> Leg {
    let activity = match &leg.kind {
        LegKind::Delivery(order) => Activity::Delivery { order_id: order.id.clone() },
        LegKind::Refuel { depot_id, volume } => Activity::Refuel { depot_id: depot_id.clone(), volume: *volume },
        LegKind::Return { depot_id } => Activity::Return { depot_id: depot_id.clone() },
    };

    Leg {
        activity,
        origin: to_coordinate(&leg.origin),
        destination: to_coordinate(&leg.destination),
        arrival: leg.arrival,
        path: leg.path.iter().map(to_coordinate).collect(),
    }
}

fn create_metrics(metrics: &Metrics) -> MetricsInfo {
    MetricsInfo {
        duration: metrics.duration,
        iterations: metrics.iterations,
        speed: metrics.speed,
        evolution: metrics
            .evolution
            .iter()
            .map(|record| IterationInfo {
                number: record.number,
                timestamp: record.timestamp,
                best_quality: record.best_quality,
                is_improvement: record.is_improvement,
                assigned: record.assigned,
                unassigned: record.unassigned,
                ants: record.ants,
                q0: record.q0,
            })
            .collect(),
    }
}
