//! This module reimports commonly used types.

pub use crate::aco::AcoConfig;
pub use crate::aco::PheromoneUpdate;

pub use crate::graph::RouteGraph;

pub use crate::models::common::{Location, Timestamp, Volume};
pub use crate::models::problem::{Blockage, Depot, DepotKind, GridSize, Order, OrderState, Problem};
pub use crate::models::problem::{Breakdown, IncidentKind, Maintenance, Vehicle, VehicleState};
pub use crate::models::solution::{LegKind, RouteLeg, Solution, UnassignedOrder, UnassignedReason};
pub use crate::models::solution::VehicleAssignment;

pub use crate::solver::{AcoSolver, RunResult, RunState, Solver, run};
pub use crate::solver::{Metrics, TelemetryMode};

pub use crate::utils::{DefaultRandom, Environment, InfoLogger, Parallelism, Quota, Random};
pub use crate::utils::{GenericError, GenericResult};
