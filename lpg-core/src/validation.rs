//! Up front input validation: every inconsistency is reported as a warning and the offending
//! record is excluded, so a run proceeds on a best effort basis.

#![allow(missing_docs)]

#[cfg(test)]
#[path = "../tests/unit/validation_test.rs"]
mod validation_test;

use crate::models::common::{Location, Timestamp};
use crate::models::problem::*;
use rustc_hash::FxHashSet;
use std::fmt;
use std::sync::Arc;

/// An input inconsistency.
#[derive(Clone, Debug, PartialEq)]
pub enum ValidationWarning {
    /// Order destination is outside of the grid.
    OrderOutOfGrid { order_id: String, destination: Location },
    /// Order volume is not positive.
    OrderInvalidVolume { order_id: String, volume: f64 },
    /// Deadline leaves less than the minimum lead time after registration.
    OrderShortLeadTime { order_id: String, lead_time: Timestamp, min_lead_time: Timestamp },
    /// Order id is used more than once.
    OrderDuplicateId { order_id: String },
    /// Blockage has no points.
    BlockageEmpty { index: usize },
    /// Blockage ends before it starts.
    BlockageInvalidWindow { index: usize },
    /// Blockage point is outside of the grid.
    BlockageOutOfGrid { index: usize, point: Location },
    /// Blockage polyline has a segment which is not axis aligned.
    BlockageDiagonalSegment { index: usize, from: Location, to: Location },
    /// Vehicle weight, capacity or fuel figures are incoherent.
    VehicleIncoherent { vehicle_id: String, reason: String },
    /// Vehicle is placed outside of the grid.
    VehicleOutOfGrid { vehicle_id: String, position: Location },
    /// Vehicle id is used more than once.
    VehicleDuplicateId { vehicle_id: String },
    /// Depot is placed outside of the grid.
    DepotOutOfGrid { depot_id: String, location: Location },
    /// Intermediate tank has invalid capacity or available volume.
    DepotInvalidCapacity { depot_id: String },
    /// More than one central depot is given.
    DepotExtraCentral { depot_id: String },
    /// Breakdown or maintenance refers to an unknown vehicle.
    IncidentUnknownVehicle { vehicle_id: String },
    /// Maintenance ends before it starts.
    MaintenanceInvalidWindow { vehicle_id: String },
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OrderOutOfGrid { order_id, destination } => {
                write!(f, "order '{order_id}' destination {destination} is outside of the grid")
            }
            Self::OrderInvalidVolume { order_id, volume } => {
                write!(f, "order '{order_id}' has non-positive volume {volume}")
            }
            Self::OrderShortLeadTime { order_id, lead_time, min_lead_time } => write!(
                f,
                "order '{order_id}' lead time {lead_time:.0} min is below the minimum of {min_lead_time:.0} min"
            ),
            Self::OrderDuplicateId { order_id } => write!(f, "order id '{order_id}' is duplicated"),
            Self::BlockageEmpty { index } => write!(f, "blockage #{index} has no points"),
            Self::BlockageInvalidWindow { index } => write!(f, "blockage #{index} ends before it starts"),
            Self::BlockageOutOfGrid { index, point } => {
                write!(f, "blockage #{index} point {point} is outside of the grid")
            }
            Self::BlockageDiagonalSegment { index, from, to } => {
                write!(f, "blockage #{index} segment {from}-{to} is not axis aligned")
            }
            Self::VehicleIncoherent { vehicle_id, reason } => write!(f, "vehicle '{vehicle_id}': {reason}"),
            Self::VehicleOutOfGrid { vehicle_id, position } => {
                write!(f, "vehicle '{vehicle_id}' position {position} is outside of the grid")
            }
            Self::VehicleDuplicateId { vehicle_id } => write!(f, "vehicle id '{vehicle_id}' is duplicated"),
            Self::DepotOutOfGrid { depot_id, location } => {
                write!(f, "depot '{depot_id}' location {location} is outside of the grid")
            }
            Self::DepotInvalidCapacity { depot_id } => write!(f, "tank '{depot_id}' has invalid capacity"),
            Self::DepotExtraCentral { depot_id } => write!(f, "depot '{depot_id}' is an extra central depot"),
            Self::IncidentUnknownVehicle { vehicle_id } => {
                write!(f, "incident refers to unknown vehicle '{vehicle_id}'")
            }
            Self::MaintenanceInvalidWindow { vehicle_id } => {
                write!(f, "maintenance of vehicle '{vehicle_id}' ends before it starts")
            }
        }
    }
}

/// A problem with invalid records excluded.
#[derive(Clone, Debug)]
pub struct ValidatedProblem {
    /// Cleaned problem.
    pub problem: Problem,
    /// Orders excluded from planning.
    pub invalid_orders: Vec<Arc<Order>>,
    /// Found inconsistencies.
    pub warnings: Vec<ValidationWarning>,
}

/// Validates problem and excludes invalid records.
pub fn validate_problem(problem: &Problem, min_lead_time: Timestamp) -> ValidatedProblem {
    let grid = problem.grid;
    let mut warnings = Vec::new();

    let depots = validate_depots(&problem.depots, grid, &mut warnings);
    let vehicles = validate_vehicles(&problem.vehicles, grid, &mut warnings);
    let blockages = validate_blockages(&problem.blockages, grid, &mut warnings);
    let (orders, invalid_orders) = validate_orders(&problem.orders, grid, min_lead_time, &mut warnings);

    let vehicle_ids = vehicles.iter().map(|vehicle| vehicle.id.as_str()).collect::<FxHashSet<_>>();
    let is_known = |vehicle_id: &str, warnings: &mut Vec<ValidationWarning>| {
        let is_known = vehicle_ids.contains(vehicle_id);
        if !is_known {
            warnings.push(ValidationWarning::IncidentUnknownVehicle { vehicle_id: vehicle_id.to_string() });
        }
        is_known
    };

    let breakdowns = problem
        .breakdowns
        .iter()
        .filter(|breakdown| is_known(&breakdown.vehicle_id, &mut warnings))
        .cloned()
        .collect::<Vec<_>>();

    let maintenances = problem
        .maintenances
        .iter()
        .filter(|maintenance| {
            if !is_known(&maintenance.vehicle_id, &mut warnings) {
                return false;
            }

            let is_valid = maintenance.window.end > maintenance.window.start;
            if !is_valid {
                let vehicle_id = maintenance.vehicle_id.clone();
                warnings.push(ValidationWarning::MaintenanceInvalidWindow { vehicle_id });
            }
            is_valid
        })
        .cloned()
        .collect::<Vec<_>>();

    ValidatedProblem {
        problem: Problem {
            grid,
            depots,
            vehicles,
            orders,
            blockages,
            breakdowns,
            maintenances,
            start_time: problem.start_time,
        },
        invalid_orders,
        warnings,
    }
}

fn validate_orders(
    orders: &[Arc<Order>],
    grid: GridSize,
    min_lead_time: Timestamp,
    warnings: &mut Vec<ValidationWarning>,
) -> (Vec<Arc<Order>>, Vec<Arc<Order>>) {
    let mut ids = FxHashSet::default();

    orders.iter().cloned().partition(|order| {
        let order_id = order.id.clone();
        let warning = if !ids.insert(order.id.clone()) {
            Some(ValidationWarning::OrderDuplicateId { order_id })
        } else if !grid.contains(&order.destination) {
            Some(ValidationWarning::OrderOutOfGrid { order_id, destination: order.destination })
        } else if !(order.volume > 0. && order.volume.is_finite()) {
            Some(ValidationWarning::OrderInvalidVolume { order_id, volume: order.volume })
        } else if !(order.lead_time() >= min_lead_time) {
            Some(ValidationWarning::OrderShortLeadTime { order_id, lead_time: order.lead_time(), min_lead_time })
        } else {
            None
        };

        accept(warning, warnings)
    })
}

fn validate_blockages(blockages: &[Blockage], grid: GridSize, warnings: &mut Vec<ValidationWarning>) -> Vec<Blockage> {
    blockages
        .iter()
        .enumerate()
        .filter(|(index, blockage)| {
            let index = *index;
            let warning = if blockage.points.is_empty() {
                Some(ValidationWarning::BlockageEmpty { index })
            } else if !(blockage.window.end > blockage.window.start) {
                Some(ValidationWarning::BlockageInvalidWindow { index })
            } else if let Some(point) = blockage.points.iter().find(|point| !grid.contains(point)) {
                Some(ValidationWarning::BlockageOutOfGrid { index, point: *point })
            } else {
                blockage.segments().find(|segment| segment.orientation().is_none()).map(|segment| {
                    ValidationWarning::BlockageDiagonalSegment { index, from: segment.a, to: segment.b }
                })
            };

            accept(warning, warnings)
        })
        .map(|(_, blockage)| blockage.clone())
        .collect()
}

fn validate_vehicles(vehicles: &[Vehicle], grid: GridSize, warnings: &mut Vec<ValidationWarning>) -> Vec<Vehicle> {
    let mut ids = FxHashSet::default();

    vehicles
        .iter()
        .filter(|vehicle| {
            let vehicle_id = vehicle.id.clone();
            let incoherent = |reason: &str| ValidationWarning::VehicleIncoherent {
                vehicle_id: vehicle.id.clone(),
                reason: reason.to_string(),
            };

            let warning = if !ids.insert(vehicle.id.clone()) {
                Some(ValidationWarning::VehicleDuplicateId { vehicle_id })
            } else if !grid.contains(&vehicle.position) {
                Some(ValidationWarning::VehicleOutOfGrid { vehicle_id, position: vehicle.position })
            } else if !(vehicle.capacity > 0.) {
                Some(incoherent("capacity must be positive"))
            } else if !(vehicle.fuel_capacity > 0.) {
                Some(incoherent("fuel capacity must be positive"))
            } else if !(vehicle.fuel >= 0. && vehicle.fuel <= vehicle.fuel_capacity) {
                Some(incoherent("fuel must be within [0, fuel capacity]"))
            } else if !(vehicle.tare_weight > 0. && vehicle.gross_weight > vehicle.tare_weight) {
                Some(incoherent("gross weight must exceed positive tare weight"))
            } else {
                None
            };

            accept(warning, warnings)
        })
        .cloned()
        .collect()
}

fn validate_depots(depots: &[Depot], grid: GridSize, warnings: &mut Vec<ValidationWarning>) -> Vec<Depot> {
    let mut has_central = false;

    depots
        .iter()
        .filter(|depot| {
            let depot_id = depot.id.clone();
            let warning = if !grid.contains(&depot.location) {
                Some(ValidationWarning::DepotOutOfGrid { depot_id, location: depot.location })
            } else {
                match depot.kind {
                    DepotKind::Central if has_central => Some(ValidationWarning::DepotExtraCentral { depot_id }),
                    DepotKind::Central => {
                        has_central = true;
                        None
                    }
                    DepotKind::Intermediate
                        if !(depot.capacity > 0. && depot.capacity.is_finite())
                            || !(depot.available >= 0. && depot.available <= depot.capacity) =>
                    {
                        Some(ValidationWarning::DepotInvalidCapacity { depot_id })
                    }
                    DepotKind::Intermediate => None,
                }
            };

            accept(warning, warnings)
        })
        .cloned()
        .collect()
}

/// Records the warning if any, returns true when the record is kept.
fn accept(warning: Option<ValidationWarning>, warnings: &mut Vec<ValidationWarning>) -> bool {
    match warning {
        Some(warning) => {
            warnings.push(warning);
            false
        }
        None => true,
    }
}
