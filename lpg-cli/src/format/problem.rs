//! Json problem format: mirrors the core problem model with plain values and string enums.

#[cfg(test)]
#[path = "../../tests/unit/format/problem_test.rs"]
mod problem_test;

use super::{Coordinate, to_format_error, to_location};
use lpg_core::models::common::TimeWindow;
use lpg_core::models::problem as core;
use lpg_core::prelude::GenericResult;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Read};
use std::sync::Arc;

/// A dispatch problem.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    /// Grid bounds.
    pub grid: Grid,
    /// Simulation start time in minutes. Default is zero.
    #[serde(default)]
    pub start_time: f64,
    /// Central depot and intermediate tanks.
    pub depots: Vec<Depot>,
    /// Vehicles.
    pub vehicles: Vec<Vehicle>,
    /// Orders.
    pub orders: Vec<Order>,
    /// Road blockages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub blockages: Vec<Blockage>,
    /// Scheduled breakdowns.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdowns: Vec<Breakdown>,
    /// Scheduled maintenance windows.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub maintenances: Vec<Maintenance>,
}

/// Grid bounds: coordinates are in `0..=width` and `0..=height`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Grid {
    /// Max horizontal coordinate.
    pub width: i32,
    /// Max vertical coordinate.
    pub height: i32,
}

/// A depot or a tank.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Depot {
    /// Depot id.
    pub id: String,
    /// Depot location.
    pub location: Coordinate,
    /// Depot type: `central` or `intermediate`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Tank capacity, ignored for the central depot.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<f64>,
    /// Currently available volume. Default is capacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<f64>,
}

/// A tanker vehicle.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// Vehicle id.
    pub id: String,
    /// Cargo capacity.
    pub capacity: f64,
    /// Fuel tank capacity.
    pub fuel_capacity: f64,
    /// Current fuel. Default is fuel capacity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel: Option<f64>,
    /// Weight of an empty vehicle.
    pub tare_weight: f64,
    /// Weight of a fully loaded vehicle.
    pub gross_weight: f64,
    /// Current position.
    pub position: Coordinate,
    /// One of `available`, `en-route`, `under-maintenance` or `broken`. Default is `available`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A customer order.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id.
    pub id: String,
    /// Destination.
    pub destination: Coordinate,
    /// Requested volume.
    pub volume: f64,
    /// Registration time.
    pub registered_at: f64,
    /// Delivery deadline.
    pub deadline: f64,
}

/// A road blockage active in `[start, end)`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Blockage {
    /// Activation time.
    pub start: f64,
    /// Deactivation time.
    pub end: f64,
    /// Polyline vertices.
    pub points: Vec<Coordinate>,
}

/// A scheduled breakdown.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breakdown {
    /// Vehicle id.
    pub vehicle_id: String,
    /// Incident time.
    pub at: f64,
    /// Incident kind: `minor`, `moderate` or `severe` (`t1`, `t2`, `t3`).
    pub kind: String,
}

/// A scheduled maintenance window `[start, end)`.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Maintenance {
    /// Vehicle id.
    pub vehicle_id: String,
    /// Window start.
    pub start: f64,
    /// Window end.
    pub end: f64,
}

/// Reads a problem in json format.
pub trait JsonProblem {
    /// Reads and maps the problem into the core model.
    fn read_json(self) -> GenericResult<core::Problem>;
}

impl<R: Read> JsonProblem for BufReader<R> {
    fn read_json(self) -> GenericResult<core::Problem> {
        deserialize_problem(self).and_then(map_to_problem)
    }
}

/// Deserializes a problem from json.
pub fn deserialize_problem<R: Read>(reader: BufReader<R>) -> GenericResult<Problem> {
    serde_json::from_reader(reader).map_err(|err| to_format_error(err, "problem"))
}

/// Maps a json problem into the core model. Fails only on malformed enumerated values: data
/// inconsistencies are left to the validation pass of the planner.
pub fn map_to_problem(problem: Problem) -> GenericResult<core::Problem> {
    let depots = problem.depots.iter().map(map_depot).collect::<GenericResult<Vec<_>>>()?;
    let vehicles = problem.vehicles.iter().map(map_vehicle).collect::<GenericResult<Vec<_>>>()?;
    let breakdowns = problem
        .breakdowns
        .iter()
        .map(|breakdown| -> GenericResult<core::Breakdown> {
            let kind = breakdown.kind.parse::<core::IncidentKind>()?;

            Ok(core::Breakdown { vehicle_id: breakdown.vehicle_id.clone(), at: breakdown.at, kind })
        })
        .collect::<GenericResult<Vec<_>>>()?;

    let orders = problem
        .orders
        .iter()
        .map(|order| {
            Arc::new(core::Order {
                id: order.id.clone(),
                destination: to_location(&order.destination),
                volume: order.volume,
                registered_at: order.registered_at,
                deadline: order.deadline,
            })
        })
        .collect();

    let blockages = problem
        .blockages
        .iter()
        .map(|blockage| {
            core::Blockage::new(blockage.start, blockage.end, blockage.points.iter().map(to_location).collect())
        })
        .collect();

    let maintenances = problem
        .maintenances
        .iter()
        .map(|maintenance| core::Maintenance {
            vehicle_id: maintenance.vehicle_id.clone(),
            window: TimeWindow::new(maintenance.start, maintenance.end),
        })
        .collect();

    Ok(core::Problem {
        grid: core::GridSize::new(problem.grid.width, problem.grid.height),
        depots,
        vehicles,
        orders,
        blockages,
        breakdowns,
        maintenances,
        start_time: problem.start_time,
    })
}

fn map_depot(depot: &Depot) -> GenericResult<core::Depot> {
    let location = to_location(&depot.location);

    Ok(match depot.kind.parse::<core::DepotKind>()? {
        core::DepotKind::Central => core::Depot::central(depot.id.as_str(), location),
        core::DepotKind::Intermediate => {
            let capacity = depot.capacity.unwrap_or(0.);
            let tank = core::Depot::intermediate(depot.id.as_str(), location, capacity);

            core::Depot { available: depot.available.unwrap_or(capacity), ..tank }
        }
    })
}

fn map_vehicle(vehicle: &Vehicle) -> GenericResult<core::Vehicle> {
    let state = match vehicle.state.as_deref() {
        Some(state) => state.parse::<core::VehicleState>()?,
        None => core::VehicleState::Available,
    };

    Ok(core::Vehicle {
        id: vehicle.id.clone(),
        capacity: vehicle.capacity,
        fuel_capacity: vehicle.fuel_capacity,
        fuel: vehicle.fuel.unwrap_or(vehicle.fuel_capacity),
        tare_weight: vehicle.tare_weight,
        gross_weight: vehicle.gross_weight,
        position: to_location(&vehicle.position),
        state,
    })
}
