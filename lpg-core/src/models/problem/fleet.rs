#[cfg(test)]
#[path = "../../../tests/unit/models/problem/fleet_test.rs"]
mod fleet_test;

use crate::models::common::{Location, TimeWindow, Timestamp, Volume};
use std::str::FromStr;

/// Specifies vehicle availability state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VehicleState {
    /// Idle and ready to be planned.
    Available,
    /// Executing a plan, can be replanned.
    EnRoute,
    /// In a scheduled maintenance window.
    UnderMaintenance,
    /// Broken down until repaired.
    Broken,
}

impl FromStr for VehicleState {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "available" => Ok(Self::Available),
            "en-route" => Ok(Self::EnRoute),
            "under-maintenance" => Ok(Self::UnderMaintenance),
            "broken" => Ok(Self::Broken),
            _ => Err(format!("unknown vehicle state: '{value}'")),
        }
    }
}

/// A tanker vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct Vehicle {
    /// Vehicle id.
    pub id: String,
    /// Cargo capacity.
    pub capacity: Volume,
    /// Fuel tank capacity.
    pub fuel_capacity: Volume,
    /// Current fuel.
    pub fuel: Volume,
    /// Weight of an empty vehicle.
    pub tare_weight: f64,
    /// Weight of a fully loaded vehicle.
    pub gross_weight: f64,
    /// Current position.
    pub position: Location,
    /// Availability state.
    pub state: VehicleState,
}

impl Vehicle {
    /// Returns true if vehicle can take part in planning.
    pub fn is_plannable(&self) -> bool {
        matches!(self.state, VehicleState::Available | VehicleState::EnRoute)
    }

    /// Returns weight of given cargo volume.
    pub fn cargo_weight(&self, volume: Volume) -> f64 {
        if self.capacity > 0. { volume.max(0.) * (self.gross_weight - self.tare_weight) / self.capacity } else { 0. }
    }

    /// Returns combined weight of the vehicle carrying given volume.
    pub fn weight_with(&self, volume: Volume) -> f64 {
        self.tare_weight + self.cargo_weight(volume)
    }

    /// Returns fuel level relative to fuel capacity, in `[0, 1]`.
    pub fn fuel_ratio(&self) -> f64 {
        if self.fuel_capacity > 0. { (self.fuel / self.fuel_capacity).clamp(0., 1.) } else { 0. }
    }
}

/// Specifies a breakdown severity which determines repair time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IncidentKind {
    /// Fixed on the spot.
    Minor,
    /// Needs a workshop shift.
    Moderate,
    /// Needs several days in the workshop.
    Severe,
}

impl IncidentKind {
    /// Returns time in minutes until the vehicle is available again.
    pub fn repair_minutes(&self) -> Timestamp {
        match self {
            IncidentKind::Minor => 120.,
            IncidentKind::Moderate => 120. + 480.,
            IncidentKind::Severe => 240. + 3. * 1440.,
        }
    }
}

impl FromStr for IncidentKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "minor" | "t1" => Ok(Self::Minor),
            "moderate" | "t2" => Ok(Self::Moderate),
            "severe" | "t3" => Ok(Self::Severe),
            _ => Err(format!("unknown incident kind: '{value}'")),
        }
    }
}

/// A scheduled vehicle breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct Breakdown {
    /// Vehicle id.
    pub vehicle_id: String,
    /// Incident time.
    pub at: Timestamp,
    /// Severity.
    pub kind: IncidentKind,
}

impl Breakdown {
    /// Returns the interval when vehicle is broken.
    pub fn window(&self) -> TimeWindow {
        TimeWindow::new(self.at, self.at + self.kind.repair_minutes())
    }
}

/// A scheduled maintenance window.
#[derive(Clone, Debug, PartialEq)]
pub struct Maintenance {
    /// Vehicle id.
    pub vehicle_id: String,
    /// Maintenance interval.
    pub window: TimeWindow,
}
