//! Solution models: route legs, vehicle assignments and a complete candidate solution.

mod route;
pub use self::route::*;

use crate::models::problem::Order;
use std::fmt;
use std::sync::Arc;

/// Specifies why an order could not be placed into a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnassignedReason {
    /// Order failed input validation.
    InvalidInput,
    /// No available vehicle has enough spare capacity for the order's group.
    NoFittingVehicle,
    /// No path to the destination exists within the planning window.
    Unreachable,
    /// The destination cannot be reached even after a refuel detour.
    InsufficientFuel,
}

impl fmt::Display for UnassignedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            UnassignedReason::InvalidInput => "invalid input",
            UnassignedReason::NoFittingVehicle => "no fitting vehicle",
            UnassignedReason::Unreachable => "unreachable",
            UnassignedReason::InsufficientFuel => "insufficient fuel",
        };

        write!(f, "{text}")
    }
}

/// An order which is not a part of any vehicle assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct UnassignedOrder {
    /// The order.
    pub order: Arc<Order>,
    /// A reason code.
    pub reason: UnassignedReason,
}

/// A candidate solution produced by a single route builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    /// Vehicle assignments.
    pub assignments: Vec<VehicleAssignment>,
    /// Orders which could not be placed.
    pub unassigned: Vec<UnassignedOrder>,
    /// Solution quality, higher is better. Zero until evaluated.
    pub quality: f64,
}

impl Solution {
    /// Returns amount of assigned orders.
    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().map(|assignment| assignment.orders.len()).sum()
    }

    /// Returns total distance of all assignments.
    pub fn total_distance(&self) -> i64 {
        self.assignments.iter().map(|assignment| assignment.total_distance as i64).sum()
    }

    /// Returns total estimated fuel of all assignments.
    pub fn total_fuel(&self) -> f64 {
        self.assignments.iter().map(|assignment| assignment.fuel_consumed).sum()
    }

    /// Returns all legs of all assignments.
    pub fn legs(&self) -> impl Iterator<Item = &RouteLeg> + '_ {
        self.assignments.iter().flat_map(|assignment| assignment.legs.iter())
    }
}
