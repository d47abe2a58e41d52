use crate::models::common::{Distance, Location, Timestamp, Volume};
use crate::models::problem::{Order, Vehicle};
use std::sync::Arc;

/// Specifies a leg purpose.
#[derive(Clone, Debug, PartialEq)]
pub enum LegKind {
    /// Travel to an order destination and unload.
    Delivery(Arc<Order>),
    /// Detour to a tank and refuel given volume there.
    Refuel {
        /// Depot id.
        depot_id: String,
        /// Refueled volume.
        volume: Volume,
    },
    /// Travel back to a depot after the last delivery.
    Return {
        /// Depot id.
        depot_id: String,
    },
}

/// A single leg of a vehicle route.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteLeg {
    /// Leg origin.
    pub origin: Location,
    /// Leg destination.
    pub destination: Location,
    /// Grid path including both ends.
    pub path: Vec<Location>,
    /// Estimated arrival time at destination.
    pub arrival: Timestamp,
    /// Leg purpose.
    pub kind: LegKind,
}

impl RouteLeg {
    /// Returns leg distance in grid steps.
    pub fn distance(&self) -> Distance {
        self.path.len().saturating_sub(1) as Distance
    }

    /// Returns delivered order for a delivery leg.
    pub fn order(&self) -> Option<&Arc<Order>> {
        match &self.kind {
            LegKind::Delivery(order) => Some(order),
            _ => None,
        }
    }

    /// Returns true if the leg is a refuel detour.
    pub fn is_refuel(&self) -> bool {
        matches!(self.kind, LegKind::Refuel { .. })
    }
}

/// A vehicle with its ordered orders and legs.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleAssignment {
    /// A snapshot of the vehicle at planning time.
    pub vehicle: Vehicle,
    /// Delivered orders in visiting order.
    pub orders: Vec<Arc<Order>>,
    /// Route legs.
    pub legs: Vec<RouteLeg>,
    /// Total distance.
    pub total_distance: Distance,
    /// Total estimated fuel consumption.
    pub fuel_consumed: Volume,
}

impl VehicleAssignment {
    /// Returns total cargo volume of assigned orders.
    pub fn load(&self) -> Volume {
        self.orders.iter().map(|order| order.volume).sum()
    }

    /// Returns the estimated time when the route ends.
    pub fn end_time(&self) -> Option<Timestamp> {
        self.legs.last().map(|leg| leg.arrival)
    }
}
