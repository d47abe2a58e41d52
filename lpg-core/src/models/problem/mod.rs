//! Problem domain models: the grid, depots and tanks, the fleet, orders and dynamic events.

mod blockages;
pub use self::blockages::*;

mod depots;
pub use self::depots::*;

mod fleet;
pub use self::fleet::*;

mod orders;
pub use self::orders::*;

use crate::models::common::{Location, Timestamp};
use std::sync::Arc;

/// Specifies grid bounds: valid coordinates are `0..=width` and `0..=height`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    /// Maximum horizontal coordinate.
    pub width: i32,
    /// Maximum vertical coordinate.
    pub height: i32,
}

impl GridSize {
    /// Creates a new instance of `GridSize`.
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Returns true if location is inside grid bounds.
    pub fn contains(&self, location: &Location) -> bool {
        (0..=self.width).contains(&location.x) && (0..=self.height).contains(&location.y)
    }

    /// Returns total amount of grid nodes.
    pub fn node_count(&self) -> usize {
        (self.width as usize + 1) * (self.height as usize + 1)
    }
}

/// A dispatch problem: a typed feed of everything the planner needs for one run.
#[derive(Clone, Debug)]
pub struct Problem {
    /// Grid bounds of the city.
    pub grid: GridSize,
    /// Central depot and intermediate tanks.
    pub depots: Vec<Depot>,
    /// Fleet of vehicles.
    pub vehicles: Vec<Vehicle>,
    /// Orders to deliver.
    pub orders: Vec<Arc<Order>>,
    /// Time bounded road blockages.
    pub blockages: Vec<Blockage>,
    /// Scheduled vehicle breakdowns.
    pub breakdowns: Vec<Breakdown>,
    /// Scheduled vehicle maintenance windows.
    pub maintenances: Vec<Maintenance>,
    /// Simulation start time.
    pub start_time: Timestamp,
}
