//! Common primitives shared by problem and solution models.

#[cfg(test)]
#[path = "../../tests/unit/models/common_test.rs"]
mod common_test;

use std::fmt;

/// Specifies a time in minutes since an arbitrary epoch shared by all inputs.
pub type Timestamp = f64;

/// Specifies a volume (cargo or fuel).
pub type Volume = f64;

/// Specifies a grid distance, one unit is one grid step.
pub type Distance = i32;

/// Amount of minutes in one simulated day.
pub const MINUTES_PER_DAY: Timestamp = 1440.;

/// A location on an integer grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    /// A horizontal coordinate.
    pub x: i32,
    /// A vertical coordinate.
    pub y: i32,
}

impl Location {
    /// Creates a new instance of `Location`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns manhattan distance to other location.
    pub fn manhattan(&self, other: &Location) -> Distance {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Returns true if other location is one grid step away.
    pub fn is_adjacent(&self, other: &Location) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(i32, i32)> for Location {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Represents a half open time interval `[start, end)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    /// Start of the interval, inclusive.
    pub start: Timestamp,
    /// End of the interval, exclusive.
    pub end: Timestamp,
}

impl TimeWindow {
    /// Creates a new instance of `TimeWindow`.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Returns true if time is inside the interval.
    pub fn contains(&self, time: Timestamp) -> bool {
        self.start <= time && time < self.end
    }

    /// Returns true if the interval shares any instant with `[start, end]`.
    pub fn intersects(&self, start: Timestamp, end: Timestamp) -> bool {
        self.start <= end && start < self.end
    }

    /// Returns interval duration.
    pub fn duration(&self) -> Timestamp {
        self.end - self.start
    }
}
