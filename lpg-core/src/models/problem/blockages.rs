#[cfg(test)]
#[path = "../../../tests/unit/models/problem/blockages_test.rs"]
mod blockages_test;

use crate::models::common::{Location, TimeWindow, Timestamp};

/// A road blockage: an ordered list of grid locations forming a polyline of closed segments,
/// impassable while the blockage is active.
#[derive(Clone, Debug, PartialEq)]
pub struct Blockage {
    /// Activity interval `[start, end)`.
    pub window: TimeWindow,
    /// Polyline vertices.
    pub points: Vec<Location>,
}

impl Blockage {
    /// Creates a new instance of `Blockage`.
    pub fn new(start: Timestamp, end: Timestamp, points: Vec<Location>) -> Self {
        Self { window: TimeWindow::new(start, end), points }
    }

    /// Returns true if blockage is active at given time.
    pub fn is_active(&self, time: Timestamp) -> bool {
        self.window.contains(time)
    }

    /// Returns polyline segments. A single point polyline is a degenerate segment.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let single = (self.points.len() == 1).then(|| Segment::new(self.points[0], self.points[0]));

        single.into_iter().chain(self.points.windows(2).map(|pair| Segment::new(pair[0], pair[1])))
    }

    /// Returns true if any segment covers the location (regardless of time).
    pub fn covers_node(&self, location: &Location) -> bool {
        self.segments().any(|segment| segment.contains(location))
    }

    /// Returns true if unit edge between two locations intersects any segment (regardless of time).
    pub fn covers_edge(&self, from: &Location, to: &Location) -> bool {
        let edge = Segment::new(*from, *to);
        self.segments().any(|segment| segment.intersects(&edge))
    }

    /// Returns all grid locations covered by the polyline, segments must be axis aligned.
    pub fn covered_locations(&self) -> Vec<Location> {
        let mut locations = self
            .segments()
            .filter(|segment| segment.orientation().is_some())
            .flat_map(|segment| {
                let (min_x, max_x) = (segment.a.x.min(segment.b.x), segment.a.x.max(segment.b.x));
                let (min_y, max_y) = (segment.a.y.min(segment.b.y), segment.a.y.max(segment.b.y));

                (min_x..=max_x).flat_map(move |x| (min_y..=max_y).map(move |y| Location::new(x, y)))
            })
            .collect::<Vec<_>>();

        locations.sort();
        locations.dedup();

        locations
    }
}

/// Segment orientation on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// A degenerate segment (single point).
    Point,
    /// Constant `y`.
    Horizontal,
    /// Constant `x`.
    Vertical,
}

/// A straight segment between two grid locations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// First end.
    pub a: Location,
    /// Second end.
    pub b: Location,
}

impl Segment {
    /// Creates a new instance of `Segment`.
    pub fn new(a: Location, b: Location) -> Self {
        Self { a, b }
    }

    /// Returns orientation or `None` for a diagonal (malformed) segment.
    pub fn orientation(&self) -> Option<Orientation> {
        match (self.a.x == self.b.x, self.a.y == self.b.y) {
            (true, true) => Some(Orientation::Point),
            (false, true) => Some(Orientation::Horizontal),
            (true, false) => Some(Orientation::Vertical),
            (false, false) => None,
        }
    }

    /// Returns true if location lies on the segment.
    pub fn contains(&self, location: &Location) -> bool {
        self.orientation().is_some() && self.x_range().contains(&location.x) && self.y_range().contains(&location.y)
    }

    /// Returns true if two axis aligned segments intersect: either they are collinear and overlap
    /// or they are perpendicular and cross (touching ends included). Diagonal segments never intersect.
    pub fn intersects(&self, other: &Segment) -> bool {
        use Orientation::*;

        match (self.orientation(), other.orientation()) {
            (None, _) | (_, None) => false,
            (Some(Horizontal), Some(Horizontal)) => self.a.y == other.a.y && overlaps(self.x_range(), other.x_range()),
            (Some(Vertical), Some(Vertical)) => self.a.x == other.a.x && overlaps(self.y_range(), other.y_range()),
            (Some(Point), _) => other.contains(&self.a),
            (_, Some(Point)) => self.contains(&other.a),
            (Some(Horizontal), Some(Vertical)) => crosses(self, other),
            (Some(Vertical), Some(Horizontal)) => crosses(other, self),
        }
    }

    fn x_range(&self) -> std::ops::RangeInclusive<i32> {
        self.a.x.min(self.b.x)..=self.a.x.max(self.b.x)
    }

    fn y_range(&self) -> std::ops::RangeInclusive<i32> {
        self.a.y.min(self.b.y)..=self.a.y.max(self.b.y)
    }
}

fn overlaps(left: std::ops::RangeInclusive<i32>, right: std::ops::RangeInclusive<i32>) -> bool {
    left.start() <= right.end() && right.start() <= left.end()
}

fn crosses(horizontal: &Segment, vertical: &Segment) -> bool {
    horizontal.x_range().contains(&vertical.a.x) && vertical.y_range().contains(&horizontal.a.y)
}
