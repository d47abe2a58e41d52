//! A time aware grid graph of the city: static adjacency, depot tags, time windowed blockages
//! and shortest path queries around them.

#[cfg(test)]
#[path = "../../tests/unit/graph/graph_test.rs"]
mod graph_test;

mod edges;
pub use self::edges::EdgeTable;

mod search;
pub use self::search::FUTURE_SAMPLES;

use crate::models::common::{Distance, Location, Timestamp};
use crate::models::problem::{Blockage, Depot, DepotKind, GridSize};
use tinyvec::ArrayVec;

/// A node index in the graph.
pub type NodeIndex = usize;

/// A graph vertex.
#[derive(Clone, Debug)]
pub struct Node {
    /// Node location.
    pub location: Location,
    /// Up to four grid adjacent nodes.
    pub neighbors: ArrayVec<[NodeIndex; 4]>,
    /// Depot tag.
    pub depot: Option<DepotKind>,
}

/// A grid graph with dynamic blockage state.
pub struct RouteGraph {
    grid: GridSize,
    nodes: Vec<Node>,
    blockages: Vec<Blockage>,
    coverage: Vec<Vec<usize>>,
    minutes_per_unit: f64,
}

impl RouteGraph {
    /// Creates a new instance of `RouteGraph`. Average speed is in grid units per hour.
    pub fn new(grid: GridSize, blockages: Vec<Blockage>, average_speed: f64) -> Self {
        let row = grid.width as usize + 1;
        let nodes = (0..grid.node_count())
            .map(|index| {
                let location = Location::new((index % row) as i32, (index / row) as i32);
                let mut neighbors = ArrayVec::new();
                [(1, 0), (-1, 0), (0, 1), (0, -1)]
                    .iter()
                    .map(|(dx, dy)| Location::new(location.x + dx, location.y + dy))
                    .filter(|neighbor| grid.contains(neighbor))
                    .for_each(|neighbor| neighbors.push(neighbor.y as usize * row + neighbor.x as usize));

                Node { location, neighbors, depot: None }
            })
            .collect::<Vec<_>>();

        let mut coverage = vec![Vec::new(); nodes.len()];
        blockages.iter().enumerate().for_each(|(blockage_idx, blockage)| {
            blockage
                .covered_locations()
                .into_iter()
                .filter(|location| grid.contains(location))
                .for_each(|location| coverage[location.y as usize * row + location.x as usize].push(blockage_idx));
        });

        Self { grid, nodes, blockages, coverage, minutes_per_unit: 60. / average_speed.max(f64::EPSILON) }
    }

    /// Tags depot nodes.
    pub fn with_depots(mut self, depots: &[Depot]) -> Self {
        depots.iter().for_each(|depot| {
            if let Some(index) = self.index_of(&depot.location) {
                self.nodes[index].depot = Some(depot.kind);
            }
        });

        self
    }

    /// Returns grid bounds.
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    /// Returns amount of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns node index of the location if it is inside the grid.
    pub fn index_of(&self, location: &Location) -> Option<NodeIndex> {
        self.grid
            .contains(location)
            .then(|| location.y as usize * (self.grid.width as usize + 1) + location.x as usize)
    }

    /// Returns node by its index.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// Returns grid adjacent locations, fixed at construction.
    pub fn neighbors(&self, location: &Location) -> Vec<Location> {
        self.index_of(location)
            .map(|index| self.nodes[index].neighbors.iter().map(|&neighbor| self.nodes[neighbor].location).collect())
            .unwrap_or_default()
    }

    /// Returns depot type of the node at given location.
    pub fn depot_at(&self, location: &Location) -> Option<DepotKind> {
        self.index_of(location).and_then(|index| self.nodes[index].depot)
    }

    /// Returns all known blockages.
    pub fn blockages(&self) -> &[Blockage] {
        self.blockages.as_slice()
    }

    /// Returns blockages active at given time.
    pub fn active_blockages(&self, time: Timestamp) -> impl Iterator<Item = (usize, &Blockage)> + '_ {
        self.blockages.iter().enumerate().filter(move |(_, blockage)| blockage.is_active(time))
    }

    /// Returns true if any active blockage covers the location.
    pub fn is_blocked(&self, location: &Location, time: Timestamp) -> bool {
        self.index_of(location).is_some_and(|index| self.is_node_blocked(index, time))
    }

    /// Returns true if the edge between two locations intersects any active blockage.
    pub fn is_blocked_edge(&self, from: &Location, to: &Location, time: Timestamp) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self.is_edge_blocked(from, to, time),
            _ => false,
        }
    }

    /// Returns true if any blockage is active at some instant within `[start, end]`.
    pub fn has_blockage_within(&self, start: Timestamp, end: Timestamp) -> bool {
        self.blockages.iter().any(|blockage| blockage.window.intersects(start, end))
    }

    /// Returns true if the edge is blocked at any of sampled instants within `[start, end]`.
    pub fn is_blocked_edge_within(&self, from: &Location, to: &Location, start: Timestamp, end: Timestamp) -> bool {
        match (self.index_of(from), self.index_of(to)) {
            (Some(from), Some(to)) => self.is_edge_blocked_within(from, to, start, end),
            _ => false,
        }
    }

    /// Returns true if the path crosses a blockage at any sampled instant of `[start, start + window]`.
    pub fn crosses_future_blockage(&self, path: &[Location], start: Timestamp, window: Timestamp) -> bool {
        if path.len() < 2 || !self.has_blockage_within(start, start + window) {
            return false;
        }

        path.windows(2).enumerate().any(|(step, pair)| {
            let at = start + self.travel_minutes(step as Distance);
            at <= start + window && self.is_blocked_edge_within(&pair[0], &pair[1], at, start + window)
        })
    }

    /// Returns travel time in minutes for given distance.
    pub fn travel_minutes(&self, distance: Distance) -> Timestamp {
        distance as f64 * self.minutes_per_unit
    }

    pub(crate) fn is_node_blocked(&self, index: NodeIndex, time: Timestamp) -> bool {
        self.coverage[index].iter().any(|&blockage_idx| self.blockages[blockage_idx].is_active(time))
    }

    pub(crate) fn is_edge_blocked(&self, from: NodeIndex, to: NodeIndex, time: Timestamp) -> bool {
        let (from_location, to_location) = (self.nodes[from].location, self.nodes[to].location);

        self.coverage[from].iter().chain(self.coverage[to].iter()).any(|&blockage_idx| {
            let blockage = &self.blockages[blockage_idx];
            blockage.is_active(time) && blockage.covers_edge(&from_location, &to_location)
        })
    }

    pub(crate) fn is_edge_blocked_within(
        &self,
        from: NodeIndex,
        to: NodeIndex,
        start: Timestamp,
        end: Timestamp,
    ) -> bool {
        let span = (end - start).max(0.);

        (0..FUTURE_SAMPLES).any(|sample| {
            let time = start + span * sample as f64 / (FUTURE_SAMPLES - 1) as f64;
            self.is_edge_blocked(from, to, time)
        })
    }
}

/// Returns an L shaped grid corridor between two locations: horizontal part first, then vertical.
/// Blockages are not taken into account.
pub fn corridor(from: Location, to: Location) -> Vec<Location> {
    let step_x = (to.x - from.x).signum();
    let step_y = (to.y - from.y).signum();

    let horizontal = (0..=(to.x - from.x).abs()).map(move |i| Location::new(from.x + i * step_x, from.y));
    let vertical = (1..=(to.y - from.y).abs()).map(move |i| Location::new(to.x, from.y + i * step_y));

    horizontal.chain(vertical).collect()
}
