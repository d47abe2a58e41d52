#[cfg(test)]
#[path = "../../tests/unit/graph/search_test.rs"]
mod search_test;

use super::{NodeIndex, RouteGraph};
use crate::models::common::{Distance, Location, Timestamp};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Amount of instants sampled when a blockage is checked over a time interval.
pub const FUTURE_SAMPLES: usize = 5;

impl RouteGraph {
    /// Finds a shortest path between two locations which avoids blockages active at the estimated
    /// arrival time to each edge. Returns an empty path if none exists, single node path if
    /// `origin == destination`.
    pub fn find_path(&self, origin: Location, destination: Location, start: Timestamp) -> Vec<Location> {
        self.search(origin, destination, start, |from, to, at| !self.is_step_blocked(origin, from, to, at))
    }

    /// Finds a shortest path which also avoids edges blocked at any sampled instant within the
    /// lookahead window of the edge traversal.
    pub fn find_path_avoiding_future_blockages(
        &self,
        origin: Location,
        destination: Location,
        start: Timestamp,
        window: Timestamp,
    ) -> Vec<Location> {
        if !self.has_blockage_within(start, start + window) {
            return self.find_path(origin, destination, start);
        }

        self.search(origin, destination, start, |from, to, at| {
            let is_origin = self.index_of(&origin) == Some(from);
            let span = window.max(0.);

            (0..FUTURE_SAMPLES).all(|sample| {
                let time = at + span * sample as f64 / (FUTURE_SAMPLES - 1) as f64;
                if is_origin { !self.is_node_blocked(to, time) } else { !self.is_edge_blocked(from, to, time) }
            })
        })
    }

    /// A vehicle standing on a blocked node is allowed to leave it: only the next node is checked.
    fn is_step_blocked(&self, origin: Location, from: NodeIndex, to: NodeIndex, at: Timestamp) -> bool {
        if self.node(from).location == origin {
            self.is_node_blocked(to, at)
        } else {
            self.is_edge_blocked(from, to, at)
        }
    }

    fn search<F>(&self, origin: Location, destination: Location, start: Timestamp, is_passable: F) -> Vec<Location>
    where
        F: Fn(NodeIndex, NodeIndex, Timestamp) -> bool,
    {
        let (Some(from), Some(to)) = (self.index_of(&origin), self.index_of(&destination)) else {
            return Vec::default();
        };

        if from == to {
            return vec![origin];
        }

        let size = self.node_count();
        let mut costs = vec![Distance::MAX; size];
        let mut parents = vec![usize::MAX; size];
        let mut closed = vec![false; size];
        let mut open = BinaryHeap::new();
        let mut sequence = 0_usize;

        costs[from] = 0;
        open.push(OpenNode { estimate: origin.manhattan(&destination), sequence, index: from });

        while let Some(OpenNode { index, .. }) = open.pop() {
            if index == to {
                return self.reconstruct(&parents, from, to);
            }

            if closed[index] {
                continue;
            }
            closed[index] = true;

            let cost = costs[index];
            let at = start + self.travel_minutes(cost);

            for &next in self.node(index).neighbors.iter() {
                let tentative = cost + 1;
                if closed[next] || tentative >= costs[next] || !is_passable(index, next, at) {
                    continue;
                }

                costs[next] = tentative;
                parents[next] = index;
                sequence += 1;

                let estimate = tentative + self.node(next).location.manhattan(&destination);
                open.push(OpenNode { estimate, sequence, index: next });
            }
        }

        Vec::default()
    }

    fn reconstruct(&self, parents: &[usize], from: NodeIndex, to: NodeIndex) -> Vec<Location> {
        let mut path = vec![self.node(to).location];
        let mut current = to;

        while current != from {
            current = parents[current];
            path.push(self.node(current).location);
        }

        path.reverse();
        path
    }
}

/// An open set entry: lowest estimate first, ties broken by insertion order.
#[derive(Eq, PartialEq)]
struct OpenNode {
    estimate: Distance,
    sequence: usize,
    index: NodeIndex,
}

impl Ord for OpenNode {
    fn cmp(&self, other: &Self) -> Ordering {
        other.estimate.cmp(&self.estimate).then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for OpenNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
