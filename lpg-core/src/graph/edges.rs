#[cfg(test)]
#[path = "../../tests/unit/graph/edges_test.rs"]
mod edges_test;

use crate::models::common::Location;
use crate::models::problem::GridSize;

/// Stores a value per undirected grid edge. Both directions of an edge share the same slot.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeTable {
    grid: GridSize,
    horizontal: Vec<f64>,
    vertical: Vec<f64>,
}

enum EdgeSlot {
    Horizontal(usize),
    Vertical(usize),
}

impl EdgeTable {
    /// Creates a new instance of `EdgeTable` with every edge set to `value`.
    pub fn new(grid: GridSize, value: f64) -> Self {
        let (width, height) = (grid.width.max(0) as usize, grid.height.max(0) as usize);

        Self { grid, horizontal: vec![value; width * (height + 1)], vertical: vec![value; (width + 1) * height] }
    }

    /// Returns edge value or `None` if locations do not form a grid edge.
    pub fn get(&self, from: &Location, to: &Location) -> Option<f64> {
        self.slot(from, to).map(|slot| match slot {
            EdgeSlot::Horizontal(idx) => self.horizontal[idx],
            EdgeSlot::Vertical(idx) => self.vertical[idx],
        })
    }

    /// Sets edge value. Returns false if locations do not form a grid edge.
    pub fn set(&mut self, from: &Location, to: &Location, value: f64) -> bool {
        self.update(from, to, |_| value)
    }

    /// Updates edge value using given function.
    pub fn update<F>(&mut self, from: &Location, to: &Location, func: F) -> bool
    where
        F: FnOnce(f64) -> f64,
    {
        match self.slot(from, to) {
            Some(EdgeSlot::Horizontal(idx)) => self.horizontal[idx] = func(self.horizontal[idx]),
            Some(EdgeSlot::Vertical(idx)) => self.vertical[idx] = func(self.vertical[idx]),
            None => return false,
        }

        true
    }

    /// Returns a mean value over edges of the path or `None` if path has no edges.
    pub fn path_mean(&self, path: &[Location]) -> Option<f64> {
        let (sum, count) = path
            .windows(2)
            .filter_map(|pair| self.get(&pair[0], &pair[1]))
            .fold((0., 0_usize), |(sum, count), value| (sum + value, count + 1));

        (count > 0).then(|| sum / count as f64)
    }

    /// Returns total amount of edges.
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    /// Returns true if table has no edges.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns all edge values.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.horizontal.iter().chain(self.vertical.iter()).cloned()
    }

    /// Returns mutable access to all edge values.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut f64> + '_ {
        self.horizontal.iter_mut().chain(self.vertical.iter_mut())
    }

    /// Returns mutable access to an edge value by its flat index.
    pub fn value_at_mut(&mut self, index: usize) -> Option<&mut f64> {
        let horizontal = self.horizontal.len();
        if index < horizontal { self.horizontal.get_mut(index) } else { self.vertical.get_mut(index - horizontal) }
    }

    /// Returns all edges as pairs of locations with their values.
    pub fn edges(&self) -> impl Iterator<Item = (Location, Location, f64)> + '_ {
        let width = self.grid.width.max(0) as usize;

        let horizontal = self.horizontal.iter().enumerate().map(move |(idx, &value)| {
            let from = Location::new((idx % width) as i32, (idx / width) as i32);
            (from, Location::new(from.x + 1, from.y), value)
        });

        let vertical = self.vertical.iter().enumerate().map(move |(idx, &value)| {
            let from = Location::new((idx % (width + 1)) as i32, (idx / (width + 1)) as i32);
            (from, Location::new(from.x, from.y + 1), value)
        });

        horizontal.chain(vertical)
    }

    fn slot(&self, from: &Location, to: &Location) -> Option<EdgeSlot> {
        if !from.is_adjacent(to) || !self.grid.contains(from) || !self.grid.contains(to) {
            return None;
        }

        let lower = if (from.x, from.y) <= (to.x, to.y) { from } else { to };

        Some(if from.y == to.y {
            EdgeSlot::Horizontal(lower.y as usize * self.grid.width as usize + lower.x as usize)
        } else {
            EdgeSlot::Vertical(lower.y as usize * (self.grid.width as usize + 1) + lower.x as usize)
        })
    }
}
