#[cfg(test)]
#[path = "../../tests/unit/aco/pheromone_test.rs"]
mod pheromone_test;

use super::PheromoneConfig;
use crate::graph::EdgeTable;
use crate::models::common::Location;
use crate::models::problem::GridSize;
use crate::models::solution::Solution;
use crate::utils::Random;
use rand::seq::index::sample;
use rustc_hash::FxHashSet;

/// A learned desirability per undirected edge.
#[derive(Clone, Debug)]
pub struct PheromoneField {
    table: EdgeTable,
    floor: f64,
}

impl PheromoneField {
    /// Creates a new instance of `PheromoneField` with every edge set to initial value.
    pub fn new(grid: GridSize, initial: f64, floor: f64) -> Self {
        Self { table: EdgeTable::new(grid, initial.max(floor)), floor }
    }

    /// Creates a field from configuration.
    pub fn from_config(grid: GridSize, config: &PheromoneConfig) -> Self {
        Self::new(grid, config.initial, config.floor)
    }

    /// Returns edge value, zero for non adjacent locations.
    pub fn get(&self, from: &Location, to: &Location) -> f64 {
        self.table.get(from, to).unwrap_or(0.)
    }

    /// Returns a mean value over path edges.
    pub fn path_mean(&self, path: &[Location]) -> Option<f64> {
        self.table.path_mean(path)
    }

    /// Returns the underlying edge table.
    pub fn table(&self) -> &EdgeTable {
        &self.table
    }

    /// Multiplies every entry by `1 - rate`, keeping it above the floor.
    pub fn evaporate(&mut self, rate: f64) {
        let (keep, floor) = ((1. - rate).clamp(0., 1.), self.floor);
        self.table.values_mut().for_each(|value| *value = (*value * keep).max(floor));
    }

    /// Deposits `factor * quality` once per distinct edge used by each solution.
    pub fn reinforce<'a, I>(&mut self, solutions: I, factor: f64)
    where
        I: IntoIterator<Item = &'a Solution>,
    {
        solutions.into_iter().for_each(|solution| {
            let amount = factor * solution.quality;
            if amount <= 0. {
                return;
            }

            let edges = solution
                .legs()
                .flat_map(|leg| leg.path.windows(2))
                .map(|pair| ordered(pair[0], pair[1]))
                .collect::<FxHashSet<_>>();

            edges.iter().for_each(|(from, to)| {
                self.table.update(from, to, |value| value + amount);
            });
        });
    }

    /// Shakes learned values: scales every entry by a random factor in `[1 - amplitude, 1 + amplitude]`
    /// clamped to half of the floor, then boosts a random share of edges.
    pub fn perturb(&mut self, amplitude: f64, share: f64, boost: f64, random: &dyn Random) {
        let min_value = self.floor / 2.;
        self.table.values_mut().for_each(|value| {
            let factor = random.uniform_real(1. - amplitude, 1. + amplitude);
            *value = (*value * factor).max(min_value);
        });

        let total = self.table.len();
        let amount = ((total as f64 * share).round() as usize).min(total);
        if amount == 0 {
            return;
        }

        let mut rng = random.get_rng();
        sample(&mut rng, total, amount).into_iter().for_each(|index| {
            if let Some(value) = self.table.value_at_mut(index) {
                *value *= boost;
            }
        });
    }

    /// Returns the smallest entry.
    pub fn min_value(&self) -> f64 {
        self.table.values().fold(f64::INFINITY, f64::min)
    }
}

fn ordered(a: Location, b: Location) -> (Location, Location) {
    if (a.x, a.y) <= (b.x, b.y) { (a, b) } else { (b, a) }
}
