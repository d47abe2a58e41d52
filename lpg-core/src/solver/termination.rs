//! Stop criteria of the search loop: stagnation control and systemic collapse detection.

#[cfg(test)]
#[path = "../../tests/unit/solver/termination_test.rs"]
mod termination_test;

use crate::aco::{CollapseConfig, SearchConfig};
use crate::models::solution::Solution;

/// A decision taken after an iteration without improvement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StagnationAction {
    /// Keep searching.
    Continue,
    /// Shake the pheromone field and keep searching.
    Perturb,
    /// Stop: the search has converged.
    Converge,
}

/// Tracks iterations without improvement. Stagnation inside the early convergence window leads to
/// perturbation, later it stops the search.
pub struct StagnationControl {
    limit: usize,
    early_window: usize,
    idle: usize,
}

impl StagnationControl {
    /// Creates a new instance of `StagnationControl`.
    pub fn new(config: &SearchConfig) -> Self {
        let early_window = (config.max_iterations as f64 * config.early_convergence_fraction).round() as usize;

        Self { limit: config.stagnation_limit.max(1), early_window, idle: 0 }
    }

    /// Returns amount of iterations without improvement.
    pub fn idle(&self) -> usize {
        self.idle
    }

    /// Registers iteration outcome.
    pub fn on_iteration(&mut self, iteration: usize, is_improved: bool) -> StagnationAction {
        if is_improved {
            self.idle = 0;
            return StagnationAction::Continue;
        }

        self.idle += 1;
        if self.idle < self.limit {
            return StagnationAction::Continue;
        }

        if iteration < self.early_window {
            self.idle = 0;
            StagnationAction::Perturb
        } else {
            StagnationAction::Converge
        }
    }
}

/// Detects a sustained inability to serve a large fraction of orders.
pub struct CollapseDetector {
    threshold: f64,
    patience: usize,
    streak: usize,
}

impl CollapseDetector {
    /// Creates a new instance of `CollapseDetector`.
    pub fn new(config: &CollapseConfig) -> Self {
        Self { threshold: config.threshold, patience: config.patience.max(1), streak: 0 }
    }

    /// Returns mean unassigned ratio over iteration candidates.
    pub fn unassigned_ratio(candidates: &[Solution], total_orders: usize) -> f64 {
        if candidates.is_empty() || total_orders == 0 {
            return 0.;
        }

        candidates.iter().map(|solution| solution.unassigned.len() as f64 / total_orders as f64).sum::<f64>()
            / candidates.len() as f64
    }

    /// Registers iteration unassigned ratio, returns true when the collapse is detected.
    pub fn on_iteration(&mut self, ratio: f64) -> bool {
        self.streak = if ratio > self.threshold { self.streak + 1 } else { 0 };

        self.streak >= self.patience
    }
}
