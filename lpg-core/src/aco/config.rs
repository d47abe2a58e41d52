//! Algorithm configuration: named, typed and defaulted parameters.

#![allow(missing_docs)]

#[cfg(test)]
#[path = "../../tests/unit/aco/config_test.rs"]
mod config_test;

use crate::utils::GenericResult;
use std::fmt;
use std::str::FromStr;

/// Specifies which candidates reinforce the pheromone field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PheromoneUpdate {
    /// Every candidate of the iteration deposits proportionally to its quality.
    #[default]
    AllCandidates,
    /// Only the best candidate of the iteration deposits.
    IterationBest,
}

impl FromStr for PheromoneUpdate {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all-candidates" => Ok(Self::AllCandidates),
            "iteration-best" => Ok(Self::IterationBest),
            _ => Err(format!("unknown pheromone update strategy: '{value}'")),
        }
    }
}

impl fmt::Display for PheromoneUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllCandidates => write!(f, "all-candidates"),
            Self::IterationBest => write!(f, "iteration-best"),
        }
    }
}

/// Colony size and worker pool settings.
#[derive(Clone, Debug)]
pub struct ColonyConfig {
    /// Base number of route builders per iteration.
    pub ant_count: usize,
    /// Worker pool bound, all cpus if not set.
    pub max_threads: Option<usize>,
}

/// Search loop settings.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Iteration cap.
    pub max_iterations: usize,
    /// Iterations without improvement before perturbation or stop.
    pub stagnation_limit: usize,
    /// Fraction of the cap inside which stagnation perturbs instead of stopping.
    pub early_convergence_fraction: f64,
    /// Pheromone exponent.
    pub alpha: f64,
    /// Heuristic exponent.
    pub beta: f64,
    /// Initial exploitation probability.
    pub q0: f64,
}

/// Pheromone field settings.
#[derive(Clone, Debug)]
pub struct PheromoneConfig {
    pub initial: f64,
    pub evaporation_rate: f64,
    pub deposit_factor: f64,
    pub floor: f64,
    pub perturbation_amplitude: f64,
    pub perturbation_share: f64,
    pub perturbation_boost: f64,
    pub update: PheromoneUpdate,
}

/// Heuristic field settings.
#[derive(Clone, Debug)]
pub struct HeuristicConfig {
    pub blocked_multiplier: f64,
    pub urgency_threshold: f64,
    pub urgency_boost: f64,
    pub tank_min_spare_ratio: f64,
    pub tank_boost: f64,
    pub tank_radius: i32,
    pub chain_distance: i32,
    pub chain_boost: f64,
    pub floor: f64,
}

/// Route construction settings.
#[derive(Clone, Debug)]
pub struct RoutingConfig {
    /// Grid units per hour.
    pub average_speed: f64,
    pub unloading_minutes: f64,
    pub refuel_minutes: f64,
    /// Fuel used = distance * weight / efficiency.
    pub fuel_efficiency: f64,
    pub fuel_safety_margin: f64,
    pub planning_window_minutes: f64,
    pub future_penalty: f64,
    pub lookahead_weight: f64,
    pub low_fuel_bonus: f64,
}

/// Order clustering settings.
#[derive(Clone, Debug)]
pub struct GroupingConfig {
    pub proximity_threshold: i32,
    pub max_group_size: usize,
    pub max_group_volume: f64,
}

/// Simulated clock and adaptation settings.
#[derive(Clone, Debug)]
pub struct TimingConfig {
    pub time_step_minutes: f64,
    pub min_delivery_lead_minutes: f64,
    pub base_replan_minutes: f64,
    pub density_window_minutes: f64,
    pub high_density_per_hour: f64,
    pub min_ants: usize,
    pub max_ants: usize,
    pub q0_swing: f64,
}

/// Evaluation penalty weights.
#[derive(Clone, Debug)]
pub struct PenaltyConfig {
    pub late_minute: f64,
    pub blockage: f64,
    pub maintenance: f64,
    pub unassigned: f64,
}

/// Systemic collapse detection settings.
#[derive(Clone, Debug)]
pub struct CollapseConfig {
    /// Unassigned orders ratio considered as failure.
    pub threshold: f64,
    /// Consecutive failing iterations before abort.
    pub patience: usize,
}

/// An ant colony algorithm configuration.
#[derive(Clone, Debug, Default)]
pub struct AcoConfig {
    pub colony: ColonyConfig,
    pub search: SearchConfig,
    pub pheromone: PheromoneConfig,
    pub heuristic: HeuristicConfig,
    pub routing: RoutingConfig,
    pub grouping: GroupingConfig,
    pub timing: TimingConfig,
    pub penalties: PenaltyConfig,
    pub collapse: CollapseConfig,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self { ant_count: 20, max_threads: None }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            stagnation_limit: 25,
            early_convergence_fraction: 0.5,
            alpha: 1.,
            beta: 2.,
            q0: 0.85,
        }
    }
}

impl Default for PheromoneConfig {
    fn default() -> Self {
        Self {
            initial: 0.1,
            evaporation_rate: 0.1,
            deposit_factor: 10.,
            floor: 1e-4,
            perturbation_amplitude: 0.2,
            perturbation_share: 0.1,
            perturbation_boost: 3.,
            update: PheromoneUpdate::default(),
        }
    }
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            blocked_multiplier: 1e-3,
            urgency_threshold: 0.3,
            urgency_boost: 2.,
            tank_min_spare_ratio: 0.2,
            tank_boost: 1.5,
            tank_radius: 4,
            chain_distance: 8,
            chain_boost: 1.,
            floor: 1e-6,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            average_speed: 50.,
            unloading_minutes: 15.,
            refuel_minutes: 10.,
            fuel_efficiency: 180.,
            fuel_safety_margin: 0.8,
            planning_window_minutes: 240.,
            future_penalty: 0.1,
            lookahead_weight: 0.3,
            low_fuel_bonus: 0.3,
        }
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self { proximity_threshold: 10, max_group_size: 5, max_group_volume: 25. }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            time_step_minutes: 5.,
            min_delivery_lead_minutes: 240.,
            base_replan_minutes: 60.,
            density_window_minutes: 120.,
            high_density_per_hour: 10.,
            min_ants: 5,
            max_ants: 40,
            q0_swing: 0.1,
        }
    }
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self { late_minute: 100., blockage: 50_000., maintenance: 200_000., unassigned: 1_000_000. }
    }
}

impl Default for CollapseConfig {
    fn default() -> Self {
        Self { threshold: 0.6, patience: 5 }
    }
}

impl AcoConfig {
    /// Checks configuration consistency.
    pub fn validate(&self) -> GenericResult<()> {
        let checks: [(bool, &str); 24] = [
            (self.colony.ant_count > 0, "ant count must be positive"),
            (self.colony.max_threads.is_none_or(|threads| threads > 0), "max threads must be positive"),
            (self.search.max_iterations > 0, "max iterations must be positive"),
            (self.search.stagnation_limit > 0, "stagnation limit must be positive"),
            (in_unit(self.search.early_convergence_fraction), "early convergence fraction must be in [0, 1]"),
            (self.search.alpha >= 0. && self.search.beta >= 0., "alpha and beta must be non-negative"),
            (in_unit(self.search.q0), "q0 must be in [0, 1]"),
            (self.pheromone.floor > 0., "pheromone floor must be positive"),
            (self.pheromone.initial >= self.pheromone.floor, "initial pheromone must not be below the floor"),
            (
                self.pheromone.evaporation_rate > 0. && self.pheromone.evaporation_rate < 1.,
                "evaporation rate must be in (0, 1)",
            ),
            (self.pheromone.deposit_factor >= 0., "deposit factor must be non-negative"),
            (
                in_unit(self.pheromone.perturbation_amplitude) && in_unit(self.pheromone.perturbation_share),
                "perturbation amplitude and share must be in [0, 1]",
            ),
            (self.pheromone.perturbation_boost >= 1., "perturbation boost must be at least 1"),
            (self.heuristic.floor > 0., "heuristic floor must be positive"),
            (self.heuristic.blocked_multiplier > 0., "blocked multiplier must be positive"),
            (self.routing.average_speed > 0., "average speed must be positive"),
            (self.routing.fuel_efficiency > 0., "fuel efficiency must be positive"),
            (
                self.routing.fuel_safety_margin > 0. && self.routing.fuel_safety_margin <= 1.,
                "fuel safety margin must be in (0, 1]",
            ),
            (
                in_unit(self.routing.lookahead_weight) && in_unit(self.routing.future_penalty),
                "lookahead weight and future penalty must be in [0, 1]",
            ),
            (
                self.grouping.max_group_size > 0 && self.grouping.max_group_volume > 0.,
                "group limits must be positive",
            ),
            (self.timing.time_step_minutes > 0., "time step must be positive"),
            (
                self.timing.base_replan_minutes > 0. && self.timing.density_window_minutes > 0.,
                "replanning intervals must be positive",
            ),
            (
                self.timing.min_ants > 0 && self.timing.min_ants <= self.timing.max_ants,
                "ant bounds must be positive and ordered",
            ),
            (in_unit(self.collapse.threshold) && self.collapse.patience > 0, "collapse settings are invalid"),
        ];

        match checks.iter().find(|(is_valid, _)| !is_valid) {
            Some((_, message)) => Err((*message).into()),
            None => Ok(()),
        }
    }
}

fn in_unit(value: f64) -> bool {
    (0. ..=1.).contains(&value)
}
