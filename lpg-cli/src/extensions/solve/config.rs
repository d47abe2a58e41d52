//! Algorithm configuration: a partial json overlay on top of the planner defaults.

#![allow(missing_docs)]

#[cfg(test)]
#[path = "../../../tests/unit/extensions/solve/config_test.rs"]
mod config_test;

use lpg_core::aco;
use lpg_core::prelude::{AcoConfig, InfoLogger, PheromoneUpdate, TelemetryMode};
use serde::Deserialize;
use std::io::{BufReader, Read};

/// An algorithm configuration. Every setting is optional, missing ones keep their defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    pub colony: Option<ColonyConfig>,
    pub search: Option<SearchConfig>,
    pub pheromone: Option<PheromoneConfig>,
    pub heuristic: Option<HeuristicConfig>,
    pub routing: Option<RoutingConfig>,
    pub grouping: Option<GroupingConfig>,
    pub timing: Option<TimingConfig>,
    pub penalties: Option<PenaltyConfig>,
    pub collapse: Option<CollapseConfig>,
    /// Specifies telemetry configuration.
    pub telemetry: Option<TelemetryConfig>,
    /// Specifies environment configuration.
    pub environment: Option<EnvironmentConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ColonyConfig {
    pub ant_count: Option<usize>,
    /// Max amount of worker threads. Default is amount of cpus.
    pub max_threads: Option<usize>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchConfig {
    pub max_iterations: Option<usize>,
    pub stagnation_limit: Option<usize>,
    pub early_convergence_fraction: Option<f64>,
    pub alpha: Option<f64>,
    pub beta: Option<f64>,
    pub q0: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PheromoneConfig {
    pub initial: Option<f64>,
    pub evaporation_rate: Option<f64>,
    pub deposit_factor: Option<f64>,
    pub floor: Option<f64>,
    pub perturbation_amplitude: Option<f64>,
    pub perturbation_share: Option<f64>,
    pub perturbation_boost: Option<f64>,
    /// Either `all-candidates` or `iteration-best`.
    pub update: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct HeuristicConfig {
    pub blocked_multiplier: Option<f64>,
    pub urgency_threshold: Option<f64>,
    pub urgency_boost: Option<f64>,
    pub tank_min_spare_ratio: Option<f64>,
    pub tank_boost: Option<f64>,
    pub tank_radius: Option<i32>,
    pub chain_distance: Option<i32>,
    pub chain_boost: Option<f64>,
    pub floor: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoutingConfig {
    pub average_speed: Option<f64>,
    pub unloading_minutes: Option<f64>,
    pub refuel_minutes: Option<f64>,
    pub fuel_efficiency: Option<f64>,
    pub fuel_safety_margin: Option<f64>,
    pub planning_window_minutes: Option<f64>,
    pub future_penalty: Option<f64>,
    pub lookahead_weight: Option<f64>,
    pub low_fuel_bonus: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GroupingConfig {
    pub proximity_threshold: Option<i32>,
    pub max_group_size: Option<usize>,
    pub max_group_volume: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TimingConfig {
    pub time_step_minutes: Option<f64>,
    pub min_delivery_lead_minutes: Option<f64>,
    pub base_replan_minutes: Option<f64>,
    pub density_window_minutes: Option<f64>,
    pub high_density_per_hour: Option<f64>,
    pub min_ants: Option<usize>,
    pub max_ants: Option<usize>,
    pub q0_swing: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PenaltyConfig {
    pub late_minute: Option<f64>,
    pub blockage: Option<f64>,
    pub maintenance: Option<f64>,
    pub unassigned: Option<f64>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CollapseConfig {
    pub threshold: Option<f64>,
    pub patience: Option<usize>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TelemetryConfig {
    pub logging: Option<LoggingConfig>,
    pub metrics: Option<MetricsConfig>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoggingConfig {
    pub enabled: bool,
    /// How often best plan is logged. Default is 10.
    pub log_best: Option<usize>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MetricsConfig {
    pub enabled: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvironmentConfig {
    /// A run seed. Random if not specified.
    pub seed: Option<u64>,
}

const DEFAULT_LOG_BEST: usize = 10;

/// Reads config from reader.
pub fn read_config<R: Read>(reader: BufReader<R>) -> Result<Config, String> {
    serde_json::from_reader(reader).map_err(|err| format!("cannot deserialize config: '{err}'"))
}

/// Creates algorithm configuration: applies given settings over defaults and validates the result.
pub fn create_aco_config(config: &Config) -> Result<AcoConfig, String> {
    let mut aco_config = AcoConfig::default();

    if let Some(colony) = &config.colony {
        configure_colony(&mut aco_config.colony, colony);
    }

    if let Some(search) = &config.search {
        configure_search(&mut aco_config.search, search);
    }

    if let Some(pheromone) = &config.pheromone {
        configure_pheromone(&mut aco_config.pheromone, pheromone)?;
    }

    if let Some(heuristic) = &config.heuristic {
        configure_heuristic(&mut aco_config.heuristic, heuristic);
    }

    if let Some(routing) = &config.routing {
        configure_routing(&mut aco_config.routing, routing);
    }

    if let Some(grouping) = &config.grouping {
        set(&mut aco_config.grouping.proximity_threshold, grouping.proximity_threshold);
        set(&mut aco_config.grouping.max_group_size, grouping.max_group_size);
        set(&mut aco_config.grouping.max_group_volume, grouping.max_group_volume);
    }

    if let Some(timing) = &config.timing {
        configure_timing(&mut aco_config.timing, timing);
    }

    if let Some(penalties) = &config.penalties {
        set(&mut aco_config.penalties.late_minute, penalties.late_minute);
        set(&mut aco_config.penalties.blockage, penalties.blockage);
        set(&mut aco_config.penalties.maintenance, penalties.maintenance);
        set(&mut aco_config.penalties.unassigned, penalties.unassigned);
    }

    if let Some(collapse) = &config.collapse {
        set(&mut aco_config.collapse.threshold, collapse.threshold);
        set(&mut aco_config.collapse.patience, collapse.patience);
    }

    aco_config.validate().map_err(|err| format!("invalid configuration: '{err}'"))?;

    Ok(aco_config)
}

/// Creates telemetry mode. Logging is enabled by config or explicitly by `is_logging_enabled`.
pub fn create_telemetry_mode(config: &Config, logger: InfoLogger, is_logging_enabled: bool) -> TelemetryMode {
    let telemetry = config.telemetry.as_ref();
    let logging = telemetry.and_then(|telemetry| telemetry.logging.as_ref());
    let is_metrics_enabled = telemetry.and_then(|telemetry| telemetry.metrics.as_ref()).is_some_and(|m| m.enabled);

    let log_best = logging.and_then(|logging| logging.log_best).unwrap_or(DEFAULT_LOG_BEST);
    let is_logging_enabled = is_logging_enabled || logging.is_some_and(|logging| logging.enabled);

    match (is_logging_enabled, is_metrics_enabled) {
        (true, true) => TelemetryMode::All { logger, log_best },
        (true, false) => TelemetryMode::OnlyLogging { logger, log_best },
        (false, true) => TelemetryMode::OnlyMetrics,
        (false, false) => TelemetryMode::None,
    }
}

/// Returns a seed specified in config.
pub fn get_seed(config: &Config) -> Option<u64> {
    config.environment.as_ref().and_then(|environment| environment.seed)
}

fn set<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

fn configure_colony(target: &mut aco::ColonyConfig, colony: &ColonyConfig) {
    set(&mut target.ant_count, colony.ant_count);

    if colony.max_threads.is_some() {
        target.max_threads = colony.max_threads;
    }
}

fn configure_search(target: &mut aco::SearchConfig, search: &SearchConfig) {
    set(&mut target.max_iterations, search.max_iterations);
    set(&mut target.stagnation_limit, search.stagnation_limit);
    set(&mut target.early_convergence_fraction, search.early_convergence_fraction);
    set(&mut target.alpha, search.alpha);
    set(&mut target.beta, search.beta);
    set(&mut target.q0, search.q0);
}

fn configure_pheromone(target: &mut aco::PheromoneConfig, pheromone: &PheromoneConfig) -> Result<(), String> {
    set(&mut target.initial, pheromone.initial);
    set(&mut target.evaporation_rate, pheromone.evaporation_rate);
    set(&mut target.deposit_factor, pheromone.deposit_factor);
    set(&mut target.floor, pheromone.floor);
    set(&mut target.perturbation_amplitude, pheromone.perturbation_amplitude);
    set(&mut target.perturbation_share, pheromone.perturbation_share);
    set(&mut target.perturbation_boost, pheromone.perturbation_boost);

    let update = pheromone.update.as_deref().map(str::parse::<PheromoneUpdate>).transpose()?;
    set(&mut target.update, update);

    Ok(())
}

fn configure_heuristic(target: &mut aco::HeuristicConfig, heuristic: &HeuristicConfig) {
    set(&mut target.blocked_multiplier, heuristic.blocked_multiplier);
    set(&mut target.urgency_threshold, heuristic.urgency_threshold);
    set(&mut target.urgency_boost, heuristic.urgency_boost);
    set(&mut target.tank_min_spare_ratio, heuristic.tank_min_spare_ratio);
    set(&mut target.tank_boost, heuristic.tank_boost);
    set(&mut target.tank_radius, heuristic.tank_radius);
    set(&mut target.chain_distance, heuristic.chain_distance);
    set(&mut target.chain_boost, heuristic.chain_boost);
    set(&mut target.floor, heuristic.floor);
}

fn configure_routing(target: &mut aco::RoutingConfig, routing: &RoutingConfig) {
    set(&mut target.average_speed, routing.average_speed);
    set(&mut target.unloading_minutes, routing.unloading_minutes);
    set(&mut target.refuel_minutes, routing.refuel_minutes);
    set(&mut target.fuel_efficiency, routing.fuel_efficiency);
    set(&mut target.fuel_safety_margin, routing.fuel_safety_margin);
    set(&mut target.planning_window_minutes, routing.planning_window_minutes);
    set(&mut target.future_penalty, routing.future_penalty);
    set(&mut target.lookahead_weight, routing.lookahead_weight);
    set(&mut target.low_fuel_bonus, routing.low_fuel_bonus);
}

fn configure_timing(target: &mut aco::TimingConfig, timing: &TimingConfig) {
    set(&mut target.time_step_minutes, timing.time_step_minutes);
    set(&mut target.min_delivery_lead_minutes, timing.min_delivery_lead_minutes);
    set(&mut target.base_replan_minutes, timing.base_replan_minutes);
    set(&mut target.density_window_minutes, timing.density_window_minutes);
    set(&mut target.high_density_per_hour, timing.high_density_per_hour);
    set(&mut target.min_ants, timing.min_ants);
    set(&mut target.max_ants, timing.max_ants);
    set(&mut target.q0_swing, timing.q0_swing);
}
