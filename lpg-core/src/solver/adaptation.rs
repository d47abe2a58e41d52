#[cfg(test)]
#[path = "../../tests/unit/solver/adaptation_test.rs"]
mod adaptation_test;

use crate::aco::AcoConfig;
use crate::models::common::Timestamp;
use crate::models::problem::Order;
use std::sync::Arc;

/// Parameters which follow order density: a denser order flow means a shorter replanning interval,
/// more ants and a lower exploitation probability.
#[derive(Clone, Debug, PartialEq)]
pub struct AdaptiveParameters {
    /// Replanning interval in minutes.
    pub replan_interval: Timestamp,
    /// Amount of ants.
    pub ants: usize,
    /// Exploitation probability.
    pub q0: f64,
}

/// Keeps adaptive parameters and the last replanning point.
pub struct Adaptation {
    parameters: AdaptiveParameters,
    last_replan: Timestamp,
}

impl Adaptation {
    /// Creates a new instance of `Adaptation` with configured base values.
    pub fn new(config: &AcoConfig, start_time: Timestamp) -> Self {
        let ants = config.colony.ant_count.clamp(config.timing.min_ants, config.timing.max_ants);

        Self {
            parameters: AdaptiveParameters {
                replan_interval: config.timing.base_replan_minutes,
                ants,
                q0: config.search.q0,
            },
            last_replan: start_time,
        }
    }

    /// Returns current parameters.
    pub fn parameters(&self) -> &AdaptiveParameters {
        &self.parameters
    }

    /// Recomputes parameters when the replanning interval has elapsed. Returns true if it did.
    pub fn update(&mut self, time: Timestamp, orders: &[Arc<Order>], config: &AcoConfig) -> bool {
        if time - self.last_replan < self.parameters.replan_interval {
            return false;
        }

        let density = order_density(orders, time, config.timing.density_window_minutes);
        self.parameters = adapt(density, config);
        self.last_replan = time;

        true
    }
}

/// Returns amount of orders registered per hour within the window preceding given time.
pub fn order_density(orders: &[Arc<Order>], time: Timestamp, window: Timestamp) -> f64 {
    if window <= 0. {
        return 0.;
    }

    let count =
        orders.iter().filter(|order| order.registered_at > time - window && order.registered_at <= time).count();

    count as f64 / (window / 60.)
}

/// Maps order density to adaptive parameters.
pub fn adapt(density: f64, config: &AcoConfig) -> AdaptiveParameters {
    let timing = &config.timing;
    let ratio = if timing.high_density_per_hour > 0. { (density / timing.high_density_per_hour).min(1.) } else { 1. };

    let ants = (config.colony.ant_count as f64 * (0.5 + ratio)).round() as usize;

    AdaptiveParameters {
        replan_interval: timing.base_replan_minutes * (1.5 - ratio),
        ants: ants.clamp(timing.min_ants, timing.max_ants),
        q0: (config.search.q0 + timing.q0_swing * (0.5 - ratio) * 2.).clamp(0.05, 0.99),
    }
}
