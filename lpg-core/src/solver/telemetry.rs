//! A module which provides the logic to collect metrics about algorithm execution and simple logging.

#[cfg(test)]
#[path = "../../tests/unit/solver/telemetry_test.rs"]
mod telemetry_test;

use super::RunState;
use crate::models::solution::Solution;
use crate::utils::{InfoLogger, Timer};
use std::ops::Deref;

/// Encapsulates different measurements regarding algorithm evaluation.
#[derive(Clone, Debug, Default)]
pub struct Metrics {
    /// Algorithm duration in seconds.
    pub duration: usize,
    /// Total amount of iterations.
    pub iterations: usize,
    /// Speed: iterations per second.
    pub speed: f64,
    /// Search progress.
    pub evolution: Vec<IterationRecord>,
}

/// Represents information about a single iteration.
#[derive(Clone, Debug)]
pub struct IterationRecord {
    /// Iteration sequence number.
    pub number: usize,
    /// Time since the search started in seconds.
    pub timestamp: f64,
    /// Quality of the best known solution.
    pub best_quality: f64,
    /// True if the iteration improved the best known solution.
    pub is_improvement: bool,
    /// Assigned orders in the best known solution.
    pub assigned: usize,
    /// Unassigned orders in the best known solution.
    pub unassigned: usize,
    /// Total distance of the best known solution.
    pub distance: i64,
    /// Total fuel of the best known solution.
    pub fuel: f64,
    /// Amount of ants used in the iteration.
    pub ants: usize,
    /// Exploitation probability used in the iteration.
    pub q0: f64,
}

/// Specifies a telemetry mode.
#[derive(Clone)]
pub enum TelemetryMode {
    /// No telemetry at all.
    None,
    /// Only logging.
    OnlyLogging {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often best solution is logged.
        log_best: usize,
    },
    /// Only metrics collection.
    OnlyMetrics,
    /// Both logging and metrics collection.
    All {
        /// A logger type.
        logger: InfoLogger,
        /// Specifies how often best solution is logged.
        log_best: usize,
    },
}

/// Iteration parameters reported to telemetry.
pub struct IterationInfo<'a> {
    /// Iteration number, starting from zero.
    pub number: usize,
    /// Best known solution.
    pub best: &'a Solution,
    /// True if the iteration improved the best known solution.
    pub is_improvement: bool,
    /// Amount of ants.
    pub ants: usize,
    /// Exploitation probability.
    pub q0: f64,
    /// Iteration timer.
    pub timer: Timer,
}

/// Provides way to collect metrics and write information into log. Observational only.
pub struct Telemetry {
    metrics: Metrics,
    time: Timer,
    mode: TelemetryMode,
}

impl Telemetry {
    /// Creates a new instance of `Telemetry`.
    pub fn new(mode: TelemetryMode) -> Self {
        Self { time: Timer::start(), metrics: Metrics::default(), mode }
    }

    /// Starts telemetry reporting.
    pub fn start(&mut self) {
        self.time = Timer::start();
    }

    /// Reports iteration statistics.
    pub fn on_iteration(&mut self, info: IterationInfo) {
        self.metrics.iterations = info.number + 1;

        let (log_best, track) = match &self.mode {
            TelemetryMode::None => return,
            TelemetryMode::OnlyLogging { log_best, .. } => (Some(*log_best), false),
            TelemetryMode::OnlyMetrics => (None, true),
            TelemetryMode::All { log_best, .. } => (Some(*log_best), true),
        };

        let record = IterationRecord {
            number: info.number,
            timestamp: self.time.elapsed_secs_as_f64(),
            best_quality: info.best.quality,
            is_improvement: info.is_improvement,
            assigned: info.best.assigned_count(),
            unassigned: info.best.unassigned.len(),
            distance: info.best.total_distance(),
            fuel: info.best.total_fuel(),
            ants: info.ants,
            q0: info.q0,
        };

        if log_best.is_some_and(|log_best| info.number % log_best.max(1) == 0) {
            self.log_record(&record, info.timer);
        }

        if track {
            self.metrics.evolution.push(record);
        }
    }

    /// Reports final statistic.
    pub fn on_result(&mut self, state: RunState) {
        if matches!(self.mode, TelemetryMode::None) {
            return;
        }

        let elapsed = self.time.elapsed_secs() as usize;
        let speed = self.metrics.iterations as f64 / self.time.elapsed_secs_as_f64().max(f64::EPSILON);

        self.log(
            format!("[{elapsed}s] {state} after {} iterations, speed: {speed:.2} iter/sec", self.metrics.iterations)
                .as_str(),
        );

        self.metrics.duration = elapsed;
        self.metrics.speed = speed;
    }

    /// Gets metrics.
    pub fn get_metrics(self) -> Option<Metrics> {
        match &self.mode {
            TelemetryMode::OnlyMetrics | TelemetryMode::All { .. } => Some(self.metrics),
            _ => None,
        }
    }

    /// Writes log message.
    pub fn log(&self, message: &str) {
        match &self.mode {
            TelemetryMode::OnlyLogging { logger, .. } => logger.deref()(message),
            TelemetryMode::All { logger, .. } => logger.deref()(message),
            _ => {}
        }
    }

    fn log_record(&self, record: &IterationRecord, iteration_time: Timer) {
        self.log(
            format!(
                "[{}s] iteration {} took {}ms, quality: {:.3e}{}, assigned: {}, unassigned: {}, distance: {}, \
                 fuel: {:.2}, ants: {}, q0: {:.2}",
                self.time.elapsed_secs(),
                record.number,
                iteration_time.elapsed_millis(),
                record.best_quality,
                if record.is_improvement { " (improved)" } else { "" },
                record.assigned,
                record.unassigned,
                record.distance,
                record.fuel,
                record.ants,
                record.q0,
            )
            .as_str(),
        );
    }
}
