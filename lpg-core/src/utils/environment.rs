#[cfg(test)]
#[path = "../../tests/unit/utils/environment_test.rs"]
mod environment_test;

use crate::utils::{DefaultRandom, Timer, derive_seed};
use rand::RngCore;
use std::sync::Arc;

/// A logger type which is called with various information regarding the work done by the planner.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Specifies a computational quota for the search. Checked by the orchestrator at iteration
/// boundaries only, so an in-flight iteration always completes.
pub trait Quota: Send + Sync {
    /// Returns true when quota is reached.
    fn is_reached(&self) -> bool;
}

/// A time quota.
pub struct TimeQuota {
    start: Timer,
    limit_in_secs: f64,
}

impl TimeQuota {
    /// Creates a new instance of `TimeQuota`.
    pub fn new(limit_in_secs: f64) -> Self {
        Self { start: Timer::start(), limit_in_secs }
    }
}

impl Quota for TimeQuota {
    fn is_reached(&self) -> bool {
        self.start.elapsed_secs_as_f64() > self.limit_in_secs
    }
}

/// Specifies parallelism settings.
#[derive(Clone, Debug)]
pub struct Parallelism {
    available_threads: usize,
}

impl Parallelism {
    /// Creates a new instance of `Parallelism` with given amount of worker threads.
    pub fn new(available_threads: usize) -> Self {
        Self { available_threads: available_threads.max(1) }
    }

    /// Returns amount of worker threads.
    pub fn available_threads(&self) -> usize {
        self.available_threads
    }
}

impl Default for Parallelism {
    fn default() -> Self {
        Self::new(get_cpus())
    }
}

/// Keeps track of environment specific information which influences algorithm behavior:
/// a random seed, an optional interruption quota, parallelism and a logger.
#[derive(Clone)]
pub struct Environment {
    /// A run seed. Every stochastic component derives its own stream from it.
    pub seed: u64,

    /// An optional quota which can stop the run at an iteration boundary.
    pub quota: Option<Arc<dyn Quota>>,

    /// Parallelism settings.
    pub parallelism: Parallelism,

    /// An information logger.
    pub logger: InfoLogger,
}

impl Environment {
    /// Creates a new instance of `Environment`. When seed is not specified, it is drawn once
    /// from the thread rng, so it can be read back from the environment to replay the run.
    pub fn new(
        seed: Option<u64>,
        quota: Option<Arc<dyn Quota>>,
        parallelism: Parallelism,
        logger: InfoLogger,
    ) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().next_u64());

        Self { seed, quota, parallelism, logger }
    }

    /// Creates a new instance of `Environment` with given seed and no logging.
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new(Some(seed), None, Parallelism::default(), Arc::new(|_| {}))
    }

    /// Creates an independent random source for given stream and index.
    pub fn create_random(&self, stream: u64, index: u64) -> DefaultRandom {
        DefaultRandom::new_with_seed(derive_seed(self.seed, stream, index))
    }

    /// Returns true if quota is reached.
    pub fn is_quota_reached(&self) -> bool {
        self.quota.as_ref().is_some_and(|quota| quota.is_reached())
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(None, None, Parallelism::default(), Arc::new(|msg| println!("{msg}")))
    }
}

/// Returns amount of CPUs.
pub fn get_cpus() -> usize {
    num_cpus::get()
}
