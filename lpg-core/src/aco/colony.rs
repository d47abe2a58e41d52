#[cfg(test)]
#[path = "../../tests/unit/aco/colony_test.rs"]
mod colony_test;

use super::{BuildContext, RouteBuilder, SolutionEvaluator};
use crate::models::solution::Solution;
use crate::utils::{DefaultRandom, ThreadPool, derive_seed, parallel_into_collect};

/// Runs independent route builders in parallel on a bounded worker pool.
pub struct Colony {
    pool: ThreadPool,
}

impl Colony {
    /// Creates a new instance of `Colony` with given amount of worker threads.
    pub fn new(threads: usize) -> Self {
        Self { pool: ThreadPool::new(threads) }
    }

    /// Runs given operation on the colony worker pool.
    pub fn execute<OP, R>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.execute(op)
    }

    /// Builds and evaluates one solution per ant. Each ant uses its own random source derived from
    /// the run seed, iteration and ant index, so results do not depend on thread scheduling.
    pub fn run(
        &self,
        context: &BuildContext,
        evaluator: &SolutionEvaluator,
        ants: usize,
        seed: u64,
        iteration: usize,
    ) -> Vec<Solution> {
        let ant_indices = (0..ants).collect::<Vec<_>>();

        self.pool.execute(|| {
            parallel_into_collect(ant_indices, |ant_idx| {
                let random = DefaultRandom::new_with_seed(derive_seed(seed, iteration as u64, ant_idx as u64));
                let mut solution = RouteBuilder::new(context, &random).build();
                solution.quality = evaluator.evaluate(&solution, context.time);

                solution
            })
        })
    }
}
