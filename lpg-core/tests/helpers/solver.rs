use crate::aco::*;
use crate::graph::RouteGraph;
use crate::models::problem::Problem;
use crate::models::solution::Solution;
use crate::utils::{DefaultRandom, Environment, Parallelism};
use std::sync::Arc;

pub fn test_config() -> AcoConfig {
    let mut config = AcoConfig::default();
    config.colony.ant_count = 4;
    config.colony.max_threads = Some(2);
    config.search.max_iterations = 10;
    config.timing.min_ants = 2;
    config.timing.max_ants = 8;

    config
}

pub fn test_environment(seed: u64) -> Arc<Environment> {
    Arc::new(Environment::new(Some(seed), None, Parallelism::new(2), Arc::new(|_| {})))
}

pub fn create_graph(problem: &Problem, config: &AcoConfig) -> RouteGraph {
    RouteGraph::new(problem.grid, problem.blockages.clone(), config.routing.average_speed)
        .with_depots(problem.depots.as_slice())
}

/// Builds a single candidate solution for the problem at its start time.
pub fn build_solution(problem: &Problem, config: &AcoConfig, seed: u64) -> Solution {
    let graph = create_graph(problem, config);
    let pheromone = PheromoneField::from_config(problem.grid, &config.pheromone);
    let mut heuristic = HeuristicField::new(problem.grid, config.heuristic.floor);
    let (orders, depots) = (problem.orders.as_slice(), problem.depots.as_slice());
    heuristic.refresh(&graph, orders, depots, problem.start_time, &config.heuristic);

    let context = BuildContext {
        graph: &graph,
        pheromone: &pheromone,
        heuristic: &heuristic,
        orders: problem.orders.as_slice(),
        vehicles: problem.vehicles.as_slice(),
        depots: problem.depots.as_slice(),
        time: problem.start_time,
        q0: config.search.q0,
        config,
    };
    let random = DefaultRandom::new_with_seed(seed);

    let mut solution = RouteBuilder::new(&context, &random).build();
    let evaluator =
        SolutionEvaluator::new(&graph, problem.maintenances.as_slice(), &config.routing, &config.penalties);
    solution.quality = evaluator.evaluate(&solution, problem.start_time);

    solution
}
