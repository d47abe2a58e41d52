//! Ant colony search building blocks: learned and derived edge desirability, route builders,
//! the colony which runs them in parallel and the evaluator which scores their solutions.

mod config;
pub use self::config::*;

mod pheromone;
pub use self::pheromone::PheromoneField;

mod heuristic;
pub use self::heuristic::HeuristicField;

pub mod ant;
pub use self::ant::{BuildContext, RouteBuilder};

mod colony;
pub use self::colony::Colony;

mod evaluator;
pub use self::evaluator::SolutionEvaluator;
