//! Core crate contains the building blocks of a dispatch planner for a liquefied gas tanker fleet:
//! a time aware grid graph with path finding around road blockages, an ant colony search over
//! delivery plans and an orchestrator which drives the search against a simulated clock.
//!
//! The main entry point is [`solver::run`] or, for more control, [`solver::AcoSolver`] used
//! through the [`solver::Solver`] trait.

#![warn(missing_docs)]

#[cfg(test)]
#[path = "../tests/helpers/mod.rs"]
#[macro_use]
pub mod helpers;

#[cfg(test)]
#[path = "../tests/features/mod.rs"]
mod features;

pub mod aco;
pub mod graph;
pub mod models;
pub mod prelude;
pub mod solver;
pub mod utils;
pub mod validation;
