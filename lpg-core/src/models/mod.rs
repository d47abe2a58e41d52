//! A collection of models to represent the dispatch problem and its solution.

pub mod common;
pub mod problem;
pub mod solution;
