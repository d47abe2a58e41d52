//! Extensions of the solve command: configuration and interruption.

pub mod config;
pub mod interruption;
