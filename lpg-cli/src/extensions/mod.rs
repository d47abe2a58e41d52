//! Extensions used by the command line interface.

pub mod solve;
