//! A command line interface library to the liquefied gas dispatch planner. It provides a json
//! format of problem and solution, a json configuration which overrides algorithm defaults and
//! an interruption quota which stops the search on Ctrl-C.
//!
//! # Examples
//!
//! ```
//! use lpg_cli::format::problem::JsonProblem;
//! use std::io::BufReader;
//!
//! let problem = r#"{
//!   "grid": { "width": 20, "height": 20 },
//!   "depots": [{ "id": "central", "location": [0, 0], "type": "central" }],
//!   "vehicles": [],
//!   "orders": []
//! }"#;
//!
//! let problem = BufReader::new(problem.as_bytes()).read_json()?;
//!
//! assert_eq!(problem.depots.len(), 1);
//! # Ok::<(), lpg_core::prelude::GenericError>(())
//! ```

#![warn(missing_docs)]

pub mod extensions;
pub mod format;

use lpg_core::prelude::InfoLogger;
use std::sync::Arc;

/// Creates a logger which writes messages to stderr keeping stdout free for the solution.
pub fn create_stderr_logger() -> InfoLogger {
    Arc::new(|msg: &str| eprintln!("{msg}"))
}

/// Creates a logger which drops all messages.
pub fn create_silent_logger() -> InfoLogger {
    Arc::new(|_: &str| {})
}
