//! The solver module contains the search loop which drives the ant colony against a simulated clock
//! and the `Solver` abstraction used by collaborators.
//!
//! # Examples
//!
//! ```
//! use lpg_core::prelude::*;
//! # use std::sync::Arc;
//!
//! let problem = Problem {
//!     grid: GridSize::new(20, 20),
//!     depots: vec![Depot::central("central", Location::new(0, 0))],
//!     vehicles: vec![Vehicle {
//!         id: "TA01".to_string(),
//!         capacity: 25.,
//!         fuel_capacity: 25.,
//!         fuel: 25.,
//!         tare_weight: 2.5,
//!         gross_weight: 15.,
//!         position: Location::new(0, 0),
//!         state: VehicleState::Available,
//!     }],
//!     orders: vec![Arc::new(Order {
//!         id: "c-1".to_string(),
//!         destination: Location::new(5, 5),
//!         volume: 5.,
//!         registered_at: 0.,
//!         deadline: 480.,
//!     })],
//!     blockages: vec![],
//!     breakdowns: vec![],
//!     maintenances: vec![],
//!     start_time: 0.,
//! };
//!
//! let mut config = AcoConfig::default();
//! config.search.max_iterations = 5;
//!
//! let assignments = run(&problem, config)?;
//!
//! assert_eq!(assignments.len(), 1);
//! # Ok::<(), GenericError>(())
//! ```

mod adaptation;
pub use self::adaptation::*;

mod events;
pub use self::events::*;

mod orchestrator;
pub use self::orchestrator::Orchestrator;

mod telemetry;
pub use self::telemetry::*;

mod termination;
pub use self::termination::*;

use crate::aco::AcoConfig;
use crate::models::common::Timestamp;
use crate::models::problem::{Order, OrderState, Problem};
use crate::models::solution::{Solution, VehicleAssignment};
use crate::utils::{Environment, GenericResult};
use crate::validation::{ValidationWarning, validate_problem};
use std::fmt;
use std::sync::Arc;

/// A state of the search loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Search is in progress.
    Running,
    /// No improvement for too long outside of the early convergence window.
    Converged,
    /// Too many orders stay unassigned for too long.
    CollapsedAborted,
    /// Iteration cap is reached.
    MaxIterationsReached,
    /// Stopped by an external signal.
    Interrupted,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::Converged => "converged",
            Self::CollapsedAborted => "collapsed",
            Self::MaxIterationsReached => "max iterations reached",
            Self::Interrupted => "interrupted",
        };

        write!(f, "{name}")
    }
}

/// An outcome of the run.
pub struct RunResult {
    /// Best solution found. Orders excluded by validation are listed as unassigned.
    pub solution: Solution,
    /// Terminal state.
    pub state: RunState,
    /// Amount of completed iterations.
    pub iterations: usize,
    /// Simulated time at the end of the run.
    pub final_time: Timestamp,
    /// Final state of every order.
    pub order_states: Vec<(Arc<Order>, OrderState)>,
    /// Input inconsistencies.
    pub warnings: Vec<ValidationWarning>,
    /// Seed used by the run.
    pub seed: u64,
    /// Collected metrics if telemetry mode tracks them.
    pub metrics: Option<Metrics>,
}

/// Solves a dispatch problem.
pub trait Solver {
    /// Runs the search and returns its outcome.
    fn solve(&self, problem: &Problem) -> GenericResult<RunResult>;
}

/// An ant colony optimization solver.
pub struct AcoSolver {
    config: AcoConfig,
    environment: Arc<Environment>,
    telemetry_mode: TelemetryMode,
}

impl AcoSolver {
    /// Creates a new instance of `AcoSolver`.
    pub fn new(config: AcoConfig, environment: Arc<Environment>, telemetry_mode: TelemetryMode) -> Self {
        Self { config, environment, telemetry_mode }
    }
}

impl Solver for AcoSolver {
    fn solve(&self, problem: &Problem) -> GenericResult<RunResult> {
        self.config.validate()?;

        let validated = validate_problem(problem, self.config.timing.min_delivery_lead_minutes);
        validated.warnings.iter().for_each(|warning| (self.environment.logger)(format!("warning: {warning}").as_str()));
        (self.environment.logger)(format!("run seed: {}", self.environment.seed).as_str());

        let orchestrator = Orchestrator::new(
            &validated,
            &self.config,
            self.environment.clone(),
            Telemetry::new(self.telemetry_mode.clone()),
        )?;

        Ok(orchestrator.run())
    }
}

/// Runs the ant colony search with default environment and returns the best plan.
pub fn run(problem: &Problem, config: AcoConfig) -> GenericResult<Vec<VehicleAssignment>> {
    let environment = Arc::new(Environment::new(None, None, Default::default(), Arc::new(|_| {})));

    AcoSolver::new(config, environment, TelemetryMode::None).solve(problem).map(|result| result.solution.assignments)
}
