#[cfg(test)]
#[path = "../../tests/unit/solver/orchestrator_test.rs"]
mod orchestrator_test;

use super::*;
use crate::aco::*;
use crate::graph::RouteGraph;
use crate::models::common::Timestamp;
use crate::models::problem::{Depot, DepotKind, OrderState, TankReservation, Vehicle};
use crate::models::solution::{LegKind, Solution, UnassignedOrder, UnassignedReason};
use crate::utils::{Environment, GenericResult, Timer};
use crate::validation::ValidatedProblem;
use std::sync::Arc;

/// A random stream used for pheromone perturbation.
const PERTURBATION_STREAM: u64 = u64::MAX;

/// Drives the ant colony loop against the simulated clock and owns the mutable operational state:
/// vehicle states, tank levels with committed reservations and both desirability fields.
pub struct Orchestrator<'a> {
    validated: &'a ValidatedProblem,
    config: &'a AcoConfig,
    environment: Arc<Environment>,
    telemetry: Telemetry,
    graph: RouteGraph,
    pheromone: PheromoneField,
    heuristic: HeuristicField,
    colony: Colony,
    vehicles: Vec<Vehicle>,
    depots: Vec<Depot>,
    clock: Timestamp,
    iteration: usize,
    adaptation: Adaptation,
    events: EventTracker,
    stagnation: StagnationControl,
    collapse: CollapseDetector,
    best: Option<(Solution, Timestamp)>,
    registered: usize,
}

impl<'a> Orchestrator<'a> {
    /// Creates a new instance of `Orchestrator`. Fails if there is no central depot.
    pub fn new(
        validated: &'a ValidatedProblem,
        config: &'a AcoConfig,
        environment: Arc<Environment>,
        telemetry: Telemetry,
    ) -> GenericResult<Self> {
        let problem = &validated.problem;

        if !problem.depots.iter().any(|depot| depot.kind == DepotKind::Central) {
            return Err("problem has no valid central depot".into());
        }

        let graph = RouteGraph::new(problem.grid, problem.blockages.clone(), config.routing.average_speed)
            .with_depots(problem.depots.as_slice());
        let threads = config
            .colony
            .max_threads
            .map_or(environment.parallelism.available_threads(), |threads| {
                threads.min(environment.parallelism.available_threads())
            });

        Ok(Self {
            validated,
            config,
            telemetry,
            pheromone: PheromoneField::from_config(problem.grid, &config.pheromone),
            heuristic: HeuristicField::new(problem.grid, config.heuristic.floor),
            colony: Colony::new(threads),
            vehicles: problem.vehicles.clone(),
            depots: problem.depots.clone(),
            clock: problem.start_time,
            iteration: 0,
            adaptation: Adaptation::new(config, problem.start_time),
            events: EventTracker::new(problem.start_time),
            stagnation: StagnationControl::new(&config.search),
            collapse: CollapseDetector::new(&config.collapse),
            best: None,
            registered: 0,
            environment,
            graph,
        })
    }

    /// Runs iterations until a terminal state is reached.
    pub fn run(mut self) -> RunResult {
        self.telemetry.start();

        let state = loop {
            let state = self.step();
            if state != RunState::Running {
                break state;
            }

            if self.environment.is_quota_reached() {
                break RunState::Interrupted;
            }
        };

        self.log(format!("search stopped: {state} at iteration {}", self.iteration).as_str());
        self.telemetry.on_result(state);

        self.into_result(state)
    }

    /// Runs one iteration and returns the state after it.
    pub fn step(&mut self) -> RunState {
        let timer = Timer::start();
        let config = self.config;
        let problem = &self.validated.problem;

        self.clock += config.timing.time_step_minutes;
        if self.adaptation.update(self.clock, problem.orders.as_slice(), config) {
            let parameters = self.adaptation.parameters();
            self.log(
                format!(
                    "replanning at {:.0}: interval {:.0} min, ants {}, q0 {:.2}",
                    self.clock, parameters.replan_interval, parameters.ants, parameters.q0
                )
                .as_str(),
            );
        }

        let events = self.events.apply(
            self.clock,
            &self.graph,
            self.vehicles.as_mut_slice(),
            self.depots.as_mut_slice(),
            problem.breakdowns.as_slice(),
            problem.maintenances.as_slice(),
        );
        events.iter().for_each(|event| self.log(event.to_string().as_str()));

        let clock = self.clock;
        self.depots.iter_mut().for_each(|depot| {
            depot.consume_due(clock);
        });

        let orders = problem.orders.iter().filter(|order| order.registered_at <= clock).cloned().collect::<Vec<_>>();
        if orders.len() != self.registered {
            if self.best.take().is_some() {
                self.log(format!("{} new order(s) registered at {clock:.0}", orders.len() - self.registered).as_str());
            }
            self.registered = orders.len();
        }

        let (graph, depots, heuristic) = (&self.graph, &self.depots, &mut self.heuristic);
        self.colony.execute(|| heuristic.refresh(graph, orders.as_slice(), depots, clock, &config.heuristic));

        let parameters = self.adaptation.parameters().clone();
        let evaluator =
            SolutionEvaluator::new(&self.graph, problem.maintenances.as_slice(), &config.routing, &config.penalties);
        let context = BuildContext {
            graph: &self.graph,
            pheromone: &self.pheromone,
            heuristic: &self.heuristic,
            orders: orders.as_slice(),
            vehicles: self.vehicles.as_slice(),
            depots: self.depots.as_slice(),
            time: clock,
            q0: parameters.q0,
            config,
        };

        let candidates = self.colony.run(&context, &evaluator, parameters.ants, self.environment.seed, self.iteration);

        let iteration_best = candidates.iter().fold(None, |best: Option<&Solution>, candidate| match best {
            Some(best) if best.quality >= candidate.quality => Some(best),
            _ => Some(candidate),
        });

        let is_improved = match (&self.best, iteration_best) {
            (None, Some(_)) => true,
            (Some((best, _)), Some(candidate)) => candidate.quality > best.quality,
            _ => false,
        };

        if let Some(candidate) = iteration_best.filter(|_| is_improved) {
            self.best = Some((candidate.clone(), clock));
            self.reconcile_reservations();
        }

        self.pheromone.evaporate(config.pheromone.evaporation_rate);
        match config.pheromone.update {
            PheromoneUpdate::AllCandidates => {
                self.pheromone.reinforce(candidates.iter(), config.pheromone.deposit_factor)
            }
            PheromoneUpdate::IterationBest => self.pheromone.reinforce(iteration_best, config.pheromone.deposit_factor),
        }

        if let Some((best, _)) = &self.best {
            self.telemetry.on_iteration(IterationInfo {
                number: self.iteration,
                best,
                is_improvement: is_improved,
                ants: parameters.ants,
                q0: parameters.q0,
                timer,
            });
        }

        let ratio = CollapseDetector::unassigned_ratio(candidates.as_slice(), orders.len());
        let is_collapsed = self.collapse.on_iteration(ratio);

        let action = self.stagnation.on_iteration(self.iteration, is_improved);
        self.iteration += 1;

        if is_collapsed {
            return RunState::CollapsedAborted;
        }

        match action {
            StagnationAction::Converge => return RunState::Converged,
            StagnationAction::Perturb => {
                let random = self.environment.create_random(PERTURBATION_STREAM, self.iteration as u64);
                let settings = &config.pheromone;
                self.pheromone.perturb(
                    settings.perturbation_amplitude,
                    settings.perturbation_share,
                    settings.perturbation_boost,
                    &random,
                );
                self.log(format!("pheromone perturbed at iteration {}", self.iteration).as_str());
            }
            StagnationAction::Continue => {}
        }

        if self.iteration >= config.search.max_iterations { RunState::MaxIterationsReached } else { RunState::Running }
    }

    /// Returns tanks with reservations of the best known plan.
    pub fn depots(&self) -> &[Depot] {
        self.depots.as_slice()
    }

    /// Returns current vehicle states.
    pub fn vehicles(&self) -> &[Vehicle] {
        self.vehicles.as_slice()
    }

    /// Returns simulated time.
    pub fn clock(&self) -> Timestamp {
        self.clock
    }

    /// Returns the best plan found so far for orders registered by the current clock.
    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref().map(|(solution, _)| solution)
    }

    /// Returns the pheromone field.
    pub fn pheromone(&self) -> &PheromoneField {
        &self.pheromone
    }

    /// Replaces committed tank reservations with the ones implied by upcoming refuel legs of the
    /// best plan.
    fn reconcile_reservations(&mut self) {
        let Some((best, _)) = &self.best else { return };
        let clock = self.clock;

        self.depots.iter_mut().for_each(|depot| depot.reservations.clear());

        let mut rejected = Vec::new();
        best.assignments.iter().for_each(|assignment| {
            assignment.legs.iter().filter(|leg| leg.arrival > clock).for_each(|leg| {
                let LegKind::Refuel { depot_id, volume } = &leg.kind else { return };
                let Some(depot) = self.depots.iter_mut().find(|depot| depot.id == *depot_id) else { return };

                let vehicle_id = assignment.vehicle.id.clone();
                let reservation =
                    TankReservation { vehicle_id: vehicle_id.clone(), volume: *volume, arrival: leg.arrival };
                if !depot.reserve(reservation) {
                    rejected.push(format!("cannot reserve {volume:.2} at '{depot_id}' for '{vehicle_id}'"));
                }
            })
        });

        rejected.iter().for_each(|message| self.log(message.as_str()));
    }

    fn into_result(self, state: RunState) -> RunResult {
        let config = self.config;
        let problem = &self.validated.problem;
        let evaluator =
            SolutionEvaluator::new(&self.graph, problem.maintenances.as_slice(), &config.routing, &config.penalties);

        let (mut solution, planned_at) = self.best.unwrap_or_else(|| (Solution::default(), self.clock));
        let delivery_times = evaluator.delivery_times(&solution, planned_at);

        solution.unassigned.extend(
            self.validated
                .invalid_orders
                .iter()
                .map(|order| UnassignedOrder { order: order.clone(), reason: UnassignedReason::InvalidInput }),
        );

        let order_states = problem
            .orders
            .iter()
            .chain(self.validated.invalid_orders.iter())
            .map(|order| {
                let state = match delivery_times.get(&order.id) {
                    Some(&arrival) if arrival <= self.clock => OrderState::Delivered,
                    Some(_) => OrderState::Assigned,
                    None if self.validated.invalid_orders.iter().any(|invalid| Arc::ptr_eq(invalid, order)) => {
                        OrderState::Unassignable
                    }
                    None => OrderState::Pending,
                };

                (order.clone(), state)
            })
            .collect();

        RunResult {
            solution,
            state,
            iterations: self.iteration,
            final_time: self.clock,
            order_states,
            warnings: self.validated.warnings.clone(),
            seed: self.environment.seed,
            metrics: self.telemetry.get_metrics(),
        }
    }

    fn log(&self, message: &str) {
        (self.environment.logger)(message)
    }
}
