#[cfg(test)]
#[path = "../../tests/unit/commands/solve_test.rs"]
mod solve_test;

use super::*;

use clap::{Arg, ArgAction, Command};
use lpg_cli::extensions::solve::config::{Config, create_aco_config, create_telemetry_mode, get_seed, read_config};
use lpg_cli::extensions::solve::interruption::create_interruption_quota;
use lpg_cli::format::problem::JsonProblem;
use lpg_cli::format::solution::JsonSolution;
use lpg_cli::{create_silent_logger, create_stderr_logger};
use lpg_core::prelude::{AcoSolver, Environment, Parallelism, Solver};
use std::io::BufReader;
use std::sync::Arc;

const PROBLEM_ARG_NAME: &str = "PROBLEM";
const CONFIG_ARG_NAME: &str = "config";
const OUT_RESULT_ARG_NAME: &str = "out-result";
const ITERATIONS_ARG_NAME: &str = "max-iterations";
const TIME_ARG_NAME: &str = "max-time";
const RANDOM_SEED_ARG_NAME: &str = "seed";
const LOG_ARG_NAME: &str = "log";

pub fn get_solve_app() -> Command {
    Command::new("solve")
        .about("Plans deliveries of a liquefied gas tanker fleet")
        .arg(Arg::new(PROBLEM_ARG_NAME).help("Sets the problem file to use").required(true).index(1))
        .arg(
            Arg::new(CONFIG_ARG_NAME)
                .help("Specifies path to algorithm configuration file")
                .short('c')
                .long(CONFIG_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(ITERATIONS_ARG_NAME)
                .help("Specifies maximum number of iterations")
                .short('n')
                .long(ITERATIONS_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(TIME_ARG_NAME)
                .help("Specifies max time algorithm run in seconds")
                .short('t')
                .long(TIME_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(RANDOM_SEED_ARG_NAME)
                .help("Specifies random seed to replay the run")
                .short('s')
                .long(RANDOM_SEED_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(OUT_RESULT_ARG_NAME)
                .help("Specifies path to file for result output")
                .short('o')
                .long(OUT_RESULT_ARG_NAME)
                .required(false),
        )
        .arg(
            Arg::new(LOG_ARG_NAME)
                .help("Specifies whether default logging is enabled")
                .long(LOG_ARG_NAME)
                .action(ArgAction::SetTrue),
        )
}

pub fn run_solve<F>(matches: &ArgMatches, out_writer_func: F) -> Result<(), String>
where
    F: Fn(Option<File>) -> BufWriter<Box<dyn Write>>,
{
    let max_iterations = parse_int_value::<usize>(matches, ITERATIONS_ARG_NAME, "max iterations")?;
    let max_time = parse_int_value::<usize>(matches, TIME_ARG_NAME, "max time")?;
    let seed = parse_int_value::<u64>(matches, RANDOM_SEED_ARG_NAME, "random seed")?;
    let is_logging_enabled = matches.get_flag(LOG_ARG_NAME);

    let config = match matches.get_one::<String>(CONFIG_ARG_NAME) {
        Some(path) => read_config(BufReader::new(open_file(path, "config")?))?,
        None => Config::default(),
    };

    let mut aco_config = create_aco_config(&config)?;
    if let Some(max_iterations) = max_iterations {
        aco_config.search.max_iterations = max_iterations;
    }

    let problem_path = matches.get_one::<String>(PROBLEM_ARG_NAME).ok_or("problem file is not specified")?;
    let problem = BufReader::new(open_file(problem_path, "problem")?).read_json().map_err(|err| err.to_string())?;

    let logger = if is_logging_enabled { create_stderr_logger() } else { create_silent_logger() };
    let quota = create_interruption_quota(max_time, &logger);
    let telemetry_mode = create_telemetry_mode(&config, create_stderr_logger(), is_logging_enabled);
    let seed = seed.or(get_seed(&config));
    let environment = Arc::new(Environment::new(seed, Some(quota), Parallelism::default(), logger));

    let solver = AcoSolver::new(aco_config, environment, telemetry_mode);
    let result = solver.solve(&problem).map_err(|err| err.to_string())?;

    let out_file =
        matches.get_one::<String>(OUT_RESULT_ARG_NAME).map(|path| create_file(path, "out result")).transpose()?;

    result.write_json(out_writer_func(out_file)).map_err(|err| err.to_string())
}
