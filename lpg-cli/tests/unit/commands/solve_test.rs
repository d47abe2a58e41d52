use super::*;
use lpg_cli::format::solution::{Solution, deserialize_solution};
use std::fs;
use tempfile::TempDir;

const SIMPLE_PROBLEM_PATH: &str = "tests/data/simple.problem.json";
const FULL_CONFIG_PATH: &str = "tests/data/config.full.json";

struct DummyWrite {}

impl Write for DummyWrite {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn get_matches(params: &[&str]) -> ArgMatches {
    let args = [&["solve", SIMPLE_PROBLEM_PATH], params].concat();

    get_solve_app().try_get_matches_from(args).expect("cannot parse arguments")
}

fn run_solve_with_out_writer(matches: &ArgMatches) -> Result<(), String> {
    run_solve(matches, |_| BufWriter::new(Box::new(DummyWrite {})))
}

fn solve_into_file(params: &[&str]) -> Solution {
    let dir = TempDir::new().expect("cannot create temp dir");
    let out_path = dir.path().join("solution.json");
    let out_path = out_path.to_str().expect("invalid temp path");

    let matches = get_matches(&[params, &["--out-result", out_path]].concat());
    run_solve(&matches, create_write_buffer).expect("cannot solve problem");

    let content = fs::read_to_string(out_path).expect("cannot read solution");

    deserialize_solution(BufReader::new(content.as_bytes())).expect("cannot deserialize solution")
}

#[test]
fn can_solve_problem_with_iteration_limit() {
    let matches = get_matches(&["--max-iterations", "3", "--seed", "42"]);

    run_solve_with_out_writer(&matches).expect("cannot solve problem");
}

#[test]
fn can_solve_problem_with_config_and_time_limit() {
    let matches = get_matches(&["--config", FULL_CONFIG_PATH, "--max-iterations", "2", "--max-time", "300"]);

    run_solve_with_out_writer(&matches).expect("cannot solve problem");
}

#[test]
fn can_write_solution_into_out_file() {
    let solution = solve_into_file(&["-n", "3", "-s", "42"]);

    assert_eq!(solution.seed, 42);
    assert!((1..=3).contains(&solution.iterations));
    assert_eq!(solution.orders.len(), 3);
    assert!(solution.warnings.is_empty());

    let mut planned = solution
        .tours
        .iter()
        .flat_map(|tour| tour.orders.iter().cloned())
        .chain(solution.unassigned.iter().map(|unassigned| unassigned.order_id.clone()))
        .collect::<Vec<_>>();
    planned.sort();
    assert_eq!(planned, vec!["c-1".to_string(), "c-2".to_string(), "c-3".to_string()]);
    assert_eq!(solution.statistic.assigned + solution.statistic.unassigned, 3);
}

#[test]
fn can_replay_run_with_the_same_seed() {
    let left = solve_into_file(&["-n", "2", "-s", "7"]);
    let right = solve_into_file(&["-n", "2", "-s", "7"]);

    assert_eq!(left.quality, right.quality);
    assert_eq!(left.statistic.distance, right.statistic.distance);
    assert_eq!(
        left.tours.iter().map(|tour| tour.orders.clone()).collect::<Vec<_>>(),
        right.tours.iter().map(|tour| tour.orders.clone()).collect::<Vec<_>>()
    );
}

#[test]
fn can_require_problem_path() {
    get_solve_app().try_get_matches_from(vec!["solve"]).unwrap_err();
}

#[test]
fn can_return_error_for_invalid_arguments() {
    let cases = [
        (vec!["--max-iterations", "many"], "cannot get integer value"),
        (vec!["--seed", "1.5"], "cannot get integer value"),
        (vec!["--config", "tests/data/missing.json"], "cannot open config file"),
        (vec!["--max-iterations", "0"], "max iterations must be positive"),
    ];

    for (params, expected) in cases {
        let matches = get_matches(params.as_slice());

        let result = run_solve_with_out_writer(&matches);

        assert!(result.is_err_and(|err| err.contains(expected)), "unexpected result for {params:?}");
    }
}

#[test]
fn can_return_error_for_missing_problem_file() {
    let matches = get_solve_app().try_get_matches_from(vec!["solve", "tests/data/missing.json"]).unwrap();

    let result = run_solve_with_out_writer(&matches);

    assert!(result.is_err_and(|err| err.starts_with("cannot open problem file")));
}
