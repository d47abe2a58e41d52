//! A command line interface to the liquefied gas dispatch planner.

mod commands;

use clap::Command;
use commands::create_write_buffer;
use commands::solve::{get_solve_app, run_solve};
use std::process;

fn main() {
    let matches = Command::new("LPG Dispatch Planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A command line interface to the liquefied gas dispatch planner")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(get_solve_app())
        .get_matches();

    let result = match matches.subcommand() {
        Some(("solve", solve_matches)) => run_solve(solve_matches, create_write_buffer),
        _ => Err("no known subcommand was used. Use -h to print help information.".to_string()),
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
