//! A stand-alone driver for the bundled DPLL solver, reading DIMACS from a file or
//! standard input.

use std::io::{BufReader, Read};

use clap::{value_parser, Arg, ArgAction, Command};

use convex_enum::{
    backend::{dpll::DpllSolver, ClauseContexts},
    builder::dimacs::read_dimacs,
    misc::interrupt,
    structures::literal::Literal,
};

fn cli() -> Command {
    Command::new("test_dpll")
        .about("Solves a DIMACS formula with the bundled DPLL solver.")
        .arg(
            Arg::new("no_model")
                .short('n')
                .action(ArgAction::SetTrue)
                .help("Suppress model printing."),
        )
        .arg(
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .help("Enumerate all models and print their count."),
        )
        .arg(
            Arg::new("input_file")
                .required(false)
                .value_parser(value_parser!(std::path::PathBuf))
                .help("The formula to solve; standard input when omitted."),
        )
}

fn model_line(solver: &DpllSolver, variables: usize) -> String {
    let mut line = String::new();
    for variable in 0..variables as u32 {
        let literal = Literal::new(variable, solver.value(variable));
        line.push_str(&literal.as_dimacs().to_string());
        line.push(' ');
    }
    line.push('0');
    line
}

fn main() {
    env_logger::init();
    interrupt::install_handler();

    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let exit_code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            std::process::exit(exit_code);
        }
    };

    let input: Box<dyn Read> = match matches.get_one::<std::path::PathBuf>("input_file") {
        Some(path) => match std::fs::File::open(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("cannot open {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Box::new(std::io::stdin()),
    };

    let (info, formula) = match read_dimacs(BufReader::new(input)) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error reading input file: {e}");
            std::process::exit(1);
        }
    };

    // Size the solver for the declared count, or the literals actually seen.
    let seen = formula
        .iter()
        .flatten()
        .map(|literal| literal.variable() as usize + 1)
        .max()
        .unwrap_or(0);
    let variables = info.variables.max(seen);

    let mut solver = DpllSolver::new(variables);
    solver.add_clauses(&formula);
    solver.prepare();

    let print_models = !matches.get_flag("no_model");

    if matches.get_flag("all") {
        let mut count: u64 = 0;
        while solver.next_model() {
            count += 1;
            if print_models {
                println!("{}", model_line(&solver, variables));
            }
        }
        println!("Models: {count}");
    } else if solver.next_model() {
        println!("SAT");
        if print_models {
            println!("{}", model_line(&solver, variables));
        }
    } else {
        println!("UNSAT");
    }
}
