//! Breadth-first enumeration of canonical configurations up to a bound.

use std::io::Write;

use clap::{value_parser, Arg, Command};

use convex_enum::{db::Tables, enumerate::bfs, misc::interrupt};

fn cli() -> Command {
    Command::new("convex")
        .about("Counts the non-isomorphic point configurations of each size up to max_n, by nested convex hull structure.")
        .arg(
            Arg::new("max_n")
                .required(true)
                .value_parser(value_parser!(u32))
                .help("The largest configuration size to enumerate (at least 3)."),
        )
}

fn main() {
    env_logger::init();
    interrupt::install_handler();

    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let exit_code = match e.kind() {
                clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => 0,
                _ => {
                    eprintln!("usage: convex max_n");
                    1
                }
            };
            let _ = e.print();
            std::process::exit(exit_code);
        }
    };

    let limit = *matches.get_one::<u32>("max_n").expect("max_n is required");
    if limit < 3 {
        eprintln!("usage: convex max_n (max_n must be at least 3)");
        std::process::exit(1);
    }

    let tables = Tables::new(limit);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = bfs::enumerate(limit, &tables, &mut out) {
        eprintln!("output failed: {e}");
        std::process::exit(1);
    }
    let _ = out.flush();
}
