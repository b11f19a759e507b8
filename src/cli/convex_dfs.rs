//! Depth-first enumeration of canonical configurations at a bound, optionally in
//! parallel (feature `parallel`).

use std::io::Write;

use clap::{value_parser, Arg, Command};

use convex_enum::{db::Tables, enumerate::dfs, misc::interrupt};

fn cli() -> Command {
    Command::new("convex_dfs")
        .about("Counts the non-isomorphic point configurations of size max_n, by nested convex hull structure.")
        .arg(
            Arg::new("max_n")
                .required(true)
                .value_parser(value_parser!(u32))
                .help("The configuration size to enumerate (at least 3)."),
        )
        .arg(
            Arg::new("num_threads")
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Worker threads for the parallel build; 0 or omitted for the scheduler default."),
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
                    eprintln!("usage: convex_dfs max_n [num_threads]");
                    1
                }
            };
            let _ = e.print();
            std::process::exit(exit_code);
        }
    };

    let limit = *matches.get_one::<u32>("max_n").expect("max_n is required");
    if limit < 3 {
        eprintln!("usage: convex_dfs max_n [num_threads] (max_n must be at least 3)");
        std::process::exit(1);
    }

    let threads = matches.get_one::<usize>("num_threads").copied().unwrap_or(0);

    #[cfg(feature = "parallel")]
    if threads != 0 {
        if let Err(e) = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
        {
            log::warn!("thread pool already configured: {e}");
        }
    }
    #[cfg(not(feature = "parallel"))]
    if threads != 0 {
        log::warn!("built without the parallel feature; num_threads is ignored");
    }

    let tables = Tables::new(limit);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(e) = dfs::enumerate(limit, &tables, &mut out) {
        eprintln!("output failed: {e}");
        std::process::exit(1);
    }
    let _ = out.flush();
}
