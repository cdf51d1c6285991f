// src/main.rs

use wait_for_it::cli::{self, Options};
use wait_for_it::{logging, run};

fn main() {
    let args = cli::parse();
    let quiet = args.quiet;

    let opts = match Options::from_cli(args) {
        Ok(opts) => opts,
        Err(message) => {
            if !quiet {
                eprintln!("{message}");
            }
            print!("{}", cli::usage());
            std::process::exit(1);
        }
    };

    if let Err(err) = logging::init_logging(opts.verbose) {
        eprintln!("wait-for-it error: {err:?}");
        std::process::exit(1);
    }

    match run(opts) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("wait-for-it error: {err:?}");
            std::process::exit(1);
        }
    }
}
