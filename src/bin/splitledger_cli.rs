use std::process;

use splitledger::{cli, init};

fn main() {
    init();

    match cli::run_cli() {
        Ok(outcome) => process::exit(outcome.exit_code()),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(1);
        }
    }
}
