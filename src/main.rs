use std::process::ExitCode;

use clap::Parser;
use locsheet::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    let verbose = args.verbose();

    match locsheet::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {}", err);
            if verbose {
                for cause in err.chain().skip(1) {
                    eprintln!("  caused by: {}", cause);
                }
            }
            ExitStatus::Error.into()
        }
    }
}
