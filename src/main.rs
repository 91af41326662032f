mod cli;
mod config;
mod error;
mod logging;
mod process;
mod reporter;

use std::env;
use std::io;
use std::process::ExitCode;

use tracing::debug;

use config::Config;
use error::ReportError;
use reporter::{ProcfsTable, Reporter};

fn main() -> ExitCode {
    logging::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ps: {}", e);
            return ExitCode::FAILURE;
        }
    };
    debug!(?config, "starting");

    let mut reporter = Reporter::new(ProcfsTable::new(config.proc_root), config.capacity);
    let mut out = io::stdout().lock();

    match reporter.run(env::args_os(), &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        // the usage line has already been printed
        Err(ReportError::Usage) => ExitCode::from(ReportError::Usage.exit_code()),
        Err(e) => {
            eprintln!("ps: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}
