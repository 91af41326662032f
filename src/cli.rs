use std::ffi::OsString;

use clap::{CommandFactory, Parser};
use tracing::debug;

use crate::error::ReportError;

/// Print a snapshot of the process table.
#[derive(Parser, Debug)]
#[command(name = "ps", disable_help_flag = true, disable_version_flag = true)]
pub struct Cli {}

/// Accepts only an empty command line; `args` includes the program name.
pub fn parse<I, T>(args: I) -> Result<Cli, ReportError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let argv: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let given = argv.len().saturating_sub(1);

    let cli = Cli::try_parse_from(argv).map_err(|err| {
        debug!(error = %err, "command line rejected");
        ReportError::Usage
    })?;

    // A bare `--` is consumed by the parser without complaint.
    if given > 0 {
        debug!(count = given, "arguments given");
        return Err(ReportError::Usage);
    }

    Ok(cli)
}

pub fn usage() -> String {
    format!("{} ({})", Cli::command().render_usage(), ReportError::Usage)
}
