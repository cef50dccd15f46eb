use std::process::ExitCode;

use anyhow::Result;

mod args;
mod commands;
mod exit_status;
mod report;
mod run;

pub use args::{Arguments, CheckCommand, CleanCommand, Command, CommonArgs};
pub use exit_status::ExitStatus;
pub use report::ConsoleLogger;

pub fn run_cli(args: Arguments) -> Result<ExitCode> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success.into());
    };

    let logger = ConsoleLogger::new(verbose);
    let result = run::run(args, &logger)?;
    report::print(&result);

    Ok(result.exit_status().into())
}
