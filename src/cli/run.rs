/// Dispatches to the command handler matching the parsed arguments.
///
/// # Returns
/// - `Ok(CommandResult)` with the command's summary and exit behavior
/// - `Err` if the command could not run (bad config, missing root directory)
use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, check::check, clean::clean, helper::current_dir, init::init},
};
use crate::events::Logger;

pub fn run(Arguments { command }: Arguments, logger: &dyn Logger) -> Result<CommandResult> {
    match command {
        Some(Command::Clean(cmd)) => clean(cmd, logger),
        Some(Command::Check(cmd)) => check(cmd, logger),
        Some(Command::Init) => init(&current_dir()?),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
