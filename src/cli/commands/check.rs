use anyhow::Result;

use super::super::args::CheckCommand;
use super::{
    CommandResult,
    helper::{Overrides, current_dir, log_settings, resolve_settings},
};
use crate::{
    core::{TranslationProcessor, WriteMode},
    events::Logger,
};

pub fn check(cmd: CheckCommand, logger: &dyn Logger) -> Result<CommandResult> {
    let overrides = Overrides {
        mode: WriteMode::DryRun,
        ..Default::default()
    };
    let settings = resolve_settings(&current_dir()?, &cmd.common, overrides)?;
    log_settings(&settings, logger);

    let processor = TranslationProcessor::new(settings)?;
    let summary = processor.check(logger)?;

    Ok(CommandResult::check(summary))
}
