use anyhow::Result;

use super::super::args::CleanCommand;
use super::{
    CommandResult,
    helper::{Overrides, current_dir, log_settings, resolve_settings},
};
use crate::{
    core::{TranslationProcessor, WriteMode},
    events::Logger,
};

pub fn clean(cmd: CleanCommand, logger: &dyn Logger) -> Result<CommandResult> {
    let overrides = Overrides {
        no_sort: cmd.no_sort,
        remove_unused: cmd.remove_unused,
        mode: if cmd.dry_run {
            WriteMode::DryRun
        } else {
            WriteMode::Apply
        },
    };
    let settings = resolve_settings(&current_dir()?, &cmd.common, overrides)?;
    log_settings(&settings, logger);

    let processor = TranslationProcessor::new(settings)?;
    let summary = processor.run(logger)?;

    Ok(CommandResult::clean(summary, overrides.mode))
}
