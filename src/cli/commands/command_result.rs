use super::super::exit_status::ExitStatus;
use crate::core::{CheckSummary, RunSummary, WriteMode};

#[derive(Debug)]
pub enum CommandSummary {
    Clean { summary: RunSummary, mode: WriteMode },
    Check(CheckSummary),
    Init(InitSummary),
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}

/// Result of running tclean commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Unused plus missing keys for `check`, zero otherwise.
    pub issue_count: usize,
    /// If true, exit code 1 is returned when `issue_count > 0`.
    /// `clean` always exits 0 once it ran: reporting is its job, not gating.
    pub exit_on_issues: bool,
}

impl CommandResult {
    pub fn clean(summary: RunSummary, mode: WriteMode) -> Self {
        Self {
            summary: CommandSummary::Clean { summary, mode },
            issue_count: 0,
            exit_on_issues: false,
        }
    }

    pub fn check(summary: CheckSummary) -> Self {
        Self {
            issue_count: summary.issue_count(),
            summary: CommandSummary::Check(summary),
            exit_on_issues: true,
        }
    }

    pub fn init(created: bool) -> Self {
        Self {
            summary: CommandSummary::Init(InitSummary { created }),
            issue_count: usize::from(!created),
            exit_on_issues: true,
        }
    }

    pub fn exit_status(&self) -> ExitStatus {
        if self.exit_on_issues && self.issue_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
