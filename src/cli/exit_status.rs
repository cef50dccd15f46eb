use std::process::ExitCode;

/// Process exit status of a tclean invocation.
///
/// - `Success` (0): the command ran. For `clean` this holds even when some
///   files could not be written; those are logged as errors.
/// - `Failure` (1): `check` found unused or missing keys, or `init` refused
///   to overwrite an existing config.
/// - `Error` (2): the run could not start or finish: unreadable or invalid
///   config, no namespace, a missing or inaccessible root directory.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
