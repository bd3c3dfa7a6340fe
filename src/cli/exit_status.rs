use std::process::ExitCode;

/// Process exit status of the `reqsat` binary.
///
/// - `Success` (0): no errors (duplicates alone are warnings)
/// - `Failure` (1): at least one `REQUIRE` or `SATISFIED` lacks its counterpart
/// - `Error` (2): the run itself failed (bad config, bad arguments, IO)
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
