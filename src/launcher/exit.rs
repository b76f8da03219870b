use std::process::ExitCode;

use anyhow::Error;

/// Bundles a launch error message with an exit code.
#[derive(Debug)]
pub struct LaunchExit {
    message: Option<String>,
    exit_code: ExitCode,
}

impl LaunchExit {
    pub fn from_error(err: impl Into<Error>) -> Self {
        let err = err.into();
        Self {
            message: Some(format!("{err:?}")),
            exit_code: ExitCode::FAILURE,
        }
    }

    /// Exit without printing anything further.
    pub fn silent(exit_code: ExitCode) -> Self {
        Self {
            message: None,
            exit_code,
        }
    }

    pub fn report(self) -> ExitCode {
        if let Some(message) = self.message {
            eprintln!("{message}");
        }
        self.exit_code
    }
}
