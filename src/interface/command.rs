//! External command execution.

use std::io::{self, ErrorKind};
use std::process::{Command, Stdio};

use thiserror::Error;

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Standard output followed by standard error, lossily decoded.
    pub output: String,
}

impl CommandOutput {
    /// Creates an output record.
    #[must_use]
    pub fn new(code: Option<i32>, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into(),
        }
    }

    /// Returns true if the process exited with code zero.
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Error type for command execution.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The program is not installed or not on `PATH`.
    #[error("Command not found: {program}")]
    NotFound {
        /// Program that was requested
        program: String,
    },

    /// The program exists but could not be started or waited on.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that was requested
        program: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Trait for running external commands to completion.
///
/// Implementations block until the process exits. A non-zero exit is
/// not an error at this level; callers inspect [`CommandOutput::success`].
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args`, waiting for it to exit.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NotFound`] if the program is absent, or
    /// [`CommandError::Spawn`] for any other launch failure.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError>;
}

impl<T: CommandRunner + ?Sized> CommandRunner for &T {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        (**self).run(program, args)
    }
}

/// Runs commands with [`std::process::Command`].
///
/// Standard input is closed; standard output and standard error are
/// captured and concatenated.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        tracing::debug!("Running: {program} {}", args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    CommandError::NotFound {
                        program: program.to_string(),
                    }
                } else {
                    CommandError::Spawn {
                        program: program.to_string(),
                        source: e,
                    }
                }
            })?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(CommandOutput::new(output.status.code(), text))
    }
}
