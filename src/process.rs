//! # External Process Execution
//!
//! Every unit of real work in nix-apply is done by another program. This
//! module holds the two pieces that make that possible:
//!
//! - **`ExternalCommand`**: a program, its ordered arguments, and the
//!   directory it runs in. Built once and never mutated.
//! - **`ProcessRunner`**: the trait that actually runs commands. It has one
//!   primitive for interactive tools (inherited stdin, stdout and stderr)
//!   and one that captures stdout for the single place output is inspected.
//!
//! `SystemProcessRunner` is the implementation used by the binary. Tests
//! swap in a recording mock so no real git or nix process is started.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use crate::error::{Error, Result};
use crate::exit_codes;

/// A single subprocess invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
}

impl ExternalCommand {
    /// Create a command for `program` running in `cwd`.
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments in order.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// The full token list, program first.
    pub fn argv(&self) -> Vec<&str> {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect()
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.cwd);
        cmd
    }

    /// Translate a spawn failure into the error the user should see.
    fn spawn_error(&self, err: io::Error) -> Error {
        if err.kind() == io::ErrorKind::NotFound && !self.cwd.is_dir() {
            Error::WorkingDirectory {
                path: self.cwd.clone(),
            }
        } else {
            Error::Spawn {
                program: self.program.clone(),
                message: err.to_string(),
            }
        }
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.argv().into_iter().map(quote_token).collect();
        write!(f, "{}", rendered.join(" "))
    }
}

/// Quote a token for display when a shell would split or reinterpret it.
fn quote_token(token: &str) -> String {
    if token.is_empty() {
        return "''".to_string();
    }

    if token
        .chars()
        .all(|c| c.is_alphanumeric() || "-_./:#=+@,%".contains(c))
    {
        return token.to_string();
    }

    format!("'{}'", token.replace('\'', r"'\''"))
}

/// Result of a command whose stdout was captured
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Captured {
    pub code: i32,
    pub stdout: String,
}

/// Trait for running external commands - allows mocking in tests
pub trait ProcessRunner {
    /// Run a command with inherited standard streams and block until it
    /// exits. Returns the exit code.
    fn run(&self, command: &ExternalCommand) -> Result<i32>;

    /// Run a command with stdout captured and stderr inherited.
    fn capture(&self, command: &ExternalCommand) -> Result<Captured>;
}

/// Runs commands as real child processes
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &ExternalCommand) -> Result<i32> {
        log::debug!("Running: {} (in {})", command, command.cwd().display());

        let status = command
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| command.spawn_error(e))?;

        Ok(status_code(status))
    }

    fn capture(&self, command: &ExternalCommand) -> Result<Captured> {
        log::debug!("Capturing: {} (in {})", command, command.cwd().display());

        let output = command
            .to_command()
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| command.spawn_error(e))?;

        Ok(Captured {
            code: status_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// Exit code of a finished child. A child killed by a signal has no code;
/// on Unix that maps to the shell convention `128 + signal`.
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    exit_codes::ERROR
}
