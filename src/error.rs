//! # Error Handling
//!
//! This module defines the centralized error type for `nix-apply`. It uses
//! the `thiserror` library to describe every way an invocation can stop
//! early, and each variant knows which process exit code it maps to.
//!
//! ## Taxonomy
//!
//! - **`Usage`**: conflicting or invalid flags. Raised before any side
//!   effect, so nothing has been staged, committed, or deployed.
//! - **`CommitFailed`**: a git step of the commit phase exited non-zero. The
//!   git exit code is carried through and becomes the process exit code.
//! - **`WorkingDirectory`**: the configuration repository directory does not
//!   exist, discovered when the first tool is spawned inside it.
//! - **`Spawn`**: an external tool could not be started at all.

use std::path::PathBuf;

use thiserror::Error;

use crate::exit_codes;

/// Main error type for nix-apply operations
#[derive(Error, Debug)]
pub enum Error {
    /// Flags were combined in a way the command line does not allow.
    #[error("{message}")]
    Usage { message: String },

    /// A git step of the commit phase exited with a non-zero status.
    #[error("Commit failed: `git {step}` exited with code {code}")]
    CommitFailed { step: String, code: i32 },

    /// The configuration repository directory is missing.
    #[error("Working directory does not exist: {}", path.display())]
    WorkingDirectory { path: PathBuf },

    /// An external program could not be started.
    #[error("Failed to run {program}: {message}")]
    Spawn { program: String, message: String },
}

impl Error {
    /// Shorthand for building a [`Error::Usage`].
    pub fn usage(message: impl Into<String>) -> Self {
        Error::Usage {
            message: message.into(),
        }
    }

    /// The process exit code this error should terminate with.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage { .. } => exit_codes::USAGE,
            Error::CommitFailed { code, .. } => *code,
            Error::WorkingDirectory { .. } | Error::Spawn { .. } => exit_codes::ERROR,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
