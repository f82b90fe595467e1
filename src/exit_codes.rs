//! Process exit codes used by the `nix-apply` binary.
//!
//! - `0`: success, or the exit code of the deployment tool when it succeeds
//! - `1`: general error (missing working directory, tool could not start)
//! - `2`: invalid command-line usage
//!
//! A failed commit exits with git's own code, and a deployment exits with
//! the deployment tool's code, so values other than these also occur.

/// Successful run.
pub const SUCCESS: i32 = 0;

/// General failure.
pub const ERROR: i32 = 1;

/// Invalid command-line usage, matching clap's own usage errors.
pub const USAGE: i32 = 2;
