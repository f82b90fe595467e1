//! Orchestrator for a complete apply run
//!
//! Coordinates the two phases of an invocation:
//! 1. Commit pending changes in the configuration repository (optional)
//! 2. Dispatch to the deployment tool for the selected target
//!
//! Both phases run strictly in order, in the same working directory. A commit
//! failure returns an error and the deployment tool is never started.

use std::path::Path;

use crate::deploy;
use crate::error::Result;
use crate::git::{self, CommitOutcome};
use crate::intent::InvocationIntent;
use crate::process::{ExternalCommand, ProcessRunner};

/// Result of a full run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplyReport {
    pub commit: CommitOutcome,
    /// Exit code of the deployment tool.
    pub exit_code: i32,
}

/// Execute the commit phase and then the deployment.
pub fn execute<R>(intent: &InvocationIntent, runner: &R, repo: &Path) -> Result<ApplyReport>
where
    R: ProcessRunner + ?Sized,
{
    // Phase 1: Commit
    let commit = git::commit_pending_changes(runner, &intent.commit, repo)?;

    // Phase 2: Dispatch
    let exit_code = deploy::dispatch(runner, &intent.target, repo)?;

    Ok(ApplyReport { commit, exit_code })
}

/// Every command a run could execute, in order, without running any of them.
pub fn plan(intent: &InvocationIntent, repo: &Path) -> Vec<ExternalCommand> {
    let mut commands = git::plan(&intent.commit, repo);
    commands.push(deploy::command_for(&intent.target, repo));
    commands
}
