//! Commit phase: stage, check, commit, push.
//!
//! All version-control work goes through the system `git` binary, so the
//! user's identity, signing setup, hooks and credential helpers apply
//! unchanged.

use std::path::Path;

use crate::defaults::GIT;
use crate::error::{Error, Result};
use crate::intent::CommitMode;
use crate::process::{ExternalCommand, ProcessRunner};

/// Why the commit phase did not create a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `--no-commit` was given.
    Disabled,
    /// Nothing was staged after `git add`.
    NothingToCommit,
}

/// What the commit phase did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    Skipped(SkipReason),
    Committed { pushed: bool },
}

fn git(repo: &Path) -> ExternalCommand {
    ExternalCommand::new(GIT, repo)
}

/// `git add .`
pub fn stage_all(repo: &Path) -> ExternalCommand {
    git(repo).args(["add", "."])
}

/// `git diff --cached --name-only`, listing what the commit would contain.
pub fn staged_changes(repo: &Path) -> ExternalCommand {
    git(repo).args(["diff", "--cached", "--name-only"])
}

/// `git commit -m <message>`, or `git commit -e` to open the editor.
pub fn commit(repo: &Path, message: Option<&str>) -> ExternalCommand {
    match message {
        Some(message) => git(repo).args(["commit", "-m", message]),
        None => git(repo).args(["commit", "-e"]),
    }
}

/// `git push`
pub fn push(repo: &Path) -> ExternalCommand {
    git(repo).arg("push")
}

/// The git commands the commit phase may run, in order. Used for dry runs;
/// the commit and push only happen when something is staged.
pub fn plan(mode: &CommitMode, repo: &Path) -> Vec<ExternalCommand> {
    let message = match mode {
        CommitMode::Skip => return Vec::new(),
        CommitMode::Message(message) => Some(message.as_str()),
        CommitMode::Interactive => None,
    };

    vec![
        stage_all(repo),
        staged_changes(repo),
        commit(repo, message),
        push(repo),
    ]
}

fn ensure_success(command: &ExternalCommand, code: i32) -> Result<()> {
    if code == 0 {
        return Ok(());
    }
    Err(Error::CommitFailed {
        step: command.arguments().join(" "),
        code,
    })
}

/// Commit and push any pending changes in `repo`.
///
/// The staged-changes check runs after `git add` so that new files count.
/// A failing commit stops the run; a failing push is only logged.
pub fn commit_pending_changes<R>(runner: &R, mode: &CommitMode, repo: &Path) -> Result<CommitOutcome>
where
    R: ProcessRunner + ?Sized,
{
    let message = match mode {
        CommitMode::Skip => {
            log::info!("Skipping commit (--no-commit)");
            return Ok(CommitOutcome::Skipped(SkipReason::Disabled));
        }
        CommitMode::Message(message) => Some(message.as_str()),
        CommitMode::Interactive => None,
    };

    let add = stage_all(repo);
    ensure_success(&add, runner.run(&add)?)?;

    let diff = staged_changes(repo);
    let staged = runner.capture(&diff)?;
    ensure_success(&diff, staged.code)?;

    if staged.stdout.trim().is_empty() {
        log::info!("No changes to commit");
        return Ok(CommitOutcome::Skipped(SkipReason::NothingToCommit));
    }
    log::debug!("Staged files:\n{}", staged.stdout.trim_end());

    let commit_cmd = commit(repo, message);
    ensure_success(&commit_cmd, runner.run(&commit_cmd)?)?;

    let pushed = match runner.run(&push(repo)) {
        Ok(0) => true,
        Ok(code) => {
            log::warn!("git push exited with code {}; continuing with deployment", code);
            false
        }
        Err(e) => {
            log::warn!("git push could not run: {}; continuing with deployment", e);
            false
        }
    };

    Ok(CommitOutcome::Committed { pushed })
}
