//! Shared execution for both deployment targets
//!
//! Resolves the configuration repository, then either prints the plan
//! (`--dry-run`) or runs the commit phase and the deployment through the
//! orchestrator.

use std::path::Path;

use anyhow::Result;

use nix_apply::config;
use nix_apply::exit_codes;
use nix_apply::git::{CommitOutcome, SkipReason};
use nix_apply::intent::{InvocationIntent, Target};
use nix_apply::orchestrator;
use nix_apply::output::{status_line, OutputConfig};
use nix_apply::process::SystemProcessRunner;

/// Global settings that are not part of the intent
#[derive(Debug, Clone)]
pub struct ApplySettings {
    pub dry_run: bool,
    pub color: String,
}

/// Execute an apply run and return the exit code to terminate with.
pub fn execute(intent: &InvocationIntent, settings: &ApplySettings) -> Result<i32> {
    let out = OutputConfig::from_env_and_flag(&settings.color);
    let repo = config::resolve_working_directory(config::from_env);

    if settings.dry_run {
        print_plan(intent, &repo, &out);
        return Ok(exit_codes::SUCCESS);
    }

    let target = match intent.target {
        Target::System(_) => "local system",
        Target::Remote(_) => "remote nodes",
    };
    eprintln!(
        "{}",
        status_line(
            &out,
            "🚀",
            "[APPLY]",
            &format!("Applying {} to {}", repo.display(), target)
        )
    );

    let report = orchestrator::execute(intent, &SystemProcessRunner, &repo)?;

    let commit_note = match report.commit {
        CommitOutcome::Skipped(SkipReason::Disabled) => "commit skipped",
        CommitOutcome::Skipped(SkipReason::NothingToCommit) => "nothing to commit",
        CommitOutcome::Committed { pushed: true } => "changes committed and pushed",
        CommitOutcome::Committed { pushed: false } => "changes committed, push failed",
    };

    if report.exit_code == exit_codes::SUCCESS {
        eprintln!(
            "{}",
            status_line(&out, "✅", "[OK]", &format!("Deployed ({})", commit_note))
        );
    } else {
        eprintln!(
            "{}",
            status_line(
                &out,
                "❌",
                "[FAIL]",
                &format!(
                    "Deployment exited with code {} ({})",
                    report.exit_code, commit_note
                )
            )
        );
    }

    Ok(report.exit_code)
}

fn print_plan(intent: &InvocationIntent, repo: &Path, out: &OutputConfig) {
    println!(
        "{}",
        status_line(out, "🔎", "[DRY RUN]", "No commands will be run")
    );
    println!("Working directory: {}", repo.display());
    for cmd in orchestrator::plan(intent, repo) {
        println!("  {}", cmd);
    }
}
