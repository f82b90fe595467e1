//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use nix_apply::intent::{CommitMode, InvocationIntent, Target};

use crate::commands;

/// Commit the NixOS configuration repository and deploy it
#[derive(Parser, Debug)]
#[command(name = "nix-apply")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Deployment target
    #[command(subcommand)]
    command: Commands,

    /// The commit message to use
    #[arg(short, long, value_name = "MSG")]
    message: Option<String>,

    /// Skip committing changes
    #[arg(long)]
    no_commit: bool,

    /// Print the commands that would run without running them
    #[arg(long, global = true)]
    dry_run: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Deploy to the current system
    System(commands::system::SystemArgs),

    /// Deploy to a remote node
    Remote(commands::remote::RemoteArgs),
}

impl Cli {
    /// Validate the parsed flags into an intent.
    ///
    /// Mutually exclusive flags are checked here rather than by clap, and
    /// the top-level commit flags are checked before the subcommand's.
    pub fn intent(&self) -> nix_apply::error::Result<InvocationIntent> {
        let commit = CommitMode::from_flags(self.message.clone(), self.no_commit)?;

        let target = match &self.command {
            Commands::System(args) => Target::System(args.options()?),
            Commands::Remote(args) => Target::Remote(args.options()?),
        };

        Ok(InvocationIntent { commit, target })
    }

    /// Execute the CLI command, returning the process exit code.
    pub fn execute(self) -> Result<i32> {
        init_logging(&self.log_level);

        let intent = self.intent()?;
        let settings = commands::apply::ApplySettings {
            dry_run: self.dry_run,
            color: self.color,
        };

        commands::apply::execute(&intent, &settings)
    }
}

/// Route `log` output to stderr. `RUST_LOG` takes precedence over
/// `--log-level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
