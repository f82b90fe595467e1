//! # nix-apply Library
//!
//! This library backs the `nix-apply` command-line tool, which commits
//! pending changes in a NixOS configuration repository and then deploys it,
//! either to the local machine with `nixos-rebuild` or to remote nodes with
//! `deploy-rs`.
//!
//! Nothing here reimplements git or Nix. Every step is an external program,
//! and the library only decides which programs to run, with which arguments,
//! and in which order.
//!
//! ## Quick Example
//!
//! ```
//! use std::path::Path;
//! use nix_apply::intent::{CommitMode, InvocationIntent, SystemOptions, Target, UpgradeMode};
//! use nix_apply::orchestrator;
//!
//! let intent = InvocationIntent {
//!     commit: CommitMode::Skip,
//!     target: Target::System(SystemOptions {
//!         flake_name: Some("host1".to_string()),
//!         upgrade: UpgradeMode::Upgrade,
//!         ..Default::default()
//!     }),
//! };
//!
//! let plan = orchestrator::plan(&intent, Path::new("/home/abus/.nixos"));
//! assert_eq!(plan.len(), 1);
//! assert_eq!(
//!     plan[0].to_string(),
//!     "sudo nixos-rebuild switch --upgrade --flake .#host1"
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Intent (`intent`)**: the validated command line, with every pair of
//!   mutually exclusive flags collapsed into one enum.
//! - **Working directory (`config`)**: `$SUDO_HOME/.nixos`, `$HOME/.nixos`,
//!   or `/home/abus/.nixos`.
//! - **Processes (`process`)**: `ExternalCommand` and the `ProcessRunner`
//!   trait every external call goes through.
//! - **Commit (`git`)** and **Deploy (`deploy`)**: the two phases, wired
//!   together by `orchestrator`.

pub mod config;
pub mod defaults;
pub mod deploy;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod intent;
pub mod orchestrator;
pub mod output;
pub mod process;
