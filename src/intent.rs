//! # Invocation Intent
//!
//! The validated form of the command line. Raw flags arrive as plain
//! `Option`/`bool` pairs from the argument parser; the `from_flags`
//! constructors here are the only place mutual exclusion is checked, and
//! each pair collapses into a tagged enum so an invalid combination cannot
//! be represented afterwards.
//!
//! | Flags                          | Type             |
//! |--------------------------------|------------------|
//! | `-m/--message`, `--no-commit`  | [`CommitMode`]   |
//! | `-s/--spec`, `--no-spec`       | [`Specialisation`] |
//! | `--upgrade`, `--upgrade-all`   | [`UpgradeMode`]  |
//! | `NODE`, `--all`                | [`NodeSelector`] |

use crate::error::{Error, Result};

/// Build the usage message for two flags given together.
fn conflict(a: &str, b: &str) -> Error {
    Error::usage(format!("the argument '{}' cannot be used with '{}'", a, b))
}

/// How the commit phase should behave
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitMode {
    /// Commit through git's message editor.
    Interactive,
    /// Commit non-interactively with this message.
    Message(String),
    /// Skip the commit phase entirely.
    Skip,
}

impl CommitMode {
    pub fn from_flags(message: Option<String>, no_commit: bool) -> Result<Self> {
        match (message, no_commit) {
            (Some(_), true) => Err(conflict("--message <MSG>", "--no-commit")),
            (Some(message), false) => Ok(CommitMode::Message(message)),
            (None, true) => Ok(CommitMode::Skip),
            (None, false) => Ok(CommitMode::Interactive),
        }
    }
}

/// Which specialisation `nixos-rebuild` should switch to
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Specialisation {
    /// No flag given; the default configuration is activated.
    #[default]
    Default,
    /// `-s/--spec <name>`.
    Named(String),
    /// `--no-spec`.
    Disabled,
}

impl Specialisation {
    pub fn from_flags(spec: Option<String>, no_spec: bool) -> Result<Self> {
        match (spec, no_spec) {
            (Some(_), true) => Err(conflict("--no-spec", "--spec <SPEC>")),
            (Some(name), false) => Ok(Specialisation::Named(name)),
            (None, true) => Ok(Specialisation::Disabled),
            (None, false) => Ok(Specialisation::Default),
        }
    }

    /// The specialisation name to pass with `-c`, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Specialisation::Named(name) => Some(name),
            Specialisation::Default | Specialisation::Disabled => None,
        }
    }
}

/// Upgrade behaviour for `nixos-rebuild`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpgradeMode {
    #[default]
    None,
    Upgrade,
    UpgradeAll,
}

impl UpgradeMode {
    pub fn from_flags(upgrade: bool, upgrade_all: bool) -> Result<Self> {
        match (upgrade, upgrade_all) {
            (true, true) => Err(conflict("--upgrade", "--upgrade-all")),
            (true, false) => Ok(UpgradeMode::Upgrade),
            (false, true) => Ok(UpgradeMode::UpgradeAll),
            (false, false) => Ok(UpgradeMode::None),
        }
    }

    /// The `nixos-rebuild` flag for this mode.
    pub fn flag(self) -> Option<&'static str> {
        match self {
            UpgradeMode::None => None,
            UpgradeMode::Upgrade => Some("--upgrade"),
            UpgradeMode::UpgradeAll => Some("--upgrade-all"),
        }
    }
}

/// Which nodes the remote deployment targets
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NodeSelector {
    /// Neither a node nor `--all`; every node in the flake.
    #[default]
    Default,
    /// A single named node.
    Node(String),
    /// `--all <value>`. The flag takes a value that is accepted but not
    /// used when building the deploy command.
    All(String),
}

impl NodeSelector {
    pub fn from_flags(node: Option<String>, all: Option<String>) -> Result<Self> {
        match (node, all) {
            (Some(_), Some(_)) => Err(conflict("--all <ALL>", "[NODE]")),
            (Some(node), None) => Ok(NodeSelector::Node(node)),
            (None, Some(value)) => Ok(NodeSelector::All(value)),
            (None, None) => Ok(NodeSelector::Default),
        }
    }

    /// The node to append to the flake reference, if any.
    pub fn node(&self) -> Option<&str> {
        match self {
            NodeSelector::Node(node) => Some(node),
            NodeSelector::Default | NodeSelector::All(_) => None,
        }
    }
}

/// Options for activating the local system
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemOptions {
    /// Flake output to build; empty when unset.
    pub flake_name: Option<String>,
    pub specialisation: Specialisation,
    pub upgrade: UpgradeMode,
}

/// Options for deploying to remote nodes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RemoteOptions {
    pub selector: NodeSelector,
}

/// Where the configuration is deployed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    System(SystemOptions),
    Remote(RemoteOptions),
}

/// Everything one invocation is going to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationIntent {
    pub commit: CommitMode,
    pub target: Target,
}
