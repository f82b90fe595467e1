//! Default values and fixed tool names for nix-apply.
//!
//! This module centralizes the literals the commit and deploy phases rely
//! on, so they are spelled once.

/// Home directory used when neither `SUDO_HOME` nor `HOME` is set.
pub const FALLBACK_HOME: &str = "/home/abus";

/// Directory under the home directory that holds the configuration flake.
pub const REPO_DIR_NAME: &str = ".nixos";

/// Environment variable consulted first, so `sudo` keeps the caller's home.
pub const SUDO_HOME_VAR: &str = "SUDO_HOME";

/// Environment variable consulted when `SUDO_HOME` is absent.
pub const HOME_VAR: &str = "HOME";

/// Version-control client.
pub const GIT: &str = "git";

/// Privilege-escalation wrapper for local activation.
pub const SUDO: &str = "sudo";

/// Local system-activation tool.
pub const NIXOS_REBUILD: &str = "nixos-rebuild";

/// Package runner used to launch the remote deployment tool.
pub const NIX: &str = "nix";

/// Flake reference of the remote multi-node deployment tool.
pub const DEPLOY_RS: &str = "github:serokell/deploy-rs";

/// Flake source passed to both deployment tools, relative to the working
/// directory.
pub const FLAKE_SOURCE: &str = ".";

/// Returns the flake reference `.#<output>`, with an empty output when none
/// is given.
pub fn flake_ref(output: Option<&str>) -> String {
    format!("{}#{}", FLAKE_SOURCE, output.unwrap_or_default())
}
