//! # Working Directory Resolution
//!
//! nix-apply has no configuration file. The only configuration it reads is
//! where the machine configuration repository lives, and that is derived
//! from two environment variables:
//!
//! 1. `SUDO_HOME`, so running under `sudo` still targets the caller's repo.
//! 2. `HOME`, the normal case.
//! 3. A literal fallback of `/home/abus` when neither is set.
//!
//! The repository is the `.nixos` directory under whichever home wins.
//!
//! The lookup itself is passed in as a closure, which keeps resolution
//! testable without mutating the process environment. [`from_env`] is the
//! implementation used by the binary.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::defaults::{FALLBACK_HOME, HOME_VAR, REPO_DIR_NAME, SUDO_HOME_VAR};

/// Resolve the directory every external tool runs in.
///
/// No existence check happens here. A missing directory is reported when
/// the first tool is spawned inside it.
pub fn resolve_working_directory<F>(lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<OsString>,
{
    let home = lookup(SUDO_HOME_VAR)
        .or_else(|| lookup(HOME_VAR))
        .unwrap_or_else(|| OsString::from(FALLBACK_HOME));

    let dir = PathBuf::from(home).join(REPO_DIR_NAME);
    log::debug!("Resolved working directory: {}", dir.display());
    dir
}

/// Environment lookup backed by the real process environment.
///
/// Values are taken as raw OS strings, so a home path that is not valid
/// Unicode is still used.
pub fn from_env(name: &str) -> Option<OsString> {
    std::env::var_os(name)
}
