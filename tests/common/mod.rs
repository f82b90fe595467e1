//! Shared test utilities for E2E tests.
//!
//! The binary always runs real programs, so these helpers build a fake home
//! directory holding a `.nixos` repository and a `bin/` directory with stub
//! `git`, `sudo` and `nix` scripts placed first on `PATH`. Each stub appends
//! its working directory and arguments to a log file, which tests read back to
//! check what was invoked and in which order.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! let fixture = TestFixture::new().with_staged("flake.nix\n");
//! fixture.command().args(["-m", "fix", "system"]).assert().success();
//! assert_eq!(fixture.invocations()[2], "git commit -m fix");
//! ```

use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    pub use super::TestFixture;
}

/// Stub for git. `diff` prints `$FAKE_GIT_STAGED`; `add`, `commit` and
/// `push` exit with `$FAKE_GIT_<STEP>_EXIT` (default 0).
const FAKE_GIT: &str = r#"#!/bin/sh
echo "$(pwd)|git $*" >> "$FAKE_LOG"
case "$1" in
  add) exit "${FAKE_GIT_ADD_EXIT:-0}" ;;
  diff) printf '%s' "$FAKE_GIT_STAGED" ;;
  commit) exit "${FAKE_GIT_COMMIT_EXIT:-0}" ;;
  push) exit "${FAKE_GIT_PUSH_EXIT:-0}" ;;
esac
exit 0
"#;

/// Stub for sudo and nix; exits with `$FAKE_DEPLOY_EXIT` (default 0).
fn fake_deploy_tool(name: &str) -> String {
    format!(
        "#!/bin/sh\necho \"$(pwd)|{} $*\" >> \"$FAKE_LOG\"\nexit \"${{FAKE_DEPLOY_EXIT:-0}}\"\n",
        name
    )
}

/// A fake home directory with a `.nixos` repository and stub tools.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
    envs: Vec<(String, String)>,
}

impl TestFixture {
    /// Create the home directory, the `.nixos` repository and the stubs.
    pub fn new() -> Self {
        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        temp_dir
            .child(".nixos/flake.nix")
            .write_str("{ outputs = _: { }; }\n")
            .expect("Failed to write flake");

        let bin = temp_dir.child("bin");
        bin.create_dir_all().expect("Failed to create bin directory");
        write_executable(&bin.path().join("git"), FAKE_GIT);
        write_executable(&bin.path().join("sudo"), &fake_deploy_tool("sudo"));
        write_executable(&bin.path().join("nix"), &fake_deploy_tool("nix"));

        Self {
            temp_dir,
            envs: Vec::new(),
        }
    }

    /// Make `git diff --cached --name-only` report these staged files.
    #[allow(dead_code)]
    pub fn with_staged(self, files: &str) -> Self {
        self.with_env("FAKE_GIT_STAGED", files)
    }

    /// Set an extra environment variable for the stubs.
    #[allow(dead_code)]
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// The fake home directory.
    #[allow(dead_code)]
    pub fn home(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The `.nixos` repository inside the fake home, canonicalized.
    #[allow(dead_code)]
    pub fn repo(&self) -> PathBuf {
        fs::canonicalize(self.home().join(".nixos")).expect("repo should exist")
    }

    fn log_path(&self) -> PathBuf {
        self.home().join("invocations.log")
    }

    /// Create a command with `SUDO_HOME` pointing at the fixture, the stubs
    /// first on `PATH`, and colors off.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("nix-apply");
        let path = format!(
            "{}:{}",
            self.home().join("bin").display(),
            std::env::var("PATH").unwrap_or_else(|_| "/usr/bin:/bin".to_string())
        );
        cmd.env("PATH", path)
            .env("SUDO_HOME", self.home())
            .env("HOME", self.home())
            .env("FAKE_LOG", self.log_path())
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }

    /// Logged invocations, without their working directory.
    #[allow(dead_code)]
    pub fn invocations(&self) -> Vec<String> {
        self.logged()
            .into_iter()
            .map(|(_, invocation)| invocation)
            .collect()
    }

    /// Logged `(working directory, invocation)` pairs, in order.
    #[allow(dead_code)]
    pub fn logged(&self) -> Vec<(PathBuf, String)> {
        let Ok(content) = fs::read_to_string(self.log_path()) else {
            return Vec::new();
        };
        content
            .lines()
            .filter_map(|line| line.split_once('|'))
            .map(|(cwd, invocation)| {
                let cwd = fs::canonicalize(cwd).unwrap_or_else(|_| PathBuf::from(cwd));
                (cwd, invocation.to_string())
            })
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

fn write_executable(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, content).expect("Failed to write stub");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make stub executable");
}
