//! # Deployment Dispatch
//!
//! Builds the one deployment command an invocation ends with and runs it.
//!
//! - **System**: `sudo nixos-rebuild switch [-c SPEC] [--upgrade|--upgrade-all]
//!   --flake .#NAME`
//! - **Remote**: `nix run github:serokell/deploy-rs .#NODE`
//!
//! The flake output is left empty (`.#`) when no name or node is given, which
//! lets each tool pick its own default. The child's exit code is returned
//! unchanged so the binary can exit with it.

use std::path::Path;

use crate::defaults::{flake_ref, DEPLOY_RS, NIX, NIXOS_REBUILD, SUDO};
use crate::error::Result;
use crate::intent::{NodeSelector, RemoteOptions, SystemOptions, Target};
use crate::process::{ExternalCommand, ProcessRunner};

/// Command that activates the configuration on this machine.
pub fn system_command(options: &SystemOptions, repo: &Path) -> ExternalCommand {
    let mut cmd = ExternalCommand::new(SUDO, repo).args([NIXOS_REBUILD, "switch"]);

    if let Some(spec) = options.specialisation.name() {
        cmd = cmd.args(["-c", spec]);
    }

    if let Some(flag) = options.upgrade.flag() {
        cmd = cmd.arg(flag);
    }

    cmd.args(["--flake".to_string(), flake_ref(options.flake_name.as_deref())])
}

/// Command that deploys the configuration to remote nodes.
pub fn remote_command(options: &RemoteOptions, repo: &Path) -> ExternalCommand {
    ExternalCommand::new(NIX, repo).args([
        "run".to_string(),
        DEPLOY_RS.to_string(),
        flake_ref(options.selector.node()),
    ])
}

/// Command for whichever target was selected.
pub fn command_for(target: &Target, repo: &Path) -> ExternalCommand {
    match target {
        Target::System(options) => system_command(options, repo),
        Target::Remote(options) => remote_command(options, repo),
    }
}

/// Run the deployment tool and return its exit code.
pub fn dispatch<R>(runner: &R, target: &Target, repo: &Path) -> Result<i32>
where
    R: ProcessRunner + ?Sized,
{
    if let Target::Remote(RemoteOptions {
        selector: NodeSelector::All(value),
    }) = target
    {
        log::warn!(
            "--all {} has no effect; deploying every node in the flake",
            value
        );
    }

    let cmd = command_for(target, repo);
    log::info!("Deploying: {}", cmd);

    let code = runner.run(&cmd)?;
    if code != 0 {
        log::error!("{} exited with code {}", cmd.program(), code);
    }
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{Specialisation, UpgradeMode};
    use crate::process::mock::MockProcessRunner;

    const REPO: &str = "/home/abus/.nixos";

    fn system(options: SystemOptions) -> Vec<String> {
        system_command(&options, Path::new(REPO))
            .argv()
            .into_iter()
            .map(String::from)
            .collect()
    }

    fn remote(selector: NodeSelector) -> Vec<String> {
        remote_command(&RemoteOptions { selector }, Path::new(REPO))
            .argv()
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_system_defaults() {
        assert_eq!(
            system(SystemOptions::default()),
            ["sudo", "nixos-rebuild", "switch", "--flake", ".#"]
        );
    }

    #[test]
    fn test_system_name_and_upgrade() {
        let options = SystemOptions {
            flake_name: Some("host1".to_string()),
            upgrade: UpgradeMode::Upgrade,
            ..Default::default()
        };
        assert_eq!(
            system(options),
            ["sudo", "nixos-rebuild", "switch", "--upgrade", "--flake", ".#host1"]
        );
    }

    #[test]
    fn test_system_upgrade_all() {
        let options = SystemOptions {
            upgrade: UpgradeMode::UpgradeAll,
            ..Default::default()
        };
        let argv = system(options);
        assert!(argv.contains(&"--upgrade-all".to_string()));
        assert!(!argv.contains(&"--upgrade".to_string()));
    }

    #[test]
    fn test_system_specialisation_before_upgrade() {
        let options = SystemOptions {
            flake_name: Some("laptop".to_string()),
            specialisation: Specialisation::Named("gaming".to_string()),
            upgrade: UpgradeMode::UpgradeAll,
        };
        assert_eq!(
            system(options),
            [
                "sudo",
                "nixos-rebuild",
                "switch",
                "-c",
                "gaming",
                "--upgrade-all",
                "--flake",
                ".#laptop"
            ]
        );
    }

    #[test]
    fn test_system_no_spec_omits_c() {
        let options = SystemOptions {
            specialisation: Specialisation::Disabled,
            ..Default::default()
        };
        let argv = system(options);
        assert!(!argv.contains(&"-c".to_string()));
        assert_eq!(argv[argv.len() - 2..], ["--flake", ".#"]);
    }

    #[test]
    fn test_remote_node() {
        assert_eq!(
            remote(NodeSelector::Node("node-a".to_string())),
            ["nix", "run", "github:serokell/deploy-rs", ".#node-a"]
        );
    }

    #[test]
    fn test_remote_default_and_all_match() {
        let expected = ["nix", "run", "github:serokell/deploy-rs", ".#"];
        assert_eq!(remote(NodeSelector::Default), expected);
        assert_eq!(remote(NodeSelector::All("yes".to_string())), expected);
    }

    #[test]
    fn test_dispatch_runs_in_repo_and_returns_code() {
        // `sudo` is the program, so the mock keys on `nixos-rebuild`.
        let runner = MockProcessRunner::new().with_code("nixos-rebuild", 4);
        let target = Target::System(SystemOptions::default());

        let code = dispatch(&runner, &target, Path::new(REPO)).unwrap();
        assert_eq!(code, 4);

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].cwd(), Path::new(REPO));
    }

    #[test]
    fn test_dispatch_remote_success() {
        let runner = MockProcessRunner::new();
        let target = Target::Remote(RemoteOptions {
            selector: NodeSelector::Node("node-b".to_string()),
        });
        assert_eq!(dispatch(&runner, &target, Path::new(REPO)).unwrap(), 0);
        assert_eq!(
            runner.argvs(),
            vec![vec![
                "nix".to_string(),
                "run".to_string(),
                "github:serokell/deploy-rs".to_string(),
                ".#node-b".to_string()
            ]]
        );
    }
}
