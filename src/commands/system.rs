//! `system` subcommand: activate the configuration on this machine.

use clap::Args;

use nix_apply::error::Result;
use nix_apply::intent::{Specialisation, SystemOptions, UpgradeMode};

/// Arguments for the system command
#[derive(Args, Debug)]
pub struct SystemArgs {
    /// The name of the flake to use
    #[arg(short, long)]
    pub name: Option<String>,

    /// Do not switch to a specialisation
    #[arg(long)]
    pub no_spec: bool,

    /// The name of the specialisation to switch to
    #[arg(short, long)]
    pub spec: Option<String>,

    /// Passes '--upgrade' to nixos-rebuild
    #[arg(long)]
    pub upgrade: bool,

    /// Passes '--upgrade-all' to nixos-rebuild
    #[arg(long)]
    pub upgrade_all: bool,
}

impl SystemArgs {
    /// Validate the flag pairs and build the options.
    pub fn options(&self) -> Result<SystemOptions> {
        let specialisation = Specialisation::from_flags(self.spec.clone(), self.no_spec)?;
        let upgrade = UpgradeMode::from_flags(self.upgrade, self.upgrade_all)?;

        Ok(SystemOptions {
            flake_name: self.name.clone(),
            specialisation,
            upgrade,
        })
    }
}
