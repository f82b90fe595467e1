//! `remote` subcommand: deploy to other machines with deploy-rs.

use clap::Args;

use nix_apply::error::Result;
use nix_apply::intent::{NodeSelector, RemoteOptions};

/// Arguments for the remote command
#[derive(Args, Debug)]
pub struct RemoteArgs {
    /// Deploy to all nodes
    #[arg(long)]
    pub all: Option<String>,

    /// The node to deploy to
    pub node: Option<String>,
}

impl RemoteArgs {
    pub fn options(&self) -> Result<RemoteOptions> {
        Ok(RemoteOptions {
            selector: NodeSelector::from_flags(self.node.clone(), self.all.clone())?,
        })
    }
}
