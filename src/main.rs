//! # nix-apply CLI
//!
//! This is the binary entry point for the `nix-apply` command-line tool.
//!
//! Its primary responsibilities are:
//! - Parsing command-line arguments using `clap`.
//! - Executing the commit and deploy phases through the library.
//! - Translating the outcome into the process exit code: clap-style usage
//!   errors exit 2, a failed commit exits with git's code, and a deployment
//!   exits with the deployment tool's code.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use nix_apply::error::Error;
use nix_apply::exit_codes;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    match cli.execute() {
        Ok(code) => to_exit_code(code),
        Err(err) => match err.downcast_ref::<Error>() {
            Some(Error::Usage { message }) => cli::Cli::command()
                .error(ErrorKind::ArgumentConflict, message)
                .exit(),
            Some(error) => {
                eprintln!("Error: {}", error);
                to_exit_code(error.exit_code())
            }
            None => {
                eprintln!("Error: {:#}", err);
                to_exit_code(exit_codes::ERROR)
            }
        },
    }
}

fn to_exit_code(code: i32) -> ExitCode {
    u8::try_from(code)
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}
