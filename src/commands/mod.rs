//! # CLI Command Implementations
//!
//! Each deployment target has its own module holding the `clap` arguments
//! for its subcommand and the conversion of those arguments into validated
//! options. Both targets then run through [`apply::execute`], which performs
//! the commit phase and the deployment.

pub mod apply;
pub mod remote;
pub mod system;
