//! Command-line interface for clustergate.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands};
pub use commands::{Command, CommandDispatcher, CommandResult};
