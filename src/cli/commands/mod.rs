//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait and is routed by
//! [`CommandDispatcher`].

pub mod check;
pub mod dispatcher;

pub use check::CheckCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
