//! Check command implementation.
//!
//! The `clustergate check` command runs the minimum version gate once
//! against a cluster and reports the verdict through its exit code.

use std::collections::HashMap;
use std::io::Write;

use crate::cli::args::CheckArgs;
use crate::config::{load_config, GateConfig};
use crate::error::Result;

use super::dispatcher::{Command, CommandResult, EXIT_NOT_SUPPORTED};

/// The check command implementation.
pub struct CheckCommand {
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(args: CheckArgs) -> Self {
        Self { args }
    }

    /// Config file (if any) overlaid with command-line flags.
    pub fn resolve_config(&self) -> Result<GateConfig> {
        let base = match &self.args.config {
            Some(path) => load_config(path)?,
            None => GateConfig::default(),
        };
        Ok(base.merge(self.args.overrides()))
    }
}

impl Command for CheckCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = self.resolve_config()?;
        config.validate()?;

        let gate = config.build_gate()?;
        let client = config.build_client(&HashMap::new())?;

        tracing::debug!(
            "Checking [{}] at {} against minimum version [{}]",
            gate.resource_owner_name(),
            config.host.as_deref().unwrap_or_default(),
            gate.minimum_version()
        );

        let supported = gate.check(&client);

        if self.args.json {
            let report = serde_json::json!({
                "name": gate.resource_owner_name(),
                "host": config.host,
                "minimum_version": gate.minimum_version(),
                "supported": supported,
            });
            writeln!(out, "{}", report)?;
        } else if supported {
            writeln!(
                out,
                "Cluster supports minimum version {}",
                gate.minimum_version()
            )?;
        } else {
            writeln!(
                out,
                "Cluster does NOT support minimum version {}",
                gate.minimum_version()
            )?;
        }

        if supported {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(EXIT_NOT_SUPPORTED))
        }
    }
}
