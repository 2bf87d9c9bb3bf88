//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::GateConfig;
use crate::version::Version;

/// clustergate - Verify a cluster meets a minimum version before exporting to it.
#[derive(Debug, Parser)]
#[command(name = "clustergate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check that a cluster runs at least the minimum version
    Check(CheckArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Path to a YAML target configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Cluster URL (overrides config)
    #[arg(long, env = "CLUSTERGATE_HOST")]
    pub host: Option<String>,

    /// Lowest supported cluster version (overrides config)
    #[arg(short, long, env = "CLUSTERGATE_MINIMUM_VERSION")]
    pub minimum_version: Option<Version>,

    /// Name of the cluster shown in diagnostics (overrides config)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Path prefix when the cluster sits behind a proxy (overrides config)
    #[arg(long)]
    pub base_path: Option<String>,

    /// Request timeout in seconds (overrides config)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Output the verdict as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckArgs {
    /// Flag values as a config overlay.
    pub fn overrides(&self) -> GateConfig {
        GateConfig {
            name: self.name.clone(),
            host: self.host.clone(),
            base_path: self.base_path.clone(),
            minimum_version: self.minimum_version,
            timeout_secs: self.timeout,
            ..Default::default()
        }
    }
}
