//! Configuration for a check target.
//!
//! A target is described by a small YAML file:
//!
//! ```yaml
//! name: monitoring
//! host: http://localhost:9200
//! minimum_version: 6.3.0
//! ```
//!
//! - Schema definitions and client/gate construction in [`schema`]
//! - File loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use clustergate::config::parse_config;
//! use std::path::Path;
//!
//! let config = parse_config(
//!     "host: http://localhost:9200\nminimum_version: 6.3.0\n",
//!     Path::new("clustergate.yml"),
//! )
//! .unwrap();
//! config.validate().unwrap();
//!
//! let gate = config.build_gate().unwrap();
//! assert_eq!(gate.minimum_version().to_string(), "6.3.0");
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, parse_config};
pub use schema::{resolve_credentials, AuthConfig, GateConfig};
