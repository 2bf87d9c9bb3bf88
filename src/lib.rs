//! clustergate - Minimum version gate for clusters that receive exported data.
//!
//! Before a monitoring exporter publishes to a remote cluster it must know
//! the cluster is new enough to accept what it sends. clustergate asks the
//! cluster for its version and turns the answer, or the lack of one, into a
//! single verdict.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`client`] - Transport contract and HTTP implementation
//! - [`config`] - Target configuration loading and validation
//! - [`error`] - Error types and result aliases
//! - [`gate`] - The minimum version gate
//! - [`resource`] - Contract used by orchestrators to run checks
//! - [`version`] - Cluster version parsing and ordering
//!
//! # Example
//!
//! ```
//! use clustergate::client::{Method, RestClient, RestResponse};
//! use clustergate::gate::VersionGate;
//! use clustergate::version::Version;
//!
//! struct Cluster;
//!
//! impl RestClient for Cluster {
//!     fn perform_request(
//!         &self,
//!         _method: Method,
//!         _path: &str,
//!         _params: &[(&str, &str)],
//!     ) -> clustergate::Result<RestResponse> {
//!         Ok(RestResponse::ok(r#"{"version":{"number":"7.3.1"}}"#))
//!     }
//! }
//!
//! let gate = VersionGate::new("monitoring", Version::new(6, 3, 0));
//! assert!(gate.check(&Cluster));
//! ```

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod resource;
pub mod version;

pub use error::{GateError, Result};
pub use gate::VersionGate;
pub use resource::HttpResource;
pub use version::Version;
