//! Minimum version gate.
//!
//! [`VersionGate`] asks a remote cluster for its version and reports whether
//! it is on or after a configured minimum. Every failure (unreachable
//! cluster, error status, malformed body, unparsable version) is logged and
//! reported as "not supported"; nothing is returned to the caller except the
//! verdict.
//!
//! # Example
//!
//! ```no_run
//! use clustergate::client::HttpRestClient;
//! use clustergate::gate::VersionGate;
//! use clustergate::version::Version;
//!
//! let client = HttpRestClient::new("http://localhost:9200").unwrap();
//! let gate = VersionGate::new("monitoring", Version::new(6, 3, 0));
//!
//! if gate.check(&client) {
//!     println!("ready to publish");
//! }
//! ```

use serde_json::Value;
use tracing::{debug, error};

use crate::client::{Method, RestClient};
use crate::error::{GateError, Result};
use crate::resource::HttpResource;
use crate::version::Version;

/// Path of the endpoint that reports the cluster version.
pub const VERSION_PATH: &str = "/";

/// Parameters sent with every version request to limit the response to the
/// version number.
pub const VERSION_PARAMETERS: &[(&str, &str)] = &[("filter_path", "version.number")];

/// Verifies that a remote cluster runs at least a minimum version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionGate {
    resource_owner_name: String,
    minimum_version: Version,
}

impl VersionGate {
    /// Create a gate for `resource_owner_name` requiring `minimum_version`.
    pub fn new(resource_owner_name: impl Into<String>, minimum_version: Version) -> Self {
        Self {
            resource_owner_name: resource_owner_name.into(),
            minimum_version,
        }
    }

    /// Start a builder; use it when the minimum version may be absent.
    pub fn builder() -> VersionGateBuilder {
        VersionGateBuilder::default()
    }

    /// Label used in diagnostics.
    pub fn resource_owner_name(&self) -> &str {
        &self.resource_owner_name
    }

    /// The version the cluster must be on or after.
    pub fn minimum_version(&self) -> Version {
        self.minimum_version
    }

    /// Check whether the cluster behind `client` is on or after the minimum
    /// version.
    ///
    /// Emits exactly one log event: debug when supported, error otherwise.
    pub fn check<C: RestClient + ?Sized>(&self, client: &C) -> bool {
        match self.probe_remote_version(client) {
            Ok(version) if version.on_or_after(&self.minimum_version) => {
                debug!(
                    "version [{}] >= [{}] and supported for [{}]",
                    version, self.minimum_version, self.resource_owner_name
                );
                true
            }
            Ok(version) => {
                error!(
                    "version [{}] < [{}] and NOT supported for [{}]",
                    version, self.minimum_version, self.resource_owner_name
                );
                false
            }
            Err(e) if e.is_transport() => {
                error!(
                    "failed to verify minimum version [{}] on the [{}] cluster: {}",
                    self.minimum_version, self.resource_owner_name, e
                );
                false
            }
            Err(e) => {
                error!(
                    "unable to read version of the [{}] cluster while verifying minimum version [{}]: {}",
                    self.resource_owner_name, self.minimum_version, e
                );
                false
            }
        }
    }

    /// One round trip: request the version, extract it, parse it.
    pub(crate) fn probe_remote_version<C: RestClient + ?Sized>(&self, client: &C) -> Result<Version> {
        let response = client.perform_request(Method::GET, VERSION_PATH, VERSION_PARAMETERS)?;
        let number = extract_version_number(&response.body)?;
        Version::parse(&number)
    }
}

impl HttpResource for VersionGate {
    fn resource_owner_name(&self) -> &str {
        &self.resource_owner_name
    }

    fn check(&self, client: &dyn RestClient) -> bool {
        VersionGate::check(self, client)
    }
}

/// Pull `version.number` out of a response body.
///
/// Other fields are ignored; the filter parameter only shrinks the payload.
fn extract_version_number(body: &str) -> Result<String> {
    let document: Value = serde_json::from_str(body).map_err(|e| GateError::MalformedResponse {
        message: format!("response is not JSON: {}", e),
    })?;

    match document.pointer("/version/number") {
        Some(Value::String(number)) => Ok(number.clone()),
        Some(other) => Err(GateError::MalformedResponse {
            message: format!("'version.number' is not a string: {}", other),
        }),
        None => Err(GateError::MalformedResponse {
            message: "response has no 'version.number'".to_string(),
        }),
    }
}

/// Builder for [`VersionGate`] when the minimum version may be absent.
#[derive(Debug, Default)]
pub struct VersionGateBuilder {
    resource_owner_name: Option<String>,
    minimum_version: Option<Version>,
}

impl VersionGateBuilder {
    /// Set the diagnostics label (defaults to empty).
    pub fn resource_owner_name(mut self, name: impl Into<String>) -> Self {
        self.resource_owner_name = Some(name.into());
        self
    }

    /// Set the required minimum version.
    pub fn minimum_version(mut self, version: Version) -> Self {
        self.minimum_version = Some(version);
        self
    }

    /// Build the gate. Fails with [`GateError::InvalidArgument`] if no
    /// minimum version was set.
    pub fn build(self) -> Result<VersionGate> {
        let minimum_version = self
            .minimum_version
            .ok_or_else(|| GateError::invalid_argument("minimum version is required"))?;

        Ok(VersionGate::new(
            self.resource_owner_name.unwrap_or_default(),
            minimum_version,
        ))
    }
}
