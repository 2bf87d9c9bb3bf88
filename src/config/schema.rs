//! Configuration schema definitions.
//!
//! Maps the YAML file describing one check target.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::client::{Credentials, HttpRestClient, DEFAULT_TIMEOUT};
use crate::error::{GateError, Result};
use crate::gate::VersionGate;
use crate::version::Version;

/// Root configuration for a check target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    /// Resource owner name shown in diagnostics
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Cluster URL, e.g. `http://localhost:9200`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Path prefix when the cluster sits behind a proxy
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,

    /// Lowest cluster version allowed to receive data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_version: Option<Version>,

    /// Request timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Static headers sent with every request
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Credentials
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
}

/// How to authenticate against the cluster.
///
/// Secrets are never stored in the file; they are read from the named
/// environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthConfig {
    Bearer {
        token_env: String,
    },
    Header {
        token_env: String,
        #[serde(default = "default_auth_header")]
        header: String,
    },
    Basic {
        username: String,
        password_env: String,
    },
}

fn default_auth_header() -> String {
    "X-Auth-Token".to_string()
}

impl GateConfig {
    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(mut self, other: GateConfig) -> GateConfig {
        if other.name.is_some() {
            self.name = other.name;
        }
        if other.host.is_some() {
            self.host = other.host;
        }
        if other.base_path.is_some() {
            self.base_path = other.base_path;
        }
        if other.minimum_version.is_some() {
            self.minimum_version = other.minimum_version;
        }
        if other.timeout_secs.is_some() {
            self.timeout_secs = other.timeout_secs;
        }
        if other.auth.is_some() {
            self.auth = other.auth;
        }
        self.headers.extend(other.headers);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    pub fn resource_owner_name(&self) -> &str {
        self.name.as_deref().unwrap_or_default()
    }

    /// Check that the configuration describes a usable target.
    pub fn validate(&self) -> Result<()> {
        let host = self.host.as_deref().map(str::trim).unwrap_or_default();
        if host.is_empty() {
            return Err(GateError::invalid_argument("host is required"));
        }

        let url = reqwest::Url::parse(host)
            .map_err(|e| GateError::invalid_argument(format!("invalid host '{}': {}", host, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(GateError::invalid_argument(format!(
                "host '{}' must use http or https",
                host
            )));
        }

        if self.minimum_version.is_none() {
            return Err(GateError::invalid_argument("minimum version is required"));
        }

        if self.timeout_secs == Some(0) {
            return Err(GateError::invalid_argument("timeout must be at least 1 second"));
        }

        Ok(())
    }

    /// Build the version gate described by this configuration.
    pub fn build_gate(&self) -> Result<VersionGate> {
        let mut builder = VersionGate::builder().resource_owner_name(self.resource_owner_name());
        if let Some(version) = self.minimum_version {
            builder = builder.minimum_version(version);
        }
        builder.build()
    }

    /// Build the HTTP client, resolving secrets from `env_vars` first and the
    /// process environment second.
    pub fn build_client(&self, env_vars: &HashMap<String, String>) -> Result<HttpRestClient> {
        let host = self
            .host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| GateError::invalid_argument("host is required"))?;

        let mut builder = HttpRestClient::builder(host).timeout(self.timeout());
        if let Some(base_path) = &self.base_path {
            builder = builder.base_path(base_path.clone());
        }
        for (name, value) in &self.headers {
            builder = builder.header(name.clone(), value.clone());
        }
        if let Some(credentials) = self
            .auth
            .as_ref()
            .and_then(|auth| resolve_credentials(auth, env_vars))
        {
            builder = builder.credentials(credentials);
        }

        builder.build()
    }
}

/// Resolve credentials from config settings.
///
/// Returns `None` (and warns) when the secret's environment variable is
/// not set.
pub fn resolve_credentials(
    auth: &AuthConfig,
    env_vars: &HashMap<String, String>,
) -> Option<Credentials> {
    let lookup = |name: &str| {
        let value = env_vars
            .get(name)
            .cloned()
            .or_else(|| std::env::var(name).ok());
        if value.is_none() {
            tracing::warn!("Credential variable {} is not set; sending requests without auth", name);
        }
        value
    };

    match auth {
        AuthConfig::Bearer { token_env } => lookup(token_env.as_str()).map(Credentials::Bearer),
        AuthConfig::Header { token_env, header } => {
            lookup(token_env.as_str()).map(|value| Credentials::Header {
                name: header.clone(),
                value,
            })
        }
        AuthConfig::Basic {
            username,
            password_env,
        } => lookup(password_env.as_str()).map(|password| Credentials::Basic {
            username: username.clone(),
            password,
        }),
    }
}
