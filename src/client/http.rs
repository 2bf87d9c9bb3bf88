//! HTTP transport to a remote cluster.
//!
//! Provides a blocking [`RestClient`] over `reqwest`, with optional
//! credentials, a base path for clusters served behind a proxy, and static
//! headers sent with every request.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Url};
use std::time::Duration;

use super::{RestClient, RestResponse};
use crate::error::{GateError, Result};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Error bodies longer than this are truncated in [`GateError::UnexpectedStatus`].
const MAX_ERROR_BODY_CHARS: usize = 256;

/// Credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// `Authorization: Bearer <token>`.
    Bearer(String),
    /// `Authorization: Basic ...`.
    Basic { username: String, password: String },
    /// A custom header carrying a token (e.g. `X-Auth-Token`).
    Header { name: String, value: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Bearer(_) => f.write_str("Bearer(***)"),
            Credentials::Basic { username, .. } => write!(f, "Basic({}:***)", username),
            Credentials::Header { name, .. } => write!(f, "Header({}: ***)", name),
        }
    }
}

/// Builder for [`HttpRestClient`].
#[derive(Debug)]
pub struct HttpRestClientBuilder {
    host: String,
    base_path: Option<String>,
    timeout: Duration,
    credentials: Option<Credentials>,
    headers: Vec<(String, String)>,
}

impl HttpRestClientBuilder {
    /// Prefix every request path with `base_path` (e.g. `/es`).
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Set the request timeout (default 30 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Authenticate every request with `credentials`.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Build the client. Fails with [`GateError::InvalidArgument`] for an
    /// unusable host, header or credential header.
    pub fn build(self) -> Result<HttpRestClient> {
        let base_url = Url::parse(&self.host).map_err(|e| {
            GateError::invalid_argument(format!("invalid host '{}': {}", self.host, e))
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(GateError::invalid_argument(format!(
                "host '{}' must use http or https",
                self.host
            )));
        }

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                GateError::invalid_argument(format!("invalid header name '{}'", name))
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|_| {
                GateError::invalid_argument(format!("invalid value for header '{}'", name))
            })?;
            default_headers.insert(header_name, header_value);
        }

        if let Some(Credentials::Header { name, value }) = &self.credentials {
            HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                GateError::invalid_argument(format!("invalid credential header name '{}'", name))
            })?;
            HeaderValue::from_str(value).map_err(|_| {
                GateError::invalid_argument(format!(
                    "invalid value for credential header '{}'",
                    name
                ))
            })?;
        }

        let client = Client::builder()
            .user_agent(concat!("clustergate/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .default_headers(default_headers)
            .build()?;

        let base_path = self
            .base_path
            .map(|p| p.trim_matches('/').to_string())
            .filter(|p| !p.is_empty());

        Ok(HttpRestClient {
            client,
            base_url,
            base_path,
            timeout: self.timeout,
            credentials: self.credentials,
        })
    }
}

/// Blocking HTTP client for a single remote cluster.
pub struct HttpRestClient {
    client: Client,
    base_url: Url,
    base_path: Option<String>,
    timeout: Duration,
    credentials: Option<Credentials>,
}

impl HttpRestClient {
    /// Create a client for `host` (e.g. `http://localhost:9200`) with the
    /// default 30-second timeout.
    pub fn new(host: &str) -> Result<Self> {
        Self::builder(host).build()
    }

    /// Start building a client for `host`.
    pub fn builder(host: impl Into<String>) -> HttpRestClientBuilder {
        HttpRestClientBuilder {
            host: host.into(),
            base_path: None,
            timeout: DEFAULT_TIMEOUT,
            credentials: None,
            headers: Vec::new(),
        }
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolve the full URL for a request.
    ///
    /// Any path already on the host URL is kept, followed by the base path
    /// and then the request path.
    pub fn url_for(&self, path: &str, params: &[(&str, &str)]) -> Url {
        let mut url = self.base_url.clone();

        let segments: Vec<&str> = [
            self.base_url.path(),
            self.base_path.as_deref().unwrap_or_default(),
            path,
        ]
        .into_iter()
        .map(|part| part.trim_matches('/'))
        .filter(|part| !part.is_empty())
        .collect();
        url.set_path(&format!("/{}", segments.join("/")));

        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params.iter().copied());
        }

        url
    }
}

impl RestClient for HttpRestClient {
    fn perform_request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<RestResponse> {
        let url = self.url_for(path, params);
        let mut request = self.client.request(method, url);

        request = match &self.credentials {
            Some(Credentials::Bearer(token)) => request.bearer_auth(token),
            Some(Credentials::Basic { username, password }) => {
                request.basic_auth(username, Some(password))
            }
            Some(Credentials::Header { name, value }) => request.header(name.as_str(), value),
            None => request,
        };

        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            return Err(GateError::UnexpectedStatus {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        Ok(RestResponse { status, body })
    }
}
