//! Transport to the remote cluster.
//!
//! [`RestClient`] is the contract the version gate consumes: one blocking
//! request, answered either by a successful response or by an error.
//! [`HttpRestClient`] implements it over HTTP/HTTPS.

pub mod http;

pub use http::{Credentials, HttpRestClient, HttpRestClientBuilder, DEFAULT_TIMEOUT};
pub use reqwest::{Method, StatusCode};

use crate::error::Result;

/// A successful response from the remote cluster.
#[derive(Debug, Clone)]
pub struct RestResponse {
    /// HTTP status (always a success status).
    pub status: StatusCode,
    /// Response body as text.
    pub body: String,
}

impl RestResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: body.into(),
        }
    }
}

/// Issues blocking requests against a remote cluster.
///
/// Implementations report connection failures as
/// [`GateError::Transport`](crate::GateError::Transport) and non-2xx answers
/// as [`GateError::UnexpectedStatus`](crate::GateError::UnexpectedStatus),
/// so `Ok` always carries a successful response. Any timeout is the
/// implementation's own.
pub trait RestClient {
    /// Perform `method` against `path` with the given query parameters.
    fn perform_request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<RestResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_response_has_200_status() {
        let response = RestResponse::ok("{}");
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "{}");
    }
}
