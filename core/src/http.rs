//! HTTP transport abstraction.
//!
//! # Design
//! Requests and responses are plain data; the [`HttpTransport`] trait is the
//! single injection point for the actual I/O, so tests can substitute a
//! canned double and applications can supply their own pooled client. The
//! default implementation wraps a ureq agent with status-as-error disabled,
//! because status interpretation belongs to the client, not the transport.

use std::time::Duration;

use crate::error::Error;

/// One outbound API call at the protocol level. The API speaks GET with all
/// inputs in the query string, so the URL is the whole request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
}

/// Protocol-level response: status plus fully-read body.
///
/// The transport must consume and release the connection on every path;
/// handing back an owned body keeps that contract local to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Executes HTTP GET requests. Implementations must be safe to share across
/// threads; the client performs no locking of its own.
pub trait HttpTransport: Send + Sync {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, Error>;
}

/// Default transport backed by a ureq agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn get(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        let mut response = self
            .agent
            .get(&request.url)
            .call()
            .map_err(|e| Error::Transport(Box::new(e)))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| Error::Transport(Box::new(e)))?;
        Ok(HttpResponse { status, body })
    }
}
