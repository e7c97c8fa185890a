//! Request execution: fixed protocol parameters, canonical URL, one GET,
//! and envelope classification.

use std::fmt;

use url::Url;

use crate::error::Error;
use crate::http::{HttpRequest, HttpTransport};
use crate::request::Request;
use crate::response::{self, Payload};

/// Default API host.
pub const DEFAULT_BASE: &str = "https://api.vk.com";
/// API version sent with every request.
pub const API_VERSION: &str = "5.35";

const METHOD_PATH: &str = "/method/";
const PARAM_VERSION: &str = "v";
const PARAM_HTTPS: &str = "https";
const PARAM_TOKEN: &str = "access_token";

/// Explicit client configuration, constructed once and passed in. There is
/// no ambient default instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base: Url,
    pub version: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_BASE).expect("default API base URL is valid"),
            version: API_VERSION.to_string(),
        }
    }
}

impl ClientConfig {
    /// Configuration pointed at a non-default host, e.g. a test server.
    pub fn with_base(base: Url) -> Self {
        Self { base, ..Self::default() }
    }
}

/// Executes [`Request`] values over an injected transport.
pub struct Client {
    config: ClientConfig,
    transport: Box<dyn HttpTransport>,
}

impl Client {
    pub fn new(transport: Box<dyn HttpTransport>) -> Self {
        Self::with_config(ClientConfig::default(), transport)
    }

    pub fn with_config(config: ClientConfig, transport: Box<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Execute one request: merge the fixed protocol parameters, GET the
    /// canonical URL, and classify the outcome. A non-200 status is reported
    /// without reading the envelope; a 200 body goes through envelope
    /// classification.
    pub fn execute(&self, request: &Request) -> Result<Payload, Error> {
        let url = self.request_url(request);
        tracing::debug!(method = %request.method, url = %url, "executing API request");
        let response = self.transport.get(&HttpRequest { url: url.into() })?;
        if response.status != 200 {
            tracing::debug!(method = %request.method, status = response.status, "bad response status");
            return Err(Error::BadStatus(response.status));
        }
        response::decode(&response.body, request)
    }

    /// Canonical URL for a request: the method name as a path segment under
    /// `/method/`, and the merged parameter map as a query string with keys
    /// in sorted order.
    pub fn request_url(&self, request: &Request) -> Url {
        let mut params = request.params.clone();
        params.put(PARAM_VERSION, self.config.version.as_str());
        params.put(PARAM_HTTPS, true);
        if !request.token.is_empty() {
            params.put(PARAM_TOKEN, request.token.as_str());
        }

        let mut url = self.config.base.clone();
        url.set_path(&format!("{METHOD_PATH}{}", request.method));
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in params.iter() {
                query.append_pair(key, value);
            }
        }
        url
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").field("config", &self.config).finish_non_exhaustive()
    }
}
