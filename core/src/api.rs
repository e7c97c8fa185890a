//! Top-level API entry point and the shared resource bundle behind each
//! API area.
//!
//! # Design
//! A [`Resource`] is explicit composition: a transport-backed [`Client`]
//! plus a token-carrying [`RequestFactory`]. Each API area (`groups`,
//! `users`, `video`) holds one and nothing else.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::client::{Client, ClientConfig};
use crate::error::Error;
use crate::groups::Groups;
use crate::http::{HttpTransport, UreqTransport};
use crate::request::{QueryParams, RequestFactory};
use crate::response::Payload;
use crate::users::Users;
use crate::video::Video;

/// Capability bundle shared by the API areas: request building plus
/// execution. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Resource {
    client: Arc<Client>,
    factory: RequestFactory,
}

impl Resource {
    pub fn new(client: Arc<Client>, factory: RequestFactory) -> Self {
        Self { client, factory }
    }

    /// Build and execute a method call, returning the raw payload.
    pub fn execute<Q: QueryParams>(&self, method: &str, args: &Q) -> Result<Payload, Error> {
        let request = self.factory.request(method, args);
        self.client.execute(&request)
    }

    /// Build, execute, and decode a method call in one step.
    pub fn call<T, Q>(&self, method: &str, args: &Q) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: QueryParams,
    {
        self.execute(method, args)?.decode()
    }
}

/// Authenticated handle on the API, bundling the per-area wrappers.
#[derive(Debug)]
pub struct Api {
    pub groups: Groups,
    pub users: Users,
    pub video: Video,
}

impl Api {
    /// Handle with the default configuration and transport.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_parts(
            ClientConfig::default(),
            Box::new(UreqTransport::new()),
            token,
        )
    }

    /// Handle over an explicit configuration and transport; used by tests
    /// and by applications bringing their own HTTP client.
    pub fn with_parts(
        config: ClientConfig,
        transport: Box<dyn HttpTransport>,
        token: impl Into<String>,
    ) -> Self {
        let client = Arc::new(Client::with_config(config, transport));
        let resource = Resource::new(client, RequestFactory::new(token));
        Self {
            groups: Groups::new(resource.clone()),
            users: Users::new(resource.clone()),
            video: Video::new(resource),
        }
    }
}
