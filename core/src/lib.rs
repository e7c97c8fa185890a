//! Synchronous client for the VK HTTP/JSON API.
//!
//! # Overview
//! The library builds authenticated requests from typed parameters, executes
//! them over an injectable HTTP transport, and decodes the JSON envelope into
//! either a raw payload or a typed error. It also computes the browser
//! authorization URL for the OAuth implicit flow.
//!
//! # Design
//! - [`Request`] values are transport-neutral and immutable once built.
//! - [`Client`] owns the one network side effect: a single GET per call,
//!   through the [`HttpTransport`] trait so tests can inject doubles.
//! - The envelope carries exactly one of a payload, a server error, or a
//!   list of batch errors; classification lives in [`response`].
//! - Errors keep their origin visible ([`ErrorKind`]): transport, decode,
//!   or server-logical. No retries, no backoff; rate-limit codes are
//!   ordinary typed errors for the caller to handle.

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod groups;
pub mod http;
pub mod request;
pub mod response;
pub mod scope;
pub mod types;
pub mod users;
pub mod video;

pub use api::{Api, Resource};
pub use auth::Auth;
pub use client::{Client, ClientConfig, API_VERSION, DEFAULT_BASE};
pub use error::{ApiError, Error, ErrorCode, ErrorKind, RequestParam};
pub use http::{HttpRequest, HttpResponse, HttpTransport, UreqTransport};
pub use request::{ParamValue, Params, QueryParams, Request, RequestFactory};
pub use response::Payload;
pub use scope::{Permission, Scope};
pub use types::ApiBool;
