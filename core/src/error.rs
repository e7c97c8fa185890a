//! Error model: the documented server error-code table, structured server
//! errors, and the library-level error enum.
//!
//! # Design
//! Three failure paths are kept distinct (see [`ErrorKind`]): the transport
//! failed or the server answered non-200, the envelope did not parse, or a
//! well-formed envelope carried a logical error. Nothing here retries or
//! swallows; every value propagates to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request::Request;

/// Numeric error code from the API's published error table.
///
/// Zero is reserved as "no error" and is never surfaced to callers. Unknown
/// codes are kept verbatim so future additions degrade gracefully.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ErrorCode(pub i32);

impl ErrorCode {
    pub const NONE: ErrorCode = ErrorCode(0);
    pub const UNKNOWN: ErrorCode = ErrorCode(1);
    pub const APPLICATION_DISABLED: ErrorCode = ErrorCode(2);
    pub const UNKNOWN_METHOD: ErrorCode = ErrorCode(3);
    pub const INVALID_SIGNATURE: ErrorCode = ErrorCode(4);
    pub const AUTH_FAILED: ErrorCode = ErrorCode(5);
    pub const TOO_MANY_REQUESTS: ErrorCode = ErrorCode(6);
    pub const INSUFFICIENT_PERMISSIONS: ErrorCode = ErrorCode(7);
    pub const INVALID_REQUEST: ErrorCode = ErrorCode(8);
    pub const TOO_MANY_SIMILAR_REQUESTS: ErrorCode = ErrorCode(9);
    pub const INTERNAL_SERVER_ERROR: ErrorCode = ErrorCode(10);
    pub const APP_IN_TEST_MODE: ErrorCode = ErrorCode(11);
    pub const CAPTCHA_NEEDED: ErrorCode = ErrorCode(12);
    pub const NOT_ALLOWED: ErrorCode = ErrorCode(13);
    pub const HTTPS_ONLY: ErrorCode = ErrorCode(14);
    pub const NEED_VALIDATION: ErrorCode = ErrorCode(15);
    pub const STANDALONE_ONLY: ErrorCode = ErrorCode(16);
    pub const STANDALONE_OPEN_API_ONLY: ErrorCode = ErrorCode(17);
    pub const METHOD_DISABLED: ErrorCode = ErrorCode(18);
    pub const NEED_CONFIRMATION: ErrorCode = ErrorCode(19);
    pub const PARAMETER_INVALID: ErrorCode = ErrorCode(100);
    pub const INVALID_API_ID: ErrorCode = ErrorCode(101);
    pub const INVALID_USER_ID: ErrorCode = ErrorCode(113);
    pub const INVALID_TIMESTAMP: ErrorCode = ErrorCode(150);
    pub const ALBUM_ACCESS_PROHIBITED: ErrorCode = ErrorCode(200);
    pub const GROUP_ACCESS_PROHIBITED: ErrorCode = ErrorCode(203);
    pub const ALBUM_FULL: ErrorCode = ErrorCode(300);
    pub const MONEY_TRANSFER_NOT_ALLOWED: ErrorCode = ErrorCode(500);
    pub const INSUFFICIENT_PERMISSIONS_ADS: ErrorCode = ErrorCode(600);
    pub const INTERNAL_SERVER_ERROR_ADS: ErrorCode = ErrorCode(603);

    /// True for the reserved "no error" value.
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Documented human-readable message, when one is known for this code.
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::UNKNOWN => Some("Unknown error occurred, try again later"),
            Self::APPLICATION_DISABLED => Some("Application disabled"),
            Self::UNKNOWN_METHOD => Some("Unknown method passed"),
            Self::AUTH_FAILED => Some("User authorization failed"),
            Self::TOO_MANY_REQUESTS => Some("Too many requests per second"),
            Self::INSUFFICIENT_PERMISSIONS => {
                Some("Insufficient permissions, use account.getAppPermissions")
            }
            Self::INTERNAL_SERVER_ERROR => Some("Internal server error"),
            Self::CAPTCHA_NEEDED => Some("Captcha needed"),
            Self::HTTPS_ONLY => Some("HTTPS required"),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorCode {
    /// Renders `"<message> (<code>)"` for documented codes and the bare
    /// decimal code otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.message() {
            Some(msg) => write!(f, "{} ({})", msg, self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// One key/value pair of request diagnostics echoed back by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParam {
    pub key: String,
    pub value: String,
}

/// Structured error reported by the server inside a well-formed envelope.
///
/// `request` is attached client-side after classification so the failing
/// call can be identified programmatically; it never comes off the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(rename = "error_code", default)]
    pub code: ErrorCode,
    #[serde(rename = "error_msg", default)]
    pub message: String,
    #[serde(rename = "request_params", default)]
    pub request_params: Vec<RequestParam>,
    #[serde(skip)]
    pub request: Option<Request>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl std::error::Error for ApiError {}

fn join_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(ApiError::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors surfaced by the client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network-level failure; the underlying transport error is preserved.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server answered with a non-200 status. The body is not parsed.
    #[error("bad response status: {0}")]
    BadStatus(u16),

    /// The body was not a valid JSON envelope.
    #[error("invalid response envelope: {0}")]
    Decode(#[from] serde_json::Error),

    /// Logical error reported by the server.
    #[error("server error: {0}")]
    Server(ApiError),

    /// Per-call errors from a batch ("execute") request.
    #[error("execute errors: {}", join_errors(.0))]
    Execute(Vec<ApiError>),
}

/// Coarse classification of an [`Error`], independent of how it was built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Network failure or non-200 status.
    Transport,
    /// Malformed envelope.
    Decode,
    /// Server-reported logical error, single or batched.
    Server,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(_) | Error::BadStatus(_) => ErrorKind::Transport,
            Error::Decode(_) => ErrorKind::Decode,
            Error::Server(_) | Error::Execute(_) => ErrorKind::Server,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.kind() == ErrorKind::Server
    }

    /// Structured server error, when this value came from the server-error
    /// path. Batch errors expose their first entry.
    pub fn server_error(&self) -> Option<&ApiError> {
        match self {
            Error::Server(e) => Some(e),
            Error::Execute(errors) => errors.first(),
            _ => None,
        }
    }

    /// Server error code, when one applies.
    pub fn code(&self) -> Option<ErrorCode> {
        self.server_error().map(|e| e.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_code_renders_message_and_code() {
        assert_eq!(
            ErrorCode::APPLICATION_DISABLED.to_string(),
            "Application disabled (2)"
        );
        assert_eq!(
            ErrorCode::TOO_MANY_REQUESTS.to_string(),
            "Too many requests per second (6)"
        );
    }

    #[test]
    fn unmapped_code_renders_bare_number() {
        assert_eq!(ErrorCode(42).to_string(), "42");
        assert_eq!(ErrorCode::INVALID_TIMESTAMP.to_string(), "150");
    }

    #[test]
    fn zero_code_is_reserved() {
        assert!(ErrorCode::NONE.is_none());
        assert!(ErrorCode::default().is_none());
        assert!(!ErrorCode::UNKNOWN.is_none());
    }

    #[test]
    fn code_parses_from_bare_json_number() {
        let code: ErrorCode = serde_json::from_str("1").unwrap();
        assert_eq!(code, ErrorCode::UNKNOWN);
    }

    #[test]
    fn api_error_parses_from_envelope_fragment() {
        let raw = r#"{
            "error_code": 10,
            "error_msg": "Internal server error: could not get application",
            "request_params": [
                {"key": "oauth", "value": "1"},
                {"key": "method", "value": "users.get"}
            ]
        }"#;
        let e: ApiError = serde_json::from_str(raw).unwrap();
        assert_eq!(e.code, ErrorCode::INTERNAL_SERVER_ERROR);
        assert_eq!(e.request_params.len(), 2);
        assert_eq!(e.request_params[0].key, "oauth");
        assert!(e.request.is_none());
    }

    #[test]
    fn kinds_partition_the_variants() {
        let transport = Error::Transport("boom".into());
        let status = Error::BadStatus(400);
        let decode = Error::Decode(serde_json::from_str::<i32>("x").unwrap_err());
        let server = Error::Server(ApiError {
            code: ErrorCode::CAPTCHA_NEEDED,
            ..ApiError::default()
        });
        assert_eq!(transport.kind(), ErrorKind::Transport);
        assert_eq!(status.kind(), ErrorKind::Transport);
        assert_eq!(decode.kind(), ErrorKind::Decode);
        assert_eq!(server.kind(), ErrorKind::Server);
        assert!(!transport.is_server_error());
        assert!(server.is_server_error());
    }

    #[test]
    fn server_error_extraction_is_a_capability_check() {
        let err = Error::Server(ApiError {
            code: ErrorCode::TOO_MANY_REQUESTS,
            message: "Too many requests per second".to_string(),
            ..ApiError::default()
        });
        assert_eq!(err.code(), Some(ErrorCode::TOO_MANY_REQUESTS));
        assert!(Error::BadStatus(500).server_error().is_none());
        assert!(Error::BadStatus(500).code().is_none());
    }

    #[test]
    fn execute_errors_expose_first_entry() {
        let err = Error::Execute(vec![
            ApiError { code: ErrorCode::UNKNOWN_METHOD, ..ApiError::default() },
            ApiError { code: ErrorCode::AUTH_FAILED, ..ApiError::default() },
        ]);
        assert_eq!(err.code(), Some(ErrorCode::UNKNOWN_METHOD));
        assert!(err.is_server_error());
    }

    #[test]
    fn display_formats_are_stable() {
        let err = Error::Server(ApiError {
            code: ErrorCode::CAPTCHA_NEEDED,
            ..ApiError::default()
        });
        assert_eq!(err.to_string(), "server error: Captcha needed (12)");
        assert_eq!(Error::BadStatus(400).to_string(), "bad response status: 400");
    }
}
