//! Envelope decoding and classification.
//!
//! # Design
//! Every API call returns one JSON object carrying exactly one of `response`
//! (the payload), `error` (a single server error), or `execute_errors` (a
//! batch of them). The envelope is decoded once, then classified: batch
//! errors win, a non-zero single error code comes next, and whatever remains
//! is the success payload. The payload stays an un-decoded JSON blob so each
//! call site can pick its own shape without this module knowing any of them.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::{ApiError, Error};
use crate::request::Request;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    error: Option<ApiError>,
    #[serde(default)]
    execute_errors: Option<Vec<ApiError>>,
    #[serde(default)]
    response: Option<Box<RawValue>>,
}

/// Raw successful payload, decoded on demand into a method-specific shape.
#[derive(Debug)]
pub struct Payload(Box<RawValue>);

impl Payload {
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        serde_json::from_str(self.0.get()).map_err(Error::from)
    }

    /// Raw JSON text of the payload.
    pub fn as_str(&self) -> &str {
        self.0.get()
    }
}

/// Decode an envelope body and classify it against `request`.
///
/// A structural JSON failure surfaces as [`Error::Decode`]; a non-zero error
/// code (or a non-empty batch error list) becomes a typed server error with
/// the originating request attached. A zero error code is "no error" and
/// falls through to the payload.
pub fn decode(body: &str, request: &Request) -> Result<Payload, Error> {
    let envelope: Envelope = serde_json::from_str(body)?;
    classify(envelope, request)
}

fn classify(envelope: Envelope, request: &Request) -> Result<Payload, Error> {
    if let Some(errors) = envelope.execute_errors {
        if !errors.is_empty() {
            tracing::debug!(method = %request.method, count = errors.len(), "execute errors");
            let errors = errors
                .into_iter()
                .map(|mut e| {
                    e.request = Some(request.clone());
                    e
                })
                .collect();
            return Err(Error::Execute(errors));
        }
    }
    if let Some(mut error) = envelope.error {
        if !error.code.is_none() {
            tracing::debug!(method = %request.method, code = error.code.0, "server error");
            error.request = Some(request.clone());
            return Err(Error::Server(error));
        }
    }
    match envelope.response {
        Some(raw) => Ok(Payload(raw)),
        // A success envelope with no payload field; callers decoding into
        // `()` or `Option<_>` still work.
        None => Ok(Payload(RawValue::from_string("null".to_string())?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, ErrorKind};

    fn request() -> Request {
        Request { method: "users.get".to_string(), ..Request::default() }
    }

    #[test]
    fn success_envelope_yields_payload() {
        let body = r#"{"response": [{"id": 1, "first_name": "Павел", "last_name": "Дуров"}]}"#;
        let payload = decode(body, &request()).unwrap();
        let value: serde_json::Value = payload.decode().unwrap();
        assert_eq!(value[0]["id"], 1);
    }

    #[test]
    fn payload_round_trips() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct Item {
            id: i64,
        }
        let body = r#"{"response": {"id": 7}}"#;
        let item: Item = decode(body, &request()).unwrap().decode().unwrap();
        assert_eq!(item, Item { id: 7 });
        let encoded = serde_json::to_string(&item).unwrap();
        let again: Item = decode(
            &format!(r#"{{"response": {encoded}}}"#),
            &request(),
        )
        .unwrap()
        .decode()
        .unwrap();
        assert_eq!(again, item);
    }

    #[test]
    fn error_envelope_classifies_as_server_error() {
        let body = r#"{"error": {"error_code": 10,
            "error_msg": "Internal server error: could not get application",
            "request_params": [{"key": "method", "value": "users.get"}]}}"#;
        let err = decode(body, &request()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        let server = err.server_error().unwrap();
        assert_eq!(server.code, ErrorCode::INTERNAL_SERVER_ERROR);
        assert_eq!(server.request.as_ref().unwrap().method, "users.get");
        assert_eq!(server.request_params[0].key, "method");
    }

    #[test]
    fn zero_error_code_is_not_an_error() {
        let body = r#"{"error": {"error_code": 0}, "response": 42}"#;
        let payload = decode(body, &request()).unwrap();
        let n: i64 = payload.decode().unwrap();
        assert_eq!(n, 42);
    }

    #[test]
    fn execute_errors_win_over_payload() {
        let body = r#"{"execute_errors": [
            {"error_code": 3, "error_msg": "Unknown method passed"},
            {"error_code": 6}
        ], "response": 1}"#;
        let err = decode(body, &request()).unwrap_err();
        match err {
            Error::Execute(errors) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].code, ErrorCode::UNKNOWN_METHOD);
                assert_eq!(errors[1].code, ErrorCode::TOO_MANY_REQUESTS);
                assert!(errors.iter().all(|e| e.request.is_some()));
            }
            other => panic!("expected execute errors, got {other:?}"),
        }
    }

    #[test]
    fn empty_execute_errors_fall_through_to_payload() {
        let body = r#"{"execute_errors": [], "response": 5}"#;
        let n: i64 = decode(body, &request()).unwrap().decode().unwrap();
        assert_eq!(n, 5);
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = decode("not json", &request()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn missing_payload_decodes_as_null() {
        let payload = decode("{}", &request()).unwrap();
        let value: Option<i64> = payload.decode().unwrap();
        assert!(value.is_none());
    }
}
