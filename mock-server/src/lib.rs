//! In-process stand-in for the remote API, used by integration tests.
//!
//! Serves `GET /method/{name}` with the real envelope contract: every
//! answer is a JSON object carrying exactly one of `response`, `error`, or
//! `execute_errors`. One special method (`internal.crash`) answers with a
//! plain 500 so clients can exercise the non-200 path.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub fn app() -> Router {
    Router::new().route("/method/{name}", get(dispatch))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn dispatch(
    Path(name): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, Json<Value>) {
    if name == "internal.crash" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"detail": "simulated crash"})),
        );
    }

    let body = match name.as_str() {
        "users.get" => users_get(&params),
        "groups.get" => groups_get(&params),
        "groups.getMembers" => members_get(&params),
        "execute" => execute(&params),
        _ => error_envelope(3, "Unknown method passed", &params),
    };
    (StatusCode::OK, Json(body))
}

fn users_get(params: &HashMap<String, String>) -> Value {
    if let Some(err) = require_token(params) {
        return err;
    }
    if params.get("user_ids").map(String::as_str) == Some("404") {
        return error_envelope(113, "Invalid user id", params);
    }
    json!({"response": fixture_users()})
}

fn groups_get(params: &HashMap<String, String>) -> Value {
    if let Some(err) = require_token(params) {
        return err;
    }
    let groups = fixture_groups();
    let count = groups.len();
    json!({"response": {"count": count, "items": groups}})
}

fn members_get(params: &HashMap<String, String>) -> Value {
    if let Some(err) = require_token(params) {
        return err;
    }
    let users = fixture_users();
    let count = users.len();
    json!({"response": {"count": count, "items": users}})
}

fn execute(params: &HashMap<String, String>) -> Value {
    if let Some(err) = require_token(params) {
        return err;
    }
    match params.get("code") {
        Some(code) if !code.is_empty() => {
            let users = fixture_users();
            let count = users.len();
            json!({"response": {"count": count, "items": users}})
        }
        _ => json!({"execute_errors": [
            {"error_code": 100, "error_msg": "One of the parameters specified was missing or invalid: code is missing"}
        ]}),
    }
}

fn require_token(params: &HashMap<String, String>) -> Option<Value> {
    match params.get("access_token") {
        Some(token) if !token.is_empty() => None,
        _ => Some(error_envelope(5, "User authorization failed", params)),
    }
}

/// Single-error envelope echoing the request parameters back as
/// diagnostics, the way the real service does.
fn error_envelope(code: i64, message: &str, params: &HashMap<String, String>) -> Value {
    let mut request_params: Vec<Value> = params
        .iter()
        .map(|(key, value)| json!({"key": key, "value": value}))
        .collect();
    request_params.sort_by(|a, b| a["key"].as_str().cmp(&b["key"].as_str()));
    json!({"error": {
        "error_code": code,
        "error_msg": message,
        "request_params": request_params,
    }})
}

fn fixture_users() -> Vec<Value> {
    vec![
        json!({"id": 1, "first_name": "Павел", "last_name": "Дуров", "sex": 2,
               "country": {"id": 1, "title": "Россия"}}),
        json!({"id": 2, "first_name": "Никита", "last_name": "Слушкин", "sex": 2}),
    ]
}

fn fixture_groups() -> Vec<Value> {
    vec![
        json!({"id": 4189, "name": "Rust", "screen_name": "rustlang",
               "is_closed": 0, "is_member": 1, "members_count": 2,
               "description": "systems programming"}),
        json!({"id": 26188163, "name": "Closed club", "screen_name": "club",
               "is_closed": 1, "is_member": 0, "members_count": 1,
               "deactivated": "banned"}),
    ]
}
