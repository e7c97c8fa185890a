//! In-process routing tests for the mock API, driven through tower without
//! binding a socket.

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::Value;
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

#[tokio::test]
async fn users_get_with_token_returns_success_envelope() {
    let resp = app()
        .oneshot(get("/method/users.get?access_token=token&v=5.35&https=1"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert!(body.get("error").is_none());
    assert_eq!(body["response"][0]["first_name"], "Павел");
}

#[tokio::test]
async fn users_get_without_token_returns_error_envelope() {
    let resp = app()
        .oneshot(get("/method/users.get?v=5.35&https=1"))
        .await
        .unwrap();
    // Logical errors still travel over a 200 response.
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["error"]["error_code"], 5);
    let params = body["error"]["request_params"].as_array().unwrap();
    assert!(params.iter().any(|p| p["key"] == "v"));
}

#[tokio::test]
async fn unknown_method_returns_code_3() {
    let resp = app()
        .oneshot(get("/method/friends.get?access_token=token"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["error"]["error_code"], 3);
    assert_eq!(body["error"]["error_msg"], "Unknown method passed");
}

#[tokio::test]
async fn groups_get_pages_fixture_groups() {
    let resp = app()
        .oneshot(get("/method/groups.get?access_token=token&extended=1"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["response"]["count"], 2);
    assert_eq!(body["response"]["items"][0]["screen_name"], "rustlang");
}

#[tokio::test]
async fn execute_without_code_returns_execute_errors() {
    let resp = app()
        .oneshot(get("/method/execute?access_token=token"))
        .await
        .unwrap();
    let body = body_json(resp).await;
    assert_eq!(body["execute_errors"][0]["error_code"], 100);
}

#[tokio::test]
async fn internal_crash_returns_500() {
    let resp = app().oneshot(get("/method/internal.crash")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
