// Not every test binary uses every helper.
#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use bullionfolio_server::api::app_router;
use bullionfolio_server::build_state;
use bullionfolio_server::config::Config;

/// Builds an app over a throwaway database. The TempDir must be kept alive
/// for the duration of the test.
pub async fn test_app() -> (TempDir, Router) {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        jwt_secret: "test-signing-secret".to_string(),
        token_lifetime_hours: 1,
    };
    let state = build_state(&config).await.unwrap();
    (tmp, app_router(state))
}

pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn json_request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Registers a user and returns their bearer token.
pub async fn register(app: &Router, email: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            serde_json::json!({
                "name": "Test User",
                "email": email,
                "password": "super-secret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let json = body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}
