mod common;

use axum::http::Method;
use common::*;
use tower::ServiceExt;

#[tokio::test]
async fn register_login_and_access_protected_route() {
    let (_tmp, app) = test_app().await;

    // Protected routes reject anonymous requests.
    let response = app
        .clone()
        .oneshot(get_request("/api/investments", None))
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // Registration returns the public profile and a usable token.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            serde_json::json!({
                "name": "Asha",
                "email": "asha@example.com",
                "password": "super-secret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 201);
    let json = body_json(response).await;
    assert_eq!(json["user"]["name"], "Asha");
    assert_eq!(json["user"]["email"], "asha@example.com");
    assert!(json["user"].get("passwordHash").is_none());
    let token = json["token"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(get_request("/api/investments", Some(&token)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    // Login with the right password issues a fresh token.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/auth/login",
            None,
            serde_json::json!({
                "email": "asha@example.com",
                "password": "super-secret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let login_json = body_json(response).await;
    let login_token = login_json["token"].as_str().unwrap();

    let response = app
        .oneshot(get_request("/api/silver-investments", Some(login_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email_alike() {
    let (_tmp, app) = test_app().await;
    register(&app, "asha@example.com").await;

    for (email, password) in [
        ("asha@example.com", "wrong-password"),
        ("nobody@example.com", "super-secret"),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/auth/login",
                None,
                serde_json::json!({ "email": email, "password": password }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), 401);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid credentials");
    }
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() {
    let (_tmp, app) = test_app().await;
    register(&app, "asha@example.com").await;

    let response = app
        .oneshot(json_request(
            Method::POST,
            "/api/auth/register",
            None,
            serde_json::json!({
                "name": "Impostor",
                "email": "Asha@Example.com",
                "password": "other-password",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 409);
}

#[tokio::test]
async fn garbage_tokens_are_unauthorized() {
    let (_tmp, app) = test_app().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/investments", Some("not-a-jwt")))
        .await
        .unwrap();
    assert_eq!(response.status(), 401);

    // A well-formed token signed with another key is also rejected.
    let forged = jsonwebtoken_forge();
    let response = app
        .oneshot(get_request("/api/investments", Some(&forged)))
        .await
        .unwrap();
    assert_eq!(response.status(), 401);
}

fn jsonwebtoken_forge() -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    #[derive(serde::Serialize)]
    struct Claims {
        sub: String,
        iat: i64,
        exp: i64,
    }
    encode(
        &Header::default(),
        &Claims {
            sub: "user-1".to_string(),
            iat: 0,
            exp: i64::MAX,
        },
        &EncodingKey::from_secret(b"some-other-secret"),
    )
    .unwrap()
}
