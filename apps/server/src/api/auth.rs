use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};

use bullionfolio_core::users::NewUser;

use crate::auth::AuthManager;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{AuthResponse, AuthUser};

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody {
    name: String,
    email: String,
    password: String,
}

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    email: String,
    password: String,
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterBody>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    if body.password.is_empty() {
        return Err(ApiError::BadRequest("Password must not be empty".to_string()));
    }
    let password_hash = AuthManager::hash_password(&body.password)?;
    let user = state
        .user_service
        .register(NewUser {
            name: body.name,
            email: body.email,
            password_hash,
        })
        .await?;
    let token = state.auth.issue_token(&user.id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: AuthUser::from(&user),
            token,
        }),
    ))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginBody>,
) -> ApiResult<Json<AuthResponse>> {
    // One failure message for unknown email and wrong password alike, so
    // the endpoint is not an account-existence oracle.
    let invalid = || ApiError::Unauthorized("Invalid credentials".to_string());

    let user = state
        .user_service
        .find_by_email(&body.email)?
        .ok_or_else(invalid)?;
    if !AuthManager::verify_password(&user.password_hash, &body.password) {
        return Err(invalid());
    }

    let token = state.auth.issue_token(&user.id)?;
    Ok(Json(AuthResponse {
        user: AuthUser::from(&user),
        token,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
