//! Bearer-token authentication.
//!
//! Passwords are hashed with Argon2 and never stored or logged in plain
//! form. Access tokens are HS256 JWTs whose subject is the user id; the
//! middleware resolves the token and hands the identity to handlers as an
//! explicit `CurrentUser` extension rather than ambient state.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::main_lib::AppState;

/// The authenticated user id, inserted by the middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub String);

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_lifetime: Duration,
}

impl AuthManager {
    pub fn new(secret: &str, token_lifetime_hours: i64) -> Self {
        AuthManager {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_lifetime: Duration::hours(token_lifetime_hours),
        }
    }

    pub fn hash_password(password: &str) -> Result<String, ApiError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| ApiError::Internal(format!("password hashing failed: {}", e)))
    }

    pub fn verify_password(stored_hash: &str, password: &str) -> bool {
        PasswordHash::new(stored_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }

    pub fn issue_token(&self, user_id: &str) -> Result<String, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.token_lifetime).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("token signing failed: {}", e)))
    }

    /// Validates a token and returns its subject (the user id).
    pub fn verify_token(&self, token: &str) -> Result<String, ApiError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|_| ApiError::Unauthorized("Authentication invalid".to_string()))
    }
}

/// Middleware guarding everything except the auth routes.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("No authentication header".to_string()))?;

    let token = header
        .strip_prefix("Bearer ")
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("No token provided".to_string()))?;

    let user_id = state.auth.verify_token(token)?;

    // The user must still exist; tokens outlive account deletion.
    if state.user_service.get_user(&user_id)?.is_none() {
        return Err(ApiError::Unauthorized("Authentication invalid".to_string()));
    }

    request.extensions_mut().insert(CurrentUser(user_id));
    Ok(next.run(request).await)
}
