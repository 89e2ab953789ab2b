use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use bullionfolio_core::Commodity;

use crate::auth::require_auth;
use crate::main_lib::AppState;

pub mod auth;
pub mod investments;
pub mod rates;
mod shared;

async fn root() -> &'static str {
    "API is running..."
}

pub fn app_router(state: Arc<AppState>) -> Router {
    // Everything except registration/login requires a bearer token.
    let protected = Router::new()
        .nest("/api/gold-rates", rates::router(Commodity::Gold))
        .nest("/api/silver-rates", rates::router(Commodity::Silver))
        .nest("/api/investments", investments::router(Commodity::Gold))
        .nest(
            "/api/silver-investments",
            investments::router(Commodity::Silver),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/", get(root))
        .nest("/api/auth", auth::router())
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
