use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Extension, Json, Router};
use rust_decimal::Decimal;

use bullionfolio_core::rates::{NewRate, Rate, RateKind};
use bullionfolio_core::units::RateBasis;
use bullionfolio_core::Commodity;

use super::shared::parse_instant_optional;
use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddRateBody {
    value: Decimal,
    #[serde(default)]
    basis: RateBasis,
    kind: RateKind,
    /// RFC 3339 or YYYY-MM-DD; defaults to now.
    date: Option<String>,
}

#[derive(serde::Deserialize)]
struct HistoryQuery {
    days: Option<i64>,
}

async fn add_rate(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<AddRateBody>,
) -> ApiResult<(StatusCode, Json<Rate>)> {
    let date = parse_instant_optional(body.date, "date")?;
    let rate = state
        .rate_service
        .add_rate(
            commodity,
            Some(user.0),
            NewRate {
                value: body.value,
                basis: body.basis,
                kind: body.kind,
                date,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(rate)))
}

async fn get_current_rate(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
) -> ApiResult<Json<Rate>> {
    state
        .rate_service
        .get_current_rate(commodity)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("No closing rate found".to_string()))
}

async fn get_rate_history(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<Rate>>> {
    let rates = state.rate_service.get_rate_history(commodity, query.days)?;
    Ok(Json(rates))
}

async fn delete_rate(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.rate_service.delete_rate(commodity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router(commodity: Commodity) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(add_rate))
        .route("/current", get(get_current_rate))
        .route("/history", get(get_rate_history))
        .route("/{id}", delete(delete_rate))
        .layer(Extension(commodity))
}
