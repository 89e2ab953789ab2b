use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router};

use bullionfolio_core::investments::{import, ImportResult, Investment, NewInvestment};
use bullionfolio_core::valuation::{self, PortfolioSummary};
use bullionfolio_core::Commodity;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn get_investments(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Investment>>> {
    let investments = state
        .investment_service
        .list_investments(commodity, &user.0)?;
    Ok(Json(investments))
}

async fn create_investment(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Extension(user): Extension<CurrentUser>,
    Json(input): Json<NewInvestment>,
) -> ApiResult<(StatusCode, Json<Investment>)> {
    let investment = state
        .investment_service
        .create_investment(commodity, &user.0, input)
        .await?;
    Ok((StatusCode::CREATED, Json(investment)))
}

async fn update_investment(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(input): Json<NewInvestment>,
) -> ApiResult<Json<Investment>> {
    let investment = state
        .investment_service
        .replace_investment(commodity, &user.0, &id, input)
        .await?;
    Ok(Json(investment))
}

async fn delete_investment(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .investment_service
        .delete_investment(commodity, &user.0, &id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Portfolio valuation for the dashboard.
///
/// The valuation engine gets the owner's holdings plus the latest closing
/// rate; with no closing rate on record the value and profit fields come
/// back null rather than zero.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<PortfolioSummary>> {
    let investments = state
        .investment_service
        .list_investments(commodity, &user.0)?;
    let current = state.rate_service.get_current_rate(commodity)?;
    let summary = valuation::summarize(&investments, current.map(|r| r.rate_per_gram))?;
    Ok(Json(summary))
}

async fn upload_investments(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<ImportResult>)> {
    let mut file_content: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() == Some("file") {
            file_content = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| {
                        ApiError::BadRequest(format!("Failed to read file content: {}", e))
                    })?
                    .to_vec(),
            );
        }
    }

    let content =
        file_content.ok_or_else(|| ApiError::BadRequest("No file uploaded".to_string()))?;

    let result = state
        .investment_service
        .import_sheet(commodity, &user.0, &content)
        .await?;
    Ok((StatusCode::CREATED, Json(result)))
}

fn csv_attachment(filename: &str, content: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        content,
    )
        .into_response()
}

async fn export_investments(
    State(state): State<Arc<AppState>>,
    Extension(commodity): Extension<Commodity>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Response> {
    let sheet = state.investment_service.export_sheet(commodity, &user.0)?;
    Ok(csv_attachment("Investments_Export.csv", sheet))
}

async fn download_template() -> Response {
    csv_attachment("Investment_Template.csv", import::template_sheet())
}

pub fn router(commodity: Commodity) -> Router<Arc<AppState>> {
    Router::new()
        .route("/template", get(download_template))
        .route("/export", get(export_investments))
        .route("/upload", post(upload_investments))
        .route("/summary", get(get_summary))
        .route("/", get(get_investments).post(create_investment))
        .route("/{id}", put(update_investment).delete(delete_investment))
        .layer(Extension(commodity))
}
