//! HTTP request handlers.
//!
//! Pure translation: URL paths and query parameters in, service calls out.
//! Sync/fetch failures surface as a JSON `null` body with HTTP 200; the
//! failure cause is only visible in the server-side logs.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use rates_types::{
    AppError, AverageRateResponse, CurrencyResponse, RateHistoryResponse, RateProvider,
    RateRepository, RatesListResponse, RatesResponse,
};

use crate::RatesService;

/// Application state shared across handlers.
pub struct AppState<R: RateRepository, P: RateProvider> {
    pub service: RatesService<R, P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Health
// ─────────────────────────────────────────────────────────────────────────────

/// Liveness endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": true }))
}

/// Readiness endpoint.
pub async fn health_ready() -> impl IntoResponse {
    Json(serde_json::json!({ "ready": true }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Currencies
// ─────────────────────────────────────────────────────────────────────────────

/// Triggers a full currency-directory sync from the provider.
#[tracing::instrument(skip(state))]
pub async fn sync_currencies<R: RateRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
) -> Json<Option<Vec<CurrencyResponse>>> {
    Json(state.service.sync_currencies().await)
}

/// Lists persisted currencies.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<R: RateRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
) -> Result<Json<Vec<CurrencyResponse>>, ApiError> {
    let currencies = state.service.list_currencies().await?;
    Ok(Json(currencies))
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct RatesQuery {
    #[serde(default = "default_latest")]
    pub date: String,
}

fn default_latest() -> String {
    "latest".to_string()
}

/// Fetches and persists the rates for one base currency on one date.
#[tracing::instrument(skip(state), fields(currency = %code, date = %query.date))]
pub async fn get_currency_rates<R: RateRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path(code): Path<String>,
    Query(query): Query<RatesQuery>,
) -> Json<Option<RatesResponse>> {
    Json(state.service.fetch_rates(&query.date, &code).await)
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    #[serde(default = "default_latest")]
    pub dateto: String,
}

/// Reads locally-persisted rate history for an inclusive date range.
#[tracing::instrument(skip(state), fields(currency = %code, datefrom = %datefrom, dateto = %query.dateto))]
pub async fn get_rate_history<R: RateRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Path((code, datefrom)): Path<(String, String)>,
    Query(query): Query<HistoryQuery>,
) -> Json<Option<Vec<RateHistoryResponse>>> {
    Json(
        state
            .service
            .fetch_rate_history(&code, &datefrom, &query.dateto)
            .await,
    )
}

// ─────────────────────────────────────────────────────────────────────────────
// Demo aggregate
// ─────────────────────────────────────────────────────────────────────────────

/// Demo in-memory rate list.
pub async fn list_latest_rates<R: RateRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
) -> Json<RatesListResponse> {
    Json(state.service.list_latest_rates())
}

#[derive(Debug, Deserialize)]
pub struct AverageQuery {
    pub base: String,
    pub quote: String,
}

fn require_pair_code(value: &str, name: &str) -> Result<String, AppError> {
    let code = value.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(AppError::BadRequest(format!(
            "`{name}` must be a 3-letter currency code"
        )));
    }
    Ok(code)
}

/// Averages the demo quotes for one currency pair.
#[tracing::instrument(skip(state), fields(base = %query.base, quote = %query.quote))]
pub async fn average_rate<R: RateRepository, P: RateProvider>(
    State(state): State<Arc<AppState<R, P>>>,
    Query(query): Query<AverageQuery>,
) -> Result<Json<AverageRateResponse>, ApiError> {
    let base = require_pair_code(&query.base, "base")?;
    let quote = require_pair_code(&query.quote, "quote")?;

    Ok(Json(state.service.calculate_average_rate(&base, &quote)))
}
