//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use rates_types::dto::{
    AverageRateResponse, CurrencyRate, CurrencyResponse, QuoteRate, RateHistoryResponse,
    RatesListResponse, RatesResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is alive", body = inline(serde_json::Value), example = json!({"status": true}))
    )
)]
async fn health() {}

/// Readiness probe
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Service is ready", body = inline(serde_json::Value), example = json!({"ready": true}))
    )
)]
async fn health_ready() {}

/// Sync the currency directory from the upstream CDN
#[utoipa::path(
    post,
    path = "/api/v1/rates/currencies/sync",
    tag = "currencies",
    responses(
        (status = 200, description = "Synced currency list, or null when the sync failed", body = Option<Vec<CurrencyResponse>>)
    )
)]
async fn sync_currencies() {}

/// List persisted currencies
#[utoipa::path(
    get,
    path = "/api/v1/rates/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "All persisted currencies sorted by code", body = Vec<CurrencyResponse>)
    )
)]
async fn list_currencies() {}

/// Fetch and persist rates for one base currency
#[utoipa::path(
    get,
    path = "/api/v1/rates/currencies/rates/{code}",
    tag = "rates",
    params(
        ("code" = String, Path, description = "Base currency code"),
        ("date" = Option<String>, Query, description = "`latest` (default) or YYYY-MM-DD")
    ),
    responses(
        (status = 200, description = "Validated rates, or null on any failure", body = Option<RatesResponse>)
    )
)]
async fn get_currency_rates() {}

/// Read locally-persisted rate history
#[utoipa::path(
    get,
    path = "/api/v1/rates/currencies/rates/history/{code}/{datefrom}",
    tag = "rates",
    params(
        ("code" = String, Path, description = "Base currency code"),
        ("datefrom" = String, Path, description = "`latest` or YYYY-MM-DD, inclusive"),
        ("dateto" = Option<String>, Query, description = "`latest` (default) or YYYY-MM-DD, inclusive")
    ),
    responses(
        (status = 200, description = "Ascending history entries, or null when nothing matches", body = Option<Vec<RateHistoryResponse>>)
    )
)]
async fn get_rate_history() {}

/// Demo in-memory rate list
#[utoipa::path(
    get,
    path = "/api/v1/rates/latest",
    tag = "rates",
    responses(
        (status = 200, description = "Fixed demo quote set", body = RatesListResponse)
    )
)]
async fn list_latest_rates() {}

/// Average rate over the demo quotes for one pair
#[utoipa::path(
    get,
    path = "/api/v1/rates/average",
    tag = "rates",
    params(
        ("base" = String, Query, description = "3-letter base currency code"),
        ("quote" = String, Query, description = "3-letter quote currency code")
    ),
    responses(
        (status = 200, description = "Average and provider count", body = AverageRateResponse),
        (status = 400, description = "Invalid currency pair")
    )
)]
async fn average_rate() {}

/// OpenAPI documentation for the Rates API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Rates Service API",
        version = "1.0.0",
        description = "A small currency-exchange-rate API: syncs currency and rate data from a third-party JSON CDN, persists daily snapshots idempotently, and serves them back.",
    ),
    paths(
        health,
        health_ready,
        sync_currencies,
        list_currencies,
        get_currency_rates,
        get_rate_history,
        list_latest_rates,
        average_rate,
    ),
    components(
        schemas(
            CurrencyResponse,
            QuoteRate,
            RatesResponse,
            RateHistoryResponse,
            CurrencyRate,
            RatesListResponse,
            AverageRateResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency directory sync and listing"),
        (name = "rates", description = "Rate fetch, history and demo aggregate"),
    )
)]
pub struct ApiDoc;
