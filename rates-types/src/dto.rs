//! Data Transfer Objects (DTOs) for responses.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Currency, ProviderPayload, RateSnapshot};

// ─────────────────────────────────────────────────────────────────────────────
// Currency DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One persisted currency.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrencyResponse {
    /// Normalized currency code
    #[schema(example = "eur")]
    pub code: String,
    /// Human-readable name
    #[schema(example = "Euro")]
    pub display_name: String,
}

impl From<Currency> for CurrencyResponse {
    fn from(currency: Currency) -> Self {
        Self {
            code: currency.code.to_string(),
            display_name: currency.display_name,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Rates DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// A single quote-currency rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct QuoteRate {
    #[schema(example = "usd")]
    pub code: String,
    #[schema(example = 1.0923)]
    pub rate: f64,
}

/// Rates for one base currency on one day, as returned by a sync request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatesResponse {
    /// The date echoed by the provider
    #[schema(example = "2026-02-08")]
    pub date: String,
    /// The base currency the rates apply to
    #[schema(example = "eur")]
    pub currency: String,
    pub rates: Vec<QuoteRate>,
}

impl From<ProviderPayload> for RatesResponse {
    fn from(payload: ProviderPayload) -> Self {
        Self {
            date: payload.date,
            currency: payload.base,
            rates: payload
                .rates
                .into_iter()
                .map(|(code, rate)| QuoteRate { code, rate })
                .collect(),
        }
    }
}

/// One history entry: the stored rates for a single day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RateHistoryResponse {
    #[schema(value_type = String, example = "2026-02-08")]
    pub date: NaiveDate,
    pub rates: Vec<QuoteRate>,
}

impl From<RateSnapshot> for RateHistoryResponse {
    fn from(snapshot: RateSnapshot) -> Self {
        Self {
            date: snapshot.date,
            rates: snapshot
                .rates
                .into_iter()
                .map(|(code, rate)| QuoteRate { code, rate })
                .collect(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Demo aggregate DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// One provider quote from the in-memory demo set. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CurrencyRate {
    #[schema(example = "swedbank")]
    pub provider: String,
    #[schema(example = "EUR")]
    pub base_currency: String,
    #[schema(example = "USD")]
    pub quote_currency: String,
    #[schema(example = 1.0923)]
    pub rate: f64,
    pub timestamp: DateTime<Utc>,
}

/// The demo rate list.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatesListResponse {
    pub items: Vec<CurrencyRate>,
}

/// Average of the demo quotes matching one currency pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AverageRateResponse {
    #[schema(example = "EUR")]
    pub base_currency: String,
    #[schema(example = "USD")]
    pub quote_currency: String,
    #[schema(example = 1.095)]
    pub average_rate: f64,
    /// Number of provider quotes the average was computed over
    #[schema(example = 2)]
    pub providers: usize,
}
