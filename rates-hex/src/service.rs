//! Rate Synchronization Service
//!
//! Orchestrates the core workflow: validate inputs, fetch from the provider,
//! validate the payload shape, persist idempotently, shape the response.
//! Contains NO infrastructure logic - both the repository and the provider
//! are injected through their ports.
//!
//! Every failure branch is recovered locally: the public operations degrade
//! to `None` and the cause lands in the server-side logs keyed by the
//! operation's date/currency identifiers. Callers never see a raw fault.

use chrono::Utc;

use rates_types::{
    AppError, Currency, CurrencyCode, CurrencyRate, ProviderPayload, RateDate, RateProvider,
    RateRepository, RateSnapshot, SyncError,
};
use rates_types::{
    AverageRateResponse, CurrencyResponse, RateHistoryResponse, RatesListResponse, RatesResponse,
};

/// Application service for currency and rate operations.
///
/// Generic over `R: RateRepository` and `P: RateProvider` - adapters are
/// injected at compile time. This enables:
/// - Swapping the database or the upstream client without code changes
/// - Testing with in-memory mocks
/// - Compile-time checks for port implementation
pub struct RatesService<R: RateRepository, P: RateProvider> {
    repo: R,
    provider: P,
}

impl<R: RateRepository, P: RateProvider> RatesService<R, P> {
    /// Creates a new service with the given repository and provider.
    pub fn new(repo: R, provider: P) -> Self {
        Self { repo, provider }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Returns a reference to the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency directory
    // ─────────────────────────────────────────────────────────────────────────────

    /// Syncs the full currency directory from the provider into the store.
    ///
    /// Returns the synced set sorted by code, or `None` on fetch or persist
    /// failure.
    pub async fn sync_currencies(&self) -> Option<Vec<CurrencyResponse>> {
        match self.try_sync_currencies().await {
            Ok(currencies) => Some(currencies),
            Err(e) => {
                tracing::warn!(error = %e, "currency sync failed");
                None
            }
        }
    }

    async fn try_sync_currencies(&self) -> Result<Vec<CurrencyResponse>, SyncError> {
        let directory = self.provider.fetch_currency_directory().await?;

        // Directory keys outside the 3-5 char alphanumeric shape are skipped
        // rather than failing the whole sync.
        let mut currencies = Vec::with_capacity(directory.len());
        for (raw_code, display_name) in directory {
            match CurrencyCode::new(&raw_code) {
                Ok(code) => currencies.push(Currency::new(code, display_name)),
                Err(_) => tracing::debug!(code = %raw_code, "skipping malformed directory code"),
            }
        }

        self.repo.upsert_currencies(&currencies).await?;

        Ok(currencies.into_iter().map(Into::into).collect())
    }

    /// Pure read-through: all persisted currencies, sorted by code.
    pub async fn list_currencies(&self) -> Result<Vec<CurrencyResponse>, AppError> {
        let currencies = self.repo.list_currencies().await?;
        Ok(currencies.into_iter().map(Into::into).collect())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Rate synchronization workflow
    // ─────────────────────────────────────────────────────────────────────────────

    /// Fetches, validates and persists the rates for `(date, code)`.
    ///
    /// `date` is the literal `latest` or `YYYY-MM-DD`; `code` must resolve
    /// to a known currency. Any failure along the workflow yields `None`
    /// with no partial state persisted.
    pub async fn fetch_rates(&self, date: &str, code: &str) -> Option<RatesResponse> {
        match self.try_fetch_rates(date, code).await {
            Ok(response) => Some(response),
            Err(e) => {
                tracing::warn!(date, currency = code, error = %e, "rate fetch failed");
                None
            }
        }
    }

    async fn try_fetch_rates(&self, date: &str, code: &str) -> Result<RatesResponse, SyncError> {
        // 1. Validate inputs - rejected before any IO.
        let date = RateDate::parse(date)?;
        let code = CurrencyCode::new(code)?;

        self.repo
            .get_currency(&code)
            .await?
            .ok_or_else(|| SyncError::InvalidInput(format!("unknown currency: {code}")))?;

        // 2. Fetch.
        let raw = self.provider.fetch_rates(&date, &code).await?;

        // 3. Validate shape.
        let payload = ProviderPayload::parse(&raw)?;

        // 4. Persist, keyed by the resolved request date.
        let snapshot = RateSnapshot {
            date: date.resolve(Utc::now().date_naive()),
            base: code,
            rates: payload.rates.clone(),
        };
        self.repo.upsert_rate_snapshot(&snapshot).await?;

        // 5. Project the validated rates back to the caller.
        Ok(payload.into())
    }

    /// Reads locally-persisted history for `code` between two dates
    /// (inclusive). Does not backfill missing days from the provider.
    ///
    /// Returns `None` when dates are invalid, the currency is unknown, or
    /// no rows match the range.
    pub async fn fetch_rate_history(
        &self,
        code: &str,
        date_from: &str,
        date_to: &str,
    ) -> Option<Vec<RateHistoryResponse>> {
        match self.try_fetch_rate_history(code, date_from, date_to).await {
            Ok(history) if history.is_empty() => {
                tracing::info!(currency = code, date_from, date_to, "no history for range");
                None
            }
            Ok(history) => Some(history),
            Err(e) => {
                tracing::warn!(currency = code, date_from, date_to, error = %e, "history fetch failed");
                None
            }
        }
    }

    async fn try_fetch_rate_history(
        &self,
        code: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<Vec<RateHistoryResponse>, SyncError> {
        let code = CurrencyCode::new(code)?;
        let today = Utc::now().date_naive();
        let from = RateDate::parse(date_from)?.resolve(today);
        let to = RateDate::parse(date_to)?.resolve(today);

        self.repo
            .get_currency(&code)
            .await?
            .ok_or_else(|| SyncError::InvalidInput(format!("unknown currency: {code}")))?;

        let history = self.repo.get_rate_history(&code, from, to).await?;

        Ok(history.into_iter().map(Into::into).collect())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Demo aggregate (in-memory, never persisted)
    // ─────────────────────────────────────────────────────────────────────────────

    /// Returns the fixed demo quote set.
    pub fn list_latest_rates(&self) -> RatesListResponse {
        let now = Utc::now();

        RatesListResponse {
            items: vec![
                CurrencyRate {
                    provider: "swedbank".to_string(),
                    base_currency: "EUR".to_string(),
                    quote_currency: "USD".to_string(),
                    rate: 1.09,
                    timestamp: now,
                },
                CurrencyRate {
                    provider: "seb".to_string(),
                    base_currency: "EUR".to_string(),
                    quote_currency: "USD".to_string(),
                    rate: 1.10,
                    timestamp: now,
                },
            ],
        }
    }

    /// Averages the demo quotes matching the pair. Zero matches yield an
    /// average of 0.0 with a provider count of 0, never a division fault.
    pub fn calculate_average_rate(&self, base: &str, quote: &str) -> AverageRateResponse {
        let data = self.list_latest_rates();

        let matching: Vec<f64> = data
            .items
            .iter()
            .filter(|r| r.base_currency == base && r.quote_currency == quote)
            .map(|r| r.rate)
            .collect();

        let providers = matching.len();
        let average_rate = if providers == 0 {
            0.0
        } else {
            matching.iter().sum::<f64>() / providers as f64
        };

        AverageRateResponse {
            base_currency: base.to_string(),
            quote_currency: quote.to_string(),
            average_rate,
            providers,
        }
    }
}
