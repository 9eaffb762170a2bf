//! # Rates Provider
//!
//! Outbound HTTP adapter: a client for the jsDelivr-hosted `currency-api`
//! CDN, implementing the `RateProvider` port.
//!
//! The CDN serves two resources:
//! - `currency-api@latest/v1/currencies.min.json` - code -> display name
//! - `currency-api@{latest|YYYY-MM-DD}/v1/currencies/{code}.json` - the rate
//!   table for one base currency on one date

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use rates_types::{CurrencyCode, ProviderError, RateDate, RateProvider};

/// Default CDN root for the fawazahmed0 currency API.
pub const DEFAULT_BASE_URL: &str = "https://cdn.jsdelivr.net/npm/@fawazahmed0";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_IDLE_CONNECTIONS: usize = 20;

/// HTTP client for the jsDelivr currency CDN.
///
/// Owns a pooled `reqwest::Client`; connections are reused across requests
/// and returned to the pool on both success and failure paths.
pub struct JsDelivrClient {
    http: reqwest::Client,
    base_url: String,
}

impl JsDelivrClient {
    /// Creates a client against the default CDN root.
    pub fn new() -> anyhow::Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client against a custom root (used by configuration
    /// overrides and tests).
    pub fn with_base_url(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn currencies_path() -> String {
        "currency-api@latest/v1/currencies.min.json".to_string()
    }

    fn rates_path(date: &RateDate, base: &CurrencyCode) -> String {
        format!("currency-api@{date}/v1/currencies/{base}.json")
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ProviderError> {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(%url, "provider request");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[async_trait]
impl RateProvider for JsDelivrClient {
    async fn fetch_currency_directory(&self) -> Result<BTreeMap<String, String>, ProviderError> {
        let value = self.get_json(&Self::currencies_path()).await?;
        serde_json::from_value(value).map_err(|e| ProviderError::Decode(e.to_string()))
    }

    async fn fetch_rates(
        &self,
        date: &RateDate,
        base: &CurrencyCode,
    ) -> Result<serde_json::Value, ProviderError> {
        self.get_json(&Self::rates_path(date, base)).await
    }
}
