//! Rate provider port.
//!
//! This trait defines the interface to the external rate-data source.
//! Implementations can be HTTP clients, mock providers, etc.

use std::collections::BTreeMap;

use crate::domain::{CurrencyCode, RateDate};
use crate::error::ProviderError;

/// Port trait for the external rate-data provider.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Fetches the current mapping of currency code -> display name.
    async fn fetch_currency_directory(&self) -> Result<BTreeMap<String, String>, ProviderError>;

    /// Fetches the raw rates document for one base currency on one date.
    ///
    /// The document is returned unvalidated; shape checking is the
    /// synchronization service's responsibility.
    async fn fetch_rates(
        &self,
        date: &RateDate,
        base: &CurrencyCode,
    ) -> Result<serde_json::Value, ProviderError>;
}
