//! Daily rate snapshots and validation of the provider's payload shape.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::currency::CurrencyCode;
use crate::error::DomainError;

/// The full set of quote rates for one base currency on one day.
///
/// At most one snapshot exists per `(date, base)` pair; re-syncing the same
/// pair overwrites `rates` (last-write-wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSnapshot {
    pub date: NaiveDate,
    pub base: CurrencyCode,
    pub rates: BTreeMap<String, f64>,
}

/// A validated provider rates document.
///
/// The upstream payload is a JSON object with a `date` echo plus exactly one
/// dynamic key (the base currency) holding a map of quote-code -> rate:
///
/// ```json
/// {"date": "2026-02-08", "eur": {"usd": 1.18, "gbp": 0.86}}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderPayload {
    /// The `date` field as echoed by the provider.
    pub date: String,
    /// The dynamic key, i.e. the base currency the provider answered for.
    pub base: String,
    /// Quote-code -> rate. All rates are positive finite numbers.
    pub rates: BTreeMap<String, f64>,
}

impl ProviderPayload {
    /// Validates the raw provider document.
    ///
    /// The cardinality constraint is asserted explicitly: exactly one
    /// non-`date` key must be present. Rates must be positive finite
    /// numbers; anything else rejects the whole document.
    pub fn parse(value: &Value) -> Result<Self, DomainError> {
        let object = value
            .as_object()
            .ok_or_else(|| DomainError::SchemaMismatch("payload is not an object".into()))?;

        let date = object
            .get("date")
            .and_then(Value::as_str)
            .ok_or_else(|| DomainError::SchemaMismatch("missing string `date` field".into()))?
            .to_string();

        let mut dynamic = object.iter().filter(|(key, _)| key.as_str() != "date");
        let (base, rate_map) = dynamic
            .next()
            .ok_or_else(|| DomainError::SchemaMismatch("missing rate-map key".into()))?;
        if dynamic.next().is_some() {
            return Err(DomainError::SchemaMismatch(
                "expected exactly one rate-map key".into(),
            ));
        }

        let rate_map = rate_map.as_object().ok_or_else(|| {
            DomainError::SchemaMismatch(format!("`{base}` is not a rate map"))
        })?;

        let mut rates = BTreeMap::new();
        for (quote, rate) in rate_map {
            let rate = rate.as_f64().filter(|r| r.is_finite() && *r > 0.0).ok_or_else(|| {
                DomainError::SchemaMismatch(format!("rate for `{quote}` is not a positive number"))
            })?;
            rates.insert(quote.clone(), rate);
        }

        Ok(Self {
            date,
            base: base.clone(),
            rates,
        })
    }
}
