//! RatesService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use serde_json::json;

    use rates_types::{
        Currency, CurrencyCode, ProviderError, RateDate, RateProvider, RateRepository,
        RateSnapshot, RepoError,
    };

    use crate::RatesService;

    /// Simple in-memory repository for testing the service layer.
    pub struct MockRepo {
        currencies: Mutex<BTreeMap<String, Currency>>,
        snapshots: Mutex<HashMap<(NaiveDate, String), RateSnapshot>>,
        fail_writes: bool,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self {
                currencies: Mutex::new(BTreeMap::new()),
                snapshots: Mutex::new(HashMap::new()),
                fail_writes: false,
            }
        }

        pub fn failing_writes() -> Self {
            Self {
                fail_writes: true,
                ..Self::new()
            }
        }

        pub fn with_currency(self, code: &str, name: &str) -> Self {
            let code = CurrencyCode::new(code).unwrap();
            self.currencies
                .lock()
                .unwrap()
                .insert(code.to_string(), Currency::new(code, name));
            self
        }

        pub fn snapshot_count(&self) -> usize {
            self.snapshots.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RateRepository for MockRepo {
        async fn upsert_currencies(&self, currencies: &[Currency]) -> Result<(), RepoError> {
            if self.fail_writes {
                return Err(RepoError::Database("disk full".into()));
            }
            let mut map = self.currencies.lock().unwrap();
            for currency in currencies {
                map.insert(currency.code.to_string(), currency.clone());
            }
            Ok(())
        }

        async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError> {
            Ok(self.currencies.lock().unwrap().values().cloned().collect())
        }

        async fn get_currency(&self, code: &CurrencyCode) -> Result<Option<Currency>, RepoError> {
            Ok(self.currencies.lock().unwrap().get(code.as_str()).cloned())
        }

        async fn upsert_rate_snapshot(&self, snapshot: &RateSnapshot) -> Result<(), RepoError> {
            if self.fail_writes {
                return Err(RepoError::Database("disk full".into()));
            }
            self.snapshots
                .lock()
                .unwrap()
                .insert((snapshot.date, snapshot.base.to_string()), snapshot.clone());
            Ok(())
        }

        async fn get_rate_history(
            &self,
            base: &CurrencyCode,
            from: NaiveDate,
            to: NaiveDate,
        ) -> Result<Vec<RateSnapshot>, RepoError> {
            let snapshots = self.snapshots.lock().unwrap();
            let mut rows: Vec<RateSnapshot> = snapshots
                .values()
                .filter(|s| s.base == *base && s.date >= from && s.date <= to)
                .cloned()
                .collect();
            rows.sort_by_key(|s| s.date);
            Ok(rows)
        }
    }

    /// Scripted provider: fixed responses plus a call counter, so tests can
    /// assert the provider was never reached on early rejection.
    pub struct MockProvider {
        directory: Result<BTreeMap<String, String>, ProviderError>,
        rates: Result<serde_json::Value, ProviderError>,
        calls: AtomicUsize,
    }

    impl MockProvider {
        pub fn with_rates(rates: serde_json::Value) -> Self {
            Self {
                directory: Ok(BTreeMap::new()),
                rates: Ok(rates),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_directory(entries: &[(&str, &str)]) -> Self {
            Self {
                directory: Ok(entries
                    .iter()
                    .map(|(c, n)| (c.to_string(), n.to_string()))
                    .collect()),
                rates: Ok(json!({})),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn unavailable() -> Self {
            Self {
                directory: Err(ProviderError::Unavailable("connection refused".into())),
                rates: Err(ProviderError::Unavailable("connection refused".into())),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn clone_result<T: Clone>(result: &Result<T, ProviderError>) -> Result<T, ProviderError> {
            match result {
                Ok(v) => Ok(v.clone()),
                Err(ProviderError::Unavailable(msg)) => {
                    Err(ProviderError::Unavailable(msg.clone()))
                }
                Err(ProviderError::Http { status }) => Err(ProviderError::Http { status: *status }),
                Err(ProviderError::Decode(msg)) => Err(ProviderError::Decode(msg.clone())),
            }
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn fetch_currency_directory(
            &self,
        ) -> Result<BTreeMap<String, String>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Self::clone_result(&self.directory)
        }

        async fn fetch_rates(
            &self,
            _date: &RateDate,
            _base: &CurrencyCode,
        ) -> Result<serde_json::Value, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Self::clone_result(&self.rates)
        }
    }

    fn valid_rates_payload() -> serde_json::Value {
        json!({"date": "2026-02-08", "eur": {"usd": 1.18, "gbp": 0.86}})
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // fetch_rates workflow
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_fetch_rates_success_persists_and_projects() {
        let repo = MockRepo::new().with_currency("eur", "Euro");
        let service = RatesService::new(repo, MockProvider::with_rates(valid_rates_payload()));

        let response = service.fetch_rates("2026-02-08", "eur").await.unwrap();

        assert_eq!(response.date, "2026-02-08");
        assert_eq!(response.currency, "eur");
        assert_eq!(response.rates.len(), 2);
        assert_eq!(service.repo().snapshot_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_rates_unknown_currency_rejected_before_io() {
        let repo = MockRepo::new(); // no currencies
        let service = RatesService::new(repo, MockProvider::with_rates(valid_rates_payload()));

        let response = service.fetch_rates("2026-02-08", "eur").await;

        assert!(response.is_none());
        assert_eq!(service.repo().snapshot_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_rates_bad_date_rejected_before_network_call() {
        let repo = MockRepo::new().with_currency("eur", "Euro");
        let provider = MockProvider::with_rates(valid_rates_payload());
        let service = RatesService::new(repo, provider);

        for bad in ["today", "2026/02/08", "08-02-2026", ""] {
            assert!(service.fetch_rates(bad, "eur").await.is_none());
        }

        // provider port was never reached
        assert_eq!(service.provider().call_count(), 0);
        assert_eq!(service.repo().snapshot_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_rates_latest_resolves_and_persists() {
        let repo = MockRepo::new().with_currency("eur", "Euro");
        let service = RatesService::new(repo, MockProvider::with_rates(valid_rates_payload()));

        let response = service.fetch_rates("latest", "eur").await;

        assert!(response.is_some());
        assert_eq!(service.repo().snapshot_count(), 1);
    }

    #[tokio::test]
    async fn test_fetch_rates_provider_failure_yields_none() {
        let repo = MockRepo::new().with_currency("eur", "Euro");
        let service = RatesService::new(repo, MockProvider::unavailable());

        let response = service.fetch_rates("2026-02-08", "eur").await;

        assert!(response.is_none());
        assert_eq!(service.repo().snapshot_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_rates_malformed_payload_writes_nothing() {
        let repo = MockRepo::new().with_currency("eur", "Euro");
        // missing the dynamic rate-map key
        let service =
            RatesService::new(repo, MockProvider::with_rates(json!({"date": "2026-02-08"})));

        let response = service.fetch_rates("2026-02-08", "eur").await;

        assert!(response.is_none());
        assert_eq!(service.repo().snapshot_count(), 0);
    }

    #[tokio::test]
    async fn test_fetch_rates_persist_failure_discards_fetched_data() {
        let repo = MockRepo::failing_writes().with_currency("eur", "Euro");
        let service = RatesService::new(repo, MockProvider::with_rates(valid_rates_payload()));

        let response = service.fetch_rates("2026-02-08", "eur").await;

        // fetched-but-unpersisted data is discarded, not returned
        assert!(response.is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // sync_currencies
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_sync_currencies_persists_and_returns_directory() {
        let repo = MockRepo::new();
        let provider = MockProvider::with_directory(&[("usd", "US Dollar"), ("eur", "Euro")]);
        let service = RatesService::new(repo, provider);

        let synced = service.sync_currencies().await.unwrap();

        assert_eq!(synced.len(), 2);
        assert_eq!(synced[0].code, "eur");
        assert_eq!(synced[0].display_name, "Euro");
        assert_eq!(synced[1].code, "usd");

        let persisted = service.list_currencies().await.unwrap();
        assert_eq!(persisted.len(), 2);
    }

    #[tokio::test]
    async fn test_sync_currencies_skips_malformed_codes() {
        let repo = MockRepo::new();
        let provider =
            MockProvider::with_directory(&[("eur", "Euro"), ("x", "Bogus"), ("toolong7", "Bogus")]);
        let service = RatesService::new(repo, provider);

        let synced = service.sync_currencies().await.unwrap();

        assert_eq!(synced.len(), 1);
        assert_eq!(synced[0].code, "eur");
    }

    #[tokio::test]
    async fn test_sync_currencies_provider_failure_yields_none() {
        let service = RatesService::new(MockRepo::new(), MockProvider::unavailable());

        assert!(service.sync_currencies().await.is_none());
    }

    #[tokio::test]
    async fn test_sync_currencies_persist_failure_yields_none() {
        let repo = MockRepo::failing_writes();
        let provider = MockProvider::with_directory(&[("eur", "Euro")]);
        let service = RatesService::new(repo, provider);

        assert!(service.sync_currencies().await.is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // fetch_rate_history
    // ─────────────────────────────────────────────────────────────────────────────

    async fn seed_history(service: &RatesService<MockRepo, MockProvider>) {
        for date in ["2026-02-08", "2026-02-09", "2026-02-10"] {
            service
                .repo()
                .upsert_rate_snapshot(&RateSnapshot {
                    date: date.parse().unwrap(),
                    base: CurrencyCode::new("eur").unwrap(),
                    rates: [("usd".to_string(), 1.18)].into_iter().collect(),
                })
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_history_returns_rows_ascending() {
        let repo = MockRepo::new().with_currency("eur", "Euro");
        let service = RatesService::new(repo, MockProvider::with_rates(json!({})));
        seed_history(&service).await;

        let history = service
            .fetch_rate_history("eur", "2026-02-08", "2026-02-10")
            .await
            .unwrap();

        assert_eq!(history.len(), 3);
        assert!(history.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[tokio::test]
    async fn test_history_none_when_range_empty() {
        let repo = MockRepo::new().with_currency("eur", "Euro");
        let service = RatesService::new(repo, MockProvider::with_rates(json!({})));

        let history = service
            .fetch_rate_history("eur", "2026-02-08", "2026-02-10")
            .await;

        assert!(history.is_none());
    }

    #[tokio::test]
    async fn test_history_none_for_unknown_currency() {
        let repo = MockRepo::new();
        let service = RatesService::new(repo, MockProvider::with_rates(json!({})));

        let history = service
            .fetch_rate_history("eur", "2026-02-08", "2026-02-10")
            .await;

        assert!(history.is_none());
    }

    #[tokio::test]
    async fn test_history_none_for_invalid_dates() {
        let repo = MockRepo::new().with_currency("eur", "Euro");
        let service = RatesService::new(repo, MockProvider::with_rates(json!({})));
        seed_history(&service).await;

        assert!(service.fetch_rate_history("eur", "bad", "2026-02-10").await.is_none());
        assert!(service.fetch_rate_history("eur", "2026-02-08", "bad").await.is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Demo aggregate
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_list_latest_rates_returns_demo_items() {
        let service = RatesService::new(MockRepo::new(), MockProvider::with_rates(json!({})));

        let data = service.list_latest_rates();

        assert_eq!(data.items.len(), 2);
        let providers: Vec<&str> = data.items.iter().map(|r| r.provider.as_str()).collect();
        assert!(providers.contains(&"swedbank"));
        assert!(providers.contains(&"seb"));
    }

    #[tokio::test]
    async fn test_calculate_average_rate_for_existing_pair() {
        let service = RatesService::new(MockRepo::new(), MockProvider::with_rates(json!({})));

        let result = service.calculate_average_rate("EUR", "USD");

        assert_eq!(result.base_currency, "EUR");
        assert_eq!(result.quote_currency, "USD");
        assert_eq!(result.providers, 2);
        // (1.09 + 1.10) / 2 = 1.095
        assert!((result.average_rate - 1.095).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_calculate_average_rate_for_missing_pair_returns_zero() {
        let service = RatesService::new(MockRepo::new(), MockProvider::with_rates(json!({})));

        let result = service.calculate_average_rate("EUR", "JPY");

        assert_eq!(result.providers, 0);
        assert_eq!(result.average_rate, 0.0);
    }
}
