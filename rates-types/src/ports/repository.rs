//! Repository port trait.
//!
//! This is the primary persistence port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) implement this trait.

use chrono::NaiveDate;

use crate::domain::{Currency, CurrencyCode, RateSnapshot};
use crate::error::RepoError;

/// Persistence port for currencies and daily rate snapshots.
///
/// Every operation is atomic: batch writes run in a single transaction and
/// are never partially applied, single-row upserts rely on the store's
/// uniqueness constraint for insert-or-overwrite semantics.
#[async_trait::async_trait]
pub trait RateRepository: Send + Sync + 'static {
    /// Writes all currencies in one batch; on conflict by code the
    /// display name is overwritten. No-op on empty input.
    async fn upsert_currencies(&self, currencies: &[Currency]) -> Result<(), RepoError>;

    /// Lists all currencies ordered ascending by code.
    async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError>;

    /// Looks up a single currency. Codes are normalized lowercase before
    /// they reach the repository, so the lookup is case-insensitive.
    async fn get_currency(&self, code: &CurrencyCode) -> Result<Option<Currency>, RepoError>;

    /// Upserts one snapshot keyed by `(date, base)`; on conflict the stored
    /// rate map is overwritten (last-write-wins).
    async fn upsert_rate_snapshot(&self, snapshot: &RateSnapshot) -> Result<(), RepoError>;

    /// Returns snapshots for `base` with `from <= date <= to`, ascending by
    /// date. Empty when nothing matches.
    async fn get_rate_history(
        &self,
        base: &CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RateSnapshot>, RepoError>;
}
