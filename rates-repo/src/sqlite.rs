//! SQLite repository adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use rates_types::{Currency, CurrencyCode, RateRepository, RateSnapshot, RepoError};

use crate::types::{DbCurrency, DbRateSnapshot};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl RateRepository for SqliteRepo {
    async fn upsert_currencies(&self, currencies: &[Currency]) -> Result<(), RepoError> {
        if currencies.is_empty() {
            return Ok(());
        }

        // One transaction for the whole batch: either every row lands or
        // none does. The transaction rolls back on drop if not committed.
        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        for currency in currencies {
            sqlx::query(
                r#"INSERT INTO currencies (code, display_name) VALUES (?, ?)
                   ON CONFLICT (code) DO UPDATE SET display_name = excluded.display_name"#,
            )
            .bind(currency.code.as_str())
            .bind(&currency.display_name)
            .execute(&mut *db_tx)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;
        }

        db_tx
            .commit()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))
    }

    async fn list_currencies(&self) -> Result<Vec<Currency>, RepoError> {
        let rows: Vec<DbCurrency> =
            sqlx::query_as(r#"SELECT code, display_name FROM currencies ORDER BY code ASC"#)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbCurrency::into_domain).collect()
    }

    async fn get_currency(&self, code: &CurrencyCode) -> Result<Option<Currency>, RepoError> {
        let row: Option<DbCurrency> =
            sqlx::query_as(r#"SELECT code, display_name FROM currencies WHERE code = ?"#)
                .bind(code.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbCurrency::into_domain).transpose()
    }

    async fn upsert_rate_snapshot(&self, snapshot: &RateSnapshot) -> Result<(), RepoError> {
        let rates_json = serde_json::to_string(&snapshot.rates)
            .map_err(|e| RepoError::Database(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO currency_rates (date, base_currency, rates) VALUES (?, ?, ?)
               ON CONFLICT (date, base_currency) DO UPDATE SET rates = excluded.rates"#,
        )
        .bind(snapshot.date.format("%Y-%m-%d").to_string())
        .bind(snapshot.base.as_str())
        .bind(rates_json)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn get_rate_history(
        &self,
        base: &CurrencyCode,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<RateSnapshot>, RepoError> {
        // ISO TEXT dates compare lexicographically == chronologically.
        let rows: Vec<DbRateSnapshot> = sqlx::query_as(
            r#"SELECT date, base_currency, rates FROM currency_rates
               WHERE base_currency = ? AND date >= ? AND date <= ?
               ORDER BY date ASC"#,
        )
        .bind(base.as_str())
        .bind(from.format("%Y-%m-%d").to_string())
        .bind(to.format("%Y-%m-%d").to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbRateSnapshot::into_domain).collect()
    }
}
