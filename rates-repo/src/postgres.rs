//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use rates_types::{Currency, CurrencyCode, RateRepository, RateSnapshot, RepoError};

use crate::types::{DbCurrency, DbRateSnapshot};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    // Strip line comments so a leading comment doesn't mask a statement.
    let sql: String = sql
        .lines()
        .filter(|line| !line.trim_start().starts_with("--"))
        .collect::<Vec<_>>()
        .join("\n");

    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_tables_pg.sql"),
            "0001",
        )
        .await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl RateRepository for PostgresRepo {
    async fn upsert_currencies(&self, currencies: &[Currency]) -> Result<(), RepoError> {
        if currencies.is_empty() {
            return Ok(());
        }

        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::Transaction(e.to_string()))?;

        for currency in currencies {
            sqlx::query(
                r#"INSERT INTO currencies (code, display_name) VALUES ($1, $2)
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
            sqlx::query_as(r#"SELECT code, display_name FROM currencies WHERE code = $1"#)
                .bind(code.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbCurrency::into_domain).transpose()
    }

    async fn upsert_rate_snapshot(&self, snapshot: &RateSnapshot) -> Result<(), RepoError> {
        let rates_json = serde_json::to_value(&snapshot.rates)
            .map_err(|e| RepoError::Database(e.to_string()))?;

        sqlx::query(
            r#"INSERT INTO currency_rates (date, base_currency, rates) VALUES ($1, $2, $3)
               ON CONFLICT (date, base_currency) DO UPDATE SET rates = excluded.rates"#,
        )
        .bind(snapshot.date)
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
        let rows: Vec<DbRateSnapshot> = sqlx::query_as(
            r#"SELECT date, base_currency, rates FROM currency_rates
               WHERE base_currency = $1 AND date >= $2 AND date <= $3
               ORDER BY date ASC"#,
        )
        .bind(base.as_str())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbRateSnapshot::into_domain).collect()
    }
}
