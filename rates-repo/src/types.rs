//! Shared database row types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use rates_types::{Currency, CurrencyCode, RateSnapshot, RepoError};

#[cfg(not(feature = "sqlite"))]
use chrono::NaiveDate;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Currency row from database.
#[derive(FromRow)]
pub struct DbCurrency {
    pub code: String,
    pub display_name: String,
}

impl DbCurrency {
    pub fn into_domain(self) -> Result<Currency, RepoError> {
        let code = CurrencyCode::new(&self.code)
            .map_err(|e| RepoError::Database(format!("corrupt currency row: {e}")))?;
        Ok(Currency::new(code, self.display_name))
    }
}

/// Rate snapshot row from database.
#[derive(FromRow)]
pub struct DbRateSnapshot {
    #[cfg(not(feature = "sqlite"))]
    pub date: NaiveDate,
    #[cfg(feature = "sqlite")]
    pub date: String,

    pub base_currency: String,

    #[cfg(not(feature = "sqlite"))]
    pub rates: serde_json::Value,
    #[cfg(feature = "sqlite")]
    pub rates: String,
}

impl DbRateSnapshot {
    pub fn into_domain(self) -> Result<RateSnapshot, RepoError> {
        let base = CurrencyCode::new(&self.base_currency)
            .map_err(|e| RepoError::Database(format!("corrupt snapshot row: {e}")))?;

        #[cfg(not(feature = "sqlite"))]
        let (date, rates) = (
            self.date,
            serde_json::from_value(self.rates)
                .map_err(|e| RepoError::Database(format!("corrupt rates column: {e}")))?,
        );

        #[cfg(feature = "sqlite")]
        let (date, rates) = (
            self.date
                .parse()
                .map_err(|e| RepoError::Database(format!("corrupt date column: {e}")))?,
            serde_json::from_str(&self.rates)
                .map_err(|e| RepoError::Database(format!("corrupt rates column: {e}")))?,
        );

        Ok(RateSnapshot { date, base, rates })
    }
}
