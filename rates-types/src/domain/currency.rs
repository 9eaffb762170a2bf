//! Currency identifier and metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Normalized currency identifier: 3-5 lowercase alphanumeric characters.
///
/// All codes are lowercased on entry, so lookups keyed by a `CurrencyCode`
/// are case-insensitive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "eur")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalizes a currency code.
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let normalized = code.trim().to_ascii_lowercase();
        if !(3..=5).contains(&normalized.len())
            || !normalized.bytes().all(|b| b.is_ascii_alphanumeric())
        {
            return Err(DomainError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(normalized))
    }

    /// Returns the normalized code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A currency as persisted: normalized code plus human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: CurrencyCode,
    pub display_name: String,
}

impl Currency {
    pub fn new(code: CurrencyCode, display_name: impl Into<String>) -> Self {
        Self {
            code,
            display_name: display_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_lowercased() {
        let code = CurrencyCode::new("EUR").unwrap();
        assert_eq!(code.as_str(), "eur");
    }

    #[test]
    fn test_code_trims_whitespace() {
        let code = CurrencyCode::new(" usd ").unwrap();
        assert_eq!(code.as_str(), "usd");
    }

    #[test]
    fn test_code_length_bounds() {
        assert!(CurrencyCode::new("eu").is_err());
        assert!(CurrencyCode::new("eur").is_ok());
        assert!(CurrencyCode::new("1inch").is_ok());
        assert!(CurrencyCode::new("toolong").is_err());
    }

    #[test]
    fn test_code_rejects_non_alphanumeric() {
        assert!(CurrencyCode::new("eu-r").is_err());
        assert!(CurrencyCode::new("eu r").is_err());
    }

    #[test]
    fn test_code_equality_ignores_input_case() {
        assert_eq!(
            CurrencyCode::new("EUR").unwrap(),
            CurrencyCode::new("eur").unwrap()
        );
    }
}
