//! Request date handling: the literal `latest` or a calendar day.

use chrono::NaiveDate;
use std::fmt;

use crate::error::DomainError;

/// The date component of a rates request.
///
/// The upstream CDN templates its URLs with either the literal string
/// `latest` or an ISO `YYYY-MM-DD` day, so both forms are kept distinct
/// until the URL is built; persistence always uses the resolved day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDate {
    Latest,
    Day(NaiveDate),
}

impl RateDate {
    /// Parses `latest` or `YYYY-MM-DD`; anything else is rejected.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        if input == "latest" {
            return Ok(Self::Latest);
        }
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .map(Self::Day)
            .map_err(|_| DomainError::InvalidDate(input.to_string()))
    }

    /// Resolves to a concrete day, substituting `today` for `latest`.
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Self::Latest => today,
            Self::Day(day) => *day,
        }
    }
}

impl fmt::Display for RateDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Day(day) => write!(f, "{}", day.format("%Y-%m-%d")),
        }
    }
}
