//! Domain models for the currency rates service.

pub mod currency;
pub mod date;
pub mod snapshot;

pub use currency::{Currency, CurrencyCode};
pub use date::RateDate;
pub use snapshot::{ProviderPayload, RateSnapshot};
