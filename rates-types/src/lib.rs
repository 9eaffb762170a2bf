//! # Rates Types
//!
//! Domain types and port traits for the currency rates service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, Currency, RateSnapshot)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{Currency, CurrencyCode, ProviderPayload, RateDate, RateSnapshot};
pub use dto::*;
pub use error::{AppError, DomainError, ProviderError, RepoError, SyncError};
pub use ports::{RateProvider, RateRepository};
