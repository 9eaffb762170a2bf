//! # Rates Hex
//!
//! Application service layer and HTTP adapter for the rates service.
//!
//! ## Architecture
//!
//! - `service` - Application service (the rate synchronization workflow)
//! - `inbound/` - HTTP adapter (Axum server, handlers, request logging)
//!
//! The service is generic over `R: RateRepository` and `P: RateProvider`,
//! allowing different repository and provider implementations to be injected.

pub mod inbound;
mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::RatesService;
