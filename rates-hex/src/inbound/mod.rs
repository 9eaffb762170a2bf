//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

mod handlers;
mod request_log;
mod server;

pub use server::HttpServer;
