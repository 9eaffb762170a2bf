//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use rates_types::{RateProvider, RateRepository};

use super::handlers::{self, AppState};
use super::request_log::request_log_middleware;
use crate::RatesService;
use crate::openapi::ApiDoc;

/// HTTP Server for the Rates API.
pub struct HttpServer<R: RateRepository, P: RateProvider> {
    state: Arc<AppState<R, P>>,
}

impl<R: RateRepository, P: RateProvider> HttpServer<R, P> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: RatesService<R, P>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        let api_v1 = Router::new()
            .route(
                "/rates/currencies/sync",
                post(handlers::sync_currencies::<R, P>),
            )
            .route("/rates/currencies", get(handlers::list_currencies::<R, P>))
            .route(
                "/rates/currencies/rates/{code}",
                get(handlers::get_currency_rates::<R, P>),
            )
            .route(
                "/rates/currencies/rates/history/{code}/{datefrom}",
                get(handlers::get_rate_history::<R, P>),
            )
            .route("/rates/latest", get(handlers::list_latest_rates::<R, P>))
            .route("/rates/average", get(handlers::average_rate::<R, P>));

        Router::new()
            .route("/health", get(handlers::health))
            .route("/health/ready", get(handlers::health_ready))
            .nest("/api/v1", api_v1)
            .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
            .layer(middleware::from_fn(request_log_middleware))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
