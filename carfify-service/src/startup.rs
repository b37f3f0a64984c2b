//! Application startup and lifecycle management.

use crate::config::CarfifyConfig;
use crate::handlers;
use crate::services::{DiagnosisEngine, DiagnosisTable};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    cors::{cors_middleware, CorsConfig},
    metrics::metrics_middleware,
    security_headers::security_headers_middleware,
    tracing::{make_request_span, request_id_middleware},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
///
/// The engine (and its rule table) is built once and only ever read.
#[derive(Clone)]
pub struct AppState {
    pub config: CarfifyConfig,
    pub engine: Arc<DiagnosisEngine>,
}

impl AppState {
    pub fn new(config: CarfifyConfig, engine: Arc<DiagnosisEngine>) -> Self {
        Self { config, engine }
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsConfig::new(state.config.frontend_origin.clone());

    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/report",
            post(handlers::report).fallback(handlers::method_not_allowed),
        )
        .route("/health", get(handlers::health_check))
        .route("/metrics", get(handlers::metrics))
        .route("/api/symptoms", get(handlers::list_symptoms))
        .route(
            "/api/diagnosis",
            post(handlers::diagnose).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn_with_state(cors, cors_middleware))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        // Outermost so the trace span sees the request id
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: CarfifyConfig) -> Result<Self, AppError> {
        let engine = Arc::new(DiagnosisEngine::new(DiagnosisTable::default()));
        tracing::info!(
            rules = engine.catalogue().len(),
            frontend_origin = %config.frontend_origin,
            "Diagnosis table loaded"
        );

        // Port 0 = random port for testing
        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let router = build_router(AppState::new(config, engine));

        Ok(Self {
            port,
            listener,
            router,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        tracing::info!("Listening on port {}", self.port);

        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
