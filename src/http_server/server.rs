//! # HTTP Server
//!
//! Main HTTP server combining the notes, observability and documentation
//! routers.

use std::sync::Arc;

use axum::extract::Request;
use axum::Router;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;
use uuid::Uuid;

use super::config::{parse_origin, HttpServerConfig};
use super::docs_routes::{docs_routes, DocsState};
use super::errors::ErrorResponse;
use super::notes_routes::{notes_endpoints, notes_routes, NotesState};
use super::observability_routes::{observability_endpoints, observability_routes, HealthResponse};
use super::response::{ListResponse, NoteResponse};
use crate::model::NoteInput;
use crate::observability::{log_event, Event, MetricsSnapshot};
use crate::openapi::{build_document, ApiInfo, ApiRegistry, RegistryError};
use crate::service::NoteService;
use crate::validation::ValidationError;

/// Contracts of every business and operational endpoint the server mounts
pub fn api_registry() -> Result<ApiRegistry, RegistryError> {
    let mut registry = ApiRegistry::new();
    registry.register_all(notes_endpoints())?;
    registry.register_all(observability_endpoints())?;

    registry.add_schema::<NoteResponse>();
    registry.add_schema::<NoteInput>();
    registry.add_schema::<ListResponse<NoteResponse>>();
    registry.add_schema::<ErrorResponse>();
    registry.add_schema::<ValidationError>();
    registry.add_schema::<HealthResponse>();
    registry.add_schema::<MetricsSnapshot>();
    Ok(registry)
}

/// The OpenAPI document served at `/v3/api-docs`
pub fn api_document() -> Result<Value, RegistryError> {
    Ok(build_document(&api_registry()?, &ApiInfo::default()))
}

/// HTTP server for the notes API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with default configuration
    pub fn new(service: NoteService) -> Result<Self, RegistryError> {
        Self::with_config(HttpServerConfig::default(), service)
    }

    /// Create a new HTTP server with custom configuration
    pub fn with_config(config: HttpServerConfig, service: NoteService) -> Result<Self, RegistryError> {
        let router = Self::build_router(&config, service, api_document()?);
        Ok(Self { config, router })
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, service: NoteService, document: Value) -> Router {
        let notes_state = Arc::new(NotesState::new(service.clone()));
        let docs_state = Arc::new(DocsState::new(document));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|origin| {
                    let value = parse_origin(origin);
                    if value.is_none() {
                        tracing::warn!(origin = %origin.escape_debug(), "ignoring invalid CORS origin");
                    }
                    value
                })
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let trace = TraceLayer::new_for_http()
            .make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    request_id = %Uuid::new_v4(),
                    method = %request.method(),
                    uri = %request.uri(),
                )
            })
            .on_response(DefaultOnResponse::new().level(Level::INFO));

        Router::new()
            .merge(notes_routes(notes_state))
            .merge(observability_routes(service))
            .merge(docs_routes(docs_state))
            .layer(trace)
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until Ctrl-C
    pub async fn serve(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(event = %Event::Serving, %addr, "accepting connections");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    log_event(Event::ShutdownStart);
}
