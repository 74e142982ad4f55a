//! Observability HTTP Routes
//!
//! HTTP endpoints for system observability including health checks and metrics.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::observability::MetricsSnapshot;
use crate::openapi::{ApiSchema, EndpointDoc, HttpMethod};
use crate::service::NoteService;

const TAG: &str = "operations";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

impl ApiSchema for HealthResponse {
    const NAME: &'static str = "Health";

    fn schema() -> Value {
        json!({
            "type": "object",
            "required": ["status", "version", "database"],
            "properties": {
                "status": {"type": "string", "enum": ["UP", "DOWN"]},
                "version": {"type": "string"},
                "database": {"type": "string", "enum": ["UP", "DOWN"]},
            },
        })
    }
}

impl ApiSchema for MetricsSnapshot {
    const NAME: &'static str = "Metrics";

    fn schema() -> Value {
        let counter = json!({"type": "integer", "format": "int64", "minimum": 0});
        json!({
            "type": "object",
            "properties": {
                "notes_created": counter,
                "notes_read": counter,
                "notes_updated": counter,
                "notes_deleted": counter,
                "lists_served": counter,
                "validation_rejections": counter,
                "not_found": counter,
                "storage_failures": counter,
            },
        })
    }
}

/// Create observability routes
pub fn observability_routes(service: NoteService) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(Arc::new(service))
}

/// Contracts of the routes mounted by `observability_routes`
pub fn observability_endpoints() -> Vec<EndpointDoc> {
    vec![
        EndpointDoc::new(HttpMethod::Get, "/health", "health")
            .summary("Service and database liveness.")
            .tag(TAG)
            .json_response::<HealthResponse>(200, "Service is up.")
            .json_response::<HealthResponse>(503, "Database is unreachable."),
        EndpointDoc::new(HttpMethod::Get, "/metrics", "metrics")
            .summary("Request counters since startup.")
            .tag(TAG)
            .json_response::<MetricsSnapshot>(200, "Counter snapshot."),
    ]
}

/// Health check handler
async fn health_handler(State(service): State<Arc<NoteService>>) -> impl IntoResponse {
    let (status, label) = match service.ping().await {
        Ok(()) => (StatusCode::OK, "UP"),
        Err(err) => {
            tracing::error!(error = %err, "health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "DOWN")
        }
    };

    let response = HealthResponse {
        status: label.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: label.to_string(),
    };

    (status, Json(response))
}

/// Metrics handler - returns counters as JSON
async fn metrics_handler(State(service): State<Arc<NoteService>>) -> Json<MetricsSnapshot> {
    Json(service.metrics().snapshot())
}
