//! API documentation routes

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Json, Router};
use serde_json::Value;

use crate::openapi::swagger_ui_html;

pub const API_DOCS_PATH: &str = "/v3/api-docs";
pub const SWAGGER_UI_PATH: &str = "/swagger-ui";
/// springdoc's page name, kept for existing bookmarks
pub const SWAGGER_UI_HTML_PATH: &str = "/swagger-ui.html";

/// Pre-rendered documentation, built once at startup
pub struct DocsState {
    document: Value,
    page: String,
}

impl DocsState {
    pub fn new(document: Value) -> Self {
        let page = swagger_ui_html(
            document["info"]["title"].as_str().unwrap_or("API documentation"),
            API_DOCS_PATH,
        );
        Self { document, page }
    }
}

pub fn docs_routes(state: Arc<DocsState>) -> Router {
    Router::new()
        .route(API_DOCS_PATH, get(api_docs_handler))
        .route(SWAGGER_UI_PATH, get(swagger_ui_handler))
        .route(SWAGGER_UI_HTML_PATH, get(swagger_ui_handler))
        .with_state(state)
}

async fn api_docs_handler(State(state): State<Arc<DocsState>>) -> Json<Value> {
    Json(state.document.clone())
}

async fn swagger_ui_handler(State(state): State<Arc<DocsState>>) -> Html<String> {
    Html(state.page.clone())
}
