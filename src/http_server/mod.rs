//! # HTTP Server Module
//!
//! axum server exposing the notes API.
//!
//! # Endpoints
//!
//! - `/notes`, `/notes/:note_id` - Note CRUD and listing
//! - `/health` - Health check including a database ping
//! - `/metrics` - Request counters
//! - `/v3/api-docs`, `/swagger-ui`, `/swagger-ui.html` - API documentation

pub mod config;
pub mod docs_routes;
pub mod errors;
pub mod notes_routes;
pub mod observability_routes;
pub mod response;
pub mod server;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use response::{ListResponse, NoteResponse};
pub use server::{api_document, api_registry, HttpServer};
