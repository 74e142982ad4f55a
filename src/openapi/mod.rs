//! Machine-readable API description
//!
//! Endpoint contracts are declared by the route modules and rendered into
//! an OpenAPI 3.0 document plus a browsable Swagger UI page.

mod document;
mod registry;
mod schema;
mod ui;

pub use document::{build_document, ApiInfo, OPENAPI_VERSION};
pub use registry::{
    ApiRegistry, EndpointDoc, HttpMethod, ParamDoc, ParamLocation, RegistryError, ResponseDoc,
};
pub use schema::{date_time, int32_range, int64, ApiSchema};
pub use ui::{swagger_ui_html, SWAGGER_UI_VERSION};
