//! OpenAPI 3.0 document generation

use serde_json::{json, Map, Value};

use super::registry::{ApiRegistry, EndpointDoc};

pub const OPENAPI_VERSION: &str = "3.0.3";

/// Document `info` block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Default for ApiInfo {
    fn default() -> Self {
        Self {
            title: "Notes API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Create, read, update, delete and list notes.".to_string(),
        }
    }
}

/// Render the registry as an OpenAPI document.
///
/// Output is deterministic: paths, methods and schemas are emitted in
/// sorted order.
pub fn build_document(registry: &ApiRegistry, info: &ApiInfo) -> Value {
    let mut paths = Map::new();

    let mut endpoints: Vec<&EndpointDoc> = registry.endpoints().iter().collect();
    endpoints.sort_by(|a, b| (a.path, a.method).cmp(&(b.path, b.method)));

    for endpoint in endpoints {
        let item = paths
            .entry(endpoint.path.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(item) = item {
            item.insert(endpoint.method.as_str().to_string(), operation(endpoint));
        }
    }

    let schemas: Map<String, Value> = registry
        .schemas()
        .iter()
        .map(|(name, schema)| (name.to_string(), schema.clone()))
        .collect();

    json!({
        "openapi": OPENAPI_VERSION,
        "info": {
            "title": info.title,
            "version": info.version,
            "description": info.description,
        },
        "paths": paths,
        "components": { "schemas": schemas },
    })
}

fn operation(endpoint: &EndpointDoc) -> Value {
    let mut op = Map::new();
    op.insert("operationId".into(), json!(endpoint.operation_id));
    if !endpoint.summary.is_empty() {
        op.insert("summary".into(), json!(endpoint.summary));
    }
    op.insert("tags".into(), json!([endpoint.tag]));

    if !endpoint.params.is_empty() {
        let params: Vec<Value> = endpoint
            .params
            .iter()
            .map(|p| {
                json!({
                    "name": p.name,
                    "in": p.location.as_str(),
                    "description": p.description,
                    "required": p.required,
                    "schema": p.schema,
                })
            })
            .collect();
        op.insert("parameters".into(), Value::Array(params));
    }

    if let Some(schema) = &endpoint.request_body {
        op.insert(
            "requestBody".into(),
            json!({
                "required": true,
                "content": { "application/json": { "schema": schema } },
            }),
        );
    }

    let mut responses = Map::new();
    for response in &endpoint.responses {
        let mut body = Map::new();
        body.insert("description".into(), json!(response.description));
        if let Some(schema) = &response.schema {
            body.insert(
                "content".into(),
                json!({ "application/json": { "schema": schema } }),
            );
        }
        if !response.headers.is_empty() {
            let headers: Map<String, Value> = response
                .headers
                .iter()
                .map(|(name, description)| {
                    (
                        name.to_string(),
                        json!({ "description": description, "schema": { "type": "string" } }),
                    )
                })
                .collect();
            body.insert("headers".into(), Value::Object(headers));
        }
        responses.insert(response.status.to_string(), Value::Object(body));
    }
    op.insert("responses".into(), Value::Object(responses));

    Value::Object(op)
}
