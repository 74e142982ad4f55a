//! Endpoint contract registry
//!
//! Route modules describe each endpoint they mount as an `EndpointDoc`.
//! The registry collects those descriptions plus the component schemas they
//! reference, and is the single input to document generation.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use super::schema::ApiSchema;

/// HTTP methods used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Lowercase name, as used for OpenAPI path item keys
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str().to_uppercase())
    }
}

/// Where a parameter is carried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamDoc {
    pub name: &'static str,
    pub location: ParamLocation,
    pub description: &'static str,
    pub required: bool,
    pub schema: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDoc {
    pub status: u16,
    pub description: &'static str,
    pub schema: Option<Value>,
    pub headers: Vec<(&'static str, &'static str)>,
}

/// Declared contract of one endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointDoc {
    pub method: HttpMethod,
    /// OpenAPI path template, e.g. `/notes/{noteId}`
    pub path: &'static str,
    pub operation_id: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,
    pub params: Vec<ParamDoc>,
    pub request_body: Option<Value>,
    pub responses: Vec<ResponseDoc>,
}

impl EndpointDoc {
    pub fn new(method: HttpMethod, path: &'static str, operation_id: &'static str) -> Self {
        Self {
            method,
            path,
            operation_id,
            summary: "",
            tag: "default",
            params: Vec::new(),
            request_body: None,
            responses: Vec::new(),
        }
    }

    pub fn summary(mut self, summary: &'static str) -> Self {
        self.summary = summary;
        self
    }

    pub fn tag(mut self, tag: &'static str) -> Self {
        self.tag = tag;
        self
    }

    pub fn path_param(mut self, name: &'static str, description: &'static str, schema: Value) -> Self {
        self.params.push(ParamDoc {
            name,
            location: ParamLocation::Path,
            description,
            required: true,
            schema,
        });
        self
    }

    pub fn query_param(mut self, name: &'static str, description: &'static str, schema: Value) -> Self {
        self.params.push(ParamDoc {
            name,
            location: ParamLocation::Query,
            description,
            required: false,
            schema,
        });
        self
    }

    /// JSON request body described by a component schema
    pub fn request_body<T: ApiSchema>(mut self) -> Self {
        self.request_body = Some(T::reference());
        self
    }

    /// Response without a body
    pub fn response(mut self, status: u16, description: &'static str) -> Self {
        self.responses.push(ResponseDoc {
            status,
            description,
            schema: None,
            headers: Vec::new(),
        });
        self
    }

    /// Response with a JSON body described by a component schema
    pub fn json_response<T: ApiSchema>(mut self, status: u16, description: &'static str) -> Self {
        self.responses.push(ResponseDoc {
            status,
            description,
            schema: Some(T::reference()),
            headers: Vec::new(),
        });
        self
    }

    /// Attach a response header to the most recently declared response
    pub fn with_header(mut self, name: &'static str, description: &'static str) -> Self {
        if let Some(last) = self.responses.last_mut() {
            last.headers.push((name, description));
        }
        self
    }

    /// Declared status codes, ascending
    pub fn status_codes(&self) -> Vec<u16> {
        let mut codes: Vec<u16> = self.responses.iter().map(|r| r.status).collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Endpoint {method} {path} registered twice")]
    DuplicateEndpoint { method: HttpMethod, path: String },
}

/// Every documented endpoint and the schemas they reference
#[derive(Debug, Clone, Default)]
pub struct ApiRegistry {
    endpoints: Vec<EndpointDoc>,
    schemas: BTreeMap<&'static str, Value>,
}

impl ApiRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one endpoint contract
    pub fn register(&mut self, endpoint: EndpointDoc) -> Result<(), RegistryError> {
        if self.find(endpoint.method, endpoint.path).is_some() {
            return Err(RegistryError::DuplicateEndpoint {
                method: endpoint.method,
                path: endpoint.path.to_string(),
            });
        }
        self.endpoints.push(endpoint);
        Ok(())
    }

    pub fn register_all(
        &mut self,
        endpoints: impl IntoIterator<Item = EndpointDoc>,
    ) -> Result<(), RegistryError> {
        for endpoint in endpoints {
            self.register(endpoint)?;
        }
        Ok(())
    }

    /// Add a component schema. Re-adding the same name replaces it.
    pub fn add_schema<T: ApiSchema>(&mut self) {
        self.schemas.insert(T::NAME, T::schema());
    }

    pub fn endpoints(&self) -> &[EndpointDoc] {
        &self.endpoints
    }

    pub fn schemas(&self) -> &BTreeMap<&'static str, Value> {
        &self.schemas
    }

    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&EndpointDoc> {
        self.endpoints
            .iter()
            .find(|e| e.method == method && e.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Thing;

    impl ApiSchema for Thing {
        const NAME: &'static str = "Thing";

        fn schema() -> Value {
            json!({"type": "object"})
        }
    }

    fn thing_endpoint() -> EndpointDoc {
        EndpointDoc::new(HttpMethod::Get, "/things/{id}", "getThing")
            .summary("Get a thing.")
            .path_param("id", "Thing ID", json!({"type": "integer"}))
            .json_response::<Thing>(200, "Found.")
            .response(404, "Missing.")
    }

    #[test]
    fn test_builder_collects_responses() {
        let endpoint = thing_endpoint();
        assert_eq!(endpoint.status_codes(), vec![200, 404]);
        assert_eq!(endpoint.params.len(), 1);
        assert!(endpoint.params[0].required);
        assert_eq!(
            endpoint.responses[0].schema,
            Some(json!({"$ref": "#/components/schemas/Thing"}))
        );
    }

    #[test]
    fn test_duplicate_endpoint_rejected() {
        let mut registry = ApiRegistry::new();
        registry.register(thing_endpoint()).unwrap();
        let err = registry.register(thing_endpoint()).unwrap_err();
        assert_eq!(err.to_string(), "Endpoint GET /things/{id} registered twice");
    }

    #[test]
    fn test_same_path_different_method_allowed() {
        let mut registry = ApiRegistry::new();
        registry.register(thing_endpoint()).unwrap();
        registry
            .register(EndpointDoc::new(HttpMethod::Delete, "/things/{id}", "deleteThing"))
            .unwrap();
        assert_eq!(registry.endpoints().len(), 2);
        assert!(registry.find(HttpMethod::Delete, "/things/{id}").is_some());
        assert!(registry.find(HttpMethod::Put, "/things/{id}").is_none());
    }

    #[test]
    fn test_with_header_attaches_to_last_response() {
        let endpoint = EndpointDoc::new(HttpMethod::Post, "/things", "createThing")
            .response(201, "Created.")
            .with_header("Location", "URL of the new thing")
            .response(400, "Bad.");
        assert_eq!(endpoint.responses[0].headers, vec![("Location", "URL of the new thing")]);
        assert!(endpoint.responses[1].headers.is_empty());
    }
}
