//! Listener and CORS settings for the notes API.

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};

/// Where the notes API listens and which browser origins may call it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Listens on every interface unless narrowed
    #[serde(default = "default_host")]
    pub host: String,

    /// 8080 unless overridden by the file or `--port`
    #[serde(default = "default_port")]
    pub port: u16,

    /// Exact origins sent back in `Access-Control-Allow-Origin`. An empty
    /// list lets any origin call the API. `*` is not accepted here; leave
    /// the list empty instead.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

impl HttpServerConfig {
    /// Defaults, listening on `port`
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// `host:port`, as handed to the TCP listener
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// First configured origin that cannot be used as a CORS header value
    pub fn first_invalid_origin(&self) -> Option<&str> {
        self.cors_origins
            .iter()
            .map(String::as_str)
            .find(|origin| parse_origin(origin).is_none())
    }
}

/// Header value for one allowed origin. The wildcard is refused because
/// tower-http only accepts it through `Any`.
pub fn parse_origin(origin: &str) -> Option<HeaderValue> {
    if origin == "*" {
        return None;
    }
    origin.parse().ok()
}
