//! Server configuration, populated from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

/// Runtime configuration for the book server.
///
/// All fields are populated from environment variables with sensible
/// defaults, so the server can be started with zero configuration.
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | `LEOBOOK_BIND` | `0.0.0.0:3000` | TCP socket address to listen on |
/// | `LEOBOOK_DOCUMENT` | `data/book-demo.json` | Path to the book JSON file |
/// | `LEOBOOK_ENDPOINT` | `/webapp/data/book-demo.json` | URL path the raw document is served at; must lie outside `/v1/` |
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Socket address the server binds to.
    pub bind_addr: SocketAddr,

    /// Book document on disk. Re-read on `POST /v1/reload`.
    pub document_path: PathBuf,

    /// Path the raw document is served from. Always starts with `/` and never
    /// falls under [`API_PREFIX`].
    pub endpoint_path: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LEOBOOK_BIND must be a valid socket address (e.g. 0.0.0.0:3000), got {0:?}")]
    InvalidBind(String),

    #[error("LEOBOOK_ENDPOINT must be an absolute URL path starting with '/' and outside /v1/, got {0:?}")]
    InvalidEndpoint(String),
}

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_DOCUMENT: &str = "data/book-demo.json";
pub const DEFAULT_ENDPOINT: &str = "/webapp/data/book-demo.json";

/// Every built-in API route lives under this prefix.
pub const API_PREFIX: &str = "/v1";

impl ServerConfig {
    /// Populate config from environment variables, applying defaults where absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable source (the process
    /// environment in production, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("LEOBOOK_BIND").unwrap_or_else(|| DEFAULT_BIND.into());
        let bind_addr: SocketAddr = bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(bind.clone()))?;

        let endpoint_path =
            lookup("LEOBOOK_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into());
        if !endpoint_path.starts_with('/')
            || endpoint_path.contains(['{', '}'])
            || is_api_path(&endpoint_path)
        {
            return Err(ConfigError::InvalidEndpoint(endpoint_path));
        }

        Ok(Self {
            bind_addr,
            document_path: lookup("LEOBOOK_DOCUMENT")
                .unwrap_or_else(|| DEFAULT_DOCUMENT.into())
                .into(),
            endpoint_path,
        })
    }
}

/// `true` for `/v1` and anything below it.
fn is_api_path(path: &str) -> bool {
    path.strip_prefix(API_PREFIX)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND.parse::<SocketAddr>().unwrap());
        assert_eq!(cfg.document_path, PathBuf::from(DEFAULT_DOCUMENT));
        assert_eq!(cfg.endpoint_path, DEFAULT_ENDPOINT);
    }

    #[test]
    fn overrides() {
        let cfg = config(&[
            ("LEOBOOK_BIND", "127.0.0.1:8080"),
            ("LEOBOOK_DOCUMENT", "/srv/book.json"),
            ("LEOBOOK_ENDPOINT", "/data/book.json"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.document_path, PathBuf::from("/srv/book.json"));
        assert_eq!(cfg.endpoint_path, "/data/book.json");
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            config(&[("LEOBOOK_BIND", "nowhere")]).unwrap_err(),
            ConfigError::InvalidBind("nowhere".into())
        );
        assert_eq!(
            config(&[("LEOBOOK_ENDPOINT", "book.json")]).unwrap_err(),
            ConfigError::InvalidEndpoint("book.json".into())
        );
    }

    #[test]
    fn rejects_endpoint_inside_api_namespace() {
        for endpoint in ["/v1/book", "/v1/graph/elements", "/v1/route", "/v1", "/v1/anything.json"] {
            assert_eq!(
                config(&[("LEOBOOK_ENDPOINT", endpoint)]).unwrap_err(),
                ConfigError::InvalidEndpoint(endpoint.into()),
                "{endpoint}"
            );
        }
        // A sibling prefix is not the API namespace.
        assert_eq!(
            config(&[("LEOBOOK_ENDPOINT", "/v1book.json")]).unwrap().endpoint_path,
            "/v1book.json"
        );
    }
}
