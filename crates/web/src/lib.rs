//! InsightDash Web Server
//!
//! Dashboard pages, static assets and a JSON metrics API, with tower
//! middleware for CORS, tracing, and compression.

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

use std::path::PathBuf;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub mod dashboards;
pub mod error;
pub mod gallery;
pub mod generators;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{AppError, ErrorResponse};
pub use state::{AppState, MetricsSource, RandomMetrics};

/// CORS origin value that allows any origin.
pub const ANY_ORIGIN: &str = "*";

/// Web server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "127.0.0.1:5000")
    pub bind_address: String,
    /// Allowed CORS origin, or `*` for any
    pub cors_origin: String,
    /// Directory holding the dashboard HTML pages
    pub pages_dir: PathBuf,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            cors_origin: ANY_ORIGIN.to_string(),
            pages_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl ServerConfig {
    /// Apply `INSIGHTDASH_*` overrides read through `lookup`.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("INSIGHTDASH_BIND") {
            self.bind_address = bind;
        }
        if let Some(origin) = lookup("INSIGHTDASH_CORS_ORIGIN") {
            self.cors_origin = origin;
        }
        if let Some(dir) = lookup("INSIGHTDASH_PAGES_DIR") {
            self.pages_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("INSIGHTDASH_STATIC_DIR") {
            self.static_dir = PathBuf::from(dir);
        }
        self
    }

    /// Defaults with overrides from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }
}

/// Create a new router with middleware, backed by random metrics.
///
/// # Errors
///
/// Returns an error if the CORS origin is not a valid header value.
pub fn create_router(config: &ServerConfig) -> Result<Router, Error> {
    create_router_with_state(config, AppState::default())
}

/// Create a new router with middleware over the given state.
///
/// # Errors
///
/// Returns an error if the CORS origin is not a valid header value.
pub fn create_router_with_state(config: &ServerConfig, state: AppState) -> Result<Router, Error> {
    info!("Creating router with CORS origin: {}", config.cors_origin);

    let cors = cors_layer(&config.cors_origin)?;

    let router = Router::new()
        .route("/health", get(health_check))
        .merge(routes::pages::page_router(&config.pages_dir))
        .merge(routes::pages::static_router(&config.static_dir))
        .merge(routes::api_router().with_state(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        );

    Ok(router)
}

fn cors_layer(origin: &str) -> Result<CorsLayer, Error> {
    let allow_origin = if origin == ANY_ORIGIN {
        AllowOrigin::any()
    } else {
        AllowOrigin::exact(origin.parse::<HeaderValue>()?)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

/// Web server errors.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid header value
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] axum::http::header::InvalidHeaderValue),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] axum::http::Error),

    /// Axum error
    #[error("Axum error: {0}")]
    Axum(#[from] axum::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::convert::Infallible> for Error {
    fn from(value: std::convert::Infallible) -> Self {
        match value {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode};
    use http_body_util::BodyExt;
    use std::collections::HashMap;
    use tower::ServiceExt;

    /// Helper to build a test request with proper error handling.
    fn build_test_request(
        uri: &str,
        method: Option<Method>,
        headers: Vec<(&str, &str)>,
    ) -> Result<axum::http::Request<Body>, Error> {
        let mut builder = axum::http::Request::builder();
        if let Some(m) = method {
            builder = builder.method(m);
        }
        builder = builder.uri(uri);
        for (key, value) in headers {
            builder = builder.header(key, value);
        }
        builder.body(Body::empty()).map_err(Error::from)
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_address, "127.0.0.1:5000");
        assert_eq!(config.cors_origin, "*");
        assert_eq!(config.pages_dir, PathBuf::from("templates"));
    }

    #[test]
    fn test_env_overrides_replace_defaults() {
        let env: HashMap<&str, &str> = [
            ("INSIGHTDASH_BIND", "0.0.0.0:8080"),
            ("INSIGHTDASH_PAGES_DIR", "/srv/pages"),
        ]
        .into_iter()
        .collect();

        let config = ServerConfig::default()
            .with_env_overrides(|key| env.get(key).map(ToString::to_string));

        assert_eq!(config.bind_address, "0.0.0.0:8080");
        assert_eq!(config.pages_dir, PathBuf::from("/srv/pages"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_partial_config_keeps_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let config: ServerConfig = serde_json::from_str(r#"{"bind_address": "0.0.0.0:80"}"#)?;
        assert_eq!(config.bind_address, "0.0.0.0:80");
        assert_eq!(config.cors_origin, "*");
        Ok(())
    }

    #[test]
    fn test_create_router_with_custom_origin() {
        let config = ServerConfig {
            cors_origin: "https://example.com".to_string(),
            ..ServerConfig::default()
        };
        assert!(create_router(&config).is_ok());
    }

    #[test]
    fn test_create_router_with_invalid_origin() {
        let config = ServerConfig {
            cors_origin: "invalid\0origin".to_string(), // Null byte is invalid
            ..ServerConfig::default()
        };
        let result = create_router(&config);
        assert!(
            matches!(result, Err(Error::InvalidHeader(_))),
            "Expected InvalidHeader error"
        );
    }

    #[tokio::test]
    async fn test_health_check_endpoint() -> Result<(), Error> {
        let router = create_router(&ServerConfig::default())?;

        let request = build_test_request("/health", None, Vec::new())?;
        let response = router.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::OK);
        let body_bytes = response.into_body().collect().await?.to_bytes();
        assert_eq!(&body_bytes[..], b"OK");
        Ok(())
    }

    #[tokio::test]
    async fn test_cors_headers_present() -> Result<(), Error> {
        let router = create_router(&ServerConfig::default())?;

        let request = build_test_request(
            "/api/gallery_data",
            Some(Method::OPTIONS),
            vec![
                ("Origin", "http://localhost:3000"),
                ("Access-Control-Request-Method", "GET"),
            ],
        )?;
        let response = router.oneshot(request).await?;

        assert!(
            response
                .headers()
                .contains_key("access-control-allow-origin"),
            "CORS origin header should be present"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_compression_layer_works() -> Result<(), Error> {
        let router = create_router(&ServerConfig::default())?;

        let request =
            build_test_request("/api/gallery_data", None, vec![("Accept-Encoding", "gzip")])?;
        let response = router.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("content-encoding")
                .and_then(|v| v.to_str().ok()),
            Some("gzip")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_router_not_found() -> Result<(), Error> {
        let router = create_router(&ServerConfig::default())?;

        let request = build_test_request("/nonexistent", None, Vec::new())?;
        let response = router.oneshot(request).await?;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        Ok(())
    }

    #[test]
    fn test_error_display() {
        let invalid_header = "invalid\0value".parse::<HeaderValue>();
        if let Err(e) = invalid_header {
            let err = Error::InvalidHeader(e);
            assert!(err.to_string().contains("Invalid header value"));
        }

        let err2: Error = std::io::Error::new(std::io::ErrorKind::NotFound, "not found").into();
        assert!(err2.to_string().contains("IO error"));
    }
}
