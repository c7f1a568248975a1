//! Cross-cutting HTTP layers.

use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::{FeatureFlags, ServerConfig};

/// Layers wrapped around the API router.
#[derive(Debug, Clone)]
pub struct HttpLayers {
    pub request_timeout: Duration,
    /// Origins allowed by CORS. Empty disables the CORS layer.
    pub cors_origins: Vec<String>,
    pub enable_tracing: bool,
}

impl HttpLayers {
    pub fn from_config(server: &ServerConfig, features: &FeatureFlags) -> Self {
        Self {
            request_timeout: Duration::from_secs(server.request_timeout_secs),
            cors_origins: server.cors_origins_list(),
            enable_tracing: features.enable_tracing,
        }
    }

    pub fn apply(&self, router: Router) -> Router {
        let mut router = router.layer(TimeoutLayer::new(self.request_timeout));

        let origins: Vec<HeaderValue> = self
            .cors_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                    None
                }
            })
            .collect();
        if !origins.is_empty() {
            router = router.layer(
                CorsLayer::new()
                    .allow_origin(origins)
                    .allow_methods(Any)
                    .allow_headers(Any),
            );
        }

        if self.enable_tracing {
            router = router.layer(TraceLayer::new_for_http());
        }
        router
    }
}
