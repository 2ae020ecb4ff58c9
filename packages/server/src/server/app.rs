//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{header::ACCEPT, header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use linkcheck::{BatchChecker, HttpFetcher, PageFetcher};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::server::error::{not_found_handler, panic_response};
use crate::server::routes::{check_links_handler, health_handler};
use crate::server::static_files::{serve_asset, serve_index};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub checker: Arc<BatchChecker>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the real HTTP fetcher from configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let check_config = config.check_config();
        let fetcher = HttpFetcher::new(&check_config).context("Failed to create HTTP client")?;
        Ok(Self::with_fetcher(config, Arc::new(fetcher)))
    }

    /// Build state around any fetcher (tests inject a mock here)
    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher>) -> Self {
        let checker = BatchChecker::new(fetcher, config.check_config())
            .with_span(tracing::info_span!("link_check"));

        Self {
            checker: Arc::new(checker),
            config: Arc::new(config),
        }
    }
}

/// CORS: any origin unless ALLOWED_ORIGINS narrows it
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([ACCEPT, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = cors_layer(&state.config.allowed_origins);

    Router::new()
        .route("/", get(serve_index))
        .route("/assets/*path", get(serve_asset))
        .route("/check_links", post(check_links_handler))
        .route("/health", get(health_handler))
        .fallback(not_found_handler)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
