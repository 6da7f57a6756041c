//! notes-server: HTTP API server for the notes service
//!
//! This crate provides:
//! - REST endpoints for note create, read, update, delete, and list
//! - JSON error responses for validation and lookup failures
//! - Interactive API documentation at `/docs`
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - Trailing-slash normalization
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_server::{build_app, config::ServerConfig, state::AppState};
//! use notes_store::NoteStore;
//!
//! let config = ServerConfig::from_env()?;
//! let state = AppState::new(NoteStore::in_memory(), config);
//! let app = build_app(state)?;
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use http::HeaderValue;
use tower::Layer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{propagate_request_id, request_id_layer};

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;

/// The complete HTTP application: routes, middleware, and path normalization.
pub type App = NormalizePath<Router>;

/// Build the router with its middleware stack.
pub fn build_app(state: AppState) -> Result<App, ConfigError> {
    let cors = build_cors_layer(&state.config().cors_allowed_origins)?;

    let router = routes::build_router(state)
        .layer(axum::middleware::from_fn(propagate_request_id))
        .layer(request_id_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Runs before routing so that `/notes/` matches `/notes`.
    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// Build CORS layer from configuration.
pub fn build_cors_layer(allowed_origins: &str) -> Result<CorsLayer, ConfigError> {
    let allow_origin = if allowed_origins.split(',').any(|s| s.trim() == "*") {
        AllowOrigin::from(Any)
    } else {
        // Parse comma-separated origins
        let origins = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<HeaderValue>()
                    .map_err(|e| ConfigError::InvalidValue {
                        name: "CORS_ALLOWED_ORIGINS".to_string(),
                        reason: format!("{s}: {e}"),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
