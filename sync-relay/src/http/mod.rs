//! HTTP endpoints for sync-relay.
//!
//! | Method | Path | |
//! |---|---|---|
//! | POST | `/sync` | create a record, 201 |
//! | GET | `/sync/:code` | fetch a record |
//! | PUT | `/sync/:code` | replace a record |
//! | GET | `/health` | liveness |
//! | OPTIONS | any | preflight, empty 200 |
//!
//! `GET /sync/` and `PUT /sync/` carry an empty code and answer 400.
//!
//! Anything else is a 404 `{"error":"Not found"}`.

mod cors;
pub mod health;
mod records;

use crate::error::RelayError;
use crate::server::SyncRelay;
use axum::extract::{DefaultBodyLimit, Request};
use axum::http::Method;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use health::HealthStatus;

/// Build the HTTP router with all endpoints.
pub fn build_router(relay: Arc<SyncRelay>) -> Router {
    let body_limit = relay.config().limits.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler).fallback(not_found))
        .route("/sync", post(records::create_handler).fallback(not_found))
        .route(
            "/sync/",
            get(records::fetch_blank_handler)
                .put(records::replace_blank_handler)
                .fallback(not_found),
        )
        .route(
            "/sync/:code",
            get(records::fetch_handler)
                .put(records::replace_handler)
                .fallback(not_found),
        )
        .fallback(not_found)
        .layer(Extension(relay))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn(reject_head))
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
}

/// axum answers `HEAD` with the `GET` handler; only the listed methods are served.
async fn reject_head(request: Request, next: Next) -> Response {
    if *request.method() == Method::HEAD {
        return RelayError::RouteNotFound.into_response();
    }
    next.run(request).await
}

/// Fallback for unknown paths and unsupported methods.
async fn not_found() -> RelayError {
    RelayError::RouteNotFound
}
