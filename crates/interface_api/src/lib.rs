//! HTTP API Layer
//!
//! Read-only REST API over the claims collection using Axum.
//!
//! # Routes
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | `/api/claims` | every claim |
//! | GET | `/api/claims/:id` | one claim by storage identifier |
//! | GET | `/health` | liveness |
//! | GET | `/health/ready` | storage reachability |
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(service, config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod telemetry;

use axum::{middleware as axum_middleware, routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_claims::ClaimsService;

use crate::config::ApiConfig;
use crate::handlers::{claims, health};
use crate::middleware::request_logging_middleware;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub claims: ClaimsService,
    pub config: ApiConfig,
}

impl AppState {
    pub fn new(claims: ClaimsService, config: ApiConfig) -> Self {
        Self { claims, config }
    }
}

/// Creates the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/claims", get(claims::list_claims))
        .route("/api/claims/:id", get(claims::get_claim))
        .layer(axum_middleware::from_fn(request_logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
