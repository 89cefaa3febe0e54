//! velvet-fr library - Fusion Resolver service
//!
//! Read-only HTTP API over the fusion chart, persona compendium and theurgy
//! table. All data is loaded once at startup and shared immutably.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use velvet_common::config::DataSource;
use velvet_common::VelvetData;

pub mod api;
pub mod logging;
pub mod pagination;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Validated reference data (immutable for the process lifetime)
    pub data: Arc<VelvetData>,
    /// Where `data` was loaded from, reported by /health
    pub data_source: DataSource,
}

impl AppState {
    /// Create new application state
    pub fn new(data: VelvetData, data_source: DataSource) -> Self {
        Self {
            data: Arc::new(data),
            data_source,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api = Router::new()
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/api/arcana", get(api::list_arcana))
        .route("/api/chart", get(api::get_chart))
        .route("/api/fusion/resolve", post(api::resolve_fusion))
        .route("/api/fusion/reverse", get(api::reverse_lookup))
        .route("/api/fusion/personas", post(api::fuse_personas))
        .route("/api/personas", get(api::list_personas))
        .route("/api/personas/:name", get(api::get_persona))
        .route("/api/theurgy", get(api::list_theurgy));

    Router::new()
        .merge(api)
        .merge(api::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local guide front-ends
        .layer(CorsLayer::permissive())
}
