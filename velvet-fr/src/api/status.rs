//! Service status: health with a summary of the loaded data, and build
//! identification

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use velvet_common::config::DataSource;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub data: DataSummary,
}

/// What the resolver is serving
#[derive(Debug, Serialize)]
pub struct DataSummary {
    /// "embedded" or the path of the loaded data file
    pub source: String,
    pub arcana: usize,
    pub fusion_pairs: usize,
    pub personas: usize,
    pub theurgies: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let data = &state.data;
    let source = match &state.data_source {
        DataSource::Embedded => "embedded".to_string(),
        DataSource::File(path) => path.display().to_string(),
    };

    Json(HealthResponse {
        status: "ok",
        service: "velvet-fr",
        version: env!("CARGO_PKG_VERSION"),
        data: DataSummary {
            source,
            arcana: data.chart.catalog().len(),
            fusion_pairs: data.chart.len(),
            personas: data.compendium.len(),
            theurgies: data.theurgy.all().len(),
        },
    })
}

/// Values captured by build.rs
#[derive(Debug, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    /// Working tree had uncommitted changes at build time
    pub git_dirty: bool,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_hash: env!("GIT_HASH"),
            git_dirty: env!("GIT_DIRTY") == "true",
            build_timestamp: env!("BUILD_TIMESTAMP"),
            build_profile: env!("BUILD_PROFILE"),
        }
    }
}

/// GET /api/buildinfo
pub async fn get_build_info() -> Json<BuildInfo> {
    Json(BuildInfo::current())
}

/// Routes outside /api used by monitoring
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
