//! Arcana catalog and full chart endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ArcanaSummary {
    pub name: String,
    /// Catalog position (0-based)
    pub position: usize,
    /// Number of standard pairs producing this arcana
    pub producers: usize,
    /// Catalogued personas of this arcana
    pub personas: usize,
}

#[derive(Debug, Serialize)]
pub struct ArcanaListResponse {
    pub arcana: Vec<ArcanaSummary>,
}

/// GET /api/arcana
pub async fn list_arcana(State(state): State<AppState>) -> Json<ArcanaListResponse> {
    let data = &state.data;
    let catalog = data.chart.catalog();

    let arcana = catalog
        .iter()
        .map(|arcana| ArcanaSummary {
            name: catalog.name(arcana).to_string(),
            position: arcana.position(),
            producers: data.chart.producer_count(arcana),
            personas: data.compendium.in_arcana(arcana).len(),
        })
        .collect();

    Json(ArcanaListResponse { arcana })
}

#[derive(Debug, Serialize)]
pub struct ChartCell {
    pub a: String,
    pub b: String,
    pub result: String,
}

#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub entries: Vec<ChartCell>,
    /// Arcana only reachable through special recipes
    pub unreachable: Vec<String>,
}

/// GET /api/chart
pub async fn get_chart(State(state): State<AppState>) -> Json<ChartResponse> {
    let chart = &state.data.chart;
    let catalog = chart.catalog();

    let entries = chart
        .entries()
        .map(|entry| ChartCell {
            a: catalog.name(entry.pair.first).to_string(),
            b: catalog.name(entry.pair.second).to_string(),
            result: catalog.name(entry.result).to_string(),
        })
        .collect();

    let unreachable = chart
        .unreachable()
        .into_iter()
        .map(|arcana| catalog.name(arcana).to_string())
        .collect();

    Json(ChartResponse {
        entries,
        unreachable,
    })
}
