//! Theurgy unlock table endpoint

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use velvet_common::theurgy::Theurgy;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TheurgyQuery {
    /// Only theurgies requiring this persona
    pub persona: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TheurgyResponse {
    pub theurgy: Vec<Theurgy>,
}

/// GET /api/theurgy?persona=Orpheus
pub async fn list_theurgy(
    State(state): State<AppState>,
    query: Result<Query<TheurgyQuery>, QueryRejection>,
) -> Result<Json<TheurgyResponse>, ApiError> {
    let Query(query) = query?;
    let book = &state.data.theurgy;
    let theurgy = match query.persona.as_deref() {
        Some(name) => book.involving(name).cloned().collect(),
        None => book.all().to_vec(),
    };
    Ok(Json(TheurgyResponse { theurgy }))
}
