//! Fusion endpoints
//!
//! Forward resolution, reverse lookup, and two-persona fusion. Arcana names
//! are validated against the catalog here, before they reach the resolver.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use velvet_common::chart::Fusion;
use velvet_common::persona_fusion::{self, PersonaFusion};
use velvet_common::theurgy::Theurgy;

use super::personas::PersonaView;
use super::ApiError;
use crate::AppState;

/// Request body for POST /api/fusion/resolve
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub category_a: String,
    pub category_b: String,
}

/// `{ "result": ... }` or `{ "error": "not_fusable" }`
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResolveResponse {
    Result { result: String },
    NotFusable { error: &'static str, message: String },
}

/// POST /api/fusion/resolve
///
/// Same-arcana input is an expected outcome and returns 200 with
/// `error: "not_fusable"`; unknown names return 400.
pub async fn resolve_fusion(
    State(state): State<AppState>,
    request: Result<Json<ResolveRequest>, JsonRejection>,
) -> Result<Json<ResolveResponse>, ApiError> {
    let Json(request) = request?;
    let chart = &state.data.chart;
    let fusion = chart.resolve_names(&request.category_a, &request.category_b)?;

    debug!(
        "Resolve {} x {} -> {:?}",
        request.category_a, request.category_b, fusion
    );

    Ok(Json(match fusion {
        Fusion::Result(arcana) => ResolveResponse::Result {
            result: chart.catalog().name(arcana).to_string(),
        },
        Fusion::NotFusable => ResolveResponse::NotFusable {
            error: "not_fusable",
            message: "Cannot fuse an arcana with itself".to_string(),
        },
    }))
}

/// Query parameters for GET /api/fusion/reverse
#[derive(Debug, Deserialize)]
pub struct ReverseQuery {
    pub target: String,
}

#[derive(Debug, Serialize)]
pub struct ReverseResponse {
    pub target: String,
    pub pairs: Vec<[String; 2]>,
    /// Set when no standard pair produces the target
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// GET /api/fusion/reverse?target=Priestess
///
/// Every unordered pair producing the target, in catalog order.
pub async fn reverse_lookup(
    State(state): State<AppState>,
    query: Result<Query<ReverseQuery>, QueryRejection>,
) -> Result<Json<ReverseResponse>, ApiError> {
    let Query(query) = query?;
    let chart = &state.data.chart;
    let catalog = chart.catalog();
    let target = catalog.parse(&query.target)?;

    let pairs: Vec<[String; 2]> = chart
        .reverse_lookup(target)
        .map(|pair| {
            [
                catalog.name(pair.first).to_string(),
                catalog.name(pair.second).to_string(),
            ]
        })
        .collect();

    let target = catalog.name(target).to_string();
    let note = pairs.is_empty().then(|| {
        format!(
            "No standard 2-way fusion produces {}. It may require a special fusion recipe.",
            target
        )
    });

    Ok(Json(ReverseResponse {
        target,
        pairs,
        note,
    }))
}

/// Request body for POST /api/fusion/personas
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaFusionRequest {
    pub persona_a: String,
    pub persona_b: String,
}

/// Fusion outcome plus the theurgy the two ingredients unlock together
#[derive(Debug, Serialize)]
pub struct PersonaFusionResponse {
    #[serde(flatten)]
    pub outcome: PersonaFusionOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theurgy: Option<Theurgy>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PersonaFusionOutcome {
    Fused {
        arcana: String,
        base_level: u8,
        persona: PersonaView,
    },
    NoCandidate {
        error: &'static str,
        arcana: String,
        base_level: u8,
    },
    NotFusable {
        error: &'static str,
        message: String,
    },
}

/// POST /api/fusion/personas
pub async fn fuse_personas(
    State(state): State<AppState>,
    request: Result<Json<PersonaFusionRequest>, JsonRejection>,
) -> Result<Json<PersonaFusionResponse>, ApiError> {
    let Json(request) = request?;
    let data = &state.data;
    let catalog = data.chart.catalog();

    let outcome = persona_fusion::fuse_personas(
        &data.chart,
        &data.compendium,
        &request.persona_a,
        &request.persona_b,
    )?;

    let outcome = match outcome {
        PersonaFusion::Persona {
            arcana,
            base_level,
            persona,
        } => PersonaFusionOutcome::Fused {
            arcana: catalog.name(arcana).to_string(),
            base_level,
            persona: PersonaView::new(catalog, persona),
        },
        PersonaFusion::NoCandidate { arcana, base_level } => PersonaFusionOutcome::NoCandidate {
            error: "no_candidate",
            arcana: catalog.name(arcana).to_string(),
            base_level,
        },
        PersonaFusion::NotFusable => PersonaFusionOutcome::NotFusable {
            error: "not_fusable",
            message: "Cannot fuse two personas of the same arcana".to_string(),
        },
    };

    Ok(Json(PersonaFusionResponse {
        outcome,
        theurgy: data
            .theurgy
            .for_pair(&request.persona_a, &request.persona_b)
            .cloned(),
    }))
}
