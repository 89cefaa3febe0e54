//! Persona compendium endpoints

use std::collections::BTreeMap;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use velvet_common::compendium::{
    Affinity, Element, Persona, PersonaQuery, Skill, SortField, SortOrder, Stats,
};
use velvet_common::theurgy::Theurgy;
use velvet_common::ArcanaCatalog;

use super::ApiError;
use crate::pagination::{calculate_pagination, page_of, PAGE_SIZE};
use crate::AppState;

/// Persona as returned by the API (arcana by name)
#[derive(Debug, Serialize)]
pub struct PersonaView {
    pub name: String,
    pub arcana: String,
    pub level: u8,
    pub stats: Stats,
    pub inherits: String,
    pub resistances: BTreeMap<Element, Affinity>,
    /// Elements the persona is weak to
    pub weak: Vec<Element>,
    pub skills: Vec<Skill>,
}

impl PersonaView {
    pub fn new(catalog: &ArcanaCatalog, persona: &Persona) -> Self {
        Self {
            name: persona.name.clone(),
            arcana: catalog.name(persona.arcana).to_string(),
            level: persona.level,
            stats: persona.stats,
            inherits: persona.inherits.clone(),
            resistances: persona.resistances.clone(),
            weak: persona.weaknesses().collect(),
            skills: persona.skills.clone(),
        }
    }
}

/// Query parameters for GET /api/personas
#[derive(Debug, Deserialize)]
pub struct PersonaListQuery {
    /// Arcana filter; absent or "all" lists every arcana
    pub arcana: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub sort: SortField,
    #[serde(default)]
    pub order: SortOrder,
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

#[derive(Debug, Serialize)]
pub struct PersonaListResponse {
    pub total_results: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub personas: Vec<PersonaView>,
}

/// GET /api/personas?arcana=Fool&search=frost&sort=level&order=asc&page=1
pub async fn list_personas(
    State(state): State<AppState>,
    query: Result<Query<PersonaListQuery>, QueryRejection>,
) -> Result<Json<PersonaListResponse>, ApiError> {
    let Query(query) = query?;
    let data = &state.data;
    let catalog = data.chart.catalog();

    let arcana = match query.arcana.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(name) if name.eq_ignore_ascii_case("all") => None,
        Some(name) => Some(catalog.parse(name)?),
    };

    let found = data.compendium.query(
        catalog,
        &PersonaQuery {
            arcana,
            search: query.search,
            sort: query.sort,
            order: query.order,
        },
    );

    let p = calculate_pagination(found.len(), query.page);
    let personas = page_of(&found, &p)
        .iter()
        .map(|persona| PersonaView::new(catalog, persona))
        .collect();

    Ok(Json(PersonaListResponse {
        total_results: found.len(),
        page: p.page,
        page_size: PAGE_SIZE,
        total_pages: p.total_pages,
        personas,
    }))
}

#[derive(Debug, Serialize)]
pub struct PersonaDetailResponse {
    pub persona: PersonaView,
    /// Theurgy skills this persona is required for
    pub theurgy: Vec<Theurgy>,
}

/// GET /api/personas/:name
pub async fn get_persona(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<PersonaDetailResponse>, ApiError> {
    let data = &state.data;
    let persona = data
        .compendium
        .get(&name)
        .ok_or_else(|| ApiError::NotFound(format!("persona '{}'", name)))?;

    Ok(Json(PersonaDetailResponse {
        persona: PersonaView::new(data.chart.catalog(), persona),
        theurgy: data.theurgy.involving(&persona.name).cloned().collect(),
    }))
}
