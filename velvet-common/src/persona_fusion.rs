//! Two-persona fusion
//!
//! The result arcana comes from the fusion chart. Within that arcana the
//! result persona is picked by level: the base level is the floor of the
//! ingredients' average, and the result is the highest-level persona at or
//! below it. When every candidate is above the base, the lowest-level one
//! is used. Ingredients never fuse into themselves.

use tracing::debug;

use crate::arcana::Arcana;
use crate::chart::{Fusion, FusionChart};
use crate::compendium::{Compendium, Persona};
use crate::{Error, Result};

/// Outcome of fusing two named personas
#[derive(Debug, Clone, PartialEq)]
pub enum PersonaFusion<'a> {
    /// Fusion produces `persona` of `arcana`
    Persona {
        arcana: Arcana,
        base_level: u8,
        persona: &'a Persona,
    },
    /// The chart yields `arcana` but no eligible persona of it is catalogued
    NoCandidate { arcana: Arcana, base_level: u8 },
    /// Same persona twice, or two personas of the same arcana
    NotFusable,
}

/// Fuse two personas by name
///
/// Unknown names are [`Error::NotFound`]; everything else is an ordinary
/// [`PersonaFusion`] outcome.
pub fn fuse_personas<'a>(
    chart: &FusionChart,
    compendium: &'a Compendium,
    first: &str,
    second: &str,
) -> Result<PersonaFusion<'a>> {
    let a = compendium
        .get(first)
        .ok_or_else(|| Error::NotFound(format!("persona '{}'", first)))?;
    let b = compendium
        .get(second)
        .ok_or_else(|| Error::NotFound(format!("persona '{}'", second)))?;

    let arcana = match chart.resolve(a.arcana, b.arcana) {
        Fusion::Result(arcana) => arcana,
        Fusion::NotFusable => return Ok(PersonaFusion::NotFusable),
    };

    let base_level = ((u16::from(a.level) + u16::from(b.level)) / 2) as u8;

    let candidates: Vec<&Persona> = compendium
        .in_arcana(arcana)
        .into_iter()
        .filter(|p| p.name != a.name && p.name != b.name)
        .collect();

    let chosen = candidates
        .iter()
        .rev()
        .find(|p| p.level <= base_level)
        .or_else(|| candidates.first())
        .copied();

    debug!(
        first = %a.name,
        second = %b.name,
        result_arcana = %chart.catalog().display(arcana),
        base_level,
        result = chosen.map(|p| p.name.as_str()).unwrap_or("-"),
        "Persona fusion"
    );

    Ok(match chosen {
        Some(persona) => PersonaFusion::Persona {
            arcana,
            base_level,
            persona,
        },
        None => PersonaFusion::NoCandidate { arcana, base_level },
    })
}
