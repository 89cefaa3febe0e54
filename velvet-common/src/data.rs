//! Reference data loading
//!
//! Parses the TOML data artifact (arcana catalog, fusion chart, persona
//! compendium, theurgy table) and validates it into immutable lookup
//! structures. The default artifact ships inside the binary so the resolver
//! starts with zero configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{info, warn};

use crate::arcana::ArcanaCatalog;
use crate::chart::FusionChart;
use crate::compendium::{Affinity, Compendium, Element, Persona, Skill, StatProfile, Stats};
use crate::theurgy::{Theurgy, TheurgyBook};
use crate::{Error, Result};

/// Reference data shipped with the crate
pub const DEFAULT_DATA: &str = include_str!("../data/velvet.toml");

/// On-disk schema of the data artifact
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DataFile {
    pub arcana: Vec<String>,
    #[serde(default)]
    pub chart: Vec<(String, String, String)>,
    #[serde(default)]
    pub personas: Vec<PersonaRecord>,
    #[serde(default)]
    pub theurgy: Vec<Theurgy>,
}

/// One `[[personas]]` table
///
/// `stats` may be given outright or derived from `profile` (balanced when
/// both are absent). Without `skills`, the starter skills for `inherits`
/// are used.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PersonaRecord {
    pub name: String,
    pub arcana: String,
    pub level: u8,
    pub inherits: String,
    pub stats: Option<Stats>,
    pub profile: Option<StatProfile>,
    pub skills: Option<Vec<Skill>>,
    #[serde(default, deserialize_with = "resistances_without_neutral")]
    pub resistances: BTreeMap<Element, Affinity>,
}

/// Affinity as written in data files, where "None" spells neutral
#[derive(Deserialize)]
#[serde(untagged)]
enum RecordedAffinity {
    Neutral(Neutral),
    Set(Affinity),
}

#[derive(Deserialize)]
enum Neutral {
    None,
}

/// Resistance map with neutral entries dropped
fn resistances_without_neutral<'de, D>(
    deserializer: D,
) -> std::result::Result<BTreeMap<Element, Affinity>, D::Error>
where
    D: Deserializer<'de>,
{
    let recorded = BTreeMap::<Element, RecordedAffinity>::deserialize(deserializer)?;
    Ok(recorded
        .into_iter()
        .filter_map(|(element, affinity)| match affinity {
            RecordedAffinity::Neutral(Neutral::None) => None,
            RecordedAffinity::Set(affinity) => Some((element, affinity)),
        })
        .collect())
}

impl PersonaRecord {
    fn into_persona(self, catalog: &ArcanaCatalog) -> Result<Persona> {
        let arcana = catalog.parse(&self.arcana).map_err(|_| {
            Error::InvalidData(format!(
                "persona {} has unknown arcana '{}'",
                self.name, self.arcana
            ))
        })?;

        let stats = match (self.stats, self.profile) {
            (Some(_), Some(_)) => {
                return Err(Error::InvalidData(format!(
                    "persona {} has both stats and a stat profile",
                    self.name
                )))
            }
            (Some(stats), None) => stats,
            (None, profile) => Stats::derived(self.level, profile.unwrap_or_default()),
        };

        let mut skills = self
            .skills
            .unwrap_or_else(|| Skill::defaults_for(self.level, &self.inherits));
        skills.sort_by_key(|skill| skill.level);

        Ok(Persona {
            name: self.name,
            arcana,
            level: self.level,
            stats,
            inherits: self.inherits,
            resistances: self.resistances,
            skills,
        })
    }
}

/// Validated, read-only reference data
#[derive(Debug)]
pub struct VelvetData {
    pub chart: FusionChart,
    pub compendium: Compendium,
    pub theurgy: TheurgyBook,
}

impl VelvetData {
    /// Load the embedded default artifact
    pub fn embedded() -> Result<Self> {
        Self::from_toml_str(DEFAULT_DATA)
    }

    /// Load and validate an artifact from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Toml(e) => Error::Config(format!("{}: {}", path.display(), e)),
            other => other,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: DataFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    /// Validate a parsed artifact
    pub fn from_file(file: DataFile) -> Result<Self> {
        let catalog = ArcanaCatalog::new(&file.arcana)?;

        let personas = file
            .personas
            .into_iter()
            .map(|record| record.into_persona(&catalog))
            .collect::<Result<Vec<_>>>()?;
        let compendium = Compendium::new(personas)?;

        let chart = FusionChart::from_entries(catalog, file.chart)?;

        let theurgy = TheurgyBook::new(file.theurgy);
        for entry in theurgy.all() {
            for name in &entry.personas {
                if compendium.get(name).is_none() {
                    warn!(
                        "Theurgy {} requires {}, which is not in the compendium",
                        entry.skill, name
                    );
                }
            }
        }

        info!(
            "Reference data loaded: {} arcana, {} fusion pairs, {} personas, {} theurgies",
            chart.catalog().len(),
            chart.len(),
            compendium.len(),
            theurgy.all().len()
        );

        Ok(Self {
            chart,
            compendium,
            theurgy,
        })
    }
}
