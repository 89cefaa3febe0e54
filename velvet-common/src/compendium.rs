//! Persona compendium
//!
//! Catalogued personas with the listing operations a guide needs: the
//! personas of one arcana (shown under a fusion result), and filter /
//! search / sort over the whole compendium.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::arcana::{Arcana, ArcanaCatalog};
use crate::{Error, Result};

/// Attack element a persona may resist or be weak to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Slash,
    Strike,
    Pierce,
    Fire,
    Ice,
    Elec,
    Wind,
    Light,
    Dark,
}

/// How a persona reacts to an element
///
/// Elements absent from a persona's resistance map are neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Affinity {
    Weak,
    Resist,
    Null,
    Absorb,
    Repel,
}

/// Base stats: strength, magic, endurance, agility, luck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct Stats {
    pub st: u8,
    pub ma: u8,
    pub en: u8,
    pub ag: u8,
    pub lu: u8,
}

/// Growth shape used to derive stats a record leaves out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatProfile {
    Physical,
    Magic,
    #[default]
    Balanced,
}

impl Stats {
    /// Stats scaled from level: 0.8 points per level, weighted by profile
    /// (st, ma, en, ag, lu), each rounded down.
    pub fn derived(level: u8, profile: StatProfile) -> Self {
        let weights = match profile {
            StatProfile::Physical => [1.2, 0.8, 1.0, 1.1, 0.9],
            StatProfile::Magic => [0.8, 1.2, 1.0, 0.9, 1.1],
            StatProfile::Balanced => [1.0; 5],
        };
        let base = f64::from(level) * 0.8;
        let stat = |weight: f64| (base * weight).floor() as u8;

        Self {
            st: stat(weights[0]),
            ma: stat(weights[1]),
            en: stat(weights[2]),
            ag: stat(weights[3]),
            lu: stat(weights[4]),
        }
    }
}

/// A skill and the level it is learned at
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Skill {
    pub name: String,
    pub level: u8,
}

impl Skill {
    /// Starter skills implied by an inheritance type, learned two levels
    /// below the persona's base level. Types without a starter spell get Bash.
    pub fn defaults_for(level: u8, inherits: &str) -> Vec<Skill> {
        const STARTERS: [(&str, &str); 5] = [
            ("Fire", "Agi"),
            ("Ice", "Bufu"),
            ("Elec", "Zio"),
            ("Wind", "Garu"),
            ("Support", "Dia"),
        ];

        let learned_at = level.saturating_sub(2).max(1);
        let mut skills: Vec<Skill> = STARTERS
            .iter()
            .filter(|(kind, _)| inherits.contains(kind))
            .map(|(_, name)| Skill {
                name: name.to_string(),
                level: learned_at,
            })
            .collect();

        if skills.is_empty() {
            skills.push(Skill {
                name: "Bash".to_string(),
                level: learned_at,
            });
        }
        skills
    }
}

/// One catalogued persona
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    pub name: String,
    pub arcana: Arcana,
    pub level: u8,
    pub stats: Stats,
    /// Skill inheritance type (Fire, Support, Physical, ...)
    pub inherits: String,
    pub resistances: BTreeMap<Element, Affinity>,
    /// Learned skills, lowest level first
    pub skills: Vec<Skill>,
}

impl Persona {
    /// Affinity toward `element`, `None` when neutral
    pub fn affinity(&self, element: Element) -> Option<Affinity> {
        self.resistances.get(&element).copied()
    }

    /// Elements this persona is weak to
    pub fn weaknesses(&self) -> impl Iterator<Item = Element> + '_ {
        self.resistances
            .iter()
            .filter(|(_, affinity)| **affinity == Affinity::Weak)
            .map(|(element, _)| *element)
    }
}

/// Field to sort a persona listing by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    #[default]
    Level,
    /// Catalog order of the arcana, then level
    Arcana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Compendium listing parameters
#[derive(Debug, Clone, Default)]
pub struct PersonaQuery {
    /// Only personas of this arcana; `None` lists every arcana
    pub arcana: Option<Arcana>,
    /// Case-insensitive substring matched against persona and arcana names
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortOrder,
}

/// Every catalogued persona, in data order
#[derive(Debug, Clone, Default)]
pub struct Compendium {
    personas: Vec<Persona>,
    /// Lowercased name -> index into `personas`
    by_name: HashMap<String, usize>,
}

impl Compendium {
    /// Build a compendium; names must be unique ignoring case
    pub fn new(personas: Vec<Persona>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(personas.len());

        for (i, persona) in personas.iter().enumerate() {
            if persona.level == 0 || persona.level > 99 {
                return Err(Error::InvalidData(format!(
                    "persona {} has level {} (expected 1-99)",
                    persona.name, persona.level
                )));
            }
            if by_name.insert(persona.name.to_lowercase(), i).is_some() {
                return Err(Error::InvalidData(format!(
                    "persona {} is listed more than once",
                    persona.name
                )));
            }
        }

        Ok(Self { personas, by_name })
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Persona> {
        self.personas.iter()
    }

    /// Case-insensitive exact name lookup
    pub fn get(&self, name: &str) -> Option<&Persona> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .map(|i| &self.personas[*i])
    }

    /// Personas of one arcana, lowest level first
    pub fn in_arcana(&self, arcana: Arcana) -> Vec<&Persona> {
        let mut found: Vec<&Persona> = self
            .personas
            .iter()
            .filter(|p| p.arcana == arcana)
            .collect();
        found.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.name.cmp(&b.name)));
        found
    }

    /// Filter, search and sort the compendium
    ///
    /// The catalog resolves arcana names for the search match and for
    /// sorting by arcana.
    pub fn query(&self, catalog: &ArcanaCatalog, query: &PersonaQuery) -> Vec<&Persona> {
        let needle = query
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        let mut found: Vec<&Persona> = self
            .personas
            .iter()
            .filter(|p| query.arcana.map_or(true, |arcana| p.arcana == arcana))
            .filter(|p| match &needle {
                None => true,
                Some(needle) => {
                    p.name.to_lowercase().contains(needle)
                        || catalog.name(p.arcana).to_lowercase().contains(needle)
                }
            })
            .collect();

        found.sort_by(|a, b| {
            let ordering = match query.sort {
                SortField::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
                SortField::Level => a.level.cmp(&b.level),
                SortField::Arcana => a.arcana.cmp(&b.arcana).then(a.level.cmp(&b.level)),
            };
            match query.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(name: &str, arcana: Arcana, level: u8) -> Persona {
        Persona {
            name: name.to_string(),
            arcana,
            level,
            stats: Stats::derived(level, StatProfile::Balanced),
            inherits: "Fire".to_string(),
            resistances: BTreeMap::new(),
            skills: Skill::defaults_for(level, "Fire"),
        }
    }

    fn fixture() -> (ArcanaCatalog, Compendium) {
        let catalog = ArcanaCatalog::new(["Fool", "Magician"]).unwrap();
        let fool = catalog.parse("Fool").unwrap();
        let magician = catalog.parse("Magician").unwrap();
        let compendium = Compendium::new(vec![
            persona("Slime", fool, 12),
            persona("Orpheus", fool, 1),
            persona("Nekomata", magician, 5),
            persona("Jack Frost", magician, 8),
        ])
        .unwrap();
        (catalog, compendium)
    }

    #[test]
    fn test_get_case_insensitive() {
        let (_, compendium) = fixture();
        assert_eq!(compendium.get("jack frost").unwrap().level, 8);
        assert!(compendium.get("Pixie").is_none());
    }

    #[test]
    fn test_in_arcana_sorted_by_level() {
        let (catalog, compendium) = fixture();
        let fool = catalog.parse("Fool").unwrap();
        let names: Vec<&str> = compendium
            .in_arcana(fool)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Orpheus", "Slime"]);
    }

    #[test]
    fn test_query_search_matches_arcana_name() {
        let (catalog, compendium) = fixture();
        let query = PersonaQuery {
            search: Some("MAGIC".to_string()),
            ..Default::default()
        };
        let names: Vec<&str> = compendium
            .query(&catalog, &query)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Nekomata", "Jack Frost"]);
    }

    #[test]
    fn test_query_sort_name_desc() {
        let (catalog, compendium) = fixture();
        let query = PersonaQuery {
            sort: SortField::Name,
            order: SortOrder::Desc,
            ..Default::default()
        };
        let first = compendium.query(&catalog, &query)[0];
        assert_eq!(first.name, "Slime");
    }

    #[test]
    fn test_query_arcana_filter() {
        let (catalog, compendium) = fixture();
        let query = PersonaQuery {
            arcana: Some(catalog.parse("Fool").unwrap()),
            search: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(compendium.query(&catalog, &query).len(), 2);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let catalog = ArcanaCatalog::new(["Fool"]).unwrap();
        let fool = catalog.parse("Fool").unwrap();
        let result = Compendium::new(vec![persona("Slime", fool, 12), persona("SLIME", fool, 3)]);
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }

    #[test]
    fn test_weaknesses() {
        let catalog = ArcanaCatalog::new(["Fool"]).unwrap();
        let mut p = persona("Orpheus", catalog.parse("Fool").unwrap(), 1);
        p.resistances.insert(Element::Elec, Affinity::Weak);
        p.resistances.insert(Element::Dark, Affinity::Null);
        assert_eq!(p.weaknesses().collect::<Vec<_>>(), vec![Element::Elec]);
        assert_eq!(p.affinity(Element::Fire), None);
    }

    #[test]
    fn test_derived_stats_follow_profile() {
        let physical = Stats::derived(12, StatProfile::Physical);
        assert_eq!(
            physical,
            Stats { st: 11, ma: 7, en: 9, ag: 10, lu: 8 }
        );

        let magic = Stats::derived(12, StatProfile::Magic);
        assert!(magic.ma > magic.st);
        assert_eq!(magic.en, physical.en);

        let balanced = Stats::derived(1, StatProfile::Balanced);
        assert_eq!(balanced, Stats { st: 0, ma: 0, en: 0, ag: 0, lu: 0 });
    }

    #[test]
    fn test_default_skills_by_inheritance() {
        assert_eq!(
            Skill::defaults_for(1, "Wind"),
            vec![Skill { name: "Garu".to_string(), level: 1 }]
        );
        assert_eq!(
            Skill::defaults_for(12, "Physical"),
            vec![Skill { name: "Bash".to_string(), level: 10 }]
        );
    }
}
