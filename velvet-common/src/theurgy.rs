//! Protagonist theurgy unlocks
//!
//! Each theurgy skill is unlocked by carrying a specific pair of personas.
//! The pair is unordered and the personas need not be in the compendium.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theurgy {
    pub skill: String,
    pub personas: [String; 2],
    pub description: String,
}

impl Theurgy {
    /// Whether `name` is one of the required personas (case-insensitive)
    pub fn requires(&self, name: &str) -> bool {
        let name = name.trim();
        self.personas.iter().any(|p| p.eq_ignore_ascii_case(name))
    }

    fn matches_pair(&self, a: &str, b: &str) -> bool {
        let (a, b) = (a.trim(), b.trim());
        let [x, y] = &self.personas;
        (x.eq_ignore_ascii_case(a) && y.eq_ignore_ascii_case(b))
            || (x.eq_ignore_ascii_case(b) && y.eq_ignore_ascii_case(a))
    }
}

/// Theurgy table in data order
#[derive(Debug, Clone, Default)]
pub struct TheurgyBook {
    entries: Vec<Theurgy>,
}

impl TheurgyBook {
    pub fn new(entries: Vec<Theurgy>) -> Self {
        Self { entries }
    }

    pub fn all(&self) -> &[Theurgy] {
        &self.entries
    }

    /// Theurgy unlocked by the pair, in either order
    pub fn for_pair(&self, a: &str, b: &str) -> Option<&Theurgy> {
        self.entries.iter().find(|t| t.matches_pair(a, b))
    }

    /// Every theurgy that needs `name`
    pub fn involving<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Theurgy> + 'a {
        self.entries.iter().filter(move |t| t.requires(name))
    }
}
