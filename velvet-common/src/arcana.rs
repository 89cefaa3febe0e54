//! Arcana catalog
//!
//! The closed, ordered set of arcana loaded from reference data. Catalog
//! order defines the canonical order of fusion pairs and of every listing
//! derived from them.

use std::collections::HashMap;
use std::fmt;

use crate::{Error, Result};

/// Opaque arcana identifier
///
/// Wraps the arcana's position in the catalog that minted it. Only
/// [`ArcanaCatalog`] hands these out, so an `Arcana` is always valid for
/// its own catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Arcana(u16);

impl Arcana {
    /// Position in the catalog (0-based)
    pub fn position(self) -> usize {
        self.0 as usize
    }
}

/// Fixed enumeration of arcana names
#[derive(Debug, Clone, Default)]
pub struct ArcanaCatalog {
    names: Vec<String>,
    /// Lowercased name -> arcana
    index: HashMap<String, Arcana>,
}

impl ArcanaCatalog {
    /// Build a catalog from names in canonical order
    ///
    /// Names are trimmed. Empty names and case-insensitive duplicates are
    /// rejected. An empty list is a valid (empty) catalog.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut catalog = Self::default();

        for raw in names {
            let name = raw.as_ref().trim();
            if name.is_empty() {
                return Err(Error::InvalidData("empty arcana name".to_string()));
            }

            let position = u16::try_from(catalog.names.len())
                .map_err(|_| Error::InvalidData("too many arcana".to_string()))?;

            let key = name.to_lowercase();
            if catalog.index.contains_key(&key) {
                return Err(Error::InvalidData(format!("duplicate arcana: {}", name)));
            }

            catalog.index.insert(key, Arcana(position));
            catalog.names.push(name.to_string());
        }

        Ok(catalog)
    }

    /// Look up an arcana by name (case-insensitive, surrounding whitespace ignored)
    pub fn parse(&self, name: &str) -> Result<Arcana> {
        self.index
            .get(&name.trim().to_lowercase())
            .copied()
            .ok_or_else(|| Error::UnknownArcana(name.to_string()))
    }

    /// Canonical spelling of an arcana
    ///
    /// # Panics
    /// If `arcana` was minted by a different, larger catalog.
    pub fn name(&self, arcana: Arcana) -> &str {
        &self.names[arcana.position()]
    }

    /// Identifier for a catalog position, for crate-internal iteration
    pub(crate) fn arcana_at(position: usize) -> Arcana {
        Arcana(position as u16)
    }

    /// Whether `arcana` belongs to this catalog's range
    pub fn contains(&self, arcana: Arcana) -> bool {
        arcana.position() < self.names.len()
    }

    /// All arcana in catalog order
    pub fn iter(&self) -> impl Iterator<Item = Arcana> + '_ {
        (0..self.names.len()).map(Self::arcana_at)
    }

    /// Canonical names in catalog order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Display helper pairing an arcana with its catalog
    pub fn display(&self, arcana: Arcana) -> ArcanaDisplay<'_> {
        ArcanaDisplay {
            catalog: self,
            arcana,
        }
    }
}

/// `Display` adapter returned by [`ArcanaCatalog::display`]
pub struct ArcanaDisplay<'a> {
    catalog: &'a ArcanaCatalog,
    arcana: Arcana,
}

impl fmt::Display for ArcanaDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.catalog.name(self.arcana))
    }
}
