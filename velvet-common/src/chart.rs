//! Fusion chart and resolver
//!
//! The chart maps every unordered pair of distinct arcana to a single
//! result arcana. Pairs are stored under a canonical key (lower catalog
//! position first), so `resolve(a, b) == resolve(b, a)` holds by
//! construction.
//!
//! Fusing an arcana with itself is never defined and is reported as
//! [`Fusion::NotFusable`], an expected outcome rather than an error.

use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::arcana::{Arcana, ArcanaCatalog};
use crate::{Error, Result};

/// Outcome of a forward fusion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fusion {
    /// The arcana the chart assigns to the pair
    Result(Arcana),
    /// Both inputs are the same arcana
    NotFusable,
}

impl Fusion {
    pub fn result(self) -> Option<Arcana> {
        match self {
            Fusion::Result(arcana) => Some(arcana),
            Fusion::NotFusable => None,
        }
    }

    pub fn is_fusable(self) -> bool {
        matches!(self, Fusion::Result(_))
    }
}

/// Unordered pair of distinct arcana, `first` always before `second` in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FusionPair {
    pub first: Arcana,
    pub second: Arcana,
}

impl FusionPair {
    /// Canonicalize two distinct arcana; `None` when they are the same
    pub fn new(a: Arcana, b: Arcana) -> Option<Self> {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => Some(Self { first: a, second: b }),
            std::cmp::Ordering::Greater => Some(Self { first: b, second: a }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// One chart cell, as yielded by [`FusionChart::entries`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartEntry {
    pub pair: FusionPair,
    pub result: Arcana,
}

/// Immutable pairwise fusion table over a catalog
#[derive(Debug)]
pub struct FusionChart {
    catalog: ArcanaCatalog,
    results: HashMap<FusionPair, Arcana>,
    /// Number of pairs producing each arcana, indexed by catalog position.
    /// Built on first use; the chart never changes afterwards.
    producers: OnceCell<Vec<usize>>,
}

impl FusionChart {
    /// Build a chart from `(a, b, result)` name triples
    ///
    /// Rejects unknown names, self pairs and pairs listed twice (in either
    /// order), and requires every unordered pair of distinct arcana to be
    /// present.
    pub fn from_entries<I, S>(catalog: ArcanaCatalog, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, S, S)>,
        S: AsRef<str>,
    {
        let mut results = HashMap::new();

        for (a, b, result) in entries {
            let (a, b, result) = (a.as_ref(), b.as_ref(), result.as_ref());
            let lookup = |name: &str| {
                catalog.parse(name).map_err(|_| {
                    Error::InvalidData(format!(
                        "chart entry {} x {}: unknown arcana '{}'",
                        a, b, name
                    ))
                })
            };

            let first = lookup(a)?;
            let second = lookup(b)?;
            let result = lookup(result)?;

            let pair = FusionPair::new(first, second).ok_or_else(|| {
                Error::InvalidData(format!("chart entry pairs {} with itself", a))
            })?;

            if results.insert(pair, result).is_some() {
                return Err(Error::InvalidData(format!(
                    "chart entry {} x {} appears more than once",
                    a, b
                )));
            }
        }

        let chart = Self {
            catalog,
            results,
            producers: OnceCell::new(),
        };

        if let Some(missing) = chart.pairs().find(|pair| !chart.results.contains_key(pair)) {
            return Err(Error::InvalidData(format!(
                "chart has no entry for {} x {}",
                chart.catalog.name(missing.first),
                chart.catalog.name(missing.second)
            )));
        }

        debug!(
            arcana = chart.catalog.len(),
            pairs = chart.results.len(),
            "Fusion chart built"
        );

        Ok(chart)
    }

    pub fn catalog(&self) -> &ArcanaCatalog {
        &self.catalog
    }

    /// Number of pairs in the chart
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Forward fusion of two arcana
    ///
    /// # Panics
    /// If either arcana was not minted by this chart's catalog. Names coming
    /// from outside must go through [`FusionChart::resolve_names`] or
    /// [`ArcanaCatalog::parse`] first.
    pub fn resolve(&self, a: Arcana, b: Arcana) -> Fusion {
        assert!(
            self.catalog.contains(a) && self.catalog.contains(b),
            "arcana outside the chart's catalog: {:?}, {:?}",
            a,
            b
        );

        match FusionPair::new(a, b) {
            None => Fusion::NotFusable,
            Some(pair) => match self.results.get(&pair) {
                Some(result) => Fusion::Result(*result),
                None => unreachable!("fusion chart is total over its catalog"),
            },
        }
    }

    /// Forward fusion by name, validating both names against the catalog
    pub fn resolve_names(&self, a: &str, b: &str) -> Result<Fusion> {
        let a = self.catalog.parse(a)?;
        let b = self.catalog.parse(b)?;
        Ok(self.resolve(a, b))
    }

    /// Every pair whose fusion yields `target`
    ///
    /// The iterator scans the chart lazily in canonical order (by first
    /// arcana, then second) and can be cloned to restart. It is empty when
    /// no standard pair produces `target`.
    pub fn reverse_lookup(&self, target: Arcana) -> ReverseLookup<'_> {
        ReverseLookup {
            chart: self,
            target,
            pairs: self.pairs(),
        }
    }

    /// Reverse lookup by name, collected
    pub fn reverse_lookup_names(&self, target: &str) -> Result<Vec<FusionPair>> {
        let target = self.catalog.parse(target)?;
        Ok(self.reverse_lookup(target).collect())
    }

    /// All chart cells in canonical order
    pub fn entries(&self) -> impl Iterator<Item = ChartEntry> + '_ {
        self.pairs().filter_map(move |pair| {
            self.results
                .get(&pair)
                .map(|result| ChartEntry { pair, result: *result })
        })
    }

    /// How many standard pairs produce `target`
    pub fn producer_count(&self, target: Arcana) -> usize {
        self.producers()
            .get(target.position())
            .copied()
            .unwrap_or(0)
    }

    /// Arcana that no standard pair produces
    ///
    /// These are only reachable through special recipes, which the chart
    /// does not model.
    pub fn unreachable(&self) -> Vec<Arcana> {
        self.catalog
            .iter()
            .filter(|arcana| self.producer_count(*arcana) == 0)
            .collect()
    }

    fn producers(&self) -> &[usize] {
        self.producers.get_or_init(|| {
            let mut counts = vec![0; self.catalog.len()];
            for result in self.results.values() {
                counts[result.position()] += 1;
            }
            counts
        })
    }

    /// Canonical pair order over the catalog
    fn pairs(&self) -> PairCursor {
        PairCursor {
            len: self.catalog.len(),
            first: 0,
            second: 1,
        }
    }
}

/// Walks every unordered pair of catalog positions in canonical order
#[derive(Debug, Clone)]
struct PairCursor {
    len: usize,
    first: usize,
    second: usize,
}

impl Iterator for PairCursor {
    type Item = FusionPair;

    fn next(&mut self) -> Option<FusionPair> {
        while self.first < self.len {
            if self.second < self.len {
                let pair = FusionPair {
                    first: ArcanaCatalog::arcana_at(self.first),
                    second: ArcanaCatalog::arcana_at(self.second),
                };
                self.second += 1;
                return Some(pair);
            }
            self.first += 1;
            self.second = self.first + 1;
        }
        None
    }
}

/// Iterator returned by [`FusionChart::reverse_lookup`]
#[derive(Debug, Clone)]
pub struct ReverseLookup<'a> {
    chart: &'a FusionChart,
    target: Arcana,
    pairs: PairCursor,
}

impl Iterator for ReverseLookup<'_> {
    type Item = FusionPair;

    fn next(&mut self) -> Option<FusionPair> {
        let chart = self.chart;
        let target = self.target;
        self.pairs
            .by_ref()
            .find(|pair| chart.results.get(pair) == Some(&target))
    }
}
