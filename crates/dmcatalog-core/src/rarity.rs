//! # Rarity
//!
//! Rarity codes only have an order through an externally supplied table.
//! The engine asks a [`RarityOrder`] for ordinals and never interprets
//! codes itself.

use crate::{CatalogError, RarityCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lookup from rarity code to its ordinal.
pub trait RarityOrder: Send + Sync {
    /// Ordinal of `code`, or `None` if the table does not know it.
    fn ordinal(&self, code: &RarityCode) -> Option<i32>;
}

/// In-memory rarity table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RarityTable {
    orders: BTreeMap<RarityCode, i32>,
}

impl RarityTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(code, ordinal)` entries; later entries win.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (RarityCode, i32)>,
    {
        Self {
            orders: entries.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, code: RarityCode, ordinal: i32) {
        self.orders.insert(code, ordinal);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Codes sorted by ordinal.
    #[must_use]
    pub fn codes_in_order(&self) -> Vec<&RarityCode> {
        let mut codes: Vec<(&RarityCode, i32)> =
            self.orders.iter().map(|(code, ord)| (code, *ord)).collect();
        codes.sort_by_key(|(code, ord)| (*ord, *code));
        codes.into_iter().map(|(code, _)| code).collect()
    }
}

impl RarityOrder for RarityTable {
    fn ordinal(&self, code: &RarityCode) -> Option<i32> {
        self.orders.get(code).copied()
    }
}

// =============================================================================
// RARITY FILTER
// =============================================================================

/// How a card's rarity is compared with the filter's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RarityRange {
    Le,
    #[default]
    Eq,
    Ge,
}

impl RarityRange {
    pub fn from_name(name: &str) -> Result<Self, CatalogError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "le" | "<=" => Ok(RarityRange::Le),
            "eq" | "=" => Ok(RarityRange::Eq),
            "ge" | ">=" => Ok(RarityRange::Ge),
            _ => Err(CatalogError::InvalidFilter(format!(
                "unknown rarity range {name:?}"
            ))),
        }
    }
}

/// Restrict results to a rarity, or to rarities below/above it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RarityFilter {
    pub code: RarityCode,
    #[serde(default)]
    pub range: RarityRange,
}

impl RarityFilter {
    #[must_use]
    pub fn new(code: RarityCode, range: RarityRange) -> Self {
        Self { code, range }
    }

    /// Whether a card with `card_rarity` passes.
    ///
    /// The filter's own code falls back to ordinal 0 when unknown. A card
    /// without a rarity is looked up under the `NONE` code; if the table
    /// has no such entry it never passes.
    #[must_use]
    pub fn accepts(&self, card_rarity: Option<&RarityCode>, table: &dyn RarityOrder) -> bool {
        let wanted = table.ordinal(&self.code).unwrap_or(0);
        let none_code = RarityCode::new(RarityCode::NONE);
        let Some(actual) = table.ordinal(card_rarity.unwrap_or(&none_code)) else {
            return false;
        };
        match self.range {
            RarityRange::Le => actual <= wanted,
            RarityRange::Eq => actual == wanted,
            RarityRange::Ge => actual >= wanted,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RarityTable {
        RarityTable::from_entries([
            (RarityCode::new("C"), 1),
            (RarityCode::new("U"), 2),
            (RarityCode::new("R"), 3),
            (RarityCode::new("SR"), 5),
        ])
    }

    #[test]
    fn ranges() {
        let table = table();
        let r = RarityCode::new("R");
        let filter = |range| RarityFilter::new(RarityCode::new("U"), range);
        assert!(filter(RarityRange::Ge).accepts(Some(&r), &table));
        assert!(!filter(RarityRange::Le).accepts(Some(&r), &table));
        assert!(!filter(RarityRange::Eq).accepts(Some(&r), &table));
        assert!(filter(RarityRange::Eq).accepts(Some(&RarityCode::new("U")), &table));
    }

    #[test]
    fn cards_without_rarity_need_a_none_entry() {
        let mut table = table();
        let filter = RarityFilter::new(RarityCode::new("C"), RarityRange::Le);
        assert!(!filter.accepts(None, &table));
        table.insert(RarityCode::new("NONE"), 0);
        assert!(filter.accepts(None, &table));
    }

    #[test]
    fn unknown_filter_code_is_ordinal_zero() {
        let table = table();
        let filter = RarityFilter::new(RarityCode::new("XYZ"), RarityRange::Ge);
        assert!(filter.accepts(Some(&RarityCode::new("C")), &table));
    }

    #[test]
    fn codes_in_order() {
        let table = table();
        let codes: Vec<&str> = table.codes_in_order().iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["C", "U", "R", "SR"]);
    }

    #[test]
    fn range_names() {
        assert_eq!(RarityRange::from_name(">=").expect("ge"), RarityRange::Ge);
        assert!(RarityRange::from_name("gt").is_err());
    }
}
