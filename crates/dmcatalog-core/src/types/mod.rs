//! # Core Type Definitions
//!
//! This module contains the identifier and error types shared by every
//! part of the catalog engine:
//! - Record identifiers (`CardId`, `FacetId`, `SetId`, `SpeciesId`, `EffectId`)
//! - Rarity codes (`RarityCode`)
//! - Error types (`CatalogError`)
//!
//! ## Determinism Guarantees
//!
//! All identifiers implement `Ord` so they can key `BTreeMap`/`BTreeSet`
//! and produce stable iteration order.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// RECORD IDENTIFIERS
// =============================================================================

/// Internal identifier of a card record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u64);

/// Identifier of one facet (printed face) of a card.
///
/// The species and effect indices resolve text searches to sets of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacetId(pub u64);

/// Identifier of an official card set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SetId(pub u64);

/// Identifier of a species entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpeciesId(pub u64);

/// Identifier of an effect text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u64);

// =============================================================================
// RARITY CODE
// =============================================================================

/// Printed rarity code of a card ("C", "U", "R", "VR", "SR", ...).
///
/// Codes are opaque here; their relative order comes from an external
/// rarity table (see [`crate::rarity`]).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RarityCode(pub String);

impl RarityCode {
    /// Code stored for cards that carry no rarity.
    pub const NONE: &'static str = "NONE";

    /// Create a new rarity code.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Get the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the placeholder code for "no rarity".
    #[must_use]
    pub fn is_none_code(&self) -> bool {
        self.0 == Self::NONE
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the catalog engine.
///
/// Search itself is fail-soft: none of these are raised while evaluating
/// a filter against a card. They surface at ingestion time (malformed
/// stored data), while parsing raw filter fragments, or when an external
/// index source fails.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A power text does not have a valid integer body.
    #[error("Invalid power format: {0:?}")]
    InvalidPowerFormat(String),

    /// A cost text is neither blank, the infinity glyph, nor an integer.
    #[error("Invalid cost format: {0:?}")]
    InvalidCostFormat(String),

    /// A stored civilization ordinal is outside `0..=5`.
    #[error("Civilization ordinal out of range: {0}")]
    CivilizationOutOfRange(u8),

    /// A stored card has a facet layout no card can have.
    #[error("Invalid card shape: {0}")]
    InvalidShape(String),

    /// A raw filter fragment could not be understood.
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// The external source for a text index failed.
    #[error("Index source error: {0}")]
    IndexSource(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rarity_none_code() {
        assert!(RarityCode::new("NONE").is_none_code());
        assert!(!RarityCode::new("SR").is_none_code());
    }

    #[test]
    fn identifiers_order_deterministically() {
        let mut ids = [FacetId(3), FacetId(1), FacetId(2)];
        ids.sort();
        assert_eq!(ids, [FacetId(1), FacetId(2), FacetId(3)]);
    }

    #[test]
    fn error_messages() {
        let err = CatalogError::CivilizationOutOfRange(9);
        assert_eq!(err.to_string(), "Civilization ordinal out of range: 9");
        let err = CatalogError::InvalidPowerFormat("abc".to_string());
        assert_eq!(err.to_string(), "Invalid power format: \"abc\"");
    }
}
