//! # Text Indices
//!
//! Species and effect searches resolve free text to facet ids before any
//! card is evaluated. Both indices are built once from a full scan of an
//! [`IndexSource`] and frozen afterwards.
//!
//! - `lazy`: one-shot build shared by concurrent callers
//! - `species`: species name → facets
//! - `effect`: effect text → facets, child effects through their parent

pub mod effect;
pub mod lazy;
pub mod species;

pub use effect::EffectIndex;
pub use lazy::LazyIndex;
pub use species::SpeciesIndex;

use crate::{CatalogError, EffectId, FacetId, SpeciesId};
use serde::{Deserialize, Serialize};

/// A species name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub id: SpeciesId,
    pub name: String,
}

/// An effect text. Child effects only reach facets through `parent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRecord {
    pub id: EffectId,
    pub text: String,
    #[serde(default)]
    pub parent: Option<EffectId>,
}

/// Facet carrying a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesLink {
    pub species: SpeciesId,
    pub facet: FacetId,
}

/// Facet carrying a (top-level) effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLink {
    pub effect: EffectId,
    pub facet: FacetId,
}

/// Full scan of the records the text indices are built from.
pub trait IndexSource: Send + Sync {
    fn species(&self) -> Result<Vec<SpeciesRecord>, CatalogError>;

    fn species_links(&self) -> Result<Vec<SpeciesLink>, CatalogError>;

    fn effects(&self) -> Result<Vec<EffectRecord>, CatalogError>;

    fn effect_links(&self) -> Result<Vec<EffectLink>, CatalogError>;
}

// =============================================================================
// TEXT INDICES
// =============================================================================

/// The species and effect indices over one source, each built on first use.
///
/// Share one instance by reference between searches; concurrent first
/// searches wait for a single build of each index.
pub struct TextIndices<'s> {
    source: &'s dyn IndexSource,
    species: LazyIndex<SpeciesIndex>,
    effects: LazyIndex<EffectIndex>,
}

impl<'s> TextIndices<'s> {
    #[must_use]
    pub fn new(source: &'s dyn IndexSource) -> Self {
        Self {
            source,
            species: LazyIndex::new(),
            effects: LazyIndex::new(),
        }
    }

    pub fn species(&self) -> Result<&SpeciesIndex, CatalogError> {
        self.species
            .get_or_build(|| SpeciesIndex::build(self.source))
    }

    pub fn effects(&self) -> Result<&EffectIndex, CatalogError> {
        self.effects.get_or_build(|| EffectIndex::build(self.source))
    }
}

impl std::fmt::Debug for TextIndices<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextIndices")
            .field("species_built", &self.species.is_built())
            .field("effects_built", &self.effects.is_built())
            .finish()
    }
}
