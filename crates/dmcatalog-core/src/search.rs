//! # Search Pipeline
//!
//! In-memory reference execution of a search over a catalog snapshot:
//!
//! 1. An invalid filter yields an empty result.
//! 2. Species and effect text resolve to facet id sets through the text
//!    indices; the sets are intersected and an empty set ends the search.
//! 3. Every card is evaluated with the civilization match, the secondary
//!    filters and the facet id restriction.
//! 4. Matches are sorted, counted and paged.

use crate::card::Card;
use crate::filter::SearchFilter;
use crate::index::{
    EffectLink, EffectRecord, IndexSource, SpeciesLink, SpeciesRecord, TextIndices,
};
use crate::rarity::RarityOrder;
use crate::sort::{SortSpec, sort_cards};
use crate::{CatalogError, FacetId, anomaly, matcher, secondary};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// CATALOG
// =============================================================================

/// Immutable catalog snapshot: cards plus the records text indices are built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub species: Vec<SpeciesRecord>,
    #[serde(default)]
    pub species_links: Vec<SpeciesLink>,
    #[serde(default)]
    pub effects: Vec<EffectRecord>,
    #[serde(default)]
    pub effect_links: Vec<EffectLink>,
}

/// Shape counts of a catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CatalogStats {
    pub cards: usize,
    pub facets: usize,
    pub twinpacts: usize,
    pub anomalies: usize,
}

impl Catalog {
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self {
            cards,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn stats(&self) -> CatalogStats {
        self.cards
            .iter()
            .fold(CatalogStats::default(), |mut stats, card| {
                stats.cards += 1;
                stats.facets += card.facets().len();
                stats.twinpacts += usize::from(card.shape().is_twinpact());
                stats.anomalies += usize::from(anomaly::is_anomaly_shape(card.shape()));
                stats
            })
    }
}

impl IndexSource for Catalog {
    fn species(&self) -> Result<Vec<SpeciesRecord>, CatalogError> {
        Ok(self.species.clone())
    }

    fn species_links(&self) -> Result<Vec<SpeciesLink>, CatalogError> {
        Ok(self.species_links.clone())
    }

    fn effects(&self) -> Result<Vec<EffectRecord>, CatalogError> {
        Ok(self.effects.clone())
    }

    fn effect_links(&self) -> Result<Vec<EffectLink>, CatalogError> {
        Ok(self.effect_links.clone())
    }
}

// =============================================================================
// CONTEXT & RESULT
// =============================================================================

/// External lookups a search reads from.
#[derive(Clone, Copy)]
pub struct SearchContext<'a> {
    pub rarities: &'a dyn RarityOrder,
    pub indices: Option<&'a TextIndices<'a>>,
}

impl<'a> SearchContext<'a> {
    #[must_use]
    pub fn new(rarities: &'a dyn RarityOrder) -> Self {
        Self {
            rarities,
            indices: None,
        }
    }

    #[must_use]
    pub fn with_indices(mut self, indices: &'a TextIndices<'a>) -> Self {
        self.indices = Some(indices);
        self
    }

    fn indices(&self) -> Result<&'a TextIndices<'a>, CatalogError> {
        self.indices.ok_or_else(|| {
            CatalogError::IndexSource("text search needs species and effect indices".to_string())
        })
    }
}

impl std::fmt::Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("indices", &self.indices)
            .finish_non_exhaustive()
    }
}

/// Window into the sorted result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

/// Matching cards of one page and the match count before paging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult<'c> {
    pub cards: Vec<&'c Card>,
    pub total: usize,
}

impl SearchResult<'_> {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cards: Vec::new(),
            total: 0,
        }
    }
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Whether a single card passes every part of the filter.
///
/// `facet_ids` is the resolved species/effect restriction, if any.
#[must_use]
pub fn card_matches(
    card: &Card,
    filter: &SearchFilter,
    rarities: &dyn RarityOrder,
    facet_ids: Option<&BTreeSet<FacetId>>,
) -> bool {
    matcher::matches(card.shape(), filter)
        && secondary::card_columns_match(card, filter, rarities)
        && secondary::facet_columns_match(card, filter)
        && facet_ids.is_none_or(|ids| secondary::facet_ids_match(card, ids))
}

/// Resolve species and effect text to one facet id set.
///
/// `Ok(None)`: no text restriction. `Ok(Some(empty))`: nothing can match.
fn resolve_facet_ids(
    filter: &SearchFilter,
    ctx: &SearchContext<'_>,
) -> Result<Option<BTreeSet<FacetId>>, CatalogError> {
    let mut facet_ids: Option<BTreeSet<FacetId>> = None;

    if let Some(text) = filter.species_search() {
        let ids = ctx.indices()?.species()?.search(text);
        tracing::debug!(search = text, facets = ids.len(), "Species search");
        if ids.is_empty() {
            return Ok(Some(ids));
        }
        facet_ids = Some(ids);
    }

    if let Some(text) = filter.effect_search() {
        let ids = ctx.indices()?.effects()?.search(text);
        let ids = match facet_ids {
            Some(previous) => ids.intersection(&previous).copied().collect(),
            None => ids,
        };
        facet_ids = Some(ids);
    }

    Ok(facet_ids)
}

/// Run a search over `catalog`.
///
/// Only failures of the external index source are errors; everything about
/// the filter itself degrades to a smaller or empty result.
pub fn search<'c>(
    catalog: &'c Catalog,
    filter: &SearchFilter,
    sort: &[SortSpec],
    page: Option<Page>,
    ctx: &SearchContext<'_>,
) -> Result<SearchResult<'c>, CatalogError> {
    if filter.is_invalid() {
        tracing::warn!(?filter, "Invalid search filter");
        return Ok(SearchResult::empty());
    }
    tracing::debug!(?filter, "Searching with filter");

    let facet_ids = resolve_facet_ids(filter, ctx)?;
    if facet_ids.as_ref().is_some_and(BTreeSet::is_empty) {
        return Ok(SearchResult::empty());
    }

    let mut cards: Vec<&Card> = catalog
        .cards
        .iter()
        .filter(|card| card_matches(card, filter, ctx.rarities, facet_ids.as_ref()))
        .collect();
    sort_cards(&mut cards, sort, ctx.rarities);

    let total = cards.len();
    tracing::debug!(total, "Query result size");

    let cards = match page {
        Some(Page { offset, limit }) => cards.into_iter().skip(offset).take(limit).collect(),
        None => cards,
    };
    Ok(SearchResult { cards, total })
}

// =============================================================================
// TESTS
// =============================================================================
