//! # dmcatalog-core
//!
//! The civilization matching and ordering engine of the card catalog - THE LOGIC.
//!
//! Given a normalized [`SearchFilter`] and a card's [`CardShape`], the engine
//! decides whether the card matches and derives the keys results are
//! ordered by. Everything else (persistence, paging, presentation) sits
//! around it.
//!
//! ## Architectural Constraints
//!
//! - Values are immutable after construction; matching and sort keys are
//!   pure functions, safe to evaluate from any number of threads
//! - The only stateful parts are the text indices, built once and frozen
//! - Search is fail-soft: a contradictory filter yields an empty result,
//!   never an error
//! - Deterministic: `BTreeMap`/`BTreeSet` only, no floats
//! - NO async, NO network, NO SQL execution (conditions are compiled, never run)

// =============================================================================
// MODULES
// =============================================================================

pub mod anomaly;
pub mod card;
pub mod card_type;
pub mod civilization;
pub mod condition;
pub mod cost;
pub mod filter;
pub mod index;
pub mod matcher;
pub mod power;
pub mod primitives;
pub mod rarity;
pub mod search;
pub mod secondary;
pub mod sort;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CardId, CatalogError, EffectId, FacetId, RarityCode, SetId, SpeciesId};

// =============================================================================
// RE-EXPORTS: Values
// =============================================================================

pub use card::{Card, CardShape, Facet};
pub use card_type::CardType;
pub use civilization::{Civilization, CivilizationSet};
pub use cost::CardCost;
pub use power::{Power, PowerModifier};
pub use rarity::{RarityFilter, RarityOrder, RarityRange, RarityTable};

// =============================================================================
// RE-EXPORTS: Filter & Match Engine
// =============================================================================

pub use condition::{CivCondition, CompiledQuery, SizeCmp, compile};
pub use filter::{RawSearchFilter, SearchFilter, TwinpactMode, ValueRange};
pub use matcher::matches;
pub use sort::{SortDirection, SortField, SortSpec, compare_cards, parse_sort};

// =============================================================================
// RE-EXPORTS: Search
// =============================================================================

pub use index::{
    EffectIndex, EffectLink, EffectRecord, IndexSource, LazyIndex, SpeciesIndex, SpeciesLink,
    SpeciesRecord, TextIndices,
};
pub use search::{
    Catalog, CatalogStats, Page, SearchContext, SearchResult, card_matches, search,
};
