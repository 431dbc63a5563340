//! # Search Filter
//!
//! Raw, possibly contradictory user input ([`RawSearchFilter`]) is turned
//! into an immutable, normalized [`SearchFilter`] in one step. The rules
//! run in a fixed order:
//!
//! 1. Cost and power ranges: swap inverted bounds, then pull a bound equal
//!    to the infinity sentinel back by one.
//! 2. An empty inclusion set means every civilization.
//! 3. Exact rainbow matching excludes the complement of the inclusion set;
//!    otherwise civilizations both included and excluded count as included.
//! 4. Mono/rainbow flags: both unset means both on; set and equal means
//!    both on; a `false` is kept only when the two differ.
//! 5. Without rainbow matching, exact matching is off.
//! 6. Twinpact mode defaults to `In`.
//!
//! Normalizing an already normalized filter changes nothing.

use crate::card_type::CardType;
use crate::civilization::{Civilization, CivilizationSet};
use crate::primitives::INFINITY_SENTINEL;
use crate::rarity::RarityFilter;
use crate::{CatalogError, SetId};
use serde::{Deserialize, Serialize};

// =============================================================================
// TWINPACT MODE
// =============================================================================

/// How twinpact cards take part in a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwinpactMode {
    /// No restriction.
    #[default]
    In,
    /// Twinpact cards never match.
    #[serde(alias = "ex")]
    Exclude,
    /// Only twinpact cards match.
    Only,
}

impl TwinpactMode {
    pub fn from_name(name: &str) -> Result<Self, CatalogError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "in" => Ok(TwinpactMode::In),
            "ex" | "exclude" => Ok(TwinpactMode::Exclude),
            "only" => Ok(TwinpactMode::Only),
            _ => Err(CatalogError::InvalidFilter(format!(
                "unknown twinpact mode {name:?}"
            ))),
        }
    }
}

// =============================================================================
// VALUE RANGE
// =============================================================================

/// Inclusive numeric range with optional bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ValueRange {
    min: Option<i32>,
    max: Option<i32>,
}

impl ValueRange {
    /// Build a normalized range.
    ///
    /// Inverted bounds are swapped. A bound equal to the infinity sentinel
    /// becomes `sentinel - 1`, so a generic numeric bound never decides on
    /// infinite values by accident.
    #[must_use]
    pub fn new(min: Option<i32>, max: Option<i32>) -> Self {
        let (mut min, mut max) = match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => (Some(hi), Some(lo)),
            bounds => bounds,
        };
        if max == Some(INFINITY_SENTINEL) {
            max = Some(INFINITY_SENTINEL - 1);
        }
        if min == Some(INFINITY_SENTINEL) {
            min = Some(INFINITY_SENTINEL - 1);
        }
        Self { min, max }
    }

    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub const fn min(&self) -> Option<i32> {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Option<i32> {
        self.max
    }

    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Whether either bound is exactly zero.
    #[must_use]
    pub fn has_zero_bound(&self) -> bool {
        self.min == Some(0) || self.max == Some(0)
    }

    #[must_use]
    pub fn contains(&self, value: i32) -> bool {
        self.min.is_none_or(|lo| value >= lo) && self.max.is_none_or(|hi| value <= hi)
    }
}

// =============================================================================
// RAW FILTER
// =============================================================================

/// Search parameters as received from a caller. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSearchFilter {
    pub set_id: Option<SetId>,
    pub included_civs: Option<CivilizationSet>,
    pub excluded_civs: Option<CivilizationSet>,
    pub include_mono: Option<bool>,
    pub include_rainbow: Option<bool>,
    pub match_exact_rainbow_civs: Option<bool>,
    pub min_cost: Option<i32>,
    pub max_cost: Option<i32>,
    pub min_power: Option<i32>,
    pub max_power: Option<i32>,
    pub twinpact: Option<TwinpactMode>,
    pub card_type: Option<CardType>,
    pub rarity: Option<RarityFilter>,
    pub species_search: Option<String>,
    pub name_search: Option<String>,
    pub effect_search: Option<String>,
}

impl RawSearchFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add civilizations to the inclusion set.
    #[must_use]
    pub fn include<I: IntoIterator<Item = Civilization>>(mut self, civs: I) -> Self {
        let mut set = self.included_civs.unwrap_or_default();
        civs.into_iter().for_each(|civ| set.insert(civ));
        self.included_civs = Some(set);
        self
    }

    /// Add civilizations to the exclusion set.
    #[must_use]
    pub fn exclude<I: IntoIterator<Item = Civilization>>(mut self, civs: I) -> Self {
        let mut set = self.excluded_civs.unwrap_or_default();
        civs.into_iter().for_each(|civ| set.insert(civ));
        self.excluded_civs = Some(set);
        self
    }

    #[must_use]
    pub fn mono(mut self, include: bool) -> Self {
        self.include_mono = Some(include);
        self
    }

    #[must_use]
    pub fn rainbow(mut self, include: bool) -> Self {
        self.include_rainbow = Some(include);
        self
    }

    #[must_use]
    pub fn exact(mut self, exact: bool) -> Self {
        self.match_exact_rainbow_civs = Some(exact);
        self
    }

    #[must_use]
    pub fn cost(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_cost = min;
        self.max_cost = max;
        self
    }

    #[must_use]
    pub fn power(mut self, min: Option<i32>, max: Option<i32>) -> Self {
        self.min_power = min;
        self.max_power = max;
        self
    }

    #[must_use]
    pub fn twinpact_mode(mut self, mode: TwinpactMode) -> Self {
        self.twinpact = Some(mode);
        self
    }

    #[must_use]
    pub fn card_type(mut self, card_type: CardType) -> Self {
        self.card_type = Some(card_type);
        self
    }

    #[must_use]
    pub fn rarity(mut self, rarity: RarityFilter) -> Self {
        self.rarity = Some(rarity);
        self
    }

    #[must_use]
    pub fn set(mut self, set_id: SetId) -> Self {
        self.set_id = Some(set_id);
        self
    }

    #[must_use]
    pub fn species(mut self, text: impl Into<String>) -> Self {
        self.species_search = Some(text.into());
        self
    }

    #[must_use]
    pub fn name(mut self, text: impl Into<String>) -> Self {
        self.name_search = Some(text.into());
        self
    }

    #[must_use]
    pub fn effect(mut self, text: impl Into<String>) -> Self {
        self.effect_search = Some(text.into());
        self
    }

    /// Normalize into a [`SearchFilter`].
    #[must_use]
    pub fn build(self) -> SearchFilter {
        SearchFilter::new(self)
    }
}

// =============================================================================
// NORMALIZED FILTER
// =============================================================================

/// A normalized, immutable search filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchFilter {
    set_id: Option<SetId>,
    included_civs: CivilizationSet,
    excluded_civs: CivilizationSet,
    include_mono: bool,
    include_rainbow: bool,
    match_exact_rainbow_civs: bool,
    cost_range: ValueRange,
    power_range: ValueRange,
    twinpact: TwinpactMode,
    card_type: Option<CardType>,
    rarity: Option<RarityFilter>,
    species_search: Option<String>,
    name_search: Option<String>,
    effect_search: Option<String>,
}

impl SearchFilter {
    /// Apply every normalization rule to raw input.
    #[must_use]
    pub fn new(raw: RawSearchFilter) -> Self {
        let cost_range = ValueRange::new(raw.min_cost, raw.max_cost);
        let power_range = ValueRange::new(raw.min_power, raw.max_power);

        let included_civs = raw
            .included_civs
            .filter(|civs| !civs.is_empty())
            .unwrap_or_else(CivilizationSet::all);

        let mut match_exact_rainbow_civs = raw.match_exact_rainbow_civs.unwrap_or(false);
        let excluded_civs = if match_exact_rainbow_civs {
            included_civs.complement()
        } else {
            raw.excluded_civs
                .unwrap_or_default()
                .difference(included_civs)
        };

        let (include_mono, include_rainbow) = match (raw.include_mono, raw.include_rainbow) {
            (None, None) => (true, true),
            (mono, rainbow) => {
                let mono = mono != Some(false);
                let rainbow = rainbow != Some(false);
                if mono == rainbow {
                    (true, true)
                } else {
                    (mono, rainbow)
                }
            }
        };
        if !include_rainbow {
            match_exact_rainbow_civs = false;
        }

        Self {
            set_id: raw.set_id,
            included_civs,
            excluded_civs,
            include_mono,
            include_rainbow,
            match_exact_rainbow_civs,
            cost_range,
            power_range,
            twinpact: raw.twinpact.unwrap_or_default(),
            card_type: raw.card_type,
            rarity: raw.rarity,
            species_search: non_blank(raw.species_search),
            name_search: non_blank(raw.name_search),
            effect_search: non_blank(raw.effect_search),
        }
    }

    /// The raw form of this filter. Normalizing it yields `self` again.
    #[must_use]
    pub fn to_raw(&self) -> RawSearchFilter {
        RawSearchFilter {
            set_id: self.set_id,
            included_civs: Some(self.included_civs),
            excluded_civs: Some(self.excluded_civs),
            include_mono: Some(self.include_mono),
            include_rainbow: Some(self.include_rainbow),
            match_exact_rainbow_civs: Some(self.match_exact_rainbow_civs),
            min_cost: self.cost_range.min(),
            max_cost: self.cost_range.max(),
            min_power: self.power_range.min(),
            max_power: self.power_range.max(),
            twinpact: Some(self.twinpact),
            card_type: self.card_type,
            rarity: self.rarity.clone(),
            species_search: self.species_search.clone(),
            name_search: self.name_search.clone(),
            effect_search: self.effect_search.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    #[must_use]
    pub fn set_id(&self) -> Option<SetId> {
        self.set_id
    }

    #[must_use]
    pub fn included_civs(&self) -> CivilizationSet {
        self.included_civs
    }

    #[must_use]
    pub fn excluded_civs(&self) -> CivilizationSet {
        self.excluded_civs
    }

    #[must_use]
    pub fn include_mono(&self) -> bool {
        self.include_mono
    }

    #[must_use]
    pub fn include_rainbow(&self) -> bool {
        self.include_rainbow
    }

    #[must_use]
    pub fn match_exact_rainbow_civs(&self) -> bool {
        self.match_exact_rainbow_civs
    }

    #[must_use]
    pub fn cost_range(&self) -> ValueRange {
        self.cost_range
    }

    #[must_use]
    pub fn power_range(&self) -> ValueRange {
        self.power_range
    }

    #[must_use]
    pub fn twinpact(&self) -> TwinpactMode {
        self.twinpact
    }

    #[must_use]
    pub fn card_type(&self) -> Option<CardType> {
        self.card_type
    }

    #[must_use]
    pub fn rarity(&self) -> Option<&RarityFilter> {
        self.rarity.as_ref()
    }

    #[must_use]
    pub fn species_search(&self) -> Option<&str> {
        self.species_search.as_deref()
    }

    #[must_use]
    pub fn name_search(&self) -> Option<&str> {
        self.name_search.as_deref()
    }

    #[must_use]
    pub fn effect_search(&self) -> Option<&str> {
        self.effect_search.as_deref()
    }

    // -------------------------------------------------------------------------
    // Derived properties
    // -------------------------------------------------------------------------

    /// Included civilizations other than Colorless.
    #[must_use]
    pub fn included_without_colorless(&self) -> CivilizationSet {
        self.included_civs.without_colorless()
    }

    /// Whether the filter can match nothing by construction.
    ///
    /// A rainbow-only search needs at least one non-colorless civilization,
    /// and two when it asks for an exact match. Callers treat an invalid
    /// filter as an empty result, never as an error.
    #[must_use]
    pub fn is_invalid(&self) -> bool {
        if self.include_mono {
            return false;
        }
        let rainbow_civs = self.included_without_colorless().len();
        rainbow_civs == 0 || (rainbow_civs == 1 && self.match_exact_rainbow_civs)
    }

    /// False for the default civilization settings, which accept any card.
    #[must_use]
    pub fn needs_civ_filter(&self) -> bool {
        let is_default = self.included_civs.is_all()
            && self.include_mono
            && self.include_rainbow
            && !self.match_exact_rainbow_civs;
        !is_default
    }

    /// Whether a card-level column (set, rarity, twinpact flag) is restricted.
    #[must_use]
    pub fn needs_card_columns_filter(&self) -> bool {
        self.set_id.is_some() || self.rarity.is_some() || self.twinpact != TwinpactMode::In
    }

    /// Whether a per-facet column (cost, power, type, name) is restricted.
    #[must_use]
    pub fn needs_facet_column_filter(&self) -> bool {
        !self.cost_range.is_unbounded()
            || !self.power_range.is_unbounded()
            || self.card_type.is_some()
            || self.name_search.is_some()
    }

    /// Whether species or effect text must be resolved through an index.
    #[must_use]
    pub fn needs_text_index(&self) -> bool {
        self.species_search.is_some() || self.effect_search.is_some()
    }
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self::new(RawSearchFilter::default())
    }
}

impl From<RawSearchFilter> for SearchFilter {
    fn from(raw: RawSearchFilter) -> Self {
        Self::new(raw)
    }
}

fn non_blank(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

// =============================================================================
// TESTS
// =============================================================================
