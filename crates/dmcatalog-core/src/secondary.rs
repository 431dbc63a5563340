//! # Secondary Filters
//!
//! Predicates AND-ed with the civilization match:
//!
//! - card columns: set id and rarity
//! - facet columns: cost, power, type and name. All facet column conditions
//!   must hold on the same facet; a card passes when any facet does.
//! - facet ids resolved from the species and effect indices
//!
//! Absent values never fall inside a range. The one exception is a cost
//! bound of exactly zero, which also accepts `NoCost`.

use crate::card::{Card, Facet};
use crate::cost::CardCost;
use crate::filter::{SearchFilter, ValueRange};
use crate::power::Power;
use crate::rarity::RarityOrder;
use crate::FacetId;
use std::collections::BTreeSet;

// =============================================================================
// CARD COLUMNS
// =============================================================================

/// Set id and rarity restrictions.
#[must_use]
pub fn card_columns_match(card: &Card, filter: &SearchFilter, rarities: &dyn RarityOrder) -> bool {
    if filter.set_id().is_some_and(|set_id| card.set_id != Some(set_id)) {
        return false;
    }
    match filter.rarity() {
        Some(rarity) => rarity.accepts(card.rarity(), rarities),
        None => true,
    }
}

// =============================================================================
// FACET COLUMNS
// =============================================================================

/// Whether any facet satisfies every facet column restriction at once.
#[must_use]
pub fn facet_columns_match(card: &Card, filter: &SearchFilter) -> bool {
    if !filter.needs_facet_column_filter() {
        return true;
    }
    card.facets().iter().any(|facet| facet_matches(facet, filter))
}

/// Cost, power, type and name restrictions against one facet.
#[must_use]
pub fn facet_matches(facet: &Facet, filter: &SearchFilter) -> bool {
    cost_in_range(facet.cost, filter.cost_range())
        && power_in_range(facet.power, filter.power_range())
        && filter
            .card_type()
            .is_none_or(|card_type| card_type.matches(&facet.type_tag))
        && filter
            .name_search()
            .is_none_or(|needle| contains_ignore_case(&facet.name, needle))
}

/// Whether a cost satisfies a range. Infinity compares as the sentinel.
#[must_use]
pub fn cost_in_range(cost: CardCost, range: ValueRange) -> bool {
    if range.is_unbounded() {
        return true;
    }
    match cost.value() {
        Some(value) => range.contains(value),
        None => range.has_zero_bound(),
    }
}

/// Whether a power satisfies a range. A facet without power never does.
#[must_use]
pub fn power_in_range(power: Option<Power>, range: ValueRange) -> bool {
    if range.is_unbounded() {
        return true;
    }
    power.is_some_and(|power| range.contains(power.numeric()))
}

// =============================================================================
// FACET IDS
// =============================================================================

/// Whether any facet of the card is in `facet_ids`.
#[must_use]
pub fn facet_ids_match(card: &Card, facet_ids: &BTreeSet<FacetId>) -> bool {
    card.facets()
        .iter()
        .any(|facet| facet_ids.contains(&facet.id))
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardShape;
    use crate::card_type::CardType;
    use crate::civilization::Civilization::*;
    use crate::filter::RawSearchFilter;
    use crate::rarity::{RarityFilter, RarityRange, RarityTable};
    use crate::{CardId, RarityCode, SetId};

    fn card(facets: Vec<Facet>) -> Card {
        Card::new(
            CardId(1),
            "dm01-001",
            Some(SetId(1)),
            Some(RarityCode::new("R")),
            CardShape::new(facets, false),
        )
    }

    #[test]
    fn cost_range_inclusive() {
        let range = ValueRange::new(Some(4), Some(6));
        assert!(cost_in_range(CardCost::Value(4), range));
        assert!(cost_in_range(CardCost::Value(6), range));
        assert!(!cost_in_range(CardCost::Value(7), range));
        assert!(!cost_in_range(CardCost::NoCost, range));
    }

    #[test]
    fn zero_bound_accepts_no_cost() {
        assert!(cost_in_range(CardCost::NoCost, ValueRange::new(Some(0), Some(3))));
        assert!(cost_in_range(CardCost::NoCost, ValueRange::new(None, Some(0))));
    }

    #[test]
    fn infinity_only_in_open_ranges() {
        assert!(!cost_in_range(
            CardCost::Infinity,
            ValueRange::new(Some(10), Some(i32::MAX))
        ));
        assert!(cost_in_range(CardCost::Infinity, ValueRange::new(Some(10), None)));
        assert!(power_in_range(Some(Power::Infinity), ValueRange::new(Some(10), None)));
    }

    #[test]
    fn missing_power_is_outside_every_range() {
        assert!(!power_in_range(None, ValueRange::new(None, Some(0))));
        assert!(power_in_range(None, ValueRange::unbounded()));
    }

    #[test]
    fn facet_conditions_hold_on_the_same_facet() {
        let card = card(vec![
            Facet::new(0, [Fire])
                .with_cost(CardCost::Value(3))
                .with_type("呪文"),
            Facet::new(1, [Fire])
                .with_cost(CardCost::Value(7))
                .with_type("クリーチャー"),
        ]);
        let split = RawSearchFilter::new()
            .cost(Some(3), Some(3))
            .card_type(CardType::Creature)
            .build();
        assert!(!facet_columns_match(&card, &split));

        let same = RawSearchFilter::new()
            .cost(Some(7), None)
            .card_type(CardType::Creature)
            .build();
        assert!(facet_columns_match(&card, &same));
    }

    #[test]
    fn name_search_ignores_case() {
        let card = card(vec![Facet::new(0, [Light]).with_name("Bolshack Dragon")]);
        let filter = RawSearchFilter::new().name("bolshack").build();
        assert!(facet_columns_match(&card, &filter));
    }

    #[test]
    fn set_and_rarity() {
        let card = card(vec![Facet::new(0, [Light])]);
        let table = RarityTable::from_entries([(RarityCode::new("C"), 1), (RarityCode::new("R"), 3)]);

        let other_set = RawSearchFilter::new().set(SetId(2)).build();
        assert!(!card_columns_match(&card, &other_set, &table));

        let at_least_common = RawSearchFilter::new()
            .set(SetId(1))
            .rarity(RarityFilter::new(RarityCode::new("C"), RarityRange::Ge))
            .build();
        assert!(card_columns_match(&card, &at_least_common, &table));
    }

    #[test]
    fn facet_id_membership() {
        let card = card(vec![Facet::new(0, [Light]).with_id(FacetId(42))]);
        assert!(facet_ids_match(&card, &BTreeSet::from([FacetId(42)])));
        assert!(!facet_ids_match(&card, &BTreeSet::from([FacetId(7)])));
    }
}
