//! # Sort Keys
//!
//! Cards with several facets sort by the largest value any facet has.
//! Cards without such a facet sort after all others in both directions.

use crate::card::{Card, CardShape};
use crate::{CatalogError, RarityCode};
use crate::rarity::RarityOrder;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Field a result list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Cost,
    Power,
    Rarity,
    OfficialId,
}

impl SortField {
    /// Short key used in sort strings.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            SortField::Cost => "cost",
            SortField::Power => "pwr",
            SortField::Rarity => "rar",
            SortField::OfficialId => "id",
        }
    }

    fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "cost" => Some(SortField::Cost),
            "pwr" => Some(SortField::Power),
            "rar" => Some(SortField::Rarity),
            "id" => Some(SortField::OfficialId),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// One ordering criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub const fn asc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Asc,
        }
    }

    #[must_use]
    pub const fn desc(field: SortField) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{direction}", self.field.key())
    }
}

impl FromStr for SortSpec {
    type Err = CatalogError;

    /// Parse one `field:direction` part such as `"pwr:desc"`.
    fn from_str(part: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidFilter(format!("invalid sort {part:?}"));
        let mut pieces = part.trim().split(':');
        let (Some(field), Some(direction), None) = (pieces.next(), pieces.next(), pieces.next())
        else {
            return Err(invalid());
        };
        let field = SortField::from_key(field.trim()).ok_or_else(invalid)?;
        match direction.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortSpec::asc(field)),
            "desc" => Ok(SortSpec::desc(field)),
            _ => Err(invalid()),
        }
    }
}

/// Parse a sort string such as `"cost:asc,pwr:desc"`.
///
/// Malformed parts are skipped. `id:asc` is appended when no part orders
/// by official id, so the result is always a total order.
#[must_use]
pub fn parse_sort(text: &str) -> Vec<SortSpec> {
    let mut specs: Vec<SortSpec> = text
        .split(',')
        .filter_map(|part| part.parse().ok())
        .collect();
    if !specs
        .iter()
        .any(|spec| spec.field == SortField::OfficialId)
    {
        specs.push(SortSpec::asc(SortField::OfficialId));
    }
    specs
}

// =============================================================================
// KEYS
// =============================================================================

/// Largest cost across facets. Infinity counts as the sentinel.
#[must_use]
pub fn cost_key(shape: &CardShape) -> Option<i32> {
    shape
        .facets()
        .iter()
        .filter_map(|facet| facet.cost.value())
        .max()
}

/// Largest power sort value across facets.
#[must_use]
pub fn power_key(shape: &CardShape) -> Option<i32> {
    shape
        .facets()
        .iter()
        .filter_map(|facet| facet.power.map(|power| power.sort_value()))
        .max()
}

/// Rarity ordinal of a card. A card without a rarity is looked up under
/// the `NONE` code, as [`crate::RarityFilter::accepts`] does.
#[must_use]
pub fn rarity_key(card: &Card, rarities: &dyn RarityOrder) -> Option<i32> {
    match card.rarity() {
        Some(code) => rarities.ordinal(code),
        None => rarities.ordinal(&RarityCode::new(RarityCode::NONE)),
    }
}

/// Compare two optional keys; `None` is last in either direction.
fn compare_nulls_last(a: Option<i32>, b: Option<i32>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => direction.apply(a.cmp(&b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Compare two cards by each spec in turn.
#[must_use]
pub fn compare_cards(
    a: &Card,
    b: &Card,
    specs: &[SortSpec],
    rarities: &dyn RarityOrder,
) -> Ordering {
    specs.iter().fold(Ordering::Equal, |ordering, spec| {
        ordering.then_with(|| match spec.field {
            SortField::Cost => {
                compare_nulls_last(cost_key(a.shape()), cost_key(b.shape()), spec.direction)
            }
            SortField::Power => {
                compare_nulls_last(power_key(a.shape()), power_key(b.shape()), spec.direction)
            }
            SortField::Rarity => compare_nulls_last(
                rarity_key(a, rarities),
                rarity_key(b, rarities),
                spec.direction,
            ),
            SortField::OfficialId => spec.direction.apply(a.official_id.cmp(&b.official_id)),
        })
    })
}

/// Stable sort of card references.
pub fn sort_cards(cards: &mut [&Card], specs: &[SortSpec], rarities: &dyn RarityOrder) {
    cards.sort_by(|a, b| compare_cards(a, b, specs, rarities));
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Facet;
    use crate::civilization::Civilization::*;
    use crate::cost::CardCost;
    use crate::power::Power;
    use crate::rarity::RarityTable;
    use crate::CardId;

    fn card(official_id: &str, costs: &[CardCost]) -> Card {
        let facets = costs
            .iter()
            .enumerate()
            .map(|(i, cost)| Facet::new(i as u32, [Fire]).with_cost(*cost))
            .collect();
        Card::new(CardId(0), official_id, None, None, CardShape::new(facets, false))
    }

    #[test]
    fn parse_sort_appends_id() {
        assert_eq!(
            parse_sort("cost:asc, pwr:DESC"),
            vec![
                SortSpec::asc(SortField::Cost),
                SortSpec::desc(SortField::Power),
                SortSpec::asc(SortField::OfficialId),
            ]
        );
        assert_eq!(
            parse_sort("id:desc"),
            vec![SortSpec::desc(SortField::OfficialId)]
        );
    }

    #[test]
    fn parse_sort_skips_malformed_parts() {
        assert_eq!(
            parse_sort("cost,rel:desc,pwr:up,rar:asc:x,rar:asc"),
            vec![
                SortSpec::asc(SortField::Rarity),
                SortSpec::asc(SortField::OfficialId),
            ]
        );
        assert_eq!(parse_sort(""), vec![SortSpec::asc(SortField::OfficialId)]);
    }

    #[test]
    fn single_part_parse() {
        assert_eq!(
            "rar:DESC".parse::<SortSpec>().expect("sort"),
            SortSpec::desc(SortField::Rarity)
        );
        assert!("rel:desc".parse::<SortSpec>().is_err());
        assert!("cost".parse::<SortSpec>().is_err());
    }

    #[test]
    fn cost_key_is_max_over_facets() {
        let shape = card("a", &[CardCost::Value(3), CardCost::NoCost, CardCost::Value(8)]);
        assert_eq!(cost_key(shape.shape()), Some(8));
        assert_eq!(cost_key(card("b", &[CardCost::NoCost]).shape()), None);
    }

    #[test]
    fn power_key_uses_modifiers() {
        let shape = CardShape::new(
            vec![
                Facet::new(0, [Fire]).with_power(Power::parse("5000+").expect("power")),
                Facet::new(1, [Fire]).with_power(Power::new(5000)),
            ],
            false,
        );
        assert_eq!(power_key(&shape), Some(5001));
    }

    #[test]
    fn nulls_sort_last_in_both_directions() {
        let table = RarityTable::new();
        let no_cost = card("a", &[CardCost::NoCost]);
        let cheap = card("b", &[CardCost::Value(1)]);
        let pricey = card("c", &[CardCost::Infinity]);

        for spec in [SortSpec::asc(SortField::Cost), SortSpec::desc(SortField::Cost)] {
            let mut cards = vec![&no_cost, &cheap, &pricey];
            sort_cards(&mut cards, &[spec], &table);
            assert_eq!(cards.last().map(|c| c.official_id.as_str()), Some("a"));
        }

        let mut cards = vec![&no_cost, &cheap, &pricey];
        sort_cards(&mut cards, &[SortSpec::desc(SortField::Cost)], &table);
        let ids: Vec<&str> = cards.iter().map(|c| c.official_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn tie_break_by_official_id() {
        let table = RarityTable::new();
        let a = card("dm01-002", &[CardCost::Value(2)]);
        let b = card("dm01-001", &[CardCost::Value(2)]);
        let mut cards = vec![&a, &b];
        sort_cards(&mut cards, &parse_sort("cost:asc"), &table);
        assert_eq!(cards[0].official_id, "dm01-001");
    }
}
