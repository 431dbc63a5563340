//! # Card Records
//!
//! - `Facet`: one printed face of a card
//! - `CardShape`: the facets of a card plus its twinpact flag, the input
//!   of the match engine
//! - `Card`: a catalog record wrapping a shape with its set, rarity and ids
//!
//! Shapes are immutable once built. Facets are kept ordered by position.

use crate::civilization::CivilizationSet;
use crate::cost::CardCost;
use crate::power::Power;
use crate::primitives::TWINPACT_SIDES;
use crate::{CardId, CatalogError, FacetId, RarityCode, SetId};
use serde::{Deserialize, Serialize};

// =============================================================================
// FACET
// =============================================================================

/// One face of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    /// Identifier used by the species and effect indices.
    pub id: FacetId,
    /// Position of the face on the card, starting at 0.
    pub position: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub civs: CivilizationSet,
    #[serde(default)]
    pub cost: CardCost,
    #[serde(default)]
    pub power: Option<Power>,
    /// Printed type line ("クリーチャー", "進化クリーチャー", "呪文", ...).
    #[serde(default, rename = "type")]
    pub type_tag: String,
}

impl Facet {
    /// A facet with the given civilizations and nothing else.
    #[must_use]
    pub fn new(position: u32, civs: impl Into<CivilizationSet>) -> Self {
        Self {
            id: FacetId(u64::from(position)),
            position,
            name: String::new(),
            civs: civs.into(),
            cost: CardCost::NoCost,
            power: None,
            type_tag: String::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: FacetId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub fn with_cost(mut self, cost: CardCost) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: Power) -> Self {
        self.power = Some(power);
        self
    }

    #[must_use]
    pub fn with_type(mut self, type_tag: impl Into<String>) -> Self {
        self.type_tag = type_tag.into();
        self
    }

    /// A facet with exactly one civilization (colorless included).
    #[must_use]
    pub fn is_monochrome(&self) -> bool {
        self.civs.len() == 1
    }

    /// A facet with more than one civilization.
    #[must_use]
    pub fn is_multicolor(&self) -> bool {
        self.civs.len() > 1
    }
}

// =============================================================================
// CARD SHAPE
// =============================================================================

/// The facets of a card and whether they form a twinpact pair.
///
/// Non-twinpact cards have one or more facets (four for the one known
/// anomaly). Twinpact cards have exactly two mirrored sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardShape {
    facets: Vec<Facet>,
    twinpact: bool,
}

impl CardShape {
    /// Build a shape, ordering facets by position.
    #[must_use]
    pub fn new(mut facets: Vec<Facet>, twinpact: bool) -> Self {
        facets.sort_by_key(|facet| facet.position);
        Self { facets, twinpact }
    }

    /// Build a shape from stored data, rejecting impossible layouts.
    ///
    /// A card needs at least one facet; a twinpact needs exactly
    /// [`TWINPACT_SIDES`].
    pub fn try_new(facets: Vec<Facet>, twinpact: bool) -> Result<Self, CatalogError> {
        if facets.is_empty() {
            return Err(CatalogError::InvalidShape("card has no facets".to_string()));
        }
        if twinpact && facets.len() != TWINPACT_SIDES {
            return Err(CatalogError::InvalidShape(format!(
                "twinpact card has {} facets, expected {TWINPACT_SIDES}",
                facets.len()
            )));
        }
        Ok(Self::new(facets, twinpact))
    }

    /// A single-faced card.
    #[must_use]
    pub fn single(facet: Facet) -> Self {
        Self::new(vec![facet], false)
    }

    /// A twinpact card from its two sides.
    #[must_use]
    pub fn twinpact(side0: Facet, side1: Facet) -> Self {
        Self::new(vec![side0, side1], true)
    }

    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    #[must_use]
    pub fn is_twinpact(&self) -> bool {
        self.twinpact
    }

    /// Civilizations of the facet at `index`; empty when there is none.
    #[must_use]
    pub fn side(&self, index: usize) -> CivilizationSet {
        self.facets
            .get(index)
            .map(|facet| facet.civs)
            .unwrap_or_default()
    }

    /// Union of all facets' civilizations.
    #[must_use]
    pub fn union(&self) -> CivilizationSet {
        self.facets
            .iter()
            .fold(CivilizationSet::empty(), |acc, facet| acc | facet.civs)
    }
}

// =============================================================================
// CARD
// =============================================================================

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CardRepr", into = "CardRepr")]
pub struct Card {
    pub id: CardId,
    /// Official identifier printed on the card ("dm22rp1-001").
    pub official_id: String,
    pub set_id: Option<SetId>,
    rarity: Option<RarityCode>,
    shape: CardShape,
}

impl Card {
    /// Build a card. A `NONE` rarity code is stored as no rarity.
    #[must_use]
    pub fn new(
        id: CardId,
        official_id: impl Into<String>,
        set_id: Option<SetId>,
        rarity: Option<RarityCode>,
        shape: CardShape,
    ) -> Self {
        Self {
            id,
            official_id: official_id.into(),
            set_id,
            rarity: rarity.filter(|code| !code.is_none_code()),
            shape,
        }
    }

    #[must_use]
    pub fn rarity(&self) -> Option<&RarityCode> {
        self.rarity.as_ref()
    }

    #[must_use]
    pub fn shape(&self) -> &CardShape {
        &self.shape
    }

    #[must_use]
    pub fn facets(&self) -> &[Facet] {
        self.shape.facets()
    }

    /// All civilizations printed anywhere on the card.
    #[must_use]
    pub fn civilizations(&self) -> CivilizationSet {
        self.shape.union()
    }

    /// Display name: facet names joined the way they are printed.
    #[must_use]
    pub fn name(&self) -> String {
        let names: Vec<&str> = self
            .facets()
            .iter()
            .map(|facet| facet.name.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        names.join(" / ")
    }
}

/// Flat serialized form of a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardRepr {
    id: CardId,
    official_id: String,
    #[serde(default)]
    set_id: Option<SetId>,
    #[serde(default)]
    rarity: Option<RarityCode>,
    #[serde(default)]
    twinpact: bool,
    facets: Vec<Facet>,
}

impl TryFrom<CardRepr> for Card {
    type Error = CatalogError;

    fn try_from(repr: CardRepr) -> Result<Self, Self::Error> {
        let shape = CardShape::try_new(repr.facets, repr.twinpact).map_err(|err| match err {
            CatalogError::InvalidShape(reason) => {
                CatalogError::InvalidShape(format!("{}: {reason}", repr.official_id))
            }
            other => other,
        })?;
        Ok(Card::new(
            repr.id,
            repr.official_id,
            repr.set_id,
            repr.rarity,
            shape,
        ))
    }
}

impl From<Card> for CardRepr {
    fn from(card: Card) -> Self {
        let twinpact = card.shape.twinpact;
        CardRepr {
            id: card.id,
            official_id: card.official_id,
            set_id: card.set_id,
            rarity: card.rarity,
            twinpact,
            facets: card.shape.facets,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
