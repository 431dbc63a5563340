//! # Card Type Keywords
//!
//! Card types are not stored as an enum; a facet only has its printed type
//! line. A type filter is a keyword containment rule over that line, with
//! exclusion lists where one keyword is a substring of a more specific
//! type (an evolution creature contains the creature keyword).

use crate::CatalogError;
use serde::{Deserialize, Serialize};

/// Card type a search can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardType {
    Creature,
    Spell,
    Evolution,
    Psychic,
    Dragheart,
    Field,
    Castle,
    Crossgear,
    Exile,
    Gachallenge,
    Aura,
    Tamaseed,
    Other,
}

impl CardType {
    /// Every type that has a keyword (all but `Other`).
    pub const KEYWORD_TYPES: [CardType; 12] = [
        CardType::Creature,
        CardType::Spell,
        CardType::Evolution,
        CardType::Psychic,
        CardType::Dragheart,
        CardType::Field,
        CardType::Castle,
        CardType::Crossgear,
        CardType::Exile,
        CardType::Gachallenge,
        CardType::Aura,
        CardType::Tamaseed,
    ];

    /// Keyword searched for in the printed type line.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            CardType::Creature => "クリーチャー",
            CardType::Spell => "呪文",
            CardType::Evolution => "進化",
            CardType::Psychic => "サイキック",
            CardType::Dragheart => "ドラグハート",
            CardType::Field => "フィールド",
            CardType::Castle => "城",
            CardType::Crossgear => "クロスギア",
            CardType::Exile => "エグザイル",
            CardType::Gachallenge => "GR",
            CardType::Aura => "オーラ",
            CardType::Tamaseed => "タマシード",
            CardType::Other => "その他",
        }
    }

    /// Parse the serialized name (`"creature"`, `"gr"`, ...).
    pub fn from_name(name: &str) -> Result<Self, CatalogError> {
        let lowered = name.trim().to_ascii_lowercase();
        let card_type = match lowered.as_str() {
            "creature" => CardType::Creature,
            "spell" => CardType::Spell,
            "evolution" => CardType::Evolution,
            "psychic" => CardType::Psychic,
            "dragheart" => CardType::Dragheart,
            "field" => CardType::Field,
            "castle" => CardType::Castle,
            "crossgear" => CardType::Crossgear,
            "exile" => CardType::Exile,
            "gachallenge" | "gr" => CardType::Gachallenge,
            "aura" => CardType::Aura,
            "tamaseed" => CardType::Tamaseed,
            "other" => CardType::Other,
            _ => {
                return Err(CatalogError::InvalidFilter(format!(
                    "unknown card type {name:?}"
                )));
            }
        };
        Ok(card_type)
    }

    /// Whether a printed type line counts as this type.
    #[must_use]
    pub fn matches(self, type_tag: &str) -> bool {
        use CardType::*;
        match self {
            Creature => {
                contains(type_tag, Creature)
                    && contains_none_of(
                        type_tag,
                        &[Evolution, Crossgear, Psychic, Dragheart, Gachallenge],
                    )
            }
            Evolution => {
                contains(type_tag, Evolution)
                    && contains_none_of(type_tag, &[Crossgear, Psychic, Dragheart])
            }
            Castle => type_tag == Castle.keyword(),
            Other => contains_none_of(type_tag, &Self::KEYWORD_TYPES),
            Spell | Psychic | Dragheart | Field | Crossgear | Exile | Gachallenge | Aura
            | Tamaseed => contains(type_tag, self),
        }
    }
}

fn contains(type_tag: &str, card_type: CardType) -> bool {
    type_tag.contains(card_type.keyword())
}

fn contains_none_of(type_tag: &str, types: &[CardType]) -> bool {
    !types.iter().any(|card_type| contains(type_tag, *card_type))
}

// =============================================================================
// TESTS
// =============================================================================
