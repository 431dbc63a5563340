//! # Card Cost
//!
//! Mana cost of a facet: absent, a finite non-negative number, or the
//! infinity sentinel.
//!
//! Parsing never fails. Malformed text degrades to [`CardCost::NoCost`]
//! and emits a `tracing` warning; callers that need to know use
//! [`CardCost::try_parse`].

use crate::CatalogError;
use crate::primitives::{INFINITY_SENTINEL, INFINITY_SYMBOL};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Cost of one facet.
///
/// Ordered `NoCost < Value(_) < Infinity`. `Value` is meant to hold
/// `0 <= n < INFINITY_SENTINEL`; build it with [`CardCost::new`]. A `Value`
/// outside that range compares, hashes and serializes as its normalized
/// form: the sentinel as `Infinity`, a negative number as `NoCost`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(from = "Option<CostRepr>", into = "Option<CostRepr>")]
pub enum CardCost {
    #[default]
    NoCost,
    Value(i32),
    Infinity,
}

impl CardCost {
    /// Checked constructor for a numeric cost.
    ///
    /// The sentinel is `Infinity`; a negative number is `NoCost`.
    #[must_use]
    pub fn new(cost: i32) -> Self {
        Self::from_int(Some(cost))
    }

    /// The same cost with an out-of-range `Value` folded into its variant.
    #[must_use]
    pub const fn normalized(self) -> Self {
        match self {
            CardCost::Value(INFINITY_SENTINEL) => CardCost::Infinity,
            CardCost::Value(n) if n < 0 => CardCost::NoCost,
            other => other,
        }
    }

    /// Build from a stored integer. `None` means no cost.
    ///
    /// The sentinel maps to `Infinity`; a negative number is not a cost and
    /// maps to `NoCost` with a warning.
    #[must_use]
    pub fn from_int(cost: Option<i32>) -> Self {
        match cost {
            None => CardCost::NoCost,
            Some(INFINITY_SENTINEL) => CardCost::Infinity,
            Some(n) if n < 0 => {
                tracing::warn!(cost = n, "Unexpected negative cost value");
                CardCost::NoCost
            }
            Some(n) => CardCost::Value(n),
        }
    }

    /// Strict text parse: blank, the infinity glyph, or an integer.
    pub fn try_parse(text: &str) -> Result<Self, CatalogError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(CardCost::NoCost);
        }
        if trimmed == INFINITY_SYMBOL {
            return Ok(CardCost::Infinity);
        }
        match trimmed.parse::<i32>() {
            Ok(n) if n >= 0 => Ok(Self::from_int(Some(n))),
            _ => Err(CatalogError::InvalidCostFormat(trimmed.to_string())),
        }
    }

    /// Lenient text parse. Never fails; unparseable text becomes `NoCost`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::try_parse(text).unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Unexpected cost value, treating as no cost");
            CardCost::NoCost
        })
    }

    /// The stored integer form: `None` for no cost, the sentinel for infinity.
    #[must_use]
    pub const fn value(self) -> Option<i32> {
        match self.normalized() {
            CardCost::NoCost => None,
            CardCost::Value(n) => Some(n),
            CardCost::Infinity => Some(INFINITY_SENTINEL),
        }
    }

    #[must_use]
    pub const fn is_no_cost(self) -> bool {
        matches!(self.normalized(), CardCost::NoCost)
    }

    #[must_use]
    pub const fn is_infinity(self) -> bool {
        matches!(self.normalized(), CardCost::Infinity)
    }
}

impl fmt::Display for CardCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.normalized() {
            CardCost::NoCost => Ok(()),
            CardCost::Value(n) => write!(f, "{n}"),
            CardCost::Infinity => f.write_str(INFINITY_SYMBOL),
        }
    }
}

impl CardCost {
    /// Rank in the total order; only finite values carry a number.
    const fn rank(self) -> (u8, i32) {
        match self.normalized() {
            CardCost::NoCost => (0, 0),
            CardCost::Value(n) => (1, n),
            CardCost::Infinity => (2, 0),
        }
    }
}

impl PartialEq for CardCost {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl Eq for CardCost {}

impl PartialOrd for CardCost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CardCost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl Hash for CardCost {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
    }
}

// =============================================================================
// SERDE REPRESENTATION
// =============================================================================

/// Wire form of a cost: an integer or a text such as `"∞"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CostRepr {
    Int(i64),
    Text(String),
}

impl From<Option<CostRepr>> for CardCost {
    fn from(repr: Option<CostRepr>) -> Self {
        match repr {
            None => CardCost::NoCost,
            Some(CostRepr::Text(text)) => CardCost::parse(&text),
            Some(CostRepr::Int(n)) => match i32::try_from(n) {
                Ok(n) => CardCost::from_int(Some(n)),
                Err(_) => {
                    tracing::warn!(cost = n, "Cost value out of range, treating as no cost");
                    CardCost::NoCost
                }
            },
        }
    }
}

impl From<CardCost> for Option<CostRepr> {
    fn from(cost: CardCost) -> Self {
        match cost.normalized() {
            CardCost::NoCost => None,
            CardCost::Value(n) => Some(CostRepr::Int(i64::from(n))),
            CardCost::Infinity => Some(CostRepr::Text(INFINITY_SYMBOL.to_string())),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text() {
        assert_eq!(CardCost::parse(""), CardCost::NoCost);
        assert_eq!(CardCost::parse("   "), CardCost::NoCost);
        assert_eq!(CardCost::parse("7"), CardCost::Value(7));
        assert_eq!(CardCost::parse(" 12 "), CardCost::Value(12));
        assert_eq!(CardCost::parse("∞"), CardCost::Infinity);
        assert_eq!(CardCost::parse("seven"), CardCost::NoCost);
    }

    #[test]
    fn try_parse_reports_garbage() {
        assert!(matches!(
            CardCost::try_parse("x3"),
            Err(CatalogError::InvalidCostFormat(_))
        ));
        assert!(CardCost::try_parse("-1").is_err());
    }

    #[test]
    fn infinity_forms_agree() {
        let from_text = CardCost::parse("∞");
        let from_int = CardCost::from_int(Some(i32::MAX));
        let from_max_text = CardCost::parse(&i32::MAX.to_string());
        assert_eq!(from_text, CardCost::Infinity);
        assert_eq!(from_int, CardCost::Infinity);
        assert_eq!(from_max_text, CardCost::Infinity);
        assert!(from_int > CardCost::Value(i32::MAX - 1));
    }

    #[test]
    fn ordering() {
        let mut costs = vec![
            CardCost::Infinity,
            CardCost::Value(3),
            CardCost::NoCost,
            CardCost::Value(0),
        ];
        costs.sort();
        assert_eq!(
            costs,
            vec![
                CardCost::NoCost,
                CardCost::Value(0),
                CardCost::Value(3),
                CardCost::Infinity
            ]
        );
    }

    #[test]
    fn raw_values_compare_normalized() {
        assert_eq!(CardCost::Value(i32::MAX), CardCost::Infinity);
        assert_eq!(CardCost::Value(-1), CardCost::NoCost);
        assert!(CardCost::Value(-1) < CardCost::Value(0));
        assert!(CardCost::Value(i32::MAX).is_infinity());
        assert_eq!(CardCost::Value(-3).value(), None);
        assert_eq!(CardCost::new(4), CardCost::Value(4));
        assert_eq!(CardCost::new(-4), CardCost::NoCost);

        let json = serde_json::to_string(&[CardCost::Value(i32::MAX), CardCost::Value(-2)])
            .expect("serialize");
        assert_eq!(json, r#"["∞",null]"#);
    }

    #[test]
    fn value_form() {
        assert_eq!(CardCost::NoCost.value(), None);
        assert_eq!(CardCost::Value(5).value(), Some(5));
        assert_eq!(CardCost::Infinity.value(), Some(i32::MAX));
    }

    #[test]
    fn serde_accepts_ints_text_and_null() {
        let costs: Vec<CardCost> =
            serde_json::from_str(r#"[3, "5", "∞", null, "", "bad"]"#).expect("deserialize");
        assert_eq!(
            costs,
            vec![
                CardCost::Value(3),
                CardCost::Value(5),
                CardCost::Infinity,
                CardCost::NoCost,
                CardCost::NoCost,
                CardCost::NoCost
            ]
        );
        let json = serde_json::to_string(&[CardCost::Value(2), CardCost::Infinity, CardCost::NoCost])
            .expect("serialize");
        assert_eq!(json, r#"[2,"∞",null]"#);
    }
}
