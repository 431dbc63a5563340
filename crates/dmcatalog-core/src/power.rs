//! # Power
//!
//! Printed power of a creature facet: a number with an optional trailing
//! modifier glyph (`"5000+"`, `"3000－"`) or the infinity glyph.
//!
//! Unlike cost, power parsing is strict. A malformed body is a data
//! ingestion error and never reaches filter evaluation.

use crate::CatalogError;
use crate::primitives::{INFINITY_SENTINEL, INFINITY_SYMBOL, POWER_MINUS, POWER_PLUS};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Trailing modifier of a finite power.
///
/// Declaration order is the tie-break order: `Minus < Plain < Plus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PowerModifier {
    Minus,
    Plain,
    Plus,
}

/// Power of one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Power {
    Value { base: i32, modifier: PowerModifier },
    Infinity,
}

impl Power {
    /// A plain finite power.
    #[must_use]
    pub const fn new(base: i32) -> Self {
        Power::Value {
            base,
            modifier: PowerModifier::Plain,
        }
    }

    /// Parse the printed form.
    ///
    /// Returns `CatalogError::InvalidPowerFormat` if the text, after
    /// stripping one trailing modifier glyph, is not an integer.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let trimmed = text.trim();
        if trimmed == INFINITY_SYMBOL {
            return Ok(Power::Infinity);
        }
        let (body, modifier) = if let Some(body) = trimmed.strip_suffix(POWER_PLUS) {
            (body, PowerModifier::Plus)
        } else if let Some(body) = trimmed.strip_suffix(POWER_MINUS) {
            (body, PowerModifier::Minus)
        } else {
            (trimmed, PowerModifier::Plain)
        };
        let base = body
            .parse::<i32>()
            .map_err(|_| CatalogError::InvalidPowerFormat(text.to_string()))?;
        Ok(Power::Value { base, modifier })
    }

    /// Numeric value used by power range filters. Infinity is the sentinel.
    #[must_use]
    pub const fn numeric(self) -> i32 {
        match self {
            Power::Value { base, .. } => base,
            Power::Infinity => INFINITY_SENTINEL,
        }
    }

    /// Value used to order cards by power: the modifier nudges the base by one.
    #[must_use]
    pub const fn sort_value(self) -> i32 {
        match self {
            Power::Value { base, modifier } => match modifier {
                PowerModifier::Minus => base.saturating_sub(1),
                PowerModifier::Plain => base,
                PowerModifier::Plus => base.saturating_add(1),
            },
            Power::Infinity => INFINITY_SENTINEL,
        }
    }

    #[must_use]
    pub const fn is_infinite(self) -> bool {
        matches!(self, Power::Infinity)
    }
}

impl Ord for Power {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Power::Infinity, Power::Infinity) => Ordering::Equal,
            (Power::Infinity, Power::Value { .. }) => Ordering::Greater,
            (Power::Value { .. }, Power::Infinity) => Ordering::Less,
            (
                Power::Value {
                    base: a,
                    modifier: ma,
                },
                Power::Value {
                    base: b,
                    modifier: mb,
                },
            ) => a.cmp(b).then(ma.cmp(mb)),
        }
    }
}

impl PartialOrd for Power {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Power {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Power::Infinity => f.write_str(INFINITY_SYMBOL),
            Power::Value { base, modifier } => {
                write!(f, "{base}")?;
                match modifier {
                    PowerModifier::Minus => write!(f, "{POWER_MINUS}"),
                    PowerModifier::Plain => Ok(()),
                    PowerModifier::Plus => write!(f, "{POWER_PLUS}"),
                }
            }
        }
    }
}

impl TryFrom<String> for Power {
    type Error = CatalogError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Power::parse(&text)
    }
}

impl From<Power> for String {
    fn from(power: Power) -> Self {
        power.to_string()
    }
}

// =============================================================================
// TESTS
// =============================================================================
