//! # Civilizations
//!
//! The closed six-value color domain of card facets and the canonical
//! set type used everywhere a facet's colors are compared.
//!
//! `CivilizationSet` is a bitset keyed by ordinal. Iteration, equality and
//! serialization all follow ordinal-ascending order, so two sets built in
//! different insertion orders are indistinguishable.

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

// =============================================================================
// CIVILIZATION
// =============================================================================

/// One color identity a facet can carry.
///
/// The declaration order is the stored ordinal and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Civilization {
    Colorless,
    Light,
    Water,
    Dark,
    Fire,
    Nature,
}

impl Civilization {
    /// All civilizations in ordinal order.
    pub const ALL: [Civilization; 6] = [
        Civilization::Colorless,
        Civilization::Light,
        Civilization::Water,
        Civilization::Dark,
        Civilization::Fire,
        Civilization::Nature,
    ];

    /// Resolve a stored ordinal.
    pub fn from_ordinal(ordinal: u8) -> Result<Self, CatalogError> {
        Self::ALL
            .get(usize::from(ordinal))
            .copied()
            .ok_or(CatalogError::CivilizationOutOfRange(ordinal))
    }

    /// The stored ordinal of this civilization.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Printed name as it appears on cards.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Civilization::Colorless => "ゼロ",
            Civilization::Light => "光",
            Civilization::Water => "水",
            Civilization::Dark => "闇",
            Civilization::Fire => "火",
            Civilization::Nature => "自然",
        }
    }

    /// Lowercase English name, matching the serialized form.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Civilization::Colorless => "colorless",
            Civilization::Light => "light",
            Civilization::Water => "water",
            Civilization::Dark => "dark",
            Civilization::Fire => "fire",
            Civilization::Nature => "nature",
        }
    }

    /// Resolve either the printed name or the English key (any case).
    pub fn from_name(name: &str) -> Result<Self, CatalogError> {
        let trimmed = name.trim();
        Self::ALL
            .into_iter()
            .find(|civ| civ.display_name() == trimmed || civ.key().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CatalogError::InvalidFilter(format!("unknown civilization {trimmed:?}")))
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for Civilization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// =============================================================================
// CIVILIZATION SET
// =============================================================================

/// A set of civilizations in canonical (ordinal-ascending) order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Civilization>", into = "Vec<Civilization>")]
pub struct CivilizationSet(u8);

impl CivilizationSet {
    const ALL_BITS: u8 = 0b0011_1111;

    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every civilization, colorless included.
    #[must_use]
    pub const fn all() -> Self {
        Self(Self::ALL_BITS)
    }

    /// A set with a single civilization.
    #[must_use]
    pub const fn single(civ: Civilization) -> Self {
        Self(civ.bit())
    }

    /// Build a set from stored ordinals, rejecting out-of-range values.
    pub fn from_ordinals<I>(ordinals: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = u8>,
    {
        ordinals
            .into_iter()
            .map(Civilization::from_ordinal)
            .collect::<Result<Self, _>>()
    }

    /// Ordinals in ascending order, the stored form.
    #[must_use]
    pub fn to_ordinals(self) -> Vec<u8> {
        self.iter().map(Civilization::ordinal).collect()
    }

    /// Add a civilization.
    pub fn insert(&mut self, civ: Civilization) {
        self.0 |= civ.bit();
    }

    #[must_use]
    pub const fn contains(self, civ: Civilization) -> bool {
        self.0 & civ.bit() != 0
    }

    /// Number of civilizations in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether this set holds every civilization.
    #[must_use]
    pub const fn is_all(self) -> bool {
        self.0 == Self::ALL_BITS
    }

    /// Whether the two sets share at least one civilization.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    #[must_use]
    pub const fn is_subset_of(self, other: Self) -> bool {
        self.0 & other.0 == self.0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Civilizations in `self` but not in `other`.
    #[must_use]
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Every civilization not in this set.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & Self::ALL_BITS)
    }

    /// The same set minus Colorless.
    #[must_use]
    pub const fn without_colorless(self) -> Self {
        self.difference(Self::single(Civilization::Colorless))
    }

    /// The only member, if the set has exactly one.
    #[must_use]
    pub fn single_member(self) -> Option<Civilization> {
        if self.len() == 1 {
            self.iter().next()
        } else {
            None
        }
    }

    /// Iterate members in ordinal order.
    pub fn iter(self) -> impl Iterator<Item = Civilization> {
        Civilization::ALL
            .into_iter()
            .filter(move |civ| self.contains(*civ))
    }
}

impl fmt::Debug for CivilizationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for CivilizationSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(Civilization::display_name).collect();
        f.write_str(&names.join("/"))
    }
}

impl FromIterator<Civilization> for CivilizationSet {
    fn from_iter<T: IntoIterator<Item = Civilization>>(iter: T) -> Self {
        let mut set = Self::empty();
        for civ in iter {
            set.insert(civ);
        }
        set
    }
}

impl<const N: usize> From<[Civilization; N]> for CivilizationSet {
    fn from(civs: [Civilization; N]) -> Self {
        civs.into_iter().collect()
    }
}

impl From<Vec<Civilization>> for CivilizationSet {
    fn from(civs: Vec<Civilization>) -> Self {
        civs.into_iter().collect()
    }
}

impl From<CivilizationSet> for Vec<Civilization> {
    fn from(set: CivilizationSet) -> Self {
        set.iter().collect()
    }
}

impl BitOr for CivilizationSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use Civilization::*;

    #[test]
    fn from_ordinal_bounds() {
        assert_eq!(Civilization::from_ordinal(0).expect("zero"), Colorless);
        assert_eq!(Civilization::from_ordinal(5).expect("five"), Nature);
        assert!(matches!(
            Civilization::from_ordinal(6),
            Err(CatalogError::CivilizationOutOfRange(6))
        ));
    }

    #[test]
    fn ordinals_round_trip_in_canonical_order() {
        let set = CivilizationSet::from_ordinals([4, 1, 4, 2]).expect("valid");
        assert_eq!(set.to_ordinals(), vec![1, 2, 4]);
        assert!(CivilizationSet::from_ordinals([1, 7]).is_err());
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = CivilizationSet::from([Fire, Light, Dark]);
        let b = CivilizationSet::from([Dark, Fire, Light]);
        assert_eq!(a, b);
        assert_eq!(a.iter().collect::<Vec<_>>(), vec![Light, Dark, Fire]);
    }

    #[test]
    fn complement_and_colorless() {
        let set = CivilizationSet::from([Colorless, Water]);
        assert_eq!(set.complement(), CivilizationSet::from([Light, Dark, Fire, Nature]));
        assert_eq!(set.without_colorless(), CivilizationSet::single(Water));
        assert!(CivilizationSet::all().complement().is_empty());
    }

    #[test]
    fn names_resolve() {
        assert_eq!(Civilization::from_name("自然").expect("jp"), Nature);
        assert_eq!(Civilization::from_name("Light").expect("en"), Light);
        assert!(Civilization::from_name("purple").is_err());
    }

    #[test]
    fn single_member() {
        assert_eq!(CivilizationSet::single(Dark).single_member(), Some(Dark));
        assert_eq!(CivilizationSet::from([Dark, Fire]).single_member(), None);
        assert_eq!(CivilizationSet::empty().single_member(), None);
    }

    #[test]
    fn serializes_as_sorted_names() {
        let set = CivilizationSet::from([Nature, Water]);
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"["water","nature"]"#);
        let back: CivilizationSet = serde_json::from_str(r#"["nature","water","water"]"#)
            .expect("deserialize");
        assert_eq!(back, set);
    }
}
