//! # Catalog Primitives
//!
//! Hardcoded constants shared by the value types, the filter and the
//! match engine. These are fixed properties of the card data format.

/// Glyph used in card text for an unbounded cost or power.
pub const INFINITY_SYMBOL: &str = "∞";

/// Numeric sentinel standing for "infinity" in stored cost and power values.
///
/// Cost and power ranges compare against this value; a range bound equal
/// to it is pulled back by one during filter normalization.
pub const INFINITY_SENTINEL: i32 = i32::MAX;

/// Trailing glyph marking a power that grows ("5000+").
pub const POWER_PLUS: char = '+';

/// Trailing glyph marking a power that shrinks ("5000－", full-width minus).
pub const POWER_MINUS: char = '－';

/// Number of facet slots a twinpact card is evaluated over.
pub const TWINPACT_SIDES: usize = 2;

/// Number of facet slots compiled civilization conditions look at for
/// non-twinpact cards.
///
/// The match engine itself inspects every facet; compiled conditions only
/// see this many.
pub const NON_TWINPACT_SIDES: usize = 4;

/// Smallest facet count of the multi-faced anomaly shape.
pub const ANOMALY_MIN_FACETS: usize = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_int_max() {
        assert_eq!(INFINITY_SENTINEL, i32::MAX);
    }

    #[test]
    fn compiled_sides_cover_anomaly() {
        assert!(NON_TWINPACT_SIDES >= ANOMALY_MIN_FACETS);
        assert!(TWINPACT_SIDES < ANOMALY_MIN_FACETS);
    }
}
