//! # Multi-Faced Anomaly
//!
//! One printed card has four facets: three monochrome faces and a fourth
//! face carrying all three colors together. Per-facet rules already match
//! its monochrome faces. Rainbow searches additionally compare the union
//! of all faces against the filter.
//!
//! The shape is recognized structurally; no card id is hardcoded.
//! [`crate::matcher`] ORs this rule into its non-twinpact result.

use crate::card::CardShape;
use crate::filter::SearchFilter;
use crate::primitives::ANOMALY_MIN_FACETS;

/// Whether a shape is the multi-faced anomaly.
///
/// Non-twinpact, at least [`ANOMALY_MIN_FACETS`] facets and more than one
/// civilization across them.
#[must_use]
pub fn is_anomaly_shape(shape: &CardShape) -> bool {
    !shape.is_twinpact()
        && shape.facets().len() >= ANOMALY_MIN_FACETS
        && shape.union().len() > 1
}

/// Rainbow match over the union of an anomaly card's facets.
///
/// Always false for shapes that are not the anomaly, and when the filter
/// does not include rainbow cards.
#[must_use]
pub fn matches_anomaly(shape: &CardShape, filter: &SearchFilter) -> bool {
    if !filter.include_rainbow() || !is_anomaly_shape(shape) {
        return false;
    }
    let union = shape.union();
    if filter.match_exact_rainbow_civs() {
        union == filter.included_civs()
    } else {
        union.intersects(filter.included_civs()) && !union.intersects(filter.excluded_civs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Facet;
    use crate::civilization::Civilization::*;
    use crate::filter::RawSearchFilter;

    fn four_faced() -> CardShape {
        CardShape::new(
            vec![
                Facet::new(0, [Water]),
                Facet::new(1, [Fire]),
                Facet::new(2, [Nature]),
                Facet::new(3, [Water, Fire, Nature]),
            ],
            false,
        )
    }

    #[test]
    fn recognizes_shape() {
        assert!(is_anomaly_shape(&four_faced()));
        let three = CardShape::new(
            vec![
                Facet::new(0, [Water]),
                Facet::new(1, [Fire]),
                Facet::new(2, [Nature]),
            ],
            false,
        );
        assert!(!is_anomaly_shape(&three));
        let same_color = CardShape::new((0..4).map(|p| Facet::new(p, [Fire])).collect(), false);
        assert!(!is_anomaly_shape(&same_color));
    }

    #[test]
    fn exact_union() {
        let filter = RawSearchFilter::new()
            .include([Water, Fire, Nature])
            .mono(false)
            .exact(true)
            .build();
        assert!(matches_anomaly(&four_faced(), &filter));

        let filter = RawSearchFilter::new()
            .include([Water, Fire])
            .mono(false)
            .exact(true)
            .build();
        assert!(!matches_anomaly(&four_faced(), &filter));
    }

    #[test]
    fn excluded_civ_rejects() {
        let filter = RawSearchFilter::new()
            .include([Water])
            .exclude([Nature])
            .mono(false)
            .build();
        assert!(!matches_anomaly(&four_faced(), &filter));
    }

    #[test]
    fn mono_only_never_uses_union() {
        let filter = RawSearchFilter::new().include([Water]).rainbow(false).build();
        assert!(!matches_anomaly(&four_faced(), &filter));
    }
}
