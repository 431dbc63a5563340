//! # Civilization Match Engine
//!
//! `matches(shape, filter)` decides whether a card's civilizations satisfy
//! a normalized [`SearchFilter`]. It is a pure function of its inputs and
//! safe to call from any number of threads.
//!
//! Evaluation order:
//!
//! 1. Twinpact gate: `Exclude` rejects twinpact cards, `Only` rejects the rest.
//! 2. A filter with default civilization settings accepts every card.
//! 3. Twinpact cards go through the paired-side branches, other cards through
//!    the per-facet branches plus the anomaly path.
//!
//! Within 3, the mono and rainbow branches are OR-ed and each is skipped
//! when its flag is off.

use crate::anomaly;
use crate::card::CardShape;
use crate::civilization::CivilizationSet;
use crate::filter::{SearchFilter, TwinpactMode};

/// Whether a card's civilizations satisfy `filter`.
#[must_use]
pub fn matches(shape: &CardShape, filter: &SearchFilter) -> bool {
    if !passes_twinpact_gate(shape, filter.twinpact()) {
        return false;
    }
    if !filter.needs_civ_filter() {
        return true;
    }
    if shape.is_twinpact() {
        matches_twinpact(shape, filter)
    } else {
        matches_non_twinpact(shape, filter) || anomaly::matches_anomaly(shape, filter)
    }
}

fn passes_twinpact_gate(shape: &CardShape, mode: TwinpactMode) -> bool {
    match mode {
        TwinpactMode::In => true,
        TwinpactMode::Exclude => !shape.is_twinpact(),
        TwinpactMode::Only => shape.is_twinpact(),
    }
}

// =============================================================================
// NON-TWINPACT
// =============================================================================

fn matches_non_twinpact(shape: &CardShape, filter: &SearchFilter) -> bool {
    let included = filter.included_civs();
    let facets = shape.facets();

    let mono = filter.include_mono()
        && facets
            .iter()
            .any(|facet| facet.is_monochrome() && facet.civs.intersects(included));

    let rainbow = filter.include_rainbow()
        && if filter.match_exact_rainbow_civs() {
            facets.iter().any(|facet| facet.civs == included)
        } else {
            let excluded = filter.excluded_civs();
            facets
                .iter()
                .any(|facet| facet.is_multicolor() && facet.civs.intersects(included))
                && (excluded.is_empty()
                    || !facets.iter().any(|facet| facet.civs.intersects(excluded)))
        };

    mono || rainbow
}

// =============================================================================
// TWINPACT
// =============================================================================

fn matches_twinpact(shape: &CardShape, filter: &SearchFilter) -> bool {
    let included = filter.included_civs();
    let excluded = filter.excluded_civs();
    let (side0, side1) = (shape.side(0), shape.side(1));
    let touches = |civs: CivilizationSet| side0.intersects(civs) || side1.intersects(civs);

    let mono = filter.include_mono()
        && side0 == side1
        && side0.len() == 1
        && side0.is_subset_of(included);

    let rainbow = filter.include_rainbow()
        && if filter.match_exact_rainbow_civs() {
            side0.union(side1) == included && (excluded.is_empty() || !touches(excluded))
        } else {
            (side0 != side1 || side0.len() > 1 || side1.len() > 1)
                && touches(included)
                && (excluded.is_empty() || !touches(excluded))
        };

    mono || rainbow
}

// =============================================================================
// TESTS
// =============================================================================
