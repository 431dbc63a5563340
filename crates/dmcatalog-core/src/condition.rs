//! # Civilization Conditions
//!
//! Query translation of the civilization match. A [`SearchFilter`] compiles
//! to a [`CivCondition`] tree that can be evaluated against a [`CardShape`]
//! or rendered as SQL with positional parameters for a storage engine that
//! keeps one civilization array per facet slot.
//!
//! ## Column model
//!
//! | Column        | Content                                        |
//! |---------------|------------------------------------------------|
//! | `c.TWINPACT`  | twinpact flag of the card                      |
//! | `CIVS0..3`    | civilization ordinals of facet slot 0..3       |
//! | `CIVS_ALL`    | union of all facets' civilization ordinals     |
//! | `FACET_COUNT` | number of facets of the card                   |
//!
//! Missing facet slots are empty arrays. Compiled conditions see the first
//! [`NON_TWINPACT_SIDES`] facets of a card; the match engine sees all of them.

use crate::anomaly;
use crate::card::CardShape;
use crate::civilization::CivilizationSet;
use crate::filter::{SearchFilter, TwinpactMode};
use crate::primitives::{ANOMALY_MIN_FACETS, NON_TWINPACT_SIDES, TWINPACT_SIDES};
use serde::Serialize;

// =============================================================================
// CONDITION TREE
// =============================================================================

/// Size comparison for a facet slot's civilization count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeCmp {
    Eq,
    Gt,
}

impl SizeCmp {
    const fn operator(self) -> &'static str {
        match self {
            SizeCmp::Eq => "=",
            SizeCmp::Gt => ">",
        }
    }
}

/// Boolean expression over the civilization columns of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CivCondition {
    True,
    False,
    And(Vec<CivCondition>),
    Or(Vec<CivCondition>),
    Not(Box<CivCondition>),
    IsTwinpact(bool),
    SideSize { side: usize, cmp: SizeCmp, n: usize },
    SidesEqual,
    SideContainsAny { side: usize, civs: CivilizationSet },
    /// Slot `side` holds exactly `civs`.
    SideEquals { side: usize, civs: CivilizationSet },
    /// Every civ in the set appears on slot 0 or slot 1.
    AcrossSidesContainsAll(CivilizationSet),
    UnionContainsAny(CivilizationSet),
    UnionEquals(CivilizationSet),
    /// The recognized multi-faced anomaly shape.
    AnomalyShape,
}

impl CivCondition {
    /// Conjunction; a single operand is returned as is.
    #[must_use]
    pub fn all_of(mut conditions: Vec<CivCondition>) -> Self {
        if conditions.len() == 1 {
            return conditions.remove(0);
        }
        CivCondition::And(conditions)
    }

    /// Disjunction; a single operand is returned as is.
    #[must_use]
    pub fn any_of(mut conditions: Vec<CivCondition>) -> Self {
        if conditions.len() == 1 {
            return conditions.remove(0);
        }
        CivCondition::Or(conditions)
    }

    #[must_use]
    pub fn negate(condition: CivCondition) -> Self {
        CivCondition::Not(Box::new(condition))
    }

    /// Evaluate against a card shape.
    #[must_use]
    pub fn eval(&self, shape: &CardShape) -> bool {
        match self {
            CivCondition::True => true,
            CivCondition::False => false,
            CivCondition::And(parts) => parts.iter().all(|part| part.eval(shape)),
            CivCondition::Or(parts) => parts.iter().any(|part| part.eval(shape)),
            CivCondition::Not(inner) => !inner.eval(shape),
            CivCondition::IsTwinpact(flag) => shape.is_twinpact() == *flag,
            CivCondition::SideSize { side, cmp, n } => {
                let len = shape.side(*side).len();
                match cmp {
                    SizeCmp::Eq => len == *n,
                    SizeCmp::Gt => len > *n,
                }
            }
            CivCondition::SidesEqual => shape.side(0) == shape.side(1),
            CivCondition::SideContainsAny { side, civs } => shape.side(*side).intersects(*civs),
            CivCondition::SideEquals { side, civs } => shape.side(*side) == *civs,
            CivCondition::AcrossSidesContainsAll(civs) => {
                civs.is_subset_of(shape.side(0).union(shape.side(1)))
            }
            CivCondition::UnionContainsAny(civs) => shape.union().intersects(*civs),
            CivCondition::UnionEquals(civs) => shape.union() == *civs,
            CivCondition::AnomalyShape => anomaly::is_anomaly_shape(shape),
        }
    }

    /// Render as SQL with `?` placeholders.
    #[must_use]
    pub fn to_sql(&self) -> CompiledQuery {
        let mut query = CompiledQuery::default();
        self.render(&mut query);
        query
    }

    fn render(&self, out: &mut CompiledQuery) {
        match self {
            CivCondition::True => out.sql.push_str("TRUE"),
            CivCondition::False => out.sql.push_str("FALSE"),
            CivCondition::And(parts) => render_joined(out, parts, "AND", "TRUE"),
            CivCondition::Or(parts) => render_joined(out, parts, "OR", "FALSE"),
            CivCondition::Not(inner) => {
                out.sql.push_str("NOT (");
                inner.render(out);
                out.sql.push(')');
            }
            CivCondition::IsTwinpact(true) => out.sql.push_str("c.TWINPACT IS TRUE"),
            CivCondition::IsTwinpact(false) => out.sql.push_str("c.TWINPACT IS NOT TRUE"),
            CivCondition::SideSize { side, cmp, n } => {
                out.sql
                    .push_str(&format!("CARDINALITY(CIVS{side}) {} ?", cmp.operator()));
                out.params.push(*n as i64);
            }
            CivCondition::SidesEqual => out.sql.push_str("CIVS0 = CIVS1"),
            CivCondition::SideContainsAny { side, civs } => {
                render_contains_any(out, &format!("CIVS{side}"), *civs);
            }
            CivCondition::SideEquals { side, civs } => {
                render_equals(out, &format!("CIVS{side}"), *civs);
            }
            CivCondition::AcrossSidesContainsAll(civs) => {
                if civs.is_empty() {
                    out.sql.push_str("TRUE");
                    return;
                }
                let parts: Vec<String> = civs
                    .iter()
                    .map(|civ| {
                        out.params.push(i64::from(civ.ordinal()));
                        out.params.push(i64::from(civ.ordinal()));
                        "(ARRAY_CONTAINS(CIVS0, ?) OR ARRAY_CONTAINS(CIVS1, ?))".to_string()
                    })
                    .collect();
                out.sql.push_str(&format!("({})", parts.join(" AND ")));
            }
            CivCondition::UnionContainsAny(civs) => render_contains_any(out, "CIVS_ALL", *civs),
            CivCondition::UnionEquals(civs) => render_equals(out, "CIVS_ALL", *civs),
            CivCondition::AnomalyShape => {
                out.sql
                    .push_str("(FACET_COUNT >= ? AND CARDINALITY(CIVS_ALL) > ?)");
                out.params.push(ANOMALY_MIN_FACETS as i64);
                out.params.push(1);
            }
        }
    }
}

fn render_joined(out: &mut CompiledQuery, parts: &[CivCondition], op: &str, empty: &str) {
    if parts.is_empty() {
        out.sql.push_str(empty);
        return;
    }
    out.sql.push('(');
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.sql.push_str(&format!(" {op} "));
        }
        part.render(out);
    }
    out.sql.push(')');
}

fn render_contains_any(out: &mut CompiledQuery, column: &str, civs: CivilizationSet) {
    if civs.is_empty() {
        out.sql.push_str("FALSE");
        return;
    }
    let parts: Vec<String> = civs
        .iter()
        .map(|civ| {
            out.params.push(i64::from(civ.ordinal()));
            format!("ARRAY_CONTAINS({column}, ?)")
        })
        .collect();
    out.sql.push_str(&format!("({})", parts.join(" OR ")));
}

fn render_equals(out: &mut CompiledQuery, column: &str, civs: CivilizationSet) {
    out.sql.push_str(&format!("(CARDINALITY({column}) = ?"));
    out.params.push(civs.len() as i64);
    for civ in civs.iter() {
        out.sql
            .push_str(&format!(" AND ARRAY_CONTAINS({column}, ?)"));
        out.params.push(i64::from(civ.ordinal()));
    }
    out.sql.push(')');
}

/// SQL text and its positional parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub params: Vec<i64>,
}

// =============================================================================
// COMPILATION
// =============================================================================

/// Compile the civilization part of a filter, twinpact gate included.
#[must_use]
pub fn compile(filter: &SearchFilter) -> CivCondition {
    let mode = filter.twinpact();
    if !filter.needs_civ_filter() {
        return match mode {
            TwinpactMode::In => CivCondition::True,
            TwinpactMode::Exclude => CivCondition::IsTwinpact(false),
            TwinpactMode::Only => CivCondition::IsTwinpact(true),
        };
    }

    let mut arms = Vec::new();
    if mode != TwinpactMode::Exclude {
        arms.push(CivCondition::all_of(vec![
            CivCondition::IsTwinpact(true),
            twinpact_branches(filter),
        ]));
    }
    if mode != TwinpactMode::Only {
        arms.push(CivCondition::all_of(vec![
            CivCondition::IsTwinpact(false),
            CivCondition::any_of(vec![non_twinpact_branches(filter), anomaly_arm(filter)]),
        ]));
    }
    CivCondition::any_of(arms)
}

fn twinpact_sides() -> impl Iterator<Item = usize> {
    0..TWINPACT_SIDES
}

fn non_twinpact_sides() -> impl Iterator<Item = usize> {
    0..NON_TWINPACT_SIDES
}

fn any_side_contains(sides: impl Iterator<Item = usize>, civs: CivilizationSet) -> CivCondition {
    CivCondition::any_of(
        sides
            .map(|side| CivCondition::SideContainsAny { side, civs })
            .collect(),
    )
}

/// `AND NOT (any side contains an excluded civ)` when there is an exclusion.
fn with_exclusion(
    condition: CivCondition,
    sides: impl Iterator<Item = usize>,
    excluded: CivilizationSet,
) -> CivCondition {
    if excluded.is_empty() {
        return condition;
    }
    CivCondition::all_of(vec![
        condition,
        CivCondition::negate(any_side_contains(sides, excluded)),
    ])
}

fn twinpact_branches(filter: &SearchFilter) -> CivCondition {
    let included = filter.included_civs();
    let excluded = filter.excluded_civs();
    let mut branches = Vec::new();

    if filter.include_mono() {
        branches.push(CivCondition::all_of(vec![
            CivCondition::SidesEqual,
            CivCondition::SideSize {
                side: 0,
                cmp: SizeCmp::Eq,
                n: 1,
            },
            CivCondition::SideContainsAny {
                side: 0,
                civs: included,
            },
        ]));
    }
    if filter.include_rainbow() {
        let rainbow = if filter.match_exact_rainbow_civs() {
            CivCondition::AcrossSidesContainsAll(included)
        } else {
            CivCondition::all_of(vec![
                CivCondition::any_of(vec![
                    CivCondition::negate(CivCondition::SidesEqual),
                    CivCondition::SideSize {
                        side: 0,
                        cmp: SizeCmp::Gt,
                        n: 1,
                    },
                ]),
                any_side_contains(twinpact_sides(), included),
            ])
        };
        branches.push(with_exclusion(rainbow, twinpact_sides(), excluded));
    }
    CivCondition::any_of(branches)
}

fn non_twinpact_branches(filter: &SearchFilter) -> CivCondition {
    let included = filter.included_civs();
    let mut branches = Vec::new();

    if filter.include_mono() {
        branches.push(CivCondition::any_of(
            non_twinpact_sides()
                .map(|side| {
                    CivCondition::all_of(vec![
                        CivCondition::SideSize {
                            side,
                            cmp: SizeCmp::Eq,
                            n: 1,
                        },
                        CivCondition::SideContainsAny {
                            side,
                            civs: included,
                        },
                    ])
                })
                .collect(),
        ));
    }
    if filter.include_rainbow() {
        if filter.match_exact_rainbow_civs() {
            branches.push(CivCondition::any_of(
                non_twinpact_sides()
                    .map(|side| CivCondition::SideEquals {
                        side,
                        civs: included,
                    })
                    .collect(),
            ));
        } else {
            let multicolor = CivCondition::any_of(
                non_twinpact_sides()
                    .map(|side| {
                        CivCondition::all_of(vec![
                            CivCondition::SideSize {
                                side,
                                cmp: SizeCmp::Gt,
                                n: 1,
                            },
                            CivCondition::SideContainsAny {
                                side,
                                civs: included,
                            },
                        ])
                    })
                    .collect(),
            );
            branches.push(with_exclusion(
                multicolor,
                non_twinpact_sides(),
                filter.excluded_civs(),
            ));
        }
    }
    CivCondition::any_of(branches)
}

fn anomaly_arm(filter: &SearchFilter) -> CivCondition {
    if !filter.include_rainbow() {
        return CivCondition::False;
    }
    let included = filter.included_civs();
    let union_rule = if filter.match_exact_rainbow_civs() {
        CivCondition::UnionEquals(included)
    } else {
        let excluded = filter.excluded_civs();
        CivCondition::all_of(vec![
            CivCondition::UnionContainsAny(included),
            CivCondition::negate(CivCondition::UnionContainsAny(excluded)),
        ])
    };
    CivCondition::all_of(vec![CivCondition::AnomalyShape, union_rule])
}

// =============================================================================
// TESTS
// =============================================================================
