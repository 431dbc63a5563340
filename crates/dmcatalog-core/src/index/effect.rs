//! Effect text index.
//!
//! Only top-level effects are linked to facets. A matching child effect
//! resolves to the facets of its parent.

use super::{EffectRecord, IndexSource};
use crate::{CatalogError, EffectId, FacetId};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectIndex {
    /// Upper-cased effect text with the effect that owns the facet links.
    entries: Vec<(String, EffectId)>,
    facets_by_effect: BTreeMap<EffectId, BTreeSet<FacetId>>,
}

impl EffectIndex {
    /// Scan `source` and build the index.
    pub fn build(source: &dyn IndexSource) -> Result<Self, CatalogError> {
        let effects = source.effects()?;
        let entries: Vec<(String, EffectId)> = effects
            .into_iter()
            .map(|EffectRecord { id, text, parent }| (text.to_uppercase(), parent.unwrap_or(id)))
            .collect();

        let mut facets_by_effect: BTreeMap<EffectId, BTreeSet<FacetId>> = BTreeMap::new();
        for link in source.effect_links()? {
            facets_by_effect
                .entry(link.effect)
                .or_default()
                .insert(link.facet);
        }

        tracing::info!(effects = entries.len(), "Effect index built");
        Ok(Self {
            entries,
            facets_by_effect,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Facets with an effect (or child effect) whose text contains `text`.
    #[must_use]
    pub fn search(&self, text: &str) -> BTreeSet<FacetId> {
        let needle = text.to_uppercase();
        let owners: BTreeSet<EffectId> = self
            .entries
            .iter()
            .filter(|(haystack, _)| haystack.contains(&needle))
            .map(|(_, owner)| *owner)
            .collect();
        let facets: BTreeSet<FacetId> = owners
            .iter()
            .filter_map(|owner| self.facets_by_effect.get(owner))
            .flatten()
            .copied()
            .collect();
        tracing::debug!(search = text, facets = facets.len(), "Effect search");
        facets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{EffectLink, SpeciesLink, SpeciesRecord};

    struct Fixed;

    impl IndexSource for Fixed {
        fn species(&self) -> Result<Vec<SpeciesRecord>, CatalogError> {
            Ok(Vec::new())
        }

        fn species_links(&self) -> Result<Vec<SpeciesLink>, CatalogError> {
            Ok(Vec::new())
        }

        fn effects(&self) -> Result<Vec<EffectRecord>, CatalogError> {
            Ok(vec![
                EffectRecord {
                    id: EffectId(1),
                    text: "Blocker".to_string(),
                    parent: None,
                },
                EffectRecord {
                    id: EffectId(2),
                    text: "Choose one:".to_string(),
                    parent: None,
                },
                EffectRecord {
                    id: EffectId(3),
                    text: "Draw a card.".to_string(),
                    parent: Some(EffectId(2)),
                },
            ])
        }

        fn effect_links(&self) -> Result<Vec<EffectLink>, CatalogError> {
            Ok(vec![
                EffectLink {
                    effect: EffectId(1),
                    facet: FacetId(100),
                },
                EffectLink {
                    effect: EffectId(2),
                    facet: FacetId(200),
                },
            ])
        }
    }

    #[test]
    fn case_insensitive_search() {
        let index = EffectIndex::build(&Fixed).expect("build");
        assert_eq!(index.search("blocker"), BTreeSet::from([FacetId(100)]));
        assert_eq!(index.len(), 3);
    }

    #[test]
    fn child_effect_resolves_to_parent_facets() {
        let index = EffectIndex::build(&Fixed).expect("build");
        assert_eq!(index.search("draw a"), BTreeSet::from([FacetId(200)]));
    }

    #[test]
    fn no_match_is_empty() {
        let index = EffectIndex::build(&Fixed).expect("build");
        assert!(index.search("shield trigger").is_empty());
    }
}
