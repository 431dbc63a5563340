//! Species name index.

use super::{IndexSource, SpeciesRecord};
use crate::secondary::contains_ignore_case;
use crate::{CatalogError, FacetId, SpeciesId};
use std::collections::{BTreeMap, BTreeSet};

/// Species sorted by name plus the facets carrying each one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesIndex {
    species: Vec<SpeciesRecord>,
    facets_by_species: BTreeMap<SpeciesId, BTreeSet<FacetId>>,
}

impl SpeciesIndex {
    /// Scan `source` and build the index.
    pub fn build(source: &dyn IndexSource) -> Result<Self, CatalogError> {
        let mut species = source.species()?;
        species.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let mut facets_by_species: BTreeMap<SpeciesId, BTreeSet<FacetId>> = BTreeMap::new();
        for link in source.species_links()? {
            facets_by_species
                .entry(link.species)
                .or_default()
                .insert(link.facet);
        }

        tracing::info!(
            species = species.len(),
            linked = facets_by_species.len(),
            "Species index built"
        );
        Ok(Self {
            species,
            facets_by_species,
        })
    }

    /// All species, ordered by name.
    #[must_use]
    pub fn species(&self) -> &[SpeciesRecord] {
        &self.species
    }

    /// Facets of every species whose name contains `text`.
    #[must_use]
    pub fn search(&self, text: &str) -> BTreeSet<FacetId> {
        self.species
            .iter()
            .filter(|record| contains_ignore_case(&record.name, text))
            .filter_map(|record| self.facets_by_species.get(&record.id))
            .flatten()
            .copied()
            .collect()
    }
}
