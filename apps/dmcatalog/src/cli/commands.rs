//! # CLI Command Implementations

use super::CliError;
use crate::config::AppConfig;
use dmcatalog_core::{
    Card, Catalog, CatalogError, Facet, Page, RarityTable, RawSearchFilter, SearchContext,
    SearchFilter, SearchResult, TextIndices, compile, parse_sort, search,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum catalog snapshot size (200 MB).
const MAX_CATALOG_FILE_SIZE: u64 = 200 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CatalogError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CatalogError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CatalogError::Serialization(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Canonicalize `path` and make sure it names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, CatalogError> {
    let canonical = path.canonicalize().map_err(|e| {
        CatalogError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(CatalogError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// CATALOG LOADING
// =============================================================================

/// Load a catalog snapshot from a JSON file.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let path = validate_file_path(path)?;
    validate_file_size(&path, MAX_CATALOG_FILE_SIZE)?;

    let text = std::fs::read_to_string(&path)
        .map_err(|e| CatalogError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    let catalog: Catalog = serde_json::from_str(&text)
        .map_err(|e| CatalogError::Serialization(format!("{}: {}", path.display(), e)))?;

    tracing::info!(
        path = %path.display(),
        cards = catalog.cards.len(),
        species = catalog.species.len(),
        effects = catalog.effects.len(),
        "Catalog loaded"
    );
    Ok(catalog)
}

// =============================================================================
// SEARCH COMMAND
// =============================================================================

/// Everything a `search` invocation asks for.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub filter: RawSearchFilter,
    pub sort: String,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl SearchRequest {
    /// Paging window; `None` when the whole result list is wanted.
    #[must_use]
    pub fn page(&self) -> Option<Page> {
        if self.limit.is_none() && self.offset == 0 {
            return None;
        }
        Some(Page {
            offset: self.offset,
            limit: self.limit.unwrap_or(usize::MAX),
        })
    }
}

/// Run `request` against an already loaded catalog.
pub fn search_catalog<'c>(
    catalog: &'c Catalog,
    rarities: &RarityTable,
    request: &SearchRequest,
) -> Result<SearchResult<'c>, CatalogError> {
    let filter = SearchFilter::new(request.filter.clone());
    let sort = parse_sort(&request.sort);
    let indices = TextIndices::new(catalog);
    let ctx = SearchContext::new(rarities).with_indices(&indices);
    search(catalog, &filter, &sort, request.page(), &ctx)
}

/// Search the catalog and print the matches.
pub fn cmd_search(
    catalog_path: &Path,
    config: &AppConfig,
    request: &SearchRequest,
    json_mode: bool,
) -> Result<(), CliError> {
    let catalog = load_catalog(catalog_path)?;
    let rarities = config.rarity_table();
    let result = search_catalog(&catalog, &rarities, request)?;

    if json_mode {
        let output = serde_json::json!({
            "total": result.total,
            "offset": request.offset,
            "cards": result.cards,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{} matching card(s)", result.total);
    println!();
    for card in &result.cards {
        println!("{}", describe_card(card));
    }
    Ok(())
}

/// One line per card: id, civilizations, cost, power, name.
///
/// Costs and powers are printed as on the card, one per facet.
pub fn describe_card(card: &Card) -> String {
    let cost = join_facets(card, |facet| facet.cost.to_string());
    let power = join_facets(card, |facet| {
        facet.power.map(|power| power.to_string()).unwrap_or_default()
    });
    format!(
        "{:<14} {:<12} cost {:>3}  power {:>6}  {}",
        card.official_id,
        card.civilizations().to_string(),
        cost,
        power,
        card.name()
    )
}

/// Facet values joined with `/`; `-` stands for a blank value.
fn join_facets<F>(card: &Card, value: F) -> String
where
    F: Fn(&Facet) -> String,
{
    card.facets()
        .iter()
        .map(|facet| {
            let text = value(facet);
            if text.is_empty() { "-".to_string() } else { text }
        })
        .collect::<Vec<_>>()
        .join("/")
}

// =============================================================================
// FILTER COMMAND
// =============================================================================

/// Print a filter after normalization.
pub fn cmd_filter(raw: RawSearchFilter, json_mode: bool) -> Result<(), CliError> {
    let filter = SearchFilter::new(raw);

    if json_mode {
        let output = serde_json::json!({
            "filter": filter,
            "invalid": filter.is_invalid(),
            "needs_civ_filter": filter.needs_civ_filter(),
            "needs_text_index": filter.needs_text_index(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Normalized Filter");
    println!("=================");
    println!("Included:  {}", filter.included_civs());
    println!("Excluded:  {}", filter.excluded_civs());
    println!("Mono:      {}", filter.include_mono());
    println!("Rainbow:   {}", filter.include_rainbow());
    println!("Exact:     {}", filter.match_exact_rainbow_civs());
    println!("Twinpact:  {:?}", filter.twinpact());
    println!("Cost:      {:?}", filter.cost_range());
    println!("Power:     {:?}", filter.power_range());
    println!();
    println!("Invalid:   {}", filter.is_invalid());
    Ok(())
}

// =============================================================================
// SQL COMMAND
// =============================================================================

/// Print the compiled civilization condition.
pub fn cmd_sql(raw: RawSearchFilter, json_mode: bool) -> Result<(), CliError> {
    let filter = SearchFilter::new(raw);
    let query = compile(&filter).to_sql();

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&query).unwrap_or_default()
        );
        return Ok(());
    }

    println!("{}", query.sql);
    println!("-- params: {:?}", query.params);
    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Load the catalog and print its shape counts.
pub fn cmd_check(catalog_path: &Path, json_mode: bool) -> Result<(), CliError> {
    let catalog = load_catalog(catalog_path)?;
    let stats = catalog.stats();

    if json_mode {
        let output = serde_json::json!({
            "catalog": catalog_path.to_string_lossy(),
            "stats": stats,
            "species": catalog.species.len(),
            "effects": catalog.effects.len(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Catalog Status");
    println!("==============");
    println!("Catalog:    {:?}", catalog_path);
    println!();
    println!("Cards:      {}", stats.cards);
    println!("Facets:     {}", stats.facets);
    println!("Twinpacts:  {}", stats.twinpacts);
    println!("Anomalies:  {}", stats.anomalies);
    println!("Species:    {}", catalog.species.len());
    println!("Effects:    {}", catalog.effects.len());
    Ok(())
}
