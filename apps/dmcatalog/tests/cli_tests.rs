//! Integration tests for the dmcatalog command line.
//!
//! Argument parsing goes through `Cli::try_parse_from`; searches run against
//! a small catalog snapshot written to a temporary file.

#![allow(clippy::panic)]

use clap::Parser;
use dmcatalog::cli::{
    Cli, CliError, Commands, SearchRequest, describe_card, execute, load_catalog, search_catalog,
};
use dmcatalog::config::load_config_from_str;
use dmcatalog_core::{
    CardType, CatalogError, Civilization, CivilizationSet, RarityRange, SearchFilter, SetId,
    TwinpactMode,
};
use std::io::Write;
use tempfile::NamedTempFile;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

const CATALOG_JSON: &str = r#"{
  "cards": [
    {
      "id": 1, "official_id": "dm01-001", "rarity": "R",
      "facets": [
        {"id": 10, "position": 0, "name": "Bolshack Dragon", "civs": ["fire"],
         "cost": 6, "power": "6000+", "type": "クリーチャー"}
      ]
    },
    {
      "id": 2, "official_id": "dm01-002", "rarity": "C",
      "facets": [
        {"id": 20, "position": 0, "name": "Aqua Soldier", "civs": ["water"],
         "cost": 3, "power": "1000", "type": "クリーチャー"}
      ]
    },
    {
      "id": 3, "official_id": "dm01-003", "rarity": "SR", "twinpact": true,
      "facets": [
        {"id": 30, "position": 0, "name": "Blaze Top", "civs": ["fire"],
         "cost": 7, "power": "9000", "type": "クリーチャー"},
        {"id": 31, "position": 1, "name": "Grove Bottom", "civs": ["nature"],
         "cost": 2, "type": "呪文"}
      ]
    }
  ],
  "species": [{"id": 1, "name": "Armored Dragon"}],
  "species_links": [{"species": 1, "facet": 10}, {"species": 1, "facet": 30}],
  "effects": [{"id": 1, "text": "Double breaker"}],
  "effect_links": [{"effect": 1, "facet": 30}]
}"#;

const CONFIG_TOML: &str = r#"
[[rarity]]
code = "C"
order = 1

[[rarity]]
code = "R"
order = 3

[[rarity]]
code = "SR"
order = 5
"#;

fn catalog_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{CATALOG_JSON}").expect("write catalog");
    file
}

fn config_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{text}").expect("write config");
    file
}

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(args).expect("valid arguments")
}

fn official_ids(request: &SearchRequest) -> Vec<String> {
    let file = catalog_file();
    let catalog = load_catalog(file.path()).expect("catalog");
    let config = load_config_from_str(CONFIG_TOML).expect("config");
    let rarities = config.rarity_table();
    let result = search_catalog(&catalog, &rarities, request).expect("search");
    result
        .cards
        .iter()
        .map(|card| card.official_id.clone())
        .collect()
}

// =============================================================================
// ARGUMENT PARSING TESTS
// =============================================================================

#[test]
fn test_search_flags_translate_to_raw_filter() {
    let cli = parse(&[
        "dmcatalog",
        "search",
        "--civ",
        "fire,自然",
        "--exclude-civ",
        "dark",
        "--mono",
        "false",
        "--twinpact",
        "ex",
        "--type",
        "creature",
        "--rarity",
        "R",
        "--rarity-range",
        ">=",
        "--set",
        "4",
        "--sort",
        "cost:desc",
        "--limit",
        "10",
    ]);

    let Some(Commands::Search {
        filter,
        sort,
        limit,
        offset,
    }) = cli.command
    else {
        panic!("expected search command");
    };
    let raw = filter.to_raw().expect("raw filter");

    assert_eq!(
        raw.included_civs,
        Some(CivilizationSet::from([Civilization::Fire, Civilization::Nature]))
    );
    assert_eq!(
        raw.excluded_civs,
        Some(CivilizationSet::from([Civilization::Dark]))
    );
    assert_eq!(raw.include_mono, Some(false));
    assert_eq!(raw.include_rainbow, None);
    assert_eq!(raw.twinpact, Some(TwinpactMode::Exclude));
    assert_eq!(raw.card_type, Some(CardType::Creature));
    assert_eq!(raw.set_id, Some(SetId(4)));
    assert_eq!(
        raw.rarity.as_ref().map(|rarity| rarity.range),
        Some(RarityRange::Ge)
    );
    assert_eq!(sort.as_deref(), Some("cost:desc"));
    assert_eq!(limit, Some(10));
    assert_eq!(offset, 0);
}

#[test]
fn test_no_flags_is_default_filter() {
    let cli = parse(&["dmcatalog", "filter"]);
    let Some(Commands::Filter { filter }) = cli.command else {
        panic!("expected filter command");
    };
    let normalized = SearchFilter::new(filter.to_raw().expect("raw filter"));
    assert_eq!(normalized, SearchFilter::default());
}

#[test]
fn test_unknown_civilization_is_rejected() {
    let cli = parse(&["dmcatalog", "filter", "--civ", "purple"]);
    let Some(Commands::Filter { filter }) = cli.command else {
        panic!("expected filter command");
    };
    assert!(matches!(
        filter.to_raw(),
        Err(CatalogError::InvalidFilter(_))
    ));
}

#[test]
fn test_rarity_range_requires_rarity() {
    let result = Cli::try_parse_from(["dmcatalog", "search", "--rarity-range", "le"]);
    assert!(result.is_err());
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&["dmcatalog", "check", "--json-mode", "-q"]);
    assert!(cli.json_mode);
    assert!(cli.quiet);
    assert!(matches!(cli.command, Some(Commands::Check)));
}

// =============================================================================
// CATALOG LOADING TESTS
// =============================================================================

#[test]
fn test_load_catalog() {
    let file = catalog_file();
    let catalog = load_catalog(file.path()).expect("catalog");
    let stats = catalog.stats();
    assert_eq!(stats.cards, 3);
    assert_eq!(stats.facets, 4);
    assert_eq!(stats.twinpacts, 1);
    assert_eq!(stats.anomalies, 0);
}

#[test]
fn test_load_catalog_missing_file() {
    let result = load_catalog(std::path::Path::new("/nonexistent/catalog.json"));
    assert!(matches!(result, Err(CatalogError::Io(_))));
}

#[test]
fn test_load_catalog_directory() {
    let dir = std::env::temp_dir();
    assert!(matches!(load_catalog(&dir), Err(CatalogError::Io(_))));
}

#[test]
fn test_load_catalog_malformed() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{{\"cards\": 3}}").expect("write");
    assert!(matches!(
        load_catalog(file.path()),
        Err(CatalogError::Serialization(_))
    ));
}

#[test]
fn test_load_catalog_rejects_one_sided_twinpact() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{"cards": [{{"id": 9, "official_id": "dm01-009", "twinpact": true,
            "facets": [{{"id": 90, "position": 0, "civs": ["fire"]}}]}}]}}"#
    )
    .expect("write");
    let Err(CatalogError::Serialization(message)) = load_catalog(file.path()) else {
        panic!("expected a serialization error");
    };
    assert!(message.contains("dm01-009"), "{message}");
}

#[test]
fn test_describe_card_prints_printed_values() {
    let file = catalog_file();
    let catalog = load_catalog(file.path()).expect("catalog");
    let bolshack = describe_card(&catalog.cards[0]);
    assert!(bolshack.contains("6000+"), "{bolshack}");
    assert!(!bolshack.contains("6001"), "{bolshack}");

    let twinpact = describe_card(&catalog.cards[2]);
    assert!(twinpact.contains("cost 7/2"), "{twinpact}");
    assert!(twinpact.contains("power 9000/-"), "{twinpact}");
}

// =============================================================================
// SEARCH TESTS
// =============================================================================

#[test]
fn test_search_fire_includes_twinpact_rainbow() {
    let request = SearchRequest {
        filter: dmcatalog_core::RawSearchFilter::new().include([Civilization::Fire]),
        sort: "cost:desc".to_string(),
        ..SearchRequest::default()
    };
    assert_eq!(official_ids(&request), vec!["dm01-003", "dm01-001"]);
}

#[test]
fn test_search_by_species_and_effect() {
    let species = SearchRequest {
        filter: dmcatalog_core::RawSearchFilter::new().species("dragon"),
        sort: "id:asc".to_string(),
        ..SearchRequest::default()
    };
    assert_eq!(official_ids(&species), vec!["dm01-001", "dm01-003"]);

    let both = SearchRequest {
        filter: dmcatalog_core::RawSearchFilter::new()
            .species("dragon")
            .effect("breaker"),
        sort: "id:asc".to_string(),
        ..SearchRequest::default()
    };
    assert_eq!(official_ids(&both), vec!["dm01-003"]);
}

#[test]
fn test_search_sorted_by_rarity_with_paging() {
    let request = SearchRequest {
        filter: dmcatalog_core::RawSearchFilter::new(),
        sort: "rar:desc".to_string(),
        limit: Some(2),
        offset: 1,
    };
    assert_eq!(official_ids(&request), vec!["dm01-001", "dm01-002"]);
}

#[test]
fn test_search_page_window() {
    let whole = SearchRequest::default();
    assert!(whole.page().is_none());

    let skipped = SearchRequest {
        offset: 5,
        ..SearchRequest::default()
    };
    let page = skipped.page().expect("page");
    assert_eq!(page.offset, 5);
    assert_eq!(page.limit, usize::MAX);
}

// =============================================================================
// EXECUTE TESTS
// =============================================================================

#[test]
fn test_execute_check() {
    let catalog = catalog_file();
    let config = config_file(CONFIG_TOML);
    let cli = parse(&[
        "dmcatalog",
        "--config",
        config.path().to_str().expect("utf-8 path"),
        "--catalog",
        catalog.path().to_str().expect("utf-8 path"),
        "--json-mode",
        "check",
    ]);
    assert!(execute(cli).is_ok());
}

#[test]
fn test_execute_without_catalog_is_usage_error() {
    let config = config_file("");
    let cli = parse(&[
        "dmcatalog",
        "--config",
        config.path().to_str().expect("utf-8 path"),
        "check",
    ]);
    assert!(matches!(execute(cli), Err(CliError::Usage(_))));
}

#[test]
fn test_execute_with_missing_config() {
    let cli = parse(&["dmcatalog", "--config", "/nonexistent/dmcatalog.toml", "sql"]);
    assert!(matches!(execute(cli), Err(CliError::Config(_))));
}

#[test]
fn test_execute_sql_and_filter() {
    let config = config_file("");
    let path = config.path().to_str().expect("utf-8 path");
    for command in ["sql", "filter"] {
        let cli = parse(&[
            "dmcatalog",
            "--config",
            path,
            command,
            "--civ",
            "light,dark",
            "--exact",
            "true",
        ]);
        assert!(execute(cli).is_ok(), "{command}");
    }
}
