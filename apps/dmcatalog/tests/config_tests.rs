//! Integration tests for configuration resolution.

use dmcatalog::config::{AppConfig, ConfigError, resolve_config};
use dmcatalog_core::{RarityCode, RarityOrder};
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(file, "{text}").expect("write config");
    file
}

#[test]
fn test_resolve_explicit_config() {
    let file = config_file(
        r#"
[catalog]
path = "cards.json"

[output]
json = true

[[rarity]]
code = "VR"
order = 4
"#,
    );
    let config = resolve_config(Some(file.path())).expect("config");
    assert!(config.output.json);
    assert_eq!(
        config.rarity_table().ordinal(&RarityCode::new("VR")),
        Some(4)
    );
    assert_eq!(config.rarity_table().ordinal(&RarityCode::new("C")), None);
}

#[test]
fn test_resolve_rejects_invalid_sort() {
    let file = config_file("[search]\ndefault_sort = \"cost:asc,rel:desc\"\n");
    assert!(matches!(
        resolve_config(Some(file.path())),
        Err(ConfigError::ValidationError(_))
    ));
}

#[test]
fn test_resolve_rejects_malformed_toml() {
    let file = config_file("[[rarity]]\ncode = 3\n");
    assert!(matches!(
        resolve_config(Some(file.path())),
        Err(ConfigError::ParseError(_))
    ));
}

#[test]
fn test_empty_file_is_default() {
    let file = config_file("");
    let config = resolve_config(Some(file.path())).expect("config");
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.search.default_sort, "id:asc");
}
