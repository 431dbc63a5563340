//! # dmcatalog CLI Module
//!
//! ## Available Commands
//!
//! - `search` - Run a filter over the catalog and print the ordered matches
//! - `filter` - Show how a filter normalizes
//! - `sql` - Show the compiled civilization condition
//! - `check` - Load the catalog and print its shape counts

mod commands;

use crate::config::{AppConfig, ConfigError, resolve_config};
use clap::{Args, Parser, Subcommand};
use dmcatalog_core::{
    CardType, CatalogError, Civilization, CivilizationSet, RarityCode, RarityFilter, RarityRange,
    RawSearchFilter, SetId, TwinpactMode,
};
use std::path::PathBuf;
use thiserror::Error;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// dmcatalog - card catalog search
///
/// Matches cards by civilization (mono, rainbow, exact, twinpact) and
/// orders the results.
#[derive(Parser, Debug)]
#[command(name = "dmcatalog")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the configuration file
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the catalog snapshot (JSON); overrides the configuration
    #[arg(short = 'c', long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search the catalog
    Search {
        #[command(flatten)]
        filter: FilterArgs,

        /// Sort order, e.g. "cost:asc,pwr:desc"
        #[arg(short, long)]
        sort: Option<String>,

        /// Maximum number of cards to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Number of sorted matches to skip
        #[arg(short, long, default_value = "0")]
        offset: usize,
    },

    /// Print the normalized form of a filter
    Filter {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Print the compiled civilization condition as SQL
    Sql {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Load the catalog and print its statistics
    Check,
}

/// Filter flags shared by every filter-taking command.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Set (expansion) id
    #[arg(long)]
    pub set: Option<u64>,

    /// Included civilizations, comma-separated (e.g. "fire,nature" or "火,自然")
    #[arg(long = "civ", value_delimiter = ',')]
    pub civs: Vec<String>,

    /// Excluded civilizations, comma-separated
    #[arg(long = "exclude-civ", value_delimiter = ',')]
    pub exclude_civs: Vec<String>,

    /// Include monochrome cards
    #[arg(long)]
    pub mono: Option<bool>,

    /// Include multicolor cards
    #[arg(long)]
    pub rainbow: Option<bool>,

    /// Require the exact civilization combination
    #[arg(long)]
    pub exact: Option<bool>,

    #[arg(long)]
    pub min_cost: Option<i32>,

    #[arg(long)]
    pub max_cost: Option<i32>,

    #[arg(long)]
    pub min_power: Option<i32>,

    #[arg(long)]
    pub max_power: Option<i32>,

    /// Twinpact mode (in, ex, only)
    #[arg(long)]
    pub twinpact: Option<String>,

    /// Card type (creature, spell, evolution, gr, ...)
    #[arg(long = "type")]
    pub card_type: Option<String>,

    /// Rarity code
    #[arg(long)]
    pub rarity: Option<String>,

    /// Rarity comparison (le, eq, ge)
    #[arg(long, requires = "rarity")]
    pub rarity_range: Option<String>,

    /// Species name fragment
    #[arg(long)]
    pub species: Option<String>,

    /// Card name fragment
    #[arg(long)]
    pub name: Option<String>,

    /// Effect text fragment
    #[arg(long)]
    pub effect: Option<String>,
}

impl FilterArgs {
    /// Translate the flags into a raw filter.
    ///
    /// Unknown civilization, type, twinpact or rarity range names are
    /// reported as [`CatalogError::InvalidFilter`].
    pub fn to_raw(&self) -> Result<RawSearchFilter, CatalogError> {
        let rarity = match &self.rarity {
            Some(code) => {
                let range = self
                    .rarity_range
                    .as_deref()
                    .map(RarityRange::from_name)
                    .transpose()?
                    .unwrap_or_default();
                Some(RarityFilter::new(RarityCode::new(code.clone()), range))
            }
            None => None,
        };

        Ok(RawSearchFilter {
            set_id: self.set.map(SetId),
            included_civs: parse_civs(&self.civs)?,
            excluded_civs: parse_civs(&self.exclude_civs)?,
            include_mono: self.mono,
            include_rainbow: self.rainbow,
            match_exact_rainbow_civs: self.exact,
            min_cost: self.min_cost,
            max_cost: self.max_cost,
            min_power: self.min_power,
            max_power: self.max_power,
            twinpact: self
                .twinpact
                .as_deref()
                .map(TwinpactMode::from_name)
                .transpose()?,
            card_type: self
                .card_type
                .as_deref()
                .map(CardType::from_name)
                .transpose()?,
            rarity,
            species_search: self.species.clone(),
            name_search: self.name.clone(),
            effect_search: self.effect.clone(),
        })
    }
}

/// An empty list means "not given".
fn parse_civs(names: &[String]) -> Result<Option<CivilizationSet>, CatalogError> {
    if names.is_empty() {
        return Ok(None);
    }
    names
        .iter()
        .map(|name| Civilization::from_name(name))
        .collect::<Result<CivilizationSet, _>>()
        .map(Some)
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Usage(String),
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CliError> {
    let config = resolve_config(cli.config.as_deref())?;
    let json_mode = cli.json_mode || config.output.json;
    if cli.verbose {
        tracing::info!(?config, "Configuration loaded");
    }

    match cli.command {
        Some(Commands::Search {
            filter,
            sort,
            limit,
            offset,
        }) => {
            let catalog_path = catalog_path(cli.catalog, &config)?;
            let request = SearchRequest {
                filter: filter.to_raw()?,
                sort: sort.unwrap_or_else(|| config.search.default_sort.clone()),
                limit,
                offset,
            };
            cmd_search(&catalog_path, &config, &request, json_mode)
        }
        Some(Commands::Filter { filter }) => cmd_filter(filter.to_raw()?, json_mode),
        Some(Commands::Sql { filter }) => cmd_sql(filter.to_raw()?, json_mode),
        Some(Commands::Check) | None => {
            let catalog_path = catalog_path(cli.catalog, &config)?;
            cmd_check(&catalog_path, json_mode)
        }
    }
}

/// The command line path wins over the configured one.
fn catalog_path(flag: Option<PathBuf>, config: &AppConfig) -> Result<PathBuf, CliError> {
    flag.or_else(|| config.catalog.path.clone()).ok_or_else(|| {
        CliError::Usage(
            "no catalog given: pass --catalog or set catalog.path in the configuration"
                .to_string(),
        )
    })
}
