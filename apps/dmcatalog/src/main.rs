//! # dmcatalog - Card Catalog Search
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/dmcatalog (THE BINARY)       │
//! │                                              │
//! │  ┌─────────────┐        ┌────────────────┐   │
//! │  │   CLI       │        │    Config      │   │
//! │  │  (clap)     │        │    (toml)      │   │
//! │  └──────┬──────┘        └───────┬────────┘   │
//! │         └────────────┬──────────┘            │
//! │                      ▼                       │
//! │              ┌────────────────┐              │
//! │              │ dmcatalog-core │              │
//! │              │  (THE LOGIC)   │              │
//! │              └────────────────┘              │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! dmcatalog --catalog cards.json check
//! dmcatalog --catalog cards.json search --civ fire,nature --mono false --sort cost:desc
//! dmcatalog sql --civ light,dark --exact true --twinpact only
//! ```

use clap::Parser;
use dmcatalog::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // DMCATALOG_LOG_FORMAT=json switches to machine-parseable logs.
    let log_format = std::env::var("DMCATALOG_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dmcatalog=info,dmcatalog_core=info".into());

    // Logs go to stderr so search output on stdout stays pipeable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_banner() {
    println!(
        r#"
  dmcatalog v{}
  Civilization matching and ordering for the card catalog
"#,
        env!("CARGO_PKG_VERSION")
    );
}
