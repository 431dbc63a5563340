//! # dmcatalog
//!
//! Command line front end for `dmcatalog-core`: configuration, catalog
//! snapshot loading and the search commands.

pub mod cli;
pub mod config;
