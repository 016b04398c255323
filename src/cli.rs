use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_MINIMUM_MATCH_THRESHOLD;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Ingredient catalog file (.json or .csv). The bundled sample catalog is used when omitted
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    /// Recipe library JSON file. The bundled sample recipes are used when omitted
    #[arg(short, long, global = true)]
    pub recipes: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank recipes by how many of their ingredients you already have
    WhatCanIMake {
        /// Ingredients on hand, as typed (aliases are resolved)
        #[arg(required = true)]
        have: Vec<String>,

        /// Minimum fraction of a recipe's ingredients you must have (0.0 to 1.0)
        #[arg(short, long, env = "RECIPE_VAULT_THRESHOLD", default_value_t = DEFAULT_MINIMUM_MATCH_THRESHOLD)]
        threshold: f64,
    },
    /// Print the canonical name for each ingredient mention
    Normalize {
        #[arg(required = true)]
        raw: Vec<String>,
    },
    /// Show the catalog entry a name or alias resolves to
    Lookup { token: String },
    /// Search recipes by name, keyword or ingredient
    Search {
        #[arg(default_value = "")]
        query: String,

        /// Only recipes whose cuisine contains this text
        #[arg(long)]
        cuisine: Option<String>,
    },
    /// Write the loaded catalog to a JSON file
    ExportCatalog { output: PathBuf },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
