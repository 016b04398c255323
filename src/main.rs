use anyhow::{Context, Result};
use recipe_vault::catalog::{IngredientCatalog, SharedCatalog};
use recipe_vault::cli::{parse_args, Cli, Command};
use recipe_vault::config::MatchConfig;
use recipe_vault::matcher::{Pantry, RecipeMatcher};
use recipe_vault::repository::{InMemoryRecipeRepository, RecipeRepository};
use recipe_vault::store::{load_catalog_csv, CatalogStore, JsonCatalogStore};
use recipe_vault::{logging, seed};
use std::path::Path;
use tracing::info;

fn load_catalog(path: &Path) -> Result<IngredientCatalog> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_catalog_csv(path)
    } else {
        JsonCatalogStore::new(path)
            .load()
            .with_context(|| format!("Failed to load catalog from '{}'", path.display()))
    }
}

/// Loads whatever the user pointed at and seeds the rest from the bundled sample data.
fn open_library(cli: &Cli) -> Result<(SharedCatalog, InMemoryRecipeRepository)> {
    let catalog = match &cli.catalog {
        Some(path) => SharedCatalog::new(load_catalog(path)?),
        None => SharedCatalog::default(),
    };
    let mut repo = match &cli.recipes {
        Some(path) => InMemoryRecipeRepository::load_json(path)
            .with_context(|| format!("Failed to load recipes from '{}'", path.display()))?,
        None => InMemoryRecipeRepository::new(),
    };

    seed::populate_if_empty(&mut repo, &catalog)?;
    if catalog.is_empty()? {
        catalog.replace(seed::seed_catalog()?)?;
    }
    Ok((catalog, repo))
}

fn what_can_i_make(catalog: &SharedCatalog, repo: &InMemoryRecipeRepository, have: &[String], threshold: f64) -> Result<()> {
    let matcher = RecipeMatcher::new(MatchConfig::new(threshold)?);
    let pantry = catalog.with_read(|c| Pantry::from_raw(have, c))?;
    println!("Pantry: {}", pantry.sorted().join(", "));

    let recipes = repo.snapshot();
    let results = matcher.match_recipes(&pantry, &recipes);
    if results.is_empty() {
        println!(
            "No recipes reach {:.0}% coverage with what you have.",
            threshold * 100.0
        );
        return Ok(());
    }

    for result in results {
        print!("{:>4.0}%  {}", result.coverage * 100.0, result.recipe.name);
        if result.missing.is_empty() {
            println!();
        } else {
            println!("  (missing: {})", result.missing.join(", "));
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = parse_args();
    logging::init(cli.verbose)?;

    let (catalog, repo) = open_library(&cli)?;
    info!(
        ingredients = catalog.len()?,
        recipes = repo.len(),
        "library ready"
    );

    match &cli.command {
        Command::WhatCanIMake { have, threshold } => {
            what_can_i_make(&catalog, &repo, have, *threshold)?;
        }
        Command::Normalize { raw } => {
            for mention in raw {
                let name = catalog.normalize(mention)?;
                println!("{} -> {}", mention, if name.is_empty() { "(empty)" } else { name.as_str() });
            }
        }
        Command::Lookup { token } => match catalog.lookup(token)? {
            Some(ingredient) => {
                println!("{}", ingredient.name);
                if let Some(category) = ingredient.category {
                    println!("  category: {}", category);
                }
                if !ingredient.aliases.is_empty() {
                    println!("  aliases:  {}", ingredient.aliases.join(", "));
                }
            }
            None => println!("'{}' is not in the catalog", token.trim()),
        },
        Command::Search { query, cuisine } => {
            for recipe in repo.search(query, cuisine.as_deref()) {
                let time = recipe.formatted_total_time().unwrap_or_default();
                println!(
                    "{}  [{}] {}",
                    recipe.name,
                    recipe.recipe_cuisine.as_deref().unwrap_or("-"),
                    time
                );
            }
        }
        Command::ExportCatalog { output } => {
            let snapshot = catalog.snapshot()?;
            JsonCatalogStore::new(output)
                .save(&snapshot)
                .with_context(|| format!("Failed to write catalog to '{}'", output.display()))?;
            println!("Wrote {} ingredients to {}", snapshot.len(), output.display());
        }
    }

    Ok(())
}
