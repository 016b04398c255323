use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::info;

use crate::catalog::{IngredientCatalog, SharedCatalog};
use crate::recipe::{Book, Recipe};
use crate::repository::{InMemoryRecipeRepository, RecipeLibrary};
use crate::store::read_catalog_csv;

const SEED_INGREDIENTS_CSV: &str = include_str!("../data/seed_ingredients.csv");
const SEED_LIBRARY_JSON: &str = include_str!("../data/seed_library.json");

#[derive(Debug, Deserialize)]
struct SeedRecipe {
    /// Title of the book the recipe links to, if any.
    #[serde(default)]
    book: Option<String>,
    #[serde(flatten)]
    recipe: Recipe,
}

#[derive(Debug, Deserialize)]
struct SeedLibrary {
    books: Vec<Book>,
    recipes: Vec<SeedRecipe>,
}

/// The sample ingredient catalog shipped with the app.
pub fn seed_catalog() -> Result<IngredientCatalog> {
    read_catalog_csv(SEED_INGREDIENTS_CSV.as_bytes()).context("Failed to read bundled seed ingredients")
}

/// The sample books and recipes shipped with the app, with recipes linked to books by id.
pub fn seed_library() -> Result<RecipeLibrary> {
    let seed: SeedLibrary =
        serde_json::from_str(SEED_LIBRARY_JSON).context("Failed to parse bundled seed library")?;

    let book_ids: HashMap<&str, _> = seed.books.iter().map(|b| (b.title.as_str(), b.id)).collect();
    let mut recipes = Vec::with_capacity(seed.recipes.len());
    for SeedRecipe { book, mut recipe } in seed.recipes {
        if let Some(title) = book {
            let id = book_ids
                .get(title.as_str())
                .with_context(|| format!("Seed recipe '{}' names unknown book '{}'", recipe.name, title))?;
            recipe.book_id = Some(*id);
        }
        recipes.push(recipe);
    }

    Ok(RecipeLibrary {
        books: seed.books,
        recipes,
    })
}

/// First-launch population. Does nothing unless the repository is empty; the
/// catalog is only filled if it is empty as well.
///
/// Returns whether anything was seeded.
pub fn populate_if_empty(repo: &mut InMemoryRecipeRepository, catalog: &SharedCatalog) -> Result<bool> {
    if !repo.is_empty() {
        return Ok(false);
    }

    info!("Populating seed data...");
    let library = seed_library()?;
    let (recipe_count, book_count) = (library.recipes.len(), library.books.len());
    for book in library.books {
        repo.add_book(book);
    }
    for recipe in library.recipes {
        repo.add_recipe(recipe);
    }

    let mut ingredient_count = catalog.len()?;
    if ingredient_count == 0 {
        let seeded = seed_catalog()?;
        ingredient_count = seeded.len();
        catalog.replace(seeded)?;
    }

    info!(
        recipes = recipe_count,
        books = book_count,
        ingredients = ingredient_count,
        "Seed data populated"
    );
    Ok(true)
}
