pub mod catalog;
pub mod cli;
pub mod config;
pub mod duration;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod normalizer;
pub mod recipe;
pub mod repository;
pub mod seed;
pub mod store;

pub use catalog::{Ingredient, IngredientCatalog, IngredientCategory, SharedCatalog};
pub use config::MatchConfig;
pub use error::{CatalogError, ConfigError, StoreError};
pub use matcher::{MatchResult, Pantry, RecipeMatcher};
pub use normalizer::IngredientNormalizer;
pub use recipe::{Book, Recipe, SourceType};
pub use repository::{InMemoryRecipeRepository, RecipeRepository};
pub use store::{CatalogStore, JsonCatalogStore};
