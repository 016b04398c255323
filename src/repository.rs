use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreError;
use crate::recipe::{Book, Recipe};
use crate::store::write_atomic;

/// Source of the recipes a match runs against.
///
/// Implementations hand out an owned snapshot so a match never observes a
/// collection that is being edited underneath it.
pub trait RecipeRepository {
    fn snapshot(&self) -> Vec<Recipe>;
}

/// On-disk layout of a recipe library file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeLibrary {
    #[serde(default)]
    pub books: Vec<Book>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
}

/// Recipes and books held in memory, with the list/search queries the app screens use.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipeRepository {
    recipes: Vec<Recipe>,
    books: Vec<Book>,
}

impl InMemoryRecipeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_library(library: RecipeLibrary) -> Self {
        Self {
            recipes: library.recipes,
            books: library.books,
        }
    }

    pub fn to_library(&self) -> RecipeLibrary {
        RecipeLibrary {
            books: self.books.clone(),
            recipes: self.recipes.clone(),
        }
    }

    pub fn load_json(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        let library: RecipeLibrary = serde_json::from_str(&content)?;
        info!(
            path = %path.display(),
            recipes = library.recipes.len(),
            books = library.books.len(),
            "recipe library loaded"
        );
        Ok(Self::from_library(library))
    }

    pub fn save_json(&self, path: &Path) -> Result<(), StoreError> {
        let content = serde_json::to_string_pretty(&self.to_library())?;
        write_atomic(path, &content)?;
        debug!(path = %path.display(), recipes = self.recipes.len(), "recipe library saved");
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty() && self.books.is_empty()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn get(&self, id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    /// All recipes sorted by name, optionally narrowed to cuisines containing `cuisine`
    /// (case-insensitive).
    pub fn all_recipes(&self, cuisine: Option<&str>) -> Vec<&Recipe> {
        let needle = cuisine.map(str::to_lowercase);
        let mut recipes: Vec<&Recipe> = self
            .recipes
            .iter()
            .filter(|r| match &needle {
                Some(needle) => r
                    .recipe_cuisine
                    .as_ref()
                    .is_some_and(|c| c.to_lowercase().contains(needle.as_str())),
                None => true,
            })
            .collect();
        recipes.sort_by(|a, b| by_name(&a.name, &b.name));
        recipes
    }

    /// Recipes whose name, keywords or normalized ingredients contain `query`
    /// (case-insensitive), sorted by name. A blank query returns everything.
    pub fn search_recipes(&self, query: &str) -> Vec<&Recipe> {
        self.search(query, None)
    }

    /// `search_recipes` narrowed to a cuisine the way `all_recipes` does it.
    pub fn search(&self, query: &str, cuisine: Option<&str>) -> Vec<&Recipe> {
        let needle = query.trim().to_lowercase();
        let hit = |s: &String| s.to_lowercase().contains(&needle);
        self.all_recipes(cuisine)
            .into_iter()
            .filter(|r| {
                needle.is_empty()
                    || hit(&r.name)
                    || r.keywords.iter().any(hit)
                    || r.normalized_ingredients.iter().any(hit)
            })
            .collect()
    }

    pub fn favorites(&self) -> Vec<&Recipe> {
        self.all_recipes(None)
            .into_iter()
            .filter(|r| r.is_favorite)
            .collect()
    }

    /// Books sorted by title.
    pub fn all_books(&self) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.iter().collect();
        books.sort_by(|a, b| by_name(&a.title, &b.title));
        books
    }

    pub fn recipes_in_book(&self, book_id: Uuid) -> Vec<&Recipe> {
        self.all_recipes(None)
            .into_iter()
            .filter(|r| r.book_id == Some(book_id))
            .collect()
    }

    pub fn add_recipe(&mut self, recipe: Recipe) {
        debug!(name = %recipe.name, "recipe added");
        self.recipes.push(recipe);
    }

    pub fn delete_recipe(&mut self, id: Uuid) -> Option<Recipe> {
        let idx = self.recipes.iter().position(|r| r.id == id)?;
        Some(self.recipes.remove(idx))
    }

    pub fn add_book(&mut self, book: Book) {
        debug!(title = %book.title, "book added");
        self.books.push(book);
    }

    /// Removes a book; its recipes stay but lose the link.
    pub fn delete_book(&mut self, id: Uuid) -> Option<Book> {
        let idx = self.books.iter().position(|b| b.id == id)?;
        for recipe in self.recipes.iter_mut().filter(|r| r.book_id == Some(id)) {
            recipe.book_id = None;
            recipe.touch();
        }
        Some(self.books.remove(idx))
    }

    /// Flips the favorite flag, returning the new value.
    pub fn toggle_favorite(&mut self, id: Uuid) -> Option<bool> {
        let recipe = self.recipes.iter_mut().find(|r| r.id == id)?;
        recipe.is_favorite = !recipe.is_favorite;
        recipe.touch();
        Some(recipe.is_favorite)
    }
}

// Case-insensitive, with the exact text as tie-break so the order is total.
fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

impl RecipeRepository for InMemoryRecipeRepository {
    fn snapshot(&self) -> Vec<Recipe> {
        self.recipes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn repo() -> InMemoryRecipeRepository {
        let mut repo = InMemoryRecipeRepository::new();
        let wok = Book::new("The Wok", Some("J. Kenji López-Alt"));
        let wok_id = wok.id;
        repo.add_book(wok);
        repo.add_book(Book::new("Ottolenghi Simple", None));

        let mut fried_rice = Recipe::new("Egg Fried Rice")
            .with_cuisine("Asian")
            .with_keywords(&["wok", "quick"])
            .with_normalized_ingredients(&["rice", "egg"]);
        fried_rice.book_id = Some(wok_id);
        repo.add_recipe(fried_rice);
        repo.add_recipe(
            Recipe::new("Hummus from Scratch")
                .with_cuisine("Mediterranean")
                .with_keywords(&["dip"])
                .with_normalized_ingredients(&["chickpea", "tahini"]),
        );
        repo.add_recipe(
            Recipe::new("Chicken Stir-Fry")
                .with_cuisine("Asian")
                .with_keywords(&["wok"])
                .with_normalized_ingredients(&["chicken breast"]),
        );
        repo
    }

    fn names(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_all_recipes_sorted_and_filtered() {
        let repo = repo();
        assert_eq!(
            names(&repo.all_recipes(None)),
            vec!["Chicken Stir-Fry", "Egg Fried Rice", "Hummus from Scratch"]
        );
        assert_eq!(repo.all_recipes(Some("asian")).len(), 2);
        assert_eq!(names(&repo.all_recipes(Some("Medit"))), vec!["Hummus from Scratch"]);
        assert!(repo.all_recipes(Some("French")).is_empty());
    }

    #[test]
    fn test_search_by_name_keyword_and_ingredient() {
        let repo = repo();
        assert_eq!(names(&repo.search_recipes("HUMMUS")), vec!["Hummus from Scratch"]);
        assert_eq!(repo.search_recipes("wok").len(), 2);
        assert_eq!(names(&repo.search_recipes("tahini")), vec!["Hummus from Scratch"]);
        assert_eq!(repo.search_recipes("   ").len(), 3);
        assert!(repo.search_recipes("unicorn").is_empty());
    }

    #[test]
    fn test_books_and_links() {
        let mut repo = repo();
        let titles: Vec<&str> = repo.all_books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Ottolenghi Simple", "The Wok"]);

        let wok_id = repo.all_books()[1].id;
        assert_eq!(names(&repo.recipes_in_book(wok_id)), vec!["Egg Fried Rice"]);

        let removed = repo.delete_book(wok_id).unwrap();
        assert_eq!(removed.title, "The Wok");
        assert!(repo.recipes_in_book(wok_id).is_empty());
        assert_eq!(repo.len(), 3);
    }

    #[test]
    fn test_add_delete_and_favorite() {
        let mut repo = repo();
        let id = repo.search_recipes("hummus")[0].id;
        assert_eq!(repo.toggle_favorite(id), Some(true));
        assert_eq!(names(&repo.favorites()), vec!["Hummus from Scratch"]);
        assert_eq!(repo.toggle_favorite(id), Some(false));

        let deleted = repo.delete_recipe(id).unwrap();
        assert_eq!(deleted.name, "Hummus from Scratch");
        assert!(repo.delete_recipe(id).is_none());
        assert_eq!(repo.len(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut repo = repo();
        let snapshot = repo.snapshot();
        repo.add_recipe(Recipe::new("Late Addition"));
        assert_eq!(snapshot.len(), 3);
        assert_eq!(repo.len(), 4);
    }

    #[test]
    fn test_json_round_trip_keeps_library() -> anyhow::Result<()> {
        let repo = repo();
        let file = NamedTempFile::new()?;
        repo.save_json(file.path())?;
        let loaded = InMemoryRecipeRepository::load_json(file.path())?;
        assert_eq!(loaded.snapshot(), repo.snapshot());
        assert_eq!(loaded.all_books().len(), 2);
        Ok(())
    }

    #[test]
    fn test_listing_order_ignores_case() {
        let mut repo = repo();
        repo.add_recipe(Recipe::new("apple tart"));
        repo.add_recipe(Recipe::new("Zucchini Soup"));
        repo.add_book(Book::new("an everyday cookbook", None));

        let all = names(&repo.all_recipes(None));
        assert_eq!(all.first().map(String::as_str), Some("apple tart"));
        assert_eq!(all.last().map(String::as_str), Some("Zucchini Soup"));

        let titles: Vec<&str> = repo.all_books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["an everyday cookbook", "Ottolenghi Simple", "The Wok"]);
    }

    #[test]
    fn test_search_with_cuisine() {
        let repo = repo();
        assert_eq!(
            names(&repo.search("wok", Some("ASIAN"))),
            vec!["Chicken Stir-Fry", "Egg Fried Rice"]
        );
        assert_eq!(names(&repo.search("", Some("medit"))), vec!["Hummus from Scratch"]);
        assert!(repo.search("tahini", Some("asian")).is_empty());
        assert_eq!(repo.search("", None).len(), 3);
    }

    #[test]
    fn test_save_json_replaces_file_atomically() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("library.json");
        std::fs::write(&path, "stale")?;

        repo().save_json(&path)?;

        assert!(!dir.path().join("library.json.tmp").exists());
        let loaded = InMemoryRecipeRepository::load_json(&path)?;
        assert_eq!(loaded.len(), 3);
        Ok(())
    }
}
