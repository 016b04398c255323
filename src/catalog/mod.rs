pub mod ingredient;
pub mod shared;

pub use ingredient::{canonicalize, Ingredient, IngredientCategory};
pub use shared::SharedCatalog;

use crate::error::CatalogError;
use ingredient::clean_aliases;
use tracing::debug;
use uuid::Uuid;

/// The canonical set of known ingredients, kept in insertion order.
///
/// Iteration order matters: when an alias is claimed by several entries,
/// `lookup` resolves it to the earliest one.
#[derive(Debug, Clone, Default)]
pub struct IngredientCatalog {
    entries: Vec<Ingredient>,
}

impl IngredientCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.entries.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Ingredient> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Resolves a name or alias to its catalog entry.
    ///
    /// The token is lowercased and trimmed first. An exact `name` match wins over
    /// any alias match; aliases are scanned in catalog order. No partial matching.
    pub fn lookup(&self, token: &str) -> Option<&Ingredient> {
        let token = canonicalize(token);
        if token.is_empty() {
            return None;
        }
        self.entries
            .iter()
            .find(|e| e.name == token)
            .or_else(|| self.entries.iter().find(|e| e.has_alias(&token)))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        let name = canonicalize(name);
        self.entries.iter().any(|e| e.name == name)
    }

    /// Creates a new entry. Fails without touching the catalog if the
    /// canonical name is empty or already taken.
    pub fn add(
        &mut self,
        name: &str,
        category: Option<IngredientCategory>,
        aliases: &[String],
    ) -> Result<&Ingredient, CatalogError> {
        let ingredient = Ingredient::new(name, category, aliases);
        self.insert(ingredient)
    }

    /// Adds an already-built entry, keeping its id and timestamps. Used by stores
    /// when rehydrating a persisted catalog.
    pub fn insert(&mut self, mut ingredient: Ingredient) -> Result<&Ingredient, CatalogError> {
        ingredient.name = canonicalize(&ingredient.name);
        ingredient.aliases = clean_aliases(&ingredient.aliases);
        if ingredient.name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.contains_name(&ingredient.name) {
            return Err(CatalogError::DuplicateName(ingredient.name));
        }
        debug!(name = %ingredient.name, aliases = ingredient.aliases.len(), "catalog entry added");
        self.entries.push(ingredient);
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Deletes an entry. Recipes keep whatever names they stored.
    pub fn remove(&mut self, id: Uuid) -> Result<Ingredient, CatalogError> {
        let idx = self.position(id)?;
        let removed = self.entries.remove(idx);
        debug!(name = %removed.name, "catalog entry removed");
        Ok(removed)
    }

    pub fn rename(&mut self, id: Uuid, new_name: &str) -> Result<&Ingredient, CatalogError> {
        let idx = self.position(id)?;
        let new_name = canonicalize(new_name);
        if new_name.is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self
            .entries
            .iter()
            .any(|e| e.id != id && e.name == new_name)
        {
            return Err(CatalogError::DuplicateName(new_name));
        }
        let entry = &mut self.entries[idx];
        debug!(from = %entry.name, to = %new_name, "catalog entry renamed");
        entry.name = new_name;
        entry.touch();
        Ok(&*entry)
    }

    pub fn set_category(
        &mut self,
        id: Uuid,
        category: Option<IngredientCategory>,
    ) -> Result<&Ingredient, CatalogError> {
        let idx = self.position(id)?;
        let entry = &mut self.entries[idx];
        entry.category = category;
        entry.touch();
        Ok(&*entry)
    }

    /// Appends an alias. Blank or already-present aliases leave the entry unchanged.
    pub fn add_alias(&mut self, id: Uuid, alias: &str) -> Result<&Ingredient, CatalogError> {
        let idx = self.position(id)?;
        let alias = canonicalize(alias);
        let entry = &mut self.entries[idx];
        if !alias.is_empty() && !entry.has_alias(&alias) {
            debug!(name = %entry.name, alias = %alias, "alias added");
            entry.aliases.push(alias);
            entry.touch();
        }
        Ok(&*entry)
    }

    pub fn set_aliases(&mut self, id: Uuid, aliases: &[String]) -> Result<&Ingredient, CatalogError> {
        let idx = self.position(id)?;
        let entry = &mut self.entries[idx];
        entry.aliases = clean_aliases(aliases);
        entry.touch();
        Ok(&*entry)
    }

    /// All entries ordered by name.
    pub fn sorted_by_name(&self) -> Vec<&Ingredient> {
        let mut all: Vec<&Ingredient> = self.entries.iter().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    pub fn by_category(&self, category: IngredientCategory) -> Vec<&Ingredient> {
        self.entries
            .iter()
            .filter(|e| e.category == Some(category))
            .collect()
    }

    fn position(&self, id: Uuid) -> Result<usize, CatalogError> {
        self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(CatalogError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aliases(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample_catalog() -> IngredientCatalog {
        let mut catalog = IngredientCatalog::new();
        catalog
            .add(
                "spring onion",
                Some(IngredientCategory::Vegetable),
                &aliases(&["scallion", "green onion"]),
            )
            .unwrap();
        catalog
            .add("garlic", Some(IngredientCategory::Vegetable), &[])
            .unwrap();
        catalog
            .add("black pepper", Some(IngredientCategory::Spice), &aliases(&["pepper"]))
            .unwrap();
        catalog
            .add("bell pepper", Some(IngredientCategory::Vegetable), &aliases(&["capsicum", "red pepper"]))
            .unwrap();
        catalog
    }

    #[test]
    fn test_lookup_by_alias_is_case_insensitive() {
        let catalog = sample_catalog();
        let found = catalog.lookup("Scallion").unwrap();
        assert_eq!(found.name, "spring onion");
    }

    #[test]
    fn test_lookup_ignores_surrounding_whitespace() {
        let catalog = sample_catalog();
        let padded = catalog.lookup(" Garlic ").map(|e| e.id);
        let plain = catalog.lookup("garlic").map(|e| e.id);
        assert!(plain.is_some());
        assert_eq!(padded, plain);
    }

    #[test]
    fn test_every_name_and_alias_resolves_to_its_entry() {
        let catalog = sample_catalog();
        for entry in catalog.iter() {
            assert_eq!(catalog.lookup(&entry.name).map(|e| e.id), Some(entry.id));
            for alias in &entry.aliases {
                assert_eq!(catalog.lookup(alias).map(|e| e.id), Some(entry.id));
            }
        }
    }

    #[test]
    fn test_lookup_has_no_partial_matching() {
        let catalog = sample_catalog();
        assert!(catalog.lookup("onion").is_none());
        assert!(catalog.lookup("garlic clove").is_none());
        assert!(catalog.lookup("").is_none());
        assert!(catalog.lookup("   ").is_none());
    }

    #[test]
    fn test_name_match_beats_alias_of_earlier_entry() {
        let mut catalog = IngredientCatalog::new();
        catalog.add("spaghetti", None, &aliases(&["pasta"])).unwrap();
        catalog.add("pasta", None, &[]).unwrap();
        assert_eq!(catalog.lookup("pasta").unwrap().name, "pasta");
    }

    #[test]
    fn test_shared_alias_resolves_to_first_entry() {
        let mut catalog = IngredientCatalog::new();
        catalog.add("coriander leaf", None, &aliases(&["coriander"])).unwrap();
        catalog.add("coriander seed", None, &aliases(&["coriander"])).unwrap();
        assert_eq!(catalog.lookup("coriander").unwrap().name, "coriander leaf");
    }

    #[test]
    fn test_add_duplicate_name_fails_without_mutation() {
        let mut catalog = sample_catalog();
        let before = catalog.len();
        let result = catalog.add("  GARLIC", Some(IngredientCategory::Spice), &aliases(&["ajo"]));
        assert!(matches!(result, Err(CatalogError::DuplicateName(ref n)) if n == "garlic"));
        assert_eq!(catalog.len(), before);
        assert!(catalog.lookup("ajo").is_none());
    }

    #[test]
    fn test_add_blank_name_fails() {
        let mut catalog = IngredientCatalog::new();
        assert!(matches!(catalog.add("   ", None, &[]), Err(CatalogError::EmptyName)));
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_remove_unknown_id_is_not_found() {
        let mut catalog = sample_catalog();
        let id = Uuid::new_v4();
        assert!(matches!(catalog.remove(id), Err(CatalogError::NotFound(missing)) if missing == id));
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn test_remove_drops_entry_from_lookup() {
        let mut catalog = sample_catalog();
        let id = catalog.lookup("scallion").unwrap().id;
        let removed = catalog.remove(id).unwrap();
        assert_eq!(removed.name, "spring onion");
        assert!(catalog.lookup("scallion").is_none());
        assert!(catalog.lookup("spring onion").is_none());
        assert!(catalog.get(id).is_none());
    }

    #[test]
    fn test_rename_rejects_collision() {
        let mut catalog = sample_catalog();
        let id = catalog.lookup("garlic").unwrap().id;
        assert!(matches!(
            catalog.rename(id, "Black Pepper"),
            Err(CatalogError::DuplicateName(_))
        ));
        let renamed = catalog.rename(id, " Garlic Clove ").unwrap();
        assert_eq!(renamed.name, "garlic clove");
        assert!(renamed.updated_at >= renamed.created_at);
        assert!(catalog.lookup("garlic").is_none());
    }

    #[test]
    fn test_add_alias_grows_lookup() {
        let mut catalog = sample_catalog();
        let id = catalog.lookup("garlic").unwrap().id;
        catalog.add_alias(id, "Garlic Cloves").unwrap();
        catalog.add_alias(id, "garlic cloves").unwrap();
        assert_eq!(catalog.get(id).unwrap().aliases, vec!["garlic cloves"]);
        assert_eq!(catalog.lookup("GARLIC CLOVES").unwrap().id, id);
    }

    #[test]
    fn test_set_category_and_grouping() {
        let mut catalog = sample_catalog();
        let id = catalog.lookup("garlic").unwrap().id;
        catalog.set_category(id, Some(IngredientCategory::Herb)).unwrap();
        let herbs: Vec<&str> = catalog
            .by_category(IngredientCategory::Herb)
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(herbs, vec!["garlic"]);
        assert_eq!(catalog.by_category(IngredientCategory::Vegetable).len(), 2);
    }

    #[test]
    fn test_sorted_by_name() {
        let catalog = sample_catalog();
        let names: Vec<&str> = catalog.sorted_by_name().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bell pepper", "black pepper", "garlic", "spring onion"]);
    }
}
