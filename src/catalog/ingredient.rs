use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Category classification for an ingredient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IngredientCategory {
    Protein,
    Vegetable,
    Fruit,
    Dairy,
    Grain,
    PantryStaple,
    Herb,
    Spice,
    Condiment,
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 10] = [
        IngredientCategory::Protein,
        IngredientCategory::Vegetable,
        IngredientCategory::Fruit,
        IngredientCategory::Dairy,
        IngredientCategory::Grain,
        IngredientCategory::PantryStaple,
        IngredientCategory::Herb,
        IngredientCategory::Spice,
        IngredientCategory::Condiment,
        IngredientCategory::Other,
    ];

    /// Storage representation, identical to the serde form.
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Protein => "protein",
            IngredientCategory::Vegetable => "vegetable",
            IngredientCategory::Fruit => "fruit",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Grain => "grain",
            IngredientCategory::PantryStaple => "pantryStaple",
            IngredientCategory::Herb => "herb",
            IngredientCategory::Spice => "spice",
            IngredientCategory::Condiment => "condiment",
            IngredientCategory::Other => "other",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngredientCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        IngredientCategory::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| format!("unknown ingredient category '{}'", trimmed))
    }
}

/// Lowercases and trims a name or alias into its canonical comparison form.
pub fn canonicalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A known ingredient with an optional category and the aliases used during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub category: Option<IngredientCategory>,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    /// Builds a fresh entry. Name and aliases are canonicalized; empty aliases are dropped.
    pub fn new(name: &str, category: Option<IngredientCategory>, aliases: &[String]) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: canonicalize(name),
            category,
            aliases: clean_aliases(aliases),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when `token` (already canonical) is one of this entry's aliases.
    pub fn has_alias(&self, token: &str) -> bool {
        self.aliases.iter().any(|a| a == token)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

pub(crate) fn clean_aliases(aliases: &[String]) -> Vec<String> {
    let mut cleaned: Vec<String> = Vec::with_capacity(aliases.len());
    for alias in aliases {
        let alias = canonicalize(alias);
        if !alias.is_empty() && !cleaned.contains(&alias) {
            cleaned.push(alias);
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_name_to_lowercase() {
        let ingredient = Ingredient::new(
            "  Bell Pepper  ",
            Some(IngredientCategory::Vegetable),
            &["Capsicum".to_string()],
        );
        assert_eq!(ingredient.name, "bell pepper");
        assert_eq!(ingredient.category, Some(IngredientCategory::Vegetable));
        assert_eq!(ingredient.aliases, vec!["capsicum".to_string()]);
        assert_eq!(ingredient.created_at, ingredient.updated_at);
    }

    #[test]
    fn test_aliases_drop_blanks_and_repeats() {
        let aliases = vec![
            " Scallion".to_string(),
            "".to_string(),
            "scallion ".to_string(),
            "green onion".to_string(),
        ];
        let ingredient = Ingredient::new("spring onion", None, &aliases);
        assert_eq!(ingredient.aliases, vec!["scallion", "green onion"]);
    }

    #[test]
    fn test_category_storage_form() -> anyhow::Result<()> {
        assert_eq!(IngredientCategory::PantryStaple.as_str(), "pantryStaple");
        assert_eq!(
            serde_json::to_string(&IngredientCategory::PantryStaple)?,
            "\"pantryStaple\""
        );
        assert_eq!("herb".parse::<IngredientCategory>(), Ok(IngredientCategory::Herb));
        assert_eq!(
            "PANTRYSTAPLE".parse::<IngredientCategory>(),
            Ok(IngredientCategory::PantryStaple)
        );
        assert!("mineral".parse::<IngredientCategory>().is_err());
        Ok(())
    }
}
