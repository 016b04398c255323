use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::duration::format_iso8601;

/// How a recipe entered the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Book,
    Url,
    #[default]
    Manual,
}

/// A cookbook that recipes can link to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(title: &str, author: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            author: author.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }
}

/// A recipe shaped after schema.org/Recipe.
///
/// `recipe_ingredient` holds display lines ("400g spaghetti"); `normalized_ingredients`
/// holds canonical names ("spaghetti") and is what matching reads. Nothing keeps
/// the two in sync; whoever authors the recipe fills both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub recipe_ingredient: Vec<String>,
    #[serde(default)]
    pub normalized_ingredients: Vec<String>,
    #[serde(default)]
    pub recipe_instructions: Vec<String>,
    #[serde(default)]
    pub recipe_category: Option<String>,
    #[serde(default)]
    pub recipe_cuisine: Option<String>,
    #[serde(default)]
    pub recipe_yield: Option<String>,
    #[serde(default)]
    pub prep_time: Option<String>,
    #[serde(default)]
    pub cook_time: Option<String>,
    #[serde(default)]
    pub total_time: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub source: SourceType,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(default)]
    pub source_page_number: Option<u32>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub book_id: Option<Uuid>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            recipe_ingredient: Vec::new(),
            normalized_ingredients: Vec::new(),
            recipe_instructions: Vec::new(),
            recipe_category: None,
            recipe_cuisine: None,
            recipe_yield: None,
            prep_time: None,
            cook_time: None,
            total_time: None,
            keywords: Vec::new(),
            author: None,
            source: SourceType::Manual,
            source_url: None,
            source_page_number: None,
            notes: None,
            is_favorite: false,
            book_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_normalized_ingredients<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.normalized_ingredients = names.iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    pub fn with_cuisine(mut self, cuisine: &str) -> Self {
        self.recipe_cuisine = Some(cuisine.to_string());
        self
    }

    pub fn with_keywords<S: AsRef<str>>(mut self, keywords: &[S]) -> Self {
        self.keywords = keywords.iter().map(|k| k.as_ref().to_string()).collect();
        self
    }

    /// Human-readable total time ("1 hr 30 min"), if one is set and parseable.
    pub fn formatted_total_time(&self) -> Option<String> {
        format_iso8601(self.total_time.as_deref())
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
