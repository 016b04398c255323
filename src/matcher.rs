use std::cmp::Ordering;
use std::collections::HashSet;

use rayon::prelude::*;
use tracing::debug;

use crate::catalog::{canonicalize, IngredientCatalog};
use crate::config::MatchConfig;
use crate::normalizer::IngredientNormalizer;
use crate::recipe::Recipe;

/// The ingredient names a user has on hand, held in canonical (lowercase, trimmed) form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pantry {
    items: HashSet<String>,
}

impl Pantry {
    /// Builds a pantry from names that are already canonical ingredient names.
    /// Only case and surrounding whitespace are cleaned up.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items = names
            .into_iter()
            .map(|n| canonicalize(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();
        Self { items }
    }

    /// Builds a pantry from raw user input, resolving aliases through the catalog.
    pub fn from_raw<I, S>(raws: I, catalog: &IngredientCatalog) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_names(
            raws.into_iter()
                .map(|raw| IngredientNormalizer::normalize(raw.as_ref(), catalog)),
        )
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains(&canonicalize(name))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Pantry contents in name order.
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.items.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// How well a pantry covers one recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult<'a> {
    pub recipe: &'a Recipe,
    /// Fraction of the recipe's distinct normalized ingredients present in the pantry.
    pub coverage: f64,
    /// Normalized ingredients absent from the pantry, in recipe order.
    pub missing: Vec<String>,
}

/// Ranks recipes by how much of each one a pantry already covers.
///
/// The matcher never consults the catalog: pantry and recipe entries are compared
/// as canonical names, so callers run raw input through `IngredientNormalizer` first.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeMatcher {
    config: MatchConfig,
}

impl RecipeMatcher {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    /// Matches using the configured minimum threshold.
    pub fn match_recipes<'a>(&self, pantry: &Pantry, recipes: &'a [Recipe]) -> Vec<MatchResult<'a>> {
        Self::match_with_threshold(pantry, recipes, self.config.minimum_match_threshold())
    }

    /// Scores every recipe, keeps those with `coverage >= threshold`, and orders them
    /// by coverage (highest first) then by recipe name, case-insensitively.
    ///
    /// A recipe without normalized ingredients scores 0.0 and is always left out,
    /// whatever the threshold.
    pub fn match_with_threshold<'a>(
        pantry: &Pantry,
        recipes: &'a [Recipe],
        threshold: f64,
    ) -> Vec<MatchResult<'a>> {
        let mut results: Vec<MatchResult<'a>> = recipes
            .par_iter()
            .filter_map(|recipe| score(pantry, recipe))
            .filter(|result| result.coverage >= threshold)
            .collect();

        results.sort_by(compare_results);

        debug!(
            candidates = recipes.len(),
            matched = results.len(),
            pantry = pantry.len(),
            threshold,
            "recipe match complete"
        );
        results
    }

    /// Coverage ratio of `recipe` against `pantry`, in `[0.0, 1.0]`.
    pub fn coverage(pantry: &Pantry, recipe: &Recipe) -> f64 {
        score(pantry, recipe).map_or(0.0, |result| result.coverage)
    }
}

/// Returns `None` for recipes with no usable normalized ingredients.
fn score<'a>(pantry: &Pantry, recipe: &'a Recipe) -> Option<MatchResult<'a>> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut total = 0usize;
    let mut missing = Vec::new();

    for name in &recipe.normalized_ingredients {
        let key = canonicalize(name);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        total += 1;
        if !pantry.items.contains(&key) {
            missing.push(name.clone());
        }
    }

    if total == 0 {
        return None;
    }

    let present = total - missing.len();
    Some(MatchResult {
        recipe,
        coverage: present as f64 / total as f64,
        missing,
    })
}

fn compare_results(a: &MatchResult<'_>, b: &MatchResult<'_>) -> Ordering {
    b.coverage
        .total_cmp(&a.coverage)
        .then_with(|| a.recipe.name.to_lowercase().cmp(&b.recipe.name.to_lowercase()))
        .then_with(|| a.recipe.name.cmp(&b.recipe.name))
        .then_with(|| a.recipe.id.cmp(&b.recipe.id))
}
