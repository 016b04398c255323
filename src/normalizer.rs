use crate::catalog::{canonicalize, IngredientCatalog};

/// Maps free-text ingredient mentions onto canonical catalog names.
///
/// Unknown ingredients pass through (lowercased and trimmed) instead of failing,
/// so authoring a recipe never depends on the catalog being complete.
#[derive(Debug, Clone, Copy, Default)]
pub struct IngredientNormalizer;

impl IngredientNormalizer {
    /// Canonical name for `raw`: the catalog entry's name on a hit, otherwise
    /// the cleaned token itself. Blank input gives an empty string.
    pub fn normalize(raw: &str, catalog: &IngredientCatalog) -> String {
        let token = canonicalize(raw);
        if token.is_empty() {
            return token;
        }
        match catalog.lookup(&token) {
            Some(ingredient) => ingredient.name.clone(),
            None => token,
        }
    }

    /// Normalizes a list of mentions for storage in `normalized_ingredients`:
    /// blanks are dropped and repeats collapse onto their first occurrence.
    pub fn normalize_all<S: AsRef<str>>(raws: &[S], catalog: &IngredientCatalog) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(raws.len());
        for raw in raws {
            let name = Self::normalize(raw.as_ref(), catalog);
            if !name.is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}
