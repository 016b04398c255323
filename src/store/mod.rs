pub mod csv_loader;
pub mod json_store;

pub use csv_loader::{load_catalog_csv, read_catalog_csv};
pub use json_store::JsonCatalogStore;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::catalog::{Ingredient, IngredientCatalog, IngredientCategory};
use crate::error::{CatalogError, StoreError};

/// Where a catalog is loaded from and saved to.
pub trait CatalogStore {
    fn load(&self) -> Result<IngredientCatalog, StoreError>;
    fn save(&self, catalog: &IngredientCatalog) -> Result<(), StoreError>;
}

/// Writes to a sibling `.tmp` file first, then renames it over `path`.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<(), StoreError> {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, content).map_err(|e| StoreError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

/// Decodes an alias list stored as JSON text (`["scallion","green onion"]`).
/// Anything that is not an array of strings yields `None`.
pub fn decode_aliases_text(text: &str) -> Option<Vec<String>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    serde_json::from_str::<Vec<String>>(trimmed).ok()
}

/// Decodes an `aliases` field that is either a native array or legacy JSON text.
fn decode_aliases_value(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::Null => Some(Vec::new()),
        Value::String(text) => decode_aliases_text(text),
        Value::Array(_) => serde_json::from_value::<Vec<String>>(value.clone()).ok(),
        _ => None,
    }
}

fn decode_category(value: Option<&Value>, name: &str) -> Option<IngredientCategory> {
    let raw = value?.as_str()?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(category) => Some(category),
        Err(e) => {
            warn!(ingredient = name, "{}; leaving category unset", e);
            None
        }
    }
}

fn decode_timestamp(value: Option<&Value>) -> Option<DateTime<Utc>> {
    value.and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// Rebuilds one catalog entry from loosely-typed persisted data.
///
/// Only a missing or blank `name` rejects the entry. A bad alias list becomes an
/// empty one, an unknown category becomes unset, and a bad id or timestamp is
/// regenerated.
pub(crate) fn decode_entry(value: &Value) -> Option<Ingredient> {
    let name = value.get("name").and_then(Value::as_str).map(str::trim)?;
    if name.is_empty() {
        return None;
    }

    let aliases = match value.get("aliases") {
        None => Vec::new(),
        Some(raw) => decode_aliases_value(raw).unwrap_or_else(|| {
            warn!(ingredient = name, "alias list could not be decoded; loading with no aliases");
            Vec::new()
        }),
    };

    let mut ingredient = Ingredient::new(name, decode_category(value.get("category"), name), &aliases);
    if let Some(id) = value
        .get("id")
        .and_then(Value::as_str)
        .and_then(|s| Uuid::parse_str(s).ok())
    {
        ingredient.id = id;
    }
    if let Some(created_at) = decode_timestamp(value.get("created_at")) {
        ingredient.created_at = created_at;
    }
    if let Some(updated_at) = decode_timestamp(value.get("updated_at")) {
        ingredient.updated_at = updated_at;
    }
    Some(ingredient)
}

/// Inserts decoded entries in order, skipping (and logging) ones the catalog refuses.
pub(crate) fn insert_lenient(catalog: &mut IngredientCatalog, ingredient: Ingredient, origin: &str) {
    let name = ingredient.name.clone();
    match catalog.insert(ingredient) {
        Ok(_) => {}
        Err(CatalogError::DuplicateName(_)) => {
            warn!(ingredient = %name, origin, "duplicate ingredient name; keeping the first entry");
        }
        Err(e) => {
            warn!(ingredient = %name, origin, "skipping ingredient: {}", e);
        }
    }
}
