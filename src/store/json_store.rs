use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{info, warn};

use super::{decode_entry, insert_lenient, write_atomic, CatalogStore};
use crate::catalog::IngredientCatalog;
use crate::error::StoreError;

/// Catalog persisted as a pretty-printed JSON array of ingredient entries.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    path: PathBuf,
}

impl JsonCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parses catalog JSON text. One unreadable entry never blocks the rest.
    pub fn parse(content: &str) -> Result<IngredientCatalog, StoreError> {
        let root: Value = serde_json::from_str(content)?;
        let entries = match root {
            Value::Array(entries) => entries,
            other => {
                return Err(StoreError::Malformed(format!(
                    "expected an array of ingredients, found {}",
                    json_kind(&other)
                )))
            }
        };

        let mut catalog = IngredientCatalog::new();
        for (index, entry) in entries.iter().enumerate() {
            match decode_entry(entry) {
                Some(ingredient) => insert_lenient(&mut catalog, ingredient, "json"),
                None => warn!(index, "skipping catalog entry without a usable name"),
            }
        }
        Ok(catalog)
    }
}

impl CatalogStore for JsonCatalogStore {
    /// A missing file is an empty catalog, not an error.
    fn load(&self) -> Result<IngredientCatalog, StoreError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no catalog file yet; starting empty");
            return Ok(IngredientCatalog::new());
        }
        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        let catalog = Self::parse(&content)?;
        info!(path = %self.path.display(), ingredients = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    fn save(&self, catalog: &IngredientCatalog) -> Result<(), StoreError> {
        let entries: Vec<_> = catalog.iter().collect();
        let content = serde_json::to_string_pretty(&entries)?;
        write_atomic(&self.path, &content)?;
        info!(path = %self.path.display(), ingredients = catalog.len(), "catalog saved");
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
