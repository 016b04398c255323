use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{Ingredient, IngredientCatalog, IngredientCategory};
use crate::error::CatalogError;
use crate::normalizer::IngredientNormalizer;
use uuid::Uuid;

/// Thread-safe handle over a catalog: any number of concurrent readers,
/// writers serialized against everyone.
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<IngredientCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: IngredientCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IngredientCatalog>, CatalogError> {
        self.inner.read().map_err(|_| CatalogError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IngredientCatalog>, CatalogError> {
        self.inner.write().map_err(|_| CatalogError::Poisoned)
    }

    /// Runs `f` under the read lock.
    pub fn with_read<T>(&self, f: impl FnOnce(&IngredientCatalog) -> T) -> Result<T, CatalogError> {
        let guard = self.read()?;
        Ok(f(&guard))
    }

    pub fn lookup(&self, token: &str) -> Result<Option<Ingredient>, CatalogError> {
        self.with_read(|catalog| catalog.lookup(token).cloned())
    }

    pub fn normalize(&self, raw: &str) -> Result<String, CatalogError> {
        self.with_read(|catalog| IngredientNormalizer::normalize(raw, catalog))
    }

    pub fn normalize_all<S: AsRef<str>>(&self, raws: &[S]) -> Result<Vec<String>, CatalogError> {
        self.with_read(|catalog| IngredientNormalizer::normalize_all(raws, catalog))
    }

    pub fn len(&self) -> Result<usize, CatalogError> {
        self.with_read(IngredientCatalog::len)
    }

    pub fn is_empty(&self) -> Result<bool, CatalogError> {
        self.with_read(IngredientCatalog::is_empty)
    }

    /// Point-in-time copy, e.g. for handing to a `CatalogStore`.
    pub fn snapshot(&self) -> Result<IngredientCatalog, CatalogError> {
        self.with_read(IngredientCatalog::clone)
    }

    pub fn add(
        &self,
        name: &str,
        category: Option<IngredientCategory>,
        aliases: &[String],
    ) -> Result<Ingredient, CatalogError> {
        let mut guard = self.write()?;
        let added = guard.add(name, category, aliases)?.clone();
        Ok(added)
    }

    pub fn remove(&self, id: Uuid) -> Result<Ingredient, CatalogError> {
        let mut guard = self.write()?;
        guard.remove(id)
    }

    pub fn add_alias(&self, id: Uuid, alias: &str) -> Result<Ingredient, CatalogError> {
        let mut guard = self.write()?;
        let updated = guard.add_alias(id, alias)?.clone();
        Ok(updated)
    }

    /// Swaps in a whole catalog, e.g. after seeding or reloading from a store.
    pub fn replace(&self, catalog: IngredientCatalog) -> Result<(), CatalogError> {
        *self.write()? = catalog;
        Ok(())
    }
}
