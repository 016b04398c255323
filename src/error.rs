use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("an ingredient named '{0}' already exists in the catalog")]
    DuplicateName(String),
    #[error("no ingredient with id {0}")]
    NotFound(Uuid),
    #[error("ingredient name is empty after trimming")]
    EmptyName,
    #[error("catalog lock poisoned by a panicking writer")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed catalog file: {0}")]
    Malformed(String),
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("match threshold must be within 0.0..=1.0, got {0}")]
    InvalidThreshold(f64),
}
