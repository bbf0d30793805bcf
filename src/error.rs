use crate::domain::validation::Violations;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
    #[error("Validation error: {0}")]
    ValidationError(Violations),
    #[error("Persistence error: {0}")]
    PersistenceError(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

impl PixError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The validation violations, if this is a `ValidationError`.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Self::ValidationError(violations) => Some(violations),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PixError>;
