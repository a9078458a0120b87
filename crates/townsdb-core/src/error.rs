// crates/townsdb-core/src/error.rs
use thiserror::Error;

/// Errors surfaced by the dataset loader and the scoped town resolver.
///
/// Everything except [`TownsDbError::InvalidScope`] is a dataset load failure;
/// see [`TownsDbError::is_load_error`]. A query that simply does not match is
/// not an error and never produces one of these.
#[derive(Debug, Error)]
pub enum TownsDbError {
    /// A required table or directory is absent.
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("binary cache error: {0}")]
    Bincode(#[from] bincode::Error),

    /// A table was read but violates the dataset schema.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A scoped town query named a country that cannot be used as a scope.
    #[error("invalid country scope: {0}")]
    InvalidScope(String),
}

impl TownsDbError {
    /// `true` for every variant raised while loading or validating a dataset.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, TownsDbError::InvalidScope(_))
    }
}

pub type Result<T> = std::result::Result<T, TownsDbError>;
