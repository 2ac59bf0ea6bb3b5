use std::path::PathBuf;

/// Errors from file store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Stores only address entries by absolute location.
    #[error("location is not absolute: {}", .0.display())]
    RelativeLocation(PathBuf),

    /// The location does not name an entry the store knows about.
    #[error("entry not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
