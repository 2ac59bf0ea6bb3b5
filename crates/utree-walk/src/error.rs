//! Error types for the traversal engine.

use utree_model::ModelError;
use utree_store::StoreError;

/// Errors that abort a traversal.
///
/// Failures the engine can work around (an unreadable directory, a failed
/// child query, an unresolvable link) never surface here; they are counted
/// in [`TraversalStats`](crate::TraversalStats) instead.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// `accept` was called before a root was set.
    #[error("unified tree has no root")]
    NoRoot,

    /// The physical store rejected the root's location.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The logical model failed outside of child expansion.
    #[error("model error: {0}")]
    Model(#[from] ModelError),

    /// The visitor asked for the traversal to stop with an error.
    #[error("visitor failed: {0}")]
    Visitor(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl TreeError {
    /// Wrap an arbitrary visitor error.
    pub fn visitor(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Visitor(err.into())
    }
}

/// Convenience alias for traversal results.
pub type TreeResult<T> = Result<T, TreeError>;
