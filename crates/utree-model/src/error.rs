//! Error types for model operations.

use thiserror::Error;
use utree_types::{ResourceKind, ResourcePath, TypeError};

/// Errors that can occur during model operations.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The resource is not part of the model.
    #[error("resource not found: {0}")]
    NotFound(ResourcePath),

    /// A resource already exists at this path.
    #[error("resource already exists: {0}")]
    AlreadyExists(ResourcePath),

    /// The parent of a new resource cannot hold children.
    #[error("{path} is a {kind} and cannot have children")]
    NotAContainer { path: ResourcePath, kind: ResourceKind },

    /// The resource name is invalid.
    #[error("invalid resource name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },

    /// A resource of this kind cannot be placed here.
    #[error("cannot place a {kind} at {path}")]
    InvalidPlacement { path: ResourcePath, kind: ResourceKind },

    /// A path or depth failed to parse.
    #[error(transparent)]
    Type(#[from] TypeError),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Convenience type alias for model operations.
pub type ModelResult<T> = Result<T, ModelError>;
