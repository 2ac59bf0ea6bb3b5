use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid resource path {path:?}: {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("invalid depth: {0}")]
    InvalidDepth(String),
}
