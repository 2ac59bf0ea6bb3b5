//! Values exchanged between the model and the traversal.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use utree_types::ResourcePath;

/// The children of a container as known to the model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChildSet {
    /// The existing children, sorted ascending by name.
    Known(Vec<ResourcePath>),
    /// The child set has not been computed yet.
    Unknown,
}

/// Physical backing of a linked resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relocation {
    /// The resource lives at this absolute location.
    Target(PathBuf),
    /// The link's location cannot be determined.
    Undefined,
}

impl Relocation {
    /// The target location, if defined.
    pub fn target(&self) -> Option<&PathBuf> {
        match self {
            Self::Target(path) => Some(path),
            Self::Undefined => None,
        }
    }
}
