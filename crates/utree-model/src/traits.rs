//! The [`ResourceModel`] trait consumed by the traversal engine.

use std::path::PathBuf;

use utree_types::{ResourceKind, ResourcePath};

use crate::error::ModelResult;
use crate::types::{ChildSet, Relocation};

/// Read access to a logical resource tree.
///
/// Implementations must be thread-safe (`Send + Sync`). The traversal only
/// reads through this trait, apart from [`mark_children_known`], which clears
/// a cached flag and therefore takes `&self`; implementations use interior
/// mutability for it.
///
/// [`mark_children_known`]: ResourceModel::mark_children_known
pub trait ResourceModel: Send + Sync {
    /// Returns `true` if the model considers the resource present.
    fn exists(&self, resource: &ResourcePath) -> bool;

    /// The kind of the resource, or `None` if it does not exist.
    fn kind(&self, resource: &ResourcePath) -> Option<ResourceKind>;

    /// The existing children of `parent`, sorted by name.
    ///
    /// Returns [`ChildSet::Unknown`] while the children-unknown flag is set.
    fn children_of(&self, parent: &ResourcePath) -> ModelResult<ChildSet>;

    /// Clear the children-unknown flag of `parent`.
    fn mark_children_known(&self, parent: &ResourcePath) -> ModelResult<()>;

    /// The relocation of a linked resource, or `None` for ordinary ones.
    fn relocation(&self, resource: &ResourcePath) -> Option<Relocation>;

    /// The physical location of the resource, if it can be determined.
    fn location(&self, resource: &ResourcePath) -> Option<PathBuf>;
}
