//! Traversal records for merged tree positions.

use std::fmt;

use utree_store::{EntryInfo, StoreEntry};
use utree_types::{ResourceKind, ResourcePath};

/// Index of a node slot in the [`NodePool`](crate::pool::NodePool).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Which side of the merge a node came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Present in the logical model and on disk under the same name.
    Merged,
    /// Present on disk only.
    PhysicalOnly,
    /// Present in the logical model only.
    LogicalOnly,
    /// A linked resource whose backing lives outside its parent's directory.
    Relocated,
}

/// A position in the merged tree, as handed to a visitor.
///
/// Nodes are pooled: the same slot is reused for another position once the
/// traversal has finished with this one, so a visitor must copy out anything
/// it wants to keep.
#[derive(Clone, Debug)]
pub struct MergedNode {
    pub(crate) path: ResourcePath,
    pub(crate) kind: ResourceKind,
    pub(crate) origin: Origin,
    pub(crate) logical: bool,
    pub(crate) exists_in_workspace: bool,
    pub(crate) entry: Option<StoreEntry>,
    pub(crate) info: EntryInfo,
    pub(crate) local_name: Option<String>,
    pub(crate) first_child: Option<NodeId>,
    pub(crate) expanded: bool,
}

/// Everything needed to fill a pooled node slot.
#[derive(Debug)]
pub(crate) struct NodeParts {
    pub path: ResourcePath,
    pub kind: ResourceKind,
    pub origin: Origin,
    pub logical: bool,
    pub exists_in_workspace: bool,
    pub entry: Option<StoreEntry>,
    pub info: EntryInfo,
    pub local_name: Option<String>,
}

impl MergedNode {
    pub(crate) fn new(parts: NodeParts) -> Self {
        Self {
            path: parts.path,
            kind: parts.kind,
            origin: parts.origin,
            logical: parts.logical,
            exists_in_workspace: parts.exists_in_workspace,
            entry: parts.entry,
            info: parts.info,
            local_name: parts.local_name,
            first_child: None,
            expanded: false,
        }
    }

    /// Overwrite a recycled slot in place.
    pub(crate) fn reuse(&mut self, parts: NodeParts) {
        self.path = parts.path;
        self.kind = parts.kind;
        self.origin = parts.origin;
        self.logical = parts.logical;
        self.exists_in_workspace = parts.exists_in_workspace;
        self.entry = parts.entry;
        self.info = parts.info;
        self.local_name = parts.local_name;
        self.first_child = None;
        self.expanded = false;
    }

    /// Position of this node in the logical namespace.
    ///
    /// Physical-only nodes get the path they would have if they were added
    /// to the model.
    pub fn path(&self) -> &ResourcePath {
        &self.path
    }

    /// The logical resource, absent for physical-only nodes.
    pub fn resource(&self) -> Option<&ResourcePath> {
        self.logical.then_some(&self.path)
    }

    /// The physical entry, absent for logical-only nodes.
    pub fn entry(&self) -> Option<&StoreEntry> {
        self.entry.as_ref()
    }

    /// The name the merge compared, if the node has a physical side.
    pub fn local_name(&self) -> Option<&str> {
        self.local_name.as_deref()
    }

    /// Resource kind: the model's for logical nodes, `Folder` or `File` for
    /// physical-only ones.
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    /// Which merge decision produced this node.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Returns `true` if the model considers the resource present.
    pub fn exists_in_workspace(&self) -> bool {
        self.exists_in_workspace
    }

    /// Returns `true` if the physical entry exists.
    pub fn exists_in_file_system(&self) -> bool {
        self.info.exists
    }

    /// Returns `true` if the physical entry is a directory.
    pub fn is_directory(&self) -> bool {
        self.info.directory
    }

    /// Returns `true` unless the physical entry is known to be a directory.
    pub fn is_file(&self) -> bool {
        !self.info.directory
    }

    /// The name of the resource.
    pub fn name(&self) -> &str {
        self.path.name()
    }
}
