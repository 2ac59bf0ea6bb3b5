//! Logical resource model for unified tree traversal.
//!
//! The logical model is the in-memory view of a workspace: projects, folders
//! and files with metadata, some of which may not exist on disk yet. The
//! traversal engine consumes it through the [`ResourceModel`] trait and
//! merges it with what a physical store reports.
//!
//! # Architecture
//!
//! - **Projects** sit directly below the workspace root and carry their own
//!   physical location.
//! - **Folders and files** inherit their location from their parent.
//! - **Linked resources** are relocated: their physical backing lives outside
//!   the parent's physical subtree, possibly nowhere resolvable at all.
//! - **Children-unknown** marks a container whose child set has never been
//!   computed. The traversal consults the physical store alone for it and
//!   clears the mark afterwards.
//!
//! # Modules
//!
//! - [`error`] — Error types for model operations
//! - [`types`] — [`ChildSet`] and [`Relocation`]
//! - [`traits`] — The [`ResourceModel`] trait consumed by the traversal
//! - [`names`] — Resource name validation
//! - [`memory`] — [`InMemoryWorkspace`], the reference model
//! - [`snapshot`] — Serialisable [`WorkspaceSnapshot`]

pub mod error;
pub mod memory;
pub mod names;
pub mod snapshot;
pub mod traits;
pub mod types;

pub use error::{ModelError, ModelResult};
pub use memory::InMemoryWorkspace;
pub use names::validate_resource_name;
pub use snapshot::{SnapshotEntry, WorkspaceSnapshot};
pub use traits::ResourceModel;
pub use types::{ChildSet, Relocation};
