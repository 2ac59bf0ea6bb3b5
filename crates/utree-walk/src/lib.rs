//! Breadth-first traversal over a logical resource tree merged with the
//! physical file tree below it.
//!
//! A [`UnifiedTree`] takes a [`ResourceModel`](utree_model::ResourceModel)
//! and a [`FileStore`](utree_store::FileStore) and walks both at once. At
//! every container the sorted logical children and the sorted physical
//! listing are merged by name, so each position is visited exactly once and
//! tagged with the side(s) it came from.
//!
//! # Traversal
//!
//! - Levels are visited in order; siblings in byte order of their names.
//! - A [`Depth`](utree_types::Depth) budget bounds how many levels are
//!   visited. Nodes on the last admitted level are never expanded.
//! - The visitor decides per node whether to descend. It may also inspect the
//!   node's children before deciding, through [`NodeVisit::children`].
//! - Nodes live in a [`NodePool`] and are recycled as soon as they have been
//!   visited, so memory follows the queue's width rather than the tree size.
//!
//! # Modules
//!
//! - [`tree`] — [`UnifiedTree`], the driver
//! - [`visitor`] — [`UnifiedTreeVisitor`] and the per-node handle
//! - [`node`] — [`MergedNode`] and its [`Origin`]
//! - [`queue`] — The level-marked BFS queue
//! - [`pool`] — Node recycling
//! - [`sort`] — Physical name ordering
//! - [`stats`] — Per-traversal counters
//! - [`error`] — [`TreeError`]

pub mod error;
mod merge;
pub mod node;
pub mod pool;
pub mod queue;
pub mod sort;
pub mod stats;
pub mod tree;
pub mod visitor;

pub use error::{TreeError, TreeResult};
pub use node::{MergedNode, NodeId, Origin};
pub use pool::NodePool;
pub use queue::{QueueEntry, TraversalQueue};
pub use sort::sort_names;
pub use stats::{AbsorbedFailures, TraversalStats};
pub use tree::UnifiedTree;
pub use visitor::{from_fn, Children, FromFn, NodeVisit, UnifiedTreeVisitor};
