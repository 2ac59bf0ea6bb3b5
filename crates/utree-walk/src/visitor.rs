//! Visitor plumbing.
//!
//! A visitor receives a [`NodeVisit`], a short-lived handle on the node
//! being visited. The handle dereferences to [`MergedNode`] and can also
//! compute the node's children on demand.

use std::collections::vec_deque;
use std::ops::Deref;

use crate::error::TreeResult;
use crate::node::{MergedNode, NodeId};
use crate::pool::NodePool;
use crate::queue::QueueEntry;
use crate::tree::UnifiedTree;

/// Callback invoked for every merged position.
pub trait UnifiedTreeVisitor {
    /// Visit one node. `Ok(true)` descends into its children, `Ok(false)`
    /// skips them, and an error stops the traversal.
    fn visit(&mut self, node: &mut NodeVisit<'_>) -> TreeResult<bool>;
}

/// Build a visitor from a closure.
///
/// ```
/// use utree_walk::{from_fn, UnifiedTreeVisitor};
///
/// let mut count = 0;
/// let mut visitor = from_fn(|_node| {
///     count += 1;
///     Ok(true)
/// });
/// # let _ = &mut visitor as &mut dyn UnifiedTreeVisitor;
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&mut NodeVisit<'_>) -> TreeResult<bool>,
{
    FromFn(f)
}

/// Visitor returned by [`from_fn`].
pub struct FromFn<F>(F);

impl<F> UnifiedTreeVisitor for FromFn<F>
where
    F: FnMut(&mut NodeVisit<'_>) -> TreeResult<bool>,
{
    fn visit(&mut self, node: &mut NodeVisit<'_>) -> TreeResult<bool> {
        (self.0)(node)
    }
}

/// The node currently being visited.
pub struct NodeVisit<'t> {
    tree: &'t mut UnifiedTree,
    id: NodeId,
}

impl<'t> NodeVisit<'t> {
    pub(crate) fn new(tree: &'t mut UnifiedTree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// Pool slot of the node. Only meaningful during this visit.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// BFS level of the node, 0 being the root.
    pub fn level(&self) -> u32 {
        self.tree.queue.level()
    }

    /// The node's children, expanding it now if needed.
    ///
    /// Children computed here are the ones the traversal would visit next;
    /// they are not recomputed after the visit. Yields nothing when the depth
    /// budget excludes the next level.
    pub fn children(&mut self) -> Children<'_> {
        self.tree.add_node_children_to_queue(self.id);
        let tree = &*self.tree;
        let entries = tree
            .pool
            .get(self.id)
            .first_child
            .and_then(|first| tree.queue.position(first))
            .map(|index| tree.queue.iter_from(index));
        Children {
            entries,
            pool: &tree.pool,
        }
    }
}

impl Deref for NodeVisit<'_> {
    type Target = MergedNode;

    fn deref(&self) -> &MergedNode {
        self.tree.pool.get(self.id)
    }
}

/// Iterator over the queued children of the node being visited.
pub struct Children<'a> {
    entries: Option<vec_deque::Iter<'a, QueueEntry>>,
    pool: &'a NodePool,
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a MergedNode;

    fn next(&mut self) -> Option<Self::Item> {
        match self.entries.as_mut()?.next() {
            Some(QueueEntry::Node(id)) => Some(self.pool.get(*id)),
            _ => {
                self.entries = None;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Children<'_> {}
