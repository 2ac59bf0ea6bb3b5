//! Recycling arena for traversal nodes.
//!
//! Large scans create and drop one node per tree position. The pool keeps
//! every node ever allocated in a `Vec` and hands out slot indices; a
//! released slot goes onto a free list and is overwritten in place by the
//! next acquire, so a traversal allocates at most as many nodes as are alive
//! at once.

use crate::node::{MergedNode, NodeId, NodeParts};

#[derive(Debug)]
struct Slot {
    node: MergedNode,
    active: bool,
}

/// Slot arena plus free list of reusable slot indices.
#[derive(Debug, Default)]
pub struct NodePool {
    slots: Vec<Slot>,
    free: Vec<NodeId>,
}

impl NodePool {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a free slot (or allocate one) and fill it.
    pub(crate) fn acquire(&mut self, parts: NodeParts) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                let slot = &mut self.slots[id.0];
                debug_assert!(!slot.active, "free list holds an active node");
                slot.node.reuse(parts);
                slot.active = true;
                id
            }
            None => {
                let id = NodeId(self.slots.len());
                self.slots.push(Slot {
                    node: MergedNode::new(parts),
                    active: true,
                });
                id
            }
        }
    }

    /// Return a node to the free list. Releasing a free slot is a no-op.
    pub(crate) fn release(&mut self, id: NodeId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            if slot.active {
                slot.active = false;
                slot.node.first_child = None;
                slot.node.expanded = false;
                self.free.push(id);
            }
        }
    }

    /// Mark every slot free, keeping the allocations for the next traversal.
    pub(crate) fn reset(&mut self) {
        self.free.clear();
        for (index, slot) in self.slots.iter_mut().enumerate().rev() {
            slot.active = false;
            slot.node.first_child = None;
            slot.node.expanded = false;
            self.free.push(NodeId(index));
        }
    }

    /// Borrow an active node.
    pub fn get(&self, id: NodeId) -> &MergedNode {
        let slot = &self.slots[id.0];
        debug_assert!(slot.active, "read of released node {id:?}");
        &slot.node
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut MergedNode {
        let slot = &mut self.slots[id.0];
        debug_assert!(slot.active, "write to released node {id:?}");
        &mut slot.node
    }

    /// Number of node objects ever allocated.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of nodes currently handed out.
    pub fn active(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
