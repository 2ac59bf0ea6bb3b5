//! Breadth-first work queue with level and children boundaries.
//!
//! The queue holds real nodes interleaved with two kinds of markers:
//!
//! - a [`QueueEntry::LevelMarker`] between consecutive BFS levels, and
//! - a [`QueueEntry::ChildrenMarker`] after each expanded node's children,
//!   so one node's children can be found (and dropped again) without
//!   rescanning the whole queue.
//!
//! # Invariants
//!
//! - Exactly one level marker separates each pair of consecutive levels.
//! - An expanded node's children are contiguous and followed by exactly one
//!   children marker.
//! - Children are always appended at the tail, so the most recently expanded
//!   node's children can be removed by popping from the back.

use std::collections::VecDeque;

use utree_types::Depth;

use crate::node::NodeId;

/// One element of the traversal queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueueEntry {
    Node(NodeId),
    LevelMarker,
    ChildrenMarker,
}

/// The traversal queue and the level bookkeeping that goes with it.
#[derive(Debug, Default)]
pub struct TraversalQueue {
    entries: VecDeque<QueueEntry>,
    level: u32,
    child_level_valid: bool,
    queued_nodes: usize,
    queued_level_markers: usize,
    peak_len: usize,
}

impl TraversalQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset to `root` (if any) followed by a level marker.
    pub fn initialize(&mut self, root: Option<NodeId>) {
        self.entries.clear();
        self.queued_nodes = 0;
        self.queued_level_markers = 0;
        self.peak_len = 0;
        self.level = 0;
        self.child_level_valid = false;
        if let Some(root) = root {
            self.push(QueueEntry::Node(root));
        }
        self.push(QueueEntry::LevelMarker);
    }

    /// Move to `level`, returning whether it is within `depth`.
    ///
    /// Also records whether `level + 1` is within `depth`; children are only
    /// expanded when it is.
    pub fn set_level(&mut self, level: u32, depth: Depth) -> bool {
        self.level = level;
        self.child_level_valid = depth.admits(level.saturating_add(1));
        depth.admits(level)
    }

    /// Step to the next level after a level marker was dequeued.
    ///
    /// Returns whether the new level is within `depth`. When nodes remain
    /// queued but no level marker follows them (the last node of the level
    /// just finished had no children), a marker is appended to close the new
    /// level.
    pub fn advance_level(&mut self, depth: Depth) -> bool {
        let valid = self.set_level(self.level.saturating_add(1), depth);
        if valid && self.queued_nodes > 0 && self.queued_level_markers == 0 {
            self.push(QueueEntry::LevelMarker);
        }
        valid
    }

    /// Close the next level if the children just added end it.
    ///
    /// Children markers at the head belong to groups that were already fully
    /// dequeued and are dropped. If a level marker is then at the head, the
    /// node just expanded was the last of its level and its children are the
    /// last of the next level, so a level marker is appended after them.
    pub fn close_level_after_children(&mut self) {
        while self.entries.front() == Some(&QueueEntry::ChildrenMarker) {
            self.pop_front();
        }
        if self.entries.front() == Some(&QueueEntry::LevelMarker) {
            self.push(QueueEntry::LevelMarker);
        }
    }

    /// Current BFS level (0 is the root).
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Whether children of the current level may be expanded.
    pub fn child_level_valid(&self) -> bool {
        self.child_level_valid
    }

    pub fn push(&mut self, entry: QueueEntry) {
        match entry {
            QueueEntry::Node(_) => self.queued_nodes += 1,
            QueueEntry::LevelMarker => self.queued_level_markers += 1,
            QueueEntry::ChildrenMarker => {}
        }
        self.entries.push_back(entry);
        self.peak_len = self.peak_len.max(self.entries.len());
    }

    pub fn pop_front(&mut self) -> Option<QueueEntry> {
        let entry = self.entries.pop_front()?;
        self.forget(entry);
        Some(entry)
    }

    pub fn pop_back(&mut self) -> Option<QueueEntry> {
        let entry = self.entries.pop_back()?;
        self.forget(entry);
        Some(entry)
    }

    fn forget(&mut self, entry: QueueEntry) {
        match entry {
            QueueEntry::Node(_) => self.queued_nodes -= 1,
            QueueEntry::LevelMarker => self.queued_level_markers -= 1,
            QueueEntry::ChildrenMarker => {}
        }
    }

    /// Queue position of a node.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.entries.iter().position(|e| *e == QueueEntry::Node(id))
    }

    /// Entries from `index` to the tail.
    pub fn iter_from(&self, index: usize) -> std::collections::vec_deque::Iter<'_, QueueEntry> {
        self.entries.range(index..)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of real nodes queued.
    pub fn queued_nodes(&self) -> usize {
        self.queued_nodes
    }

    /// Longest the queue has been since the last `initialize`.
    pub fn peak_len(&self) -> usize {
        self.peak_len
    }
}
