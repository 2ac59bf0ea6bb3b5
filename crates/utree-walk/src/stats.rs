//! Per-traversal counters.

/// Failures the traversal absorbed instead of aborting on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AbsorbedFailures {
    /// Child queries against the model that returned an error.
    pub children_queries: u64,
    /// Linked children whose target could not be resolved.
    pub unresolved_relocations: u64,
    /// Directories the store could not list.
    pub physical_listings: u64,
}

impl AbsorbedFailures {
    pub fn total(&self) -> u64 {
        self.children_queries + self.unresolved_relocations + self.physical_listings
    }
}

/// What one call to [`accept`](crate::UnifiedTree::accept) did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalStats {
    /// Nodes handed to the visitor.
    pub visited: u64,
    /// Nodes whose children were computed.
    pub expanded: u64,
    /// Queued children dropped because the visitor declined their parent.
    pub pruned: u64,
    /// Deepest level visited, 0 being the root.
    pub deepest_level: u32,
    /// Longest the queue got, markers included.
    pub peak_queue_len: usize,
    /// Node objects allocated by the pool so far.
    pub pool_capacity: usize,
    pub absorbed: AbsorbedFailures,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_sums_every_kind() {
        let absorbed = AbsorbedFailures {
            children_queries: 1,
            unresolved_relocations: 2,
            physical_listings: 3,
        };
        assert_eq!(absorbed.total(), 6);
        assert_eq!(TraversalStats::default().absorbed.total(), 0);
    }
}
