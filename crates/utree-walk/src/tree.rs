//! The traversal driver.
//!
//! [`UnifiedTree`] walks the merge of a logical model and a physical store
//! breadth-first, handing every merged position to a visitor. The visitor's
//! answer decides whether the position's children are queued; a refusal
//! also drops children that were already queued on its behalf.

use std::sync::Arc;

use tracing::debug;
use utree_model::ResourceModel;
use utree_store::{EntryInfo, FileStore};
use utree_types::{Depth, ResourceKind, ResourcePath};

use crate::error::{TreeError, TreeResult};
use crate::node::{NodeId, NodeParts, Origin};
use crate::pool::NodePool;
use crate::queue::{QueueEntry, TraversalQueue};
use crate::stats::TraversalStats;
use crate::visitor::{NodeVisit, UnifiedTreeVisitor};

/// A logical resource tree merged with the physical tree below it.
///
/// One instance owns its queue and node pool and runs one traversal at a
/// time. Neither tree may change structurally while [`accept`] runs.
///
/// [`accept`]: UnifiedTree::accept
pub struct UnifiedTree {
    root: Option<ResourcePath>,
    pub(crate) model: Arc<dyn ResourceModel>,
    pub(crate) store: Arc<dyn FileStore>,
    pub(crate) queue: TraversalQueue,
    pub(crate) pool: NodePool,
    pub(crate) stats: TraversalStats,
}

impl std::fmt::Debug for UnifiedTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnifiedTree")
            .field("root", &self.root)
            .field("queued", &self.queue.len())
            .field("pool_capacity", &self.pool.capacity())
            .finish()
    }
}

impl UnifiedTree {
    /// Create a tree over `model` and `store` with no root set.
    pub fn new(model: Arc<dyn ResourceModel>, store: Arc<dyn FileStore>) -> Self {
        Self {
            root: None,
            model,
            store,
            queue: TraversalQueue::new(),
            pool: NodePool::new(),
            stats: TraversalStats::default(),
        }
    }

    /// Builder-style [`set_root`](Self::set_root).
    pub fn with_root(mut self, root: ResourcePath) -> Self {
        self.set_root(root);
        self
    }

    /// Set the resource the next traversal starts from.
    pub fn set_root(&mut self, root: ResourcePath) {
        self.root = Some(root);
    }

    /// The traversal root, if set.
    pub fn root(&self) -> Option<&ResourcePath> {
        self.root.as_ref()
    }

    /// Visit every merged position with unbounded depth.
    pub fn accept_all<V>(&mut self, visitor: &mut V) -> TreeResult<TraversalStats>
    where
        V: UnifiedTreeVisitor + ?Sized,
    {
        self.accept(visitor, Depth::Infinite)
    }

    /// Visit merged positions breadth-first down to `depth`.
    ///
    /// The visitor sees each position once, parents before children and
    /// siblings in name order. Returning `false` from the visitor prunes the
    /// position's subtree. A visitor error stops the traversal and is
    /// returned as is.
    pub fn accept<V>(&mut self, visitor: &mut V, depth: Depth) -> TreeResult<TraversalStats>
    where
        V: UnifiedTreeVisitor + ?Sized,
    {
        let root = self.root.clone().ok_or(TreeError::NoRoot)?;
        self.initialize(&root)?;
        self.queue.set_level(0, depth);

        while let Some(entry) = self.queue.pop_front() {
            let id = match entry {
                QueueEntry::ChildrenMarker => continue,
                QueueEntry::LevelMarker => {
                    if !self.queue.advance_level(depth) {
                        break;
                    }
                    continue;
                }
                QueueEntry::Node(id) => id,
            };

            self.stats.visited += 1;
            self.stats.deepest_level = self.stats.deepest_level.max(self.queue.level());
            let descend = visitor.visit(&mut NodeVisit::new(self, id));
            match descend {
                Ok(true) => self.add_node_children_to_queue(id),
                Ok(false) => self.remove_node_children_from_queue(id),
                Err(err) => {
                    self.pool.release(id);
                    return Err(err);
                }
            }
            self.pool.release(id);
        }

        self.stats.peak_queue_len = self.queue.peak_len();
        self.stats.pool_capacity = self.pool.capacity();
        debug!(
            root = %root,
            %depth,
            visited = self.stats.visited,
            pruned = self.stats.pruned,
            absorbed = self.stats.absorbed.total(),
            "traversal finished"
        );
        Ok(self.stats.clone())
    }

    fn initialize(&mut self, root: &ResourcePath) -> TreeResult<()> {
        self.stats = TraversalStats::default();
        self.pool.reset();
        let root_node = self.root_node(root)?.map(|parts| self.pool.acquire(parts));
        self.queue.initialize(root_node);
        Ok(())
    }

    fn root_node(&self, root: &ResourcePath) -> TreeResult<Option<NodeParts>> {
        let exists_in_workspace = self.model.exists(root);
        let entry = match self.model.location(root) {
            Some(location) => Some(self.store.locate(&location)?),
            None => None,
        };
        let info = entry
            .as_ref()
            .map_or(EntryInfo::MISSING, |entry| self.store.stat(entry));
        if !exists_in_workspace && !info.exists {
            debug!(root = %root, "root exists neither in the model nor on disk");
            return Ok(None);
        }

        let kind = self.model.kind(root).unwrap_or(if info.directory {
            ResourceKind::Folder
        } else {
            ResourceKind::File
        });
        let origin = match (exists_in_workspace, info.exists) {
            (true, true) => Origin::Merged,
            (true, false) => Origin::LogicalOnly,
            _ => Origin::PhysicalOnly,
        };
        let local_name = entry
            .as_ref()
            .filter(|_| info.exists)
            .and_then(|entry| entry.name())
            .map(str::to_string);
        Ok(Some(NodeParts {
            path: root.clone(),
            kind,
            origin,
            logical: exists_in_workspace,
            exists_in_workspace,
            entry,
            info,
            local_name,
        }))
    }

    /// Expand `id` unless it was expanded already or its children would fall
    /// outside the depth budget.
    pub(crate) fn add_node_children_to_queue(&mut self, id: NodeId) {
        if !self.queue.child_level_valid() || self.pool.get(id).expanded {
            return;
        }
        self.pool.get_mut(id).expanded = true;
        self.stats.expanded += 1;
        self.add_children(id);
        if self.pool.get(id).first_child.is_some() {
            self.queue.close_level_after_children();
        }
    }

    /// Drop the queued children of `id`.
    ///
    /// The children are the most recently queued work, so they are popped
    /// from the tail back to the first child.
    pub(crate) fn remove_node_children_from_queue(&mut self, id: NodeId) {
        let Some(first) = self.pool.get_mut(id).first_child.take() else {
            return;
        };
        while let Some(entry) = self.queue.pop_back() {
            if let QueueEntry::Node(child) = entry {
                self.pool.release(child);
                self.stats.pruned += 1;
                if child == first {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::visitor::from_fn;
    use proptest::prelude::*;
    use std::collections::BTreeSet;
    use std::path::PathBuf;
    use utree_model::{ChildSet, InMemoryWorkspace, ModelError, ModelResult, Relocation};
    use utree_store::InMemoryFileStore;

    fn p(s: &str) -> ResourcePath {
        ResourcePath::parse(s).unwrap()
    }

    /// A workspace with project `/app` stored at `/ws/app`, children known.
    fn fixture() -> (Arc<InMemoryWorkspace>, Arc<InMemoryFileStore>) {
        let model = Arc::new(InMemoryWorkspace::new());
        let store = Arc::new(InMemoryFileStore::new());
        store.add_dir("/ws/app").unwrap();
        model.add_project("app", "/ws/app").unwrap();
        model.set_children_unknown(&p("/app"), false).unwrap();
        (model, store)
    }

    fn tree(model: &Arc<InMemoryWorkspace>, store: &Arc<InMemoryFileStore>, root: &str) -> UnifiedTree {
        UnifiedTree::new(model.clone(), store.clone()).with_root(p(root))
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(String, Origin, u32)>,
    }

    impl Recorder {
        fn paths(&self) -> Vec<&str> {
            self.seen.iter().map(|(path, _, _)| path.as_str()).collect()
        }

        fn level_of(&self, path: &str) -> Option<u32> {
            self.seen
                .iter()
                .find(|(seen, _, _)| seen == path)
                .map(|(_, _, level)| *level)
        }
    }

    impl UnifiedTreeVisitor for Recorder {
        fn visit(&mut self, node: &mut NodeVisit<'_>) -> TreeResult<bool> {
            self.seen
                .push((node.path().to_string(), node.origin(), node.level()));
            Ok(true)
        }
    }

    #[test]
    fn children_merge_in_name_order() {
        let (model, store) = fixture();
        model.add_file(&p("/app/a")).unwrap();
        model.add_file(&p("/app/c")).unwrap();
        for name in ["d", "b", "c"] {
            store.add_file(format!("/ws/app/{name}")).unwrap();
        }

        let mut recorder = Recorder::default();
        let stats = tree(&model, &store, "/app").accept_all(&mut recorder).unwrap();

        assert_eq!(
            recorder.seen,
            vec![
                ("/app".to_string(), Origin::Merged, 0),
                ("/app/a".to_string(), Origin::LogicalOnly, 1),
                ("/app/b".to_string(), Origin::PhysicalOnly, 1),
                ("/app/c".to_string(), Origin::Merged, 1),
                ("/app/d".to_string(), Origin::PhysicalOnly, 1),
            ]
        );
        assert_eq!(stats.visited, 5);
        assert_eq!(stats.deepest_level, 1);
        assert_eq!(stats.absorbed.total(), 0);
    }

    #[test]
    fn physical_only_nodes_take_kind_from_store() {
        let (model, store) = fixture();
        store.add_dir("/ws/app/dir").unwrap();
        store.add_file("/ws/app/file").unwrap();

        let mut kinds = Vec::new();
        let mut visitor = from_fn(|node| {
            kinds.push((node.name().to_string(), node.kind(), node.resource().is_some()));
            Ok(true)
        });
        tree(&model, &store, "/app").accept_all(&mut visitor).unwrap();

        assert_eq!(
            kinds,
            vec![
                ("app".to_string(), ResourceKind::Project, true),
                ("dir".to_string(), ResourceKind::Folder, false),
                ("file".to_string(), ResourceKind::File, false),
            ]
        );
    }

    #[test]
    fn linked_child_shadows_physical_entry() {
        let (model, store) = fixture();
        store.add_file("/ws/app/lnk/shadow").unwrap();
        store.add_file("/elsewhere/target/inner").unwrap();
        model
            .add_link(
                &p("/app/lnk"),
                ResourceKind::Folder,
                Relocation::Target(PathBuf::from("/elsewhere/target")),
            )
            .unwrap();

        let mut local_names = Vec::new();
        let mut recorder = Recorder::default();
        let mut visitor = from_fn(|node| {
            local_names.push(node.local_name().map(str::to_string));
            recorder.visit(node)
        });
        tree(&model, &store, "/app").accept_all(&mut visitor).unwrap();

        assert_eq!(recorder.paths(), vec!["/app", "/app/lnk", "/app/lnk/inner"]);
        assert_eq!(recorder.seen[1].1, Origin::Relocated);
        assert_eq!(local_names[1].as_deref(), Some("target"));
    }

    #[test]
    fn link_after_earlier_physical_sibling_still_shadows() {
        let (model, store) = fixture();
        store.add_file("/ws/app/a").unwrap();
        store.add_file("/ws/app/x").unwrap();
        store.add_file("/elsewhere/t").unwrap();
        model
            .add_link(
                &p("/app/x"),
                ResourceKind::File,
                Relocation::Target(PathBuf::from("/elsewhere/t")),
            )
            .unwrap();

        let mut recorder = Recorder::default();
        tree(&model, &store, "/app").accept_all(&mut recorder).unwrap();

        assert_eq!(
            recorder.seen,
            vec![
                ("/app".to_string(), Origin::Merged, 0),
                ("/app/a".to_string(), Origin::PhysicalOnly, 1),
                ("/app/x".to_string(), Origin::Relocated, 1),
            ]
        );
    }

    #[test]
    fn unresolvable_links_are_dropped_and_counted() {
        let (model, store) = fixture();
        store.add_file("/ws/app/plain").unwrap();
        model
            .add_link(&p("/app/nowhere"), ResourceKind::Folder, Relocation::Undefined)
            .unwrap();
        model
            .add_link(
                &p("/app/relative"),
                ResourceKind::File,
                Relocation::Target(PathBuf::from("not/absolute")),
            )
            .unwrap();

        let mut recorder = Recorder::default();
        let stats = tree(&model, &store, "/app").accept_all(&mut recorder).unwrap();

        assert_eq!(recorder.paths(), vec!["/app", "/app/plain"]);
        assert_eq!(stats.absorbed.unresolved_relocations, 2);
    }

    #[test]
    fn workspace_root_resolves_project_locations() {
        let (model, store) = fixture();
        model.add_project("lib", "/ws/lib").unwrap();
        store.add_file("/ws/app/main.rs").unwrap();

        let mut recorder = Recorder::default();
        tree(&model, &store, "/").accept_all(&mut recorder).unwrap();

        assert_eq!(
            recorder.seen,
            vec![
                ("/".to_string(), Origin::LogicalOnly, 0),
                ("/app".to_string(), Origin::Merged, 1),
                ("/lib".to_string(), Origin::LogicalOnly, 1),
                ("/app/main.rs".to_string(), Origin::PhysicalOnly, 2),
            ]
        );
    }

    fn nested_fixture() -> (Arc<InMemoryWorkspace>, Arc<InMemoryFileStore>) {
        let (model, store) = fixture();
        store.add_file("/ws/app/a/b/c.txt").unwrap();
        (model, store)
    }

    #[test]
    fn depth_budget_limits_levels() {
        let (model, store) = nested_fixture();
        let cases = [
            (Depth::Zero, 1, 0),
            (Depth::One, 2, 1),
            (Depth::Bounded(2), 3, 2),
            (Depth::Infinite, 4, 3),
        ];
        for (depth, visited, deepest) in cases {
            let mut recorder = Recorder::default();
            let stats = tree(&model, &store, "/app").accept(&mut recorder, depth).unwrap();
            assert_eq!(stats.visited, visited, "depth {depth}");
            assert_eq!(stats.deepest_level, deepest, "depth {depth}");
        }
    }

    #[test]
    fn nodes_at_the_depth_limit_are_not_expanded() {
        let (model, store) = nested_fixture();
        let mut recorder = Recorder::default();
        let stats = tree(&model, &store, "/app")
            .accept(&mut recorder, Depth::One)
            .unwrap();
        assert_eq!(stats.expanded, 1);
    }

    #[test]
    fn level_boundary_survives_childless_last_node() {
        let (model, store) = fixture();
        store.add_file("/ws/app/a/x/y").unwrap();
        store.add_file("/ws/app/z").unwrap();

        let mut recorder = Recorder::default();
        tree(&model, &store, "/app").accept_all(&mut recorder).unwrap();

        assert_eq!(recorder.level_of("/app/a"), Some(1));
        assert_eq!(recorder.level_of("/app/z"), Some(1));
        assert_eq!(recorder.level_of("/app/a/x"), Some(2));
        assert_eq!(recorder.level_of("/app/a/x/y"), Some(3));

        let mut recorder = Recorder::default();
        tree(&model, &store, "/app")
            .accept(&mut recorder, Depth::Bounded(2))
            .unwrap();
        assert_eq!(recorder.level_of("/app/a/x/y"), None);
    }

    #[test]
    fn declining_a_node_prunes_children_it_already_queued() {
        let (model, store) = fixture();
        store.add_file("/ws/app/a/x").unwrap();
        store.add_file("/ws/app/z/q").unwrap();
        store.add_file("/ws/app/z/r").unwrap();

        let mut seen = Vec::new();
        let mut visitor = from_fn(|node| {
            seen.push(node.path().to_string());
            let _ = node.children().count();
            Ok(node.name() != "z")
        });
        let mut unified = tree(&model, &store, "/app");
        let stats = unified.accept_all(&mut visitor).unwrap();

        assert_eq!(seen, vec!["/app", "/app/a", "/app/z", "/app/a/x"]);
        assert_eq!(stats.pruned, 2);
        assert_eq!(unified.queue.queued_nodes(), 0);
        assert_eq!(unified.pool.active(), 0);
    }

    #[test]
    fn pruning_shrinks_queue_by_exactly_the_removed_children() {
        let (model, store) = fixture();
        store.add_file("/ws/app/a/x").unwrap();
        store.add_file("/ws/app/z/q").unwrap();
        store.add_file("/ws/app/z/r").unwrap();

        let mut unified = tree(&model, &store, "/app");
        unified.initialize(&p("/app")).unwrap();
        unified.queue.set_level(0, Depth::Infinite);
        let mut pruned_at = None;
        while let Some(entry) = unified.queue.pop_front() {
            let id = match entry {
                QueueEntry::Node(id) => id,
                QueueEntry::LevelMarker => {
                    if !unified.queue.advance_level(Depth::Infinite) {
                        break;
                    }
                    continue;
                }
                QueueEntry::ChildrenMarker => continue,
            };
            let before = unified.queue.queued_nodes();
            unified.add_node_children_to_queue(id);
            if unified.pool.get(id).name() == "z" {
                assert_eq!(unified.queue.queued_nodes(), before + 2);
                unified.remove_node_children_from_queue(id);
                assert_eq!(unified.queue.queued_nodes(), before);
                pruned_at = Some(before);
            }
            unified.pool.release(id);
        }

        assert_eq!(pruned_at, Some(1));
        assert_eq!(unified.pool.active(), 0);
    }

    #[test]
    fn children_view_matches_the_next_visits() {
        let (model, store) = fixture();
        model.add_file(&p("/app/a")).unwrap();
        store.add_file("/ws/app/b").unwrap();
        store.add_file("/ws/app/c").unwrap();

        let mut listed: Vec<String> = Vec::new();
        let mut seen = Vec::new();
        let mut visitor = from_fn(|node| {
            if node.path().is_root() || node.name() == "app" {
                listed = node.children().map(|c| c.path().to_string()).collect();
            }
            seen.push(node.path().to_string());
            Ok(true)
        });
        let stats = tree(&model, &store, "/app").accept_all(&mut visitor).unwrap();

        assert_eq!(listed, vec!["/app/a", "/app/b", "/app/c"]);
        assert_eq!(&seen[1..], listed.as_slice());
        assert_eq!(stats.expanded, 4);
    }

    #[test]
    fn children_view_is_empty_beyond_depth() {
        let (model, store) = fixture();
        store.add_file("/ws/app/b").unwrap();

        let mut count = None;
        let mut visitor = from_fn(|node| {
            count = Some(node.children().count());
            Ok(true)
        });
        tree(&model, &store, "/app")
            .accept(&mut visitor, Depth::Zero)
            .unwrap();
        assert_eq!(count, Some(0));
    }

    #[test]
    fn repeated_traversals_are_identical_and_reuse_nodes() {
        let (model, store) = fixture();
        for i in 0..50 {
            store.add_file(format!("/ws/app/f{i:02}")).unwrap();
        }
        store.add_file("/ws/app/sub/deep").unwrap();
        model.add_file(&p("/app/f10")).unwrap();

        let mut unified = tree(&model, &store, "/app");
        let mut first = Recorder::default();
        let stats_first = unified.accept_all(&mut first).unwrap();
        let mut second = Recorder::default();
        let stats_second = unified.accept_all(&mut second).unwrap();

        assert_eq!(first.seen, second.seen);
        assert_eq!(stats_first, stats_second);
        assert!(stats_first.pool_capacity <= stats_first.peak_queue_len + 1);
        assert_eq!(unified.pool.capacity(), stats_first.pool_capacity);
    }

    #[test]
    fn unknown_children_are_marked_known_after_expansion() {
        let (model, store) = fixture();
        model.add_file(&p("/app/only_logical")).unwrap();
        model.set_children_unknown(&p("/app"), true).unwrap();
        store.add_file("/ws/app/on_disk").unwrap();

        let mut unified = tree(&model, &store, "/app");
        let mut first = Recorder::default();
        unified.accept_all(&mut first).unwrap();
        assert_eq!(first.paths(), vec!["/app", "/app/on_disk"]);
        assert!(!model.children_unknown(&p("/app")));

        let mut second = Recorder::default();
        unified.accept_all(&mut second).unwrap();
        assert_eq!(second.paths(), vec!["/app", "/app/on_disk", "/app/only_logical"]);
    }

    struct FailingChildren(InMemoryWorkspace);

    impl ResourceModel for FailingChildren {
        fn exists(&self, resource: &ResourcePath) -> bool {
            self.0.exists(resource)
        }
        fn kind(&self, resource: &ResourcePath) -> Option<ResourceKind> {
            self.0.kind(resource)
        }
        fn children_of(&self, parent: &ResourcePath) -> ModelResult<ChildSet> {
            Err(ModelError::NotFound(parent.clone()))
        }
        fn mark_children_known(&self, parent: &ResourcePath) -> ModelResult<()> {
            self.0.mark_children_known(parent)
        }
        fn relocation(&self, resource: &ResourcePath) -> Option<Relocation> {
            self.0.relocation(resource)
        }
        fn location(&self, resource: &ResourcePath) -> Option<PathBuf> {
            self.0.location(resource)
        }
    }

    #[test]
    fn failed_child_query_falls_back_to_physical_children() {
        let workspace = InMemoryWorkspace::new();
        workspace.add_project("app", "/ws/app").unwrap();
        workspace.set_children_unknown(&p("/app"), false).unwrap();
        workspace.add_file(&p("/app/logical")).unwrap();
        let store = Arc::new(InMemoryFileStore::new());
        store.add_file("/ws/app/physical").unwrap();

        let mut unified =
            UnifiedTree::new(Arc::new(FailingChildren(workspace)), store).with_root(p("/app"));
        let mut recorder = Recorder::default();
        let stats = unified.accept_all(&mut recorder).unwrap();

        assert_eq!(recorder.paths(), vec!["/app", "/app/physical"]);
        assert_eq!(stats.absorbed.children_queries, 1);
    }

    #[test]
    fn unreadable_directory_yields_logical_children_only() {
        let (model, store) = fixture();
        model.add_file(&p("/app/kept")).unwrap();
        store.add_file("/ws/app/hidden").unwrap();
        store.fail_listing("/ws/app");

        let mut recorder = Recorder::default();
        let stats = tree(&model, &store, "/app").accept_all(&mut recorder).unwrap();

        assert_eq!(recorder.paths(), vec!["/app", "/app/kept"]);
        assert_eq!(recorder.seen[1].1, Origin::LogicalOnly);
        assert_eq!(stats.absorbed.physical_listings, 1);
    }

    #[test]
    fn accept_without_root_fails() {
        let (model, store) = fixture();
        let mut unified = UnifiedTree::new(model, store);
        let err = unified.accept_all(&mut Recorder::default()).unwrap_err();
        assert!(matches!(err, TreeError::NoRoot));
    }

    #[test]
    fn root_missing_everywhere_visits_nothing() {
        let (model, store) = fixture();
        let mut recorder = Recorder::default();
        let stats = tree(&model, &store, "/ghost")
            .accept_all(&mut recorder)
            .unwrap();
        assert!(recorder.seen.is_empty());
        assert_eq!(stats.visited, 0);
    }

    #[test]
    fn visitor_error_stops_the_traversal() {
        let (model, store) = fixture();
        for name in ["a", "b", "c"] {
            store.add_file(format!("/ws/app/{name}")).unwrap();
        }

        let mut unified = tree(&model, &store, "/app");
        let mut seen = Vec::new();
        let mut visitor = from_fn(|node| {
            seen.push(node.name().to_string());
            if node.name() == "b" {
                return Err(TreeError::visitor("refused"));
            }
            Ok(true)
        });
        let err = unified.accept_all(&mut visitor).unwrap_err();
        assert!(matches!(err, TreeError::Visitor(_)));
        assert_eq!(seen, vec!["app", "a", "b"]);

        let mut recorder = Recorder::default();
        unified.accept_all(&mut recorder).unwrap();
        assert_eq!(recorder.seen.len(), 4);
    }

    proptest! {
        #[test]
        fn visits_stay_within_the_depth_budget(
            files in proptest::collection::vec(proptest::collection::vec(0u8..3, 0..4), 1..8),
            bound in 0u32..5,
        ) {
            let (model, store) = fixture();
            let mut positions = BTreeSet::new();
            for (i, dirs) in files.iter().enumerate() {
                let mut segments: Vec<String> = dirs.iter().map(|d| format!("d{d}")).collect();
                segments.push(format!("f{i}"));
                store.add_file(format!("/ws/app/{}", segments.join("/"))).unwrap();
                for len in 1..=segments.len() {
                    positions.insert(segments[..len].to_vec());
                }
            }

            let mut recorder = Recorder::default();
            let stats = tree(&model, &store, "/app")
                .accept(&mut recorder, Depth::Bounded(bound))
                .unwrap();

            prop_assert!(stats.deepest_level <= bound);
            for (path, _, level) in &recorder.seen {
                prop_assert!(*level <= bound);
                let below_root = p(path).segments().count() as u32 - 1;
                prop_assert_eq!(*level, below_root);
            }
            let admitted = positions
                .iter()
                .filter(|segments| segments.len() as u32 <= bound)
                .count() as u64;
            prop_assert_eq!(stats.visited, admitted + 1);
        }
    }
}
