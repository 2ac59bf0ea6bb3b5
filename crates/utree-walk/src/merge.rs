//! Child expansion: the sorted merge of logical and physical children.
//!
//! Both child sequences are sorted by name, so one pass with two cursors
//! decides for every position whether it exists logically, physically or
//! both. Linked resources bypass the comparison: their backing is resolved
//! directly and a physical entry of the same name is shadowed by them.
//! Projects are resolved the same way from their own location.

use std::cmp::Ordering;

use tracing::{debug, trace, warn};
use utree_model::{ChildSet, Relocation};
use utree_store::{EntryInfo, StoreEntry};
use utree_types::{ResourceKind, ResourcePath};

use crate::node::{NodeId, NodeParts, Origin};
use crate::queue::QueueEntry;
use crate::sort::sort_names;
use crate::tree::UnifiedTree;

impl UnifiedTree {
    /// Queue the merged children of `parent`, followed by a children marker.
    pub(crate) fn add_children(&mut self, parent: NodeId) {
        let node = self.pool.get(parent);
        if node.kind() == ResourceKind::File && node.is_file() {
            return;
        }
        let path = node.path().clone();
        let kind = node.kind();
        let logical = node.resource().is_some() && node.exists_in_workspace();
        let dir = node.entry().filter(|_| node.exists_in_file_system()).cloned();

        let names = match &dir {
            Some(dir) => self.list_names(dir),
            None => Vec::new(),
        };

        let mut unknown = false;
        let members = if logical && kind.is_container() {
            match self.model.children_of(&path) {
                Ok(ChildSet::Known(members)) => self.with_kinds(members),
                Ok(ChildSet::Unknown) => {
                    unknown = true;
                    Vec::new()
                }
                Err(err) => {
                    debug!(parent = %path, error = %err, "child query failed; merging physical children only");
                    self.stats.absorbed.children_queries += 1;
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };

        let mut local = 0;
        let mut member = 0;
        while member < members.len() {
            let (child, child_kind) = &members[member];
            let local_name = names.get(local);
            let comp = local_name.map_or(Ordering::Less, |name| child.name().cmp(name.as_str()));

            // Physical entries sorting first go out before any member, so a
            // link or project meets its same-named entry at the cursor.
            if comp == Ordering::Greater {
                if let (Some(dir), Some(name)) = (&dir, local_name) {
                    let parts = self.physical_child(&path, dir, name);
                    self.add_child(parent, parts);
                    local += 1;
                    continue;
                }
            }

            if *child_kind == ResourceKind::Project {
                member += 1;
                if comp == Ordering::Equal {
                    local += 1;
                }
                let parts = self.project_child(child);
                self.add_child(parent, parts);
                continue;
            }

            if let Some(relocation) = self.model.relocation(child) {
                member += 1;
                // A same-named physical entry is blocked by the link.
                if comp == Ordering::Equal {
                    local += 1;
                }
                if let Some(parts) = self.relocated_child(child, *child_kind, relocation) {
                    self.add_child(parent, parts);
                }
                continue;
            }

            match (comp, &dir, local_name) {
                (Ordering::Equal, Some(dir), Some(name)) => {
                    let parts = self.merged_child(child, *child_kind, dir, name);
                    self.add_child(parent, parts);
                    local += 1;
                    member += 1;
                }
                _ => {
                    self.add_child(parent, logical_child(child, *child_kind));
                    member += 1;
                }
            }
        }

        if let Some(dir) = &dir {
            for name in &names[local..] {
                let parts = self.physical_child(&path, dir, name);
                self.add_child(parent, parts);
            }
        }

        if unknown {
            if let Err(err) = self.model.mark_children_known(&path) {
                debug!(parent = %path, error = %err, "could not mark children known; will retry next traversal");
            }
        }

        if self.pool.get(parent).first_child.is_some() {
            self.queue.push(QueueEntry::ChildrenMarker);
        }
        trace!(parent = %path, physical = names.len(), logical = members.len(), "expanded node");
    }

    fn list_names(&mut self, dir: &StoreEntry) -> Vec<String> {
        let mut names = match self.store.child_names(dir) {
            Ok(Some(names)) => names,
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(location = %dir.location().display(), error = %err, "cannot list directory; treating it as empty");
                self.stats.absorbed.physical_listings += 1;
                Vec::new()
            }
        };
        sort_names(&mut names);
        names
    }

    fn with_kinds(&self, members: Vec<ResourcePath>) -> Vec<(ResourcePath, ResourceKind)> {
        members
            .into_iter()
            .filter_map(|member| match self.model.kind(&member) {
                Some(kind) => Some((member, kind)),
                None => {
                    debug!(resource = %member, "child vanished from model during expansion");
                    None
                }
            })
            .collect()
    }

    fn add_child(&mut self, parent: NodeId, parts: NodeParts) {
        let child = self.pool.acquire(parts);
        let parent = self.pool.get_mut(parent);
        if parent.first_child.is_none() {
            parent.first_child = Some(child);
        }
        self.queue.push(QueueEntry::Node(child));
    }

    fn relocated_child(
        &mut self,
        path: &ResourcePath,
        kind: ResourceKind,
        relocation: Relocation,
    ) -> Option<NodeParts> {
        let target = match relocation {
            Relocation::Target(target) => target,
            Relocation::Undefined => {
                debug!(resource = %path, "link has no location; dropping it");
                self.stats.absorbed.unresolved_relocations += 1;
                return None;
            }
        };
        let entry = match self.store.locate(&target) {
            Ok(entry) => entry,
            Err(err) => {
                debug!(resource = %path, error = %err, "cannot resolve link target; dropping it");
                self.stats.absorbed.unresolved_relocations += 1;
                return None;
            }
        };
        let info = self.store.stat(&entry);
        let local_name = entry.name().map(str::to_string);
        Some(NodeParts {
            path: path.clone(),
            kind,
            origin: Origin::Relocated,
            logical: true,
            exists_in_workspace: true,
            entry: Some(entry),
            info,
            local_name,
        })
    }

    /// Projects carry their own location instead of inheriting one.
    fn project_child(&mut self, path: &ResourcePath) -> NodeParts {
        let entry = match self.model.location(path).map(|location| self.store.locate(&location)) {
            Some(Ok(entry)) => Some(entry),
            Some(Err(err)) => {
                debug!(resource = %path, error = %err, "cannot resolve project location");
                self.stats.absorbed.unresolved_relocations += 1;
                None
            }
            None => None,
        };
        let info = entry
            .as_ref()
            .map_or(EntryInfo::MISSING, |entry| self.store.stat(entry));
        let local_name = entry
            .as_ref()
            .filter(|_| info.exists)
            .and_then(|entry| entry.name())
            .map(str::to_string);
        NodeParts {
            path: path.clone(),
            kind: ResourceKind::Project,
            origin: if info.exists {
                Origin::Merged
            } else {
                Origin::LogicalOnly
            },
            logical: true,
            exists_in_workspace: true,
            entry,
            info,
            local_name,
        }
    }

    fn merged_child(
        &self,
        path: &ResourcePath,
        kind: ResourceKind,
        dir: &StoreEntry,
        name: &str,
    ) -> NodeParts {
        let entry = self.store.resolve(dir, name);
        let info = self.store.stat(&entry);
        NodeParts {
            path: path.clone(),
            kind,
            origin: Origin::Merged,
            logical: true,
            exists_in_workspace: true,
            entry: Some(entry),
            info,
            local_name: Some(name.to_string()),
        }
    }

    fn physical_child(&self, parent: &ResourcePath, dir: &StoreEntry, name: &str) -> NodeParts {
        let entry = self.store.resolve(dir, name);
        let info = self.store.stat(&entry);
        let kind = if info.directory {
            ResourceKind::Folder
        } else {
            ResourceKind::File
        };
        NodeParts {
            path: parent.child(name),
            kind,
            origin: Origin::PhysicalOnly,
            logical: false,
            exists_in_workspace: false,
            entry: Some(entry),
            info,
            local_name: Some(name.to_string()),
        }
    }
}

fn logical_child(path: &ResourcePath, kind: ResourceKind) -> NodeParts {
    NodeParts {
        path: path.clone(),
        kind,
        origin: Origin::LogicalOnly,
        logical: true,
        exists_in_workspace: true,
        entry: None,
        info: EntryInfo::MISSING,
        local_name: None,
    }
}
