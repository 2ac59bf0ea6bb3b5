//! Visitors behind the `tree`, `status` and `refresh` commands.

use serde::Serialize;
use tracing::warn;
use utree_model::{InMemoryWorkspace, ModelResult};
use utree_types::{ResourceKind, ResourcePath};
use utree_walk::{NodeVisit, Origin, TreeResult, UnifiedTreeVisitor};

pub fn origin_label(origin: Origin) -> &'static str {
    match origin {
        Origin::Merged => "merged",
        Origin::PhysicalOnly => "disk_only",
        Origin::LogicalOnly => "workspace_only",
        Origin::Relocated => "linked",
    }
}

#[derive(Debug, Serialize)]
pub struct TreeLine {
    pub path: String,
    pub name: String,
    pub kind: ResourceKind,
    pub origin: &'static str,
    pub level: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Records every node for printing once the walk is done.
#[derive(Debug, Default)]
pub struct PrintVisitor {
    pub lines: Vec<TreeLine>,
}

impl UnifiedTreeVisitor for PrintVisitor {
    fn visit(&mut self, node: &mut NodeVisit<'_>) -> TreeResult<bool> {
        self.lines.push(TreeLine {
            path: node.path().to_string(),
            name: node.name().to_string(),
            kind: node.kind(),
            origin: origin_label(node.origin()),
            level: node.level(),
            location: node
                .entry()
                .filter(|_| node.exists_in_file_system())
                .map(|entry| entry.location().display().to_string()),
        });
        Ok(true)
    }
}

#[derive(Debug, Default, Serialize)]
pub struct StatusReport {
    /// On disk, unknown to the workspace.
    pub untracked: Vec<String>,
    /// In the workspace, absent from disk.
    pub missing: Vec<String>,
    /// Present on both sides with different kinds.
    pub changed: Vec<String>,
}

impl StatusReport {
    pub fn is_clean(&self) -> bool {
        self.untracked.is_empty() && self.missing.is_empty() && self.changed.is_empty()
    }
}

/// Collects out-of-sync resources. Subtrees that exist on one side only are
/// reported once, at their top.
#[derive(Debug, Default)]
pub struct StatusVisitor {
    pub report: StatusReport,
}

impl UnifiedTreeVisitor for StatusVisitor {
    fn visit(&mut self, node: &mut NodeVisit<'_>) -> TreeResult<bool> {
        match node.origin() {
            Origin::PhysicalOnly => {
                self.report.untracked.push(node.path().to_string());
                Ok(false)
            }
            Origin::LogicalOnly if node.kind() != ResourceKind::Root => {
                self.report.missing.push(node.path().to_string());
                Ok(false)
            }
            Origin::Relocated if !node.exists_in_file_system() => {
                self.report.missing.push(node.path().to_string());
                Ok(false)
            }
            Origin::Merged if kind_mismatch(node.kind(), node.is_directory()) => {
                self.report.changed.push(node.path().to_string());
                Ok(false)
            }
            _ => Ok(true),
        }
    }
}

fn kind_mismatch(kind: ResourceKind, directory: bool) -> bool {
    match kind {
        ResourceKind::File => directory,
        ResourceKind::Folder | ResourceKind::Project => !directory,
        ResourceKind::Root => false,
    }
}

fn disk_kind(directory: bool) -> ResourceKind {
    if directory {
        ResourceKind::Folder
    } else {
        ResourceKind::File
    }
}

/// One edit to bring the workspace in line with the disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Change {
    Add { path: ResourcePath, kind: ResourceKind },
    Remove { path: ResourcePath },
    Replace { path: ResourcePath, kind: ResourceKind },
}

/// Collects the edits a refresh needs. The workspace is left untouched
/// until [`apply_changes`] runs after the traversal.
#[derive(Debug, Default)]
pub struct RefreshVisitor {
    pub changes: Vec<Change>,
}

impl UnifiedTreeVisitor for RefreshVisitor {
    fn visit(&mut self, node: &mut NodeVisit<'_>) -> TreeResult<bool> {
        let path = node.path().clone();
        match node.origin() {
            Origin::PhysicalOnly => {
                self.changes.push(Change::Add {
                    path,
                    kind: disk_kind(node.is_directory()),
                });
                Ok(true)
            }
            Origin::LogicalOnly => match node.kind() {
                // Projects and the root own their location; a missing one is
                // reported by status, not dropped.
                kind if kind.is_project_like() => Ok(true),
                _ => {
                    self.changes.push(Change::Remove { path });
                    Ok(false)
                }
            },
            Origin::Merged
                if node.kind() != ResourceKind::Project
                    && kind_mismatch(node.kind(), node.is_directory()) =>
            {
                let kind = disk_kind(node.is_directory());
                self.changes.push(Change::Replace { path, kind });
                Ok(kind == ResourceKind::Folder)
            }
            _ => Ok(true),
        }
    }
}

/// Apply collected changes in order, returning how many succeeded.
///
/// A change the workspace rejects (an unrepresentable name, say) is logged
/// and skipped.
pub fn apply_changes(workspace: &InMemoryWorkspace, changes: &[Change]) -> usize {
    let mut applied = 0;
    for change in changes {
        match apply(workspace, change) {
            Ok(()) => applied += 1,
            Err(err) => warn!(?change, error = %err, "skipping workspace change"),
        }
    }
    applied
}

fn apply(workspace: &InMemoryWorkspace, change: &Change) -> ModelResult<()> {
    match change {
        Change::Add { path, kind } => add(workspace, path, *kind),
        Change::Remove { path } => workspace.remove(path),
        Change::Replace { path, kind } => {
            workspace.remove(path)?;
            add(workspace, path, *kind)
        }
    }
}

fn add(workspace: &InMemoryWorkspace, path: &ResourcePath, kind: ResourceKind) -> ModelResult<()> {
    match kind {
        ResourceKind::Folder => workspace.add_folder(path),
        _ => workspace.add_file(path),
    }
}
