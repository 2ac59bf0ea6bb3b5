//! In-memory workspace model.
//!
//! [`InMemoryWorkspace`] stores every resource in a `BTreeMap` keyed by path,
//! protected by a `RwLock`. Each container keeps the names of its children
//! in a `BTreeSet`, so [`ResourceModel::children_of`] hands them out already
//! sorted.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::sync::RwLock;

use tracing::debug;
use utree_types::{ResourceKind, ResourcePath};

use crate::error::{ModelError, ModelResult};
use crate::names::validate_resource_name;
use crate::traits::ResourceModel;
use crate::types::{ChildSet, Relocation};

#[derive(Clone, Debug)]
pub(crate) struct ResourceInfo {
    pub(crate) kind: ResourceKind,
    pub(crate) children: BTreeSet<String>,
    pub(crate) children_unknown: bool,
    pub(crate) location: Option<PathBuf>,
    pub(crate) relocation: Option<Relocation>,
}

impl ResourceInfo {
    fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            children: BTreeSet::new(),
            children_unknown: false,
            location: None,
            relocation: None,
        }
    }
}

/// An in-memory implementation of [`ResourceModel`].
///
/// The workspace root always exists. Projects live directly below it; folders,
/// files and linked resources live inside projects.
#[derive(Debug)]
pub struct InMemoryWorkspace {
    resources: RwLock<BTreeMap<ResourcePath, ResourceInfo>>,
}

impl InMemoryWorkspace {
    /// Create a workspace containing only the root.
    pub fn new() -> Self {
        let mut resources = BTreeMap::new();
        resources.insert(ResourcePath::root(), ResourceInfo::new(ResourceKind::Root));
        Self {
            resources: RwLock::new(resources),
        }
    }

    /// Add a project stored at `location`.
    ///
    /// New projects have never been scanned, so their children are unknown.
    pub fn add_project(&self, name: &str, location: impl Into<PathBuf>) -> ModelResult<ResourcePath> {
        validate_resource_name(name)?;
        let path = ResourcePath::root().child(name);
        let mut info = ResourceInfo::new(ResourceKind::Project);
        info.location = Some(location.into());
        info.children_unknown = true;
        self.insert(&path, info)?;
        Ok(path)
    }

    /// Add a folder inside a project.
    pub fn add_folder(&self, path: &ResourcePath) -> ModelResult<()> {
        self.insert(path, ResourceInfo::new(ResourceKind::Folder))
    }

    /// Add a file inside a project.
    pub fn add_file(&self, path: &ResourcePath) -> ModelResult<()> {
        self.insert(path, ResourceInfo::new(ResourceKind::File))
    }

    /// Add a linked folder or file whose backing lives elsewhere.
    pub fn add_link(
        &self,
        path: &ResourcePath,
        kind: ResourceKind,
        relocation: Relocation,
    ) -> ModelResult<()> {
        let mut info = ResourceInfo::new(kind);
        info.relocation = Some(relocation);
        self.insert(path, info)
    }

    pub(crate) fn insert(&self, path: &ResourcePath, info: ResourceInfo) -> ModelResult<()> {
        let parent = path
            .parent()
            .ok_or_else(|| ModelError::AlreadyExists(path.clone()))?;
        validate_resource_name(path.name())?;

        let mut resources = self.resources.write().expect("lock poisoned");
        if resources.contains_key(path) {
            return Err(ModelError::AlreadyExists(path.clone()));
        }
        let parent_info = resources
            .get_mut(&parent)
            .ok_or_else(|| ModelError::NotFound(parent.clone()))?;
        if !parent_info.kind.is_container() {
            return Err(ModelError::NotAContainer {
                path: parent,
                kind: parent_info.kind,
            });
        }
        let placed_under_root = parent_info.kind == ResourceKind::Root;
        if placed_under_root != (info.kind == ResourceKind::Project) {
            return Err(ModelError::InvalidPlacement {
                path: path.clone(),
                kind: info.kind,
            });
        }

        parent_info.children.insert(path.name().to_string());
        resources.insert(path.clone(), info);
        Ok(())
    }

    /// Remove a resource and everything below it.
    pub fn remove(&self, path: &ResourcePath) -> ModelResult<()> {
        let parent = path
            .parent()
            .ok_or_else(|| ModelError::InvalidPlacement {
                path: path.clone(),
                kind: ResourceKind::Root,
            })?;

        let mut resources = self.resources.write().expect("lock poisoned");
        if resources.remove(path).is_none() {
            return Err(ModelError::NotFound(path.clone()));
        }
        let before = resources.len();
        resources.retain(|p, _| !path.is_prefix_of(p));
        if let Some(parent_info) = resources.get_mut(&parent) {
            parent_info.children.remove(path.name());
        }
        debug!(%path, descendants = before - resources.len(), "removed resource");
        Ok(())
    }

    /// Set or clear the children-unknown flag of a container.
    pub fn set_children_unknown(&self, path: &ResourcePath, unknown: bool) -> ModelResult<()> {
        let mut resources = self.resources.write().expect("lock poisoned");
        let info = resources
            .get_mut(path)
            .ok_or_else(|| ModelError::NotFound(path.clone()))?;
        info.children_unknown = unknown;
        Ok(())
    }

    /// Returns `true` if the children-unknown flag of `path` is set.
    pub fn children_unknown(&self, path: &ResourcePath) -> bool {
        self.resources
            .read()
            .expect("lock poisoned")
            .get(path)
            .is_some_and(|info| info.children_unknown)
    }

    /// All projects, sorted by path.
    pub fn projects(&self) -> Vec<ResourcePath> {
        self.resources
            .read()
            .expect("lock poisoned")
            .iter()
            .filter(|(_, info)| info.kind == ResourceKind::Project)
            .map(|(path, _)| path.clone())
            .collect()
    }

    /// Every resource except the root, sorted by path.
    pub fn resources(&self) -> Vec<(ResourcePath, ResourceKind)> {
        self.resources
            .read()
            .expect("lock poisoned")
            .iter()
            .filter(|(path, _)| !path.is_root())
            .map(|(path, info)| (path.clone(), info.kind))
            .collect()
    }

    /// Number of resources, including the root.
    pub fn len(&self) -> usize {
        self.resources.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the workspace holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub(crate) fn with_entries<T>(&self, f: impl FnOnce(&BTreeMap<ResourcePath, ResourceInfo>) -> T) -> T {
        f(&self.resources.read().expect("lock poisoned"))
    }
}

impl Default for InMemoryWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_location(
    resources: &BTreeMap<ResourcePath, ResourceInfo>,
    path: &ResourcePath,
) -> Option<PathBuf> {
    let info = resources.get(path)?;
    if let Some(relocation) = &info.relocation {
        return relocation.target().cloned();
    }
    if let Some(location) = &info.location {
        return Some(location.clone());
    }
    let parent = path.parent()?;
    resolve_location(resources, &parent).map(|base| base.join(path.name()))
}

impl ResourceModel for InMemoryWorkspace {
    fn exists(&self, resource: &ResourcePath) -> bool {
        self.resources
            .read()
            .expect("lock poisoned")
            .contains_key(resource)
    }

    fn kind(&self, resource: &ResourcePath) -> Option<ResourceKind> {
        self.resources
            .read()
            .expect("lock poisoned")
            .get(resource)
            .map(|info| info.kind)
    }

    fn children_of(&self, parent: &ResourcePath) -> ModelResult<ChildSet> {
        let resources = self.resources.read().expect("lock poisoned");
        let info = resources
            .get(parent)
            .ok_or_else(|| ModelError::NotFound(parent.clone()))?;
        if info.children_unknown {
            return Ok(ChildSet::Unknown);
        }
        Ok(ChildSet::Known(
            info.children.iter().map(|name| parent.child(name)).collect(),
        ))
    }

    fn mark_children_known(&self, parent: &ResourcePath) -> ModelResult<()> {
        self.set_children_unknown(parent, false)
    }

    fn relocation(&self, resource: &ResourcePath) -> Option<Relocation> {
        self.resources
            .read()
            .expect("lock poisoned")
            .get(resource)
            .and_then(|info| info.relocation.clone())
    }

    fn location(&self, resource: &ResourcePath) -> Option<PathBuf> {
        let resources = self.resources.read().expect("lock poisoned");
        resolve_location(&resources, resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> ResourcePath {
        ResourcePath::parse(s).unwrap()
    }

    fn workspace() -> InMemoryWorkspace {
        let ws = InMemoryWorkspace::new();
        ws.add_project("app", "/data/app").unwrap();
        ws.set_children_unknown(&p("/app"), false).unwrap();
        ws
    }

    #[test]
    fn children_are_sorted_by_name() {
        let ws = workspace();
        ws.add_file(&p("/app/c")).unwrap();
        ws.add_folder(&p("/app/a")).unwrap();
        ws.add_file(&p("/app/b")).unwrap();

        let children = ws.children_of(&p("/app")).unwrap();
        assert_eq!(
            children,
            ChildSet::Known(vec![p("/app/a"), p("/app/b"), p("/app/c")])
        );
    }

    #[test]
    fn new_projects_have_unknown_children() {
        let ws = InMemoryWorkspace::new();
        let app = ws.add_project("app", "/data/app").unwrap();
        assert_eq!(ws.children_of(&app).unwrap(), ChildSet::Unknown);

        ws.mark_children_known(&app).unwrap();
        assert_eq!(ws.children_of(&app).unwrap(), ChildSet::Known(vec![]));
    }

    #[test]
    fn locations_are_inherited() {
        let ws = workspace();
        ws.add_folder(&p("/app/src")).unwrap();
        ws.add_file(&p("/app/src/main.rs")).unwrap();
        assert_eq!(
            ws.location(&p("/app/src/main.rs")),
            Some(PathBuf::from("/data/app/src/main.rs"))
        );
        assert_eq!(ws.location(&ResourcePath::root()), None);
    }

    #[test]
    fn linked_resources_report_their_target() {
        let ws = workspace();
        ws.add_link(
            &p("/app/vendor"),
            ResourceKind::Folder,
            Relocation::Target("/opt/vendor".into()),
        )
        .unwrap();
        ws.add_file(&p("/app/vendor/lib.rs")).unwrap();
        ws.add_link(&p("/app/ghost"), ResourceKind::File, Relocation::Undefined)
            .unwrap();

        assert_eq!(
            ws.relocation(&p("/app/vendor")),
            Some(Relocation::Target("/opt/vendor".into()))
        );
        assert_eq!(
            ws.location(&p("/app/vendor/lib.rs")),
            Some(PathBuf::from("/opt/vendor/lib.rs"))
        );
        assert_eq!(ws.location(&p("/app/ghost")), None);
        assert_eq!(ws.relocation(&p("/app")), None);
    }

    #[test]
    fn placement_rules_are_enforced() {
        let ws = workspace();
        ws.add_file(&p("/app/f")).unwrap();

        assert!(matches!(
            ws.add_file(&p("/app/f/inner")),
            Err(ModelError::NotAContainer { .. })
        ));
        assert!(matches!(
            ws.add_file(&p("/loose")),
            Err(ModelError::InvalidPlacement { .. })
        ));
        assert!(matches!(
            ws.add_file(&p("/app/f")),
            Err(ModelError::AlreadyExists(_))
        ));
        assert!(matches!(
            ws.add_file(&p("/app/missing/x")),
            Err(ModelError::NotFound(_))
        ));
    }

    #[test]
    fn remove_drops_subtree() {
        let ws = workspace();
        ws.add_folder(&p("/app/src")).unwrap();
        ws.add_file(&p("/app/src/main.rs")).unwrap();
        ws.add_file(&p("/app/srcfile")).unwrap();

        ws.remove(&p("/app/src")).unwrap();
        assert!(!ws.exists(&p("/app/src/main.rs")));
        assert!(ws.exists(&p("/app/srcfile")));
        assert_eq!(
            ws.children_of(&p("/app")).unwrap(),
            ChildSet::Known(vec![p("/app/srcfile")])
        );
        assert!(matches!(
            ws.remove(&p("/app/src")),
            Err(ModelError::NotFound(_))
        ));
        assert!(ws.remove(&ResourcePath::root()).is_err());
    }

    #[test]
    fn projects_lists_only_projects() {
        let ws = workspace();
        ws.add_project("lib", "/data/lib").unwrap();
        ws.add_folder(&p("/app/src")).unwrap();
        assert_eq!(ws.projects(), vec![p("/app"), p("/lib")]);
        assert_eq!(ws.resources().len(), 3);
    }
}
