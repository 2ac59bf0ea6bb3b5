use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::entry::{EntryInfo, StoreEntry};
use crate::error::{StoreError, StoreResult};
use crate::traits::FileStore;

#[derive(Debug)]
enum MemoryNode {
    File,
    Directory(HashSet<String>),
}

/// In-memory file store.
///
/// Intended for tests and embedding. Directories keep their children in a
/// `HashSet`, so listings come back in arbitrary order just like a real
/// directory read. Parent directories are created on demand.
pub struct InMemoryFileStore {
    nodes: RwLock<HashMap<PathBuf, MemoryNode>>,
    failing: RwLock<HashSet<PathBuf>>,
}

impl InMemoryFileStore {
    /// Create an empty store containing only the `/` directory.
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(PathBuf::from("/"), MemoryNode::Directory(HashSet::new()));
        Self {
            nodes: RwLock::new(nodes),
            failing: RwLock::new(HashSet::new()),
        }
    }

    /// Add a directory (and any missing parents).
    pub fn add_dir(&self, location: impl AsRef<Path>) -> StoreResult<()> {
        let location = absolute(location.as_ref())?;
        let mut nodes = self.nodes.write().expect("lock poisoned");
        insert(&mut nodes, &location, false)
    }

    /// Add a file (and any missing parent directories).
    pub fn add_file(&self, location: impl AsRef<Path>) -> StoreResult<()> {
        let location = absolute(location.as_ref())?;
        let mut nodes = self.nodes.write().expect("lock poisoned");
        insert(&mut nodes, &location, true)
    }

    /// Remove an entry and everything below it. Returns `true` if it existed.
    pub fn remove(&self, location: impl AsRef<Path>) -> bool {
        let location = location.as_ref();
        let mut nodes = self.nodes.write().expect("lock poisoned");
        if nodes.remove(location).is_none() {
            return false;
        }
        nodes.retain(|path, _| !path.starts_with(location));
        if let (Some(parent), Some(name)) = (location.parent(), location.file_name()) {
            if let Some(MemoryNode::Directory(children)) = nodes.get_mut(parent) {
                children.remove(name.to_string_lossy().as_ref());
            }
        }
        true
    }

    /// Make every listing of `location` fail with an I/O error.
    pub fn fail_listing(&self, location: impl AsRef<Path>) {
        self.failing
            .write()
            .expect("lock poisoned")
            .insert(location.as_ref().to_path_buf());
    }

    /// Number of entries, including the `/` directory.
    pub fn len(&self) -> usize {
        self.nodes.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds nothing but `/`.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for InMemoryFileStore {
    fn default() -> Self {
        Self::new()
    }
}

fn absolute(location: &Path) -> StoreResult<PathBuf> {
    if !location.is_absolute() {
        return Err(StoreError::RelativeLocation(location.to_path_buf()));
    }
    Ok(location.to_path_buf())
}

fn insert(nodes: &mut HashMap<PathBuf, MemoryNode>, location: &Path, file: bool) -> StoreResult<()> {
    if let Some(parent) = location.parent() {
        if !matches!(nodes.get(parent), Some(MemoryNode::Directory(_))) {
            insert(nodes, parent, false)?;
        }
        let name = location
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| StoreError::NotFound(location.to_path_buf()))?;
        match nodes.get_mut(parent) {
            Some(MemoryNode::Directory(children)) => {
                children.insert(name);
            }
            _ => return Err(StoreError::NotFound(parent.to_path_buf())),
        }
    }

    let node = if file {
        MemoryNode::File
    } else {
        MemoryNode::Directory(HashSet::new())
    };
    match nodes.get(location) {
        Some(MemoryNode::Directory(_)) if !file => {}
        _ => {
            nodes.insert(location.to_path_buf(), node);
        }
    }
    Ok(())
}

impl FileStore for InMemoryFileStore {
    fn locate(&self, location: &Path) -> StoreResult<StoreEntry> {
        Ok(StoreEntry::new(absolute(location)?))
    }

    fn stat(&self, entry: &StoreEntry) -> EntryInfo {
        match self.nodes.read().expect("lock poisoned").get(entry.location()) {
            Some(MemoryNode::File) => EntryInfo::FILE,
            Some(MemoryNode::Directory(_)) => EntryInfo::DIRECTORY,
            None => EntryInfo::MISSING,
        }
    }

    fn child_names(&self, entry: &StoreEntry) -> StoreResult<Option<Vec<String>>> {
        if self
            .failing
            .read()
            .expect("lock poisoned")
            .contains(entry.location())
        {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("cannot list {}", entry.location().display()),
            )));
        }
        let nodes = self.nodes.read().expect("lock poisoned");
        match nodes.get(entry.location()) {
            Some(MemoryNode::Directory(children)) => Ok(Some(children.iter().cloned().collect())),
            _ => Ok(None),
        }
    }
}

impl std::fmt::Debug for InMemoryFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryFileStore")
            .field("entry_count", &self.len())
            .finish()
    }
}
