use std::path::Path;

use crate::entry::{EntryInfo, StoreEntry};
use crate::error::StoreResult;

/// A hierarchical physical store such as a local file system.
///
/// All implementations must satisfy these invariants:
/// - `child_names` returns `Ok(None)` when the entry is not an existing
///   directory. `Err` is reserved for a directory that exists but cannot be
///   listed.
/// - Names are returned in no particular order and without duplicates.
/// - `stat` is total: anything that cannot be inspected is reported missing.
pub trait FileStore: Send + Sync {
    /// Turn an absolute location into an entry handle.
    ///
    /// The entry need not exist. Fails for relative locations.
    fn locate(&self, location: &Path) -> StoreResult<StoreEntry>;

    /// Inspect an entry.
    fn stat(&self, entry: &StoreEntry) -> EntryInfo;

    /// List the names of an entry's children.
    fn child_names(&self, entry: &StoreEntry) -> StoreResult<Option<Vec<String>>>;

    /// Resolve the child `name` of `parent`.
    fn resolve(&self, parent: &StoreEntry, name: &str) -> StoreEntry {
        parent.child(name)
    }

    /// Returns `true` if the entry exists.
    fn exists(&self, entry: &StoreEntry) -> bool {
        self.stat(entry).exists
    }

    /// Returns `true` if the entry exists and is a directory.
    fn is_directory(&self, entry: &StoreEntry) -> bool {
        self.stat(entry).directory
    }
}
