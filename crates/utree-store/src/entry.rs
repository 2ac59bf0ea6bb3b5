use std::fmt;
use std::path::{Path, PathBuf};

/// Handle to an entry in a physical store.
///
/// A handle is only an address: it does not imply the entry exists. Use
/// [`FileStore::stat`](crate::FileStore::stat) to find out.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreEntry {
    location: PathBuf,
}

impl StoreEntry {
    /// Create a handle for an absolute location.
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    /// The absolute location of this entry.
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// The final component of the location, if it is valid UTF-8.
    pub fn name(&self) -> Option<&str> {
        self.location.file_name().and_then(|n| n.to_str())
    }

    /// Handle for the child `name` of this entry.
    pub fn child(&self, name: &str) -> Self {
        Self {
            location: self.location.join(name),
        }
    }
}

impl fmt::Debug for StoreEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreEntry({})", self.location.display())
    }
}

/// Metadata captured by a single stat of a store entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EntryInfo {
    /// The entry exists.
    pub exists: bool,
    /// The entry exists and is a directory.
    pub directory: bool,
}

impl EntryInfo {
    /// Info for an entry that does not exist.
    pub const MISSING: Self = Self {
        exists: false,
        directory: false,
    };

    /// Info for an existing regular file.
    pub const FILE: Self = Self {
        exists: true,
        directory: false,
    };

    /// Info for an existing directory.
    pub const DIRECTORY: Self = Self {
        exists: true,
        directory: true,
    };
}
