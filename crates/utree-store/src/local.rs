use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use tracing::warn;

use crate::entry::{EntryInfo, StoreEntry};
use crate::error::{StoreError, StoreResult};
use crate::traits::FileStore;

/// File store backed by the local file system.
///
/// Symbolic links are not followed by default: a link to a directory is
/// reported as a plain entry, so a link cycle on disk cannot make a
/// traversal run forever.
#[derive(Clone, Debug, Default)]
pub struct LocalFileStore {
    follow_symlinks: bool,
}

impl LocalFileStore {
    /// Create a store that does not follow symbolic links.
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose whether symbolic links are followed when inspecting entries.
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    fn metadata(&self, path: &Path) -> io::Result<fs::Metadata> {
        if self.follow_symlinks {
            fs::metadata(path)
        } else {
            fs::symlink_metadata(path)
        }
    }
}

impl FileStore for LocalFileStore {
    fn locate(&self, location: &Path) -> StoreResult<StoreEntry> {
        if !location.is_absolute() {
            return Err(StoreError::RelativeLocation(location.to_path_buf()));
        }
        Ok(StoreEntry::new(location))
    }

    fn stat(&self, entry: &StoreEntry) -> EntryInfo {
        match self.metadata(entry.location()) {
            Ok(meta) => EntryInfo {
                exists: true,
                directory: meta.is_dir(),
            },
            Err(_) => EntryInfo::MISSING,
        }
    }

    fn child_names(&self, entry: &StoreEntry) -> StoreResult<Option<Vec<String>>> {
        if !self.stat(entry).directory {
            return Ok(None);
        }
        let dir = match fs::read_dir(entry.location()) {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let names = readable_names(entry.location(), dir.map(|child| child.map(|c| c.file_name())));
        Ok(Some(names))
    }
}

/// Collect the UTF-8 names of a listing. Entries that fail to read or whose
/// names are not UTF-8 are skipped rather than failing the whole listing.
fn readable_names(
    parent: &Path,
    children: impl Iterator<Item = io::Result<OsString>>,
) -> Vec<String> {
    let mut names = Vec::new();
    for child in children {
        let raw = match child {
            Ok(raw) => raw,
            Err(e) => {
                warn!(parent = %parent.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        match raw.into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                warn!(
                    parent = %parent.display(),
                    name = ?raw,
                    "skipping entry with non-UTF-8 name"
                );
            }
        }
    }
    names
}
