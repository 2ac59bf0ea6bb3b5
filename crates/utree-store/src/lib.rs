//! Physical file-store capability for unified tree traversal.
//!
//! The traversal engine never touches a file system directly. It asks a
//! [`FileStore`] for directory listings and entry metadata, which keeps the
//! merge logic testable against an in-memory tree and lets embedders plug in
//! other backends.
//!
//! # Storage Backends
//!
//! All backends implement the [`FileStore`] trait:
//!
//! - [`LocalFileStore`] -- `std::fs`-backed store for real directories
//! - [`InMemoryFileStore`] -- map-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Listings are unordered; callers sort them.
//! 2. A listing of something that is not an existing directory is `None`,
//!    not an error.
//! 3. `stat` never fails: an unreadable entry is reported as missing.

pub mod entry;
pub mod error;
pub mod local;
pub mod memory;
pub mod traits;

pub use entry::{EntryInfo, StoreEntry};
pub use error::{StoreError, StoreResult};
pub use local::LocalFileStore;
pub use memory::InMemoryFileStore;
pub use traits::FileStore;
