//! Foundation types for unified tree traversal.
//!
//! This crate provides the small value types shared by the physical store,
//! the logical resource model and the traversal engine. Every other utree
//! crate depends on `utree-types`.
//!
//! # Key Types
//!
//! - [`ResourcePath`] — Absolute position in the logical namespace
//! - [`ResourceKind`] — File, folder, project or workspace root
//! - [`Depth`] — How many BFS levels a traversal may reach

pub mod depth;
pub mod error;
pub mod kind;
pub mod path;

pub use depth::Depth;
pub use error::TypeError;
pub use kind::ResourceKind;
pub use path::ResourcePath;
