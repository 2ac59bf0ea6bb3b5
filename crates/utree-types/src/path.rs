use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Absolute, `/`-separated position in the logical namespace.
///
/// `/` is the workspace root, `/app` a project and `/app/src/main.rs` a file
/// inside it. A path never ends with a separator (except the root) and never
/// contains empty, `.` or `..` segments.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ResourcePath(String);

impl ResourcePath {
    /// The workspace root.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Parse and validate an absolute resource path.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let invalid = |reason: &str| TypeError::InvalidPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };

        if s == "/" {
            return Ok(Self::root());
        }
        if !s.starts_with('/') {
            return Err(invalid("must be absolute"));
        }
        if s.ends_with('/') {
            return Err(invalid("must not end with '/'"));
        }
        if s.contains('\0') {
            return Err(invalid("must not contain NUL"));
        }
        for segment in s[1..].split('/') {
            match segment {
                "" => return Err(invalid("segments must not be empty")),
                "." | ".." => return Err(invalid("relative segments are not allowed")),
                _ => {}
            }
        }
        Ok(Self(s.to_string()))
    }

    /// Path of the child `name` below this one.
    ///
    /// `name` must be a single segment; names reported by a store or a model
    /// already are.
    pub fn child(&self, name: &str) -> Self {
        debug_assert!(!name.is_empty() && !name.contains('/'));
        if self.is_root() {
            Self(format!("/{name}"))
        } else {
            Self(format!("{}/{name}", self.0))
        }
    }

    /// The parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind('/') {
            Some(0) => Some(Self::root()),
            Some(idx) => Some(Self(self.0[..idx].to_string())),
            None => None,
        }
    }

    /// The last segment; empty for the root.
    pub fn name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => "",
        }
    }

    /// Returns `true` for the workspace root.
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Iterate over the segments from the top down.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Returns `true` if `other` is this path or lies below it.
    pub fn is_prefix_of(&self, other: &ResourcePath) -> bool {
        if self.is_root() {
            return true;
        }
        match other.0.strip_prefix(self.0.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    /// The path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourcePath({})", self.0)
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ResourcePath {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.0
    }
}

impl std::str::FromStr for ResourcePath {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
