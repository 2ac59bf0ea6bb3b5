use serde::{Deserialize, Serialize};

/// The kind of a logical resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A plain file. The only kind that can never have children.
    File,
    /// A folder inside a project.
    Folder,
    /// A top-level project with its own physical location.
    Project,
    /// The workspace root holding all projects.
    Root,
}

impl ResourceKind {
    /// Returns `true` if resources of this kind may have children.
    pub fn is_container(self) -> bool {
        !matches!(self, Self::File)
    }

    /// Returns `true` for projects and the workspace root.
    pub fn is_project_like(self) -> bool {
        matches!(self, Self::Project | Self::Root)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Folder => "folder",
            Self::Project => "project",
            Self::Root => "root",
        };
        f.write_str(s)
    }
}
