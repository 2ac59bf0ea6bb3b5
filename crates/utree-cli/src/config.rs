use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use utree_types::Depth;

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE: &str = "utree.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Workspace snapshot file.
    pub workspace: PathBuf,
    /// Default traversal depth for `tree` and `status`.
    pub depth: Depth,
    pub follow_symlinks: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from(".utree/workspace.json"),
            depth: Depth::Infinite,
            follow_symlinks: false,
        }
    }
}

impl CliConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `explicit`, or `utree.toml` if it exists, or the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None if Path::new(CONFIG_FILE).is_file() => PathBuf::from(CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Apply command-line overrides on top of the file values.
    pub fn with_overrides(mut self, workspace: Option<PathBuf>, follow_symlinks: bool) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }
        self.follow_symlinks |= follow_symlinks;
        self
    }
}
