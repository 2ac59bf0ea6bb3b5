//! Serialisable form of an [`InMemoryWorkspace`].
//!
//! Snapshots list resources in path order, so every parent appears before
//! its children and a snapshot can be replayed into an empty workspace.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use utree_types::{ResourceKind, ResourcePath};

use crate::error::{ModelError, ModelResult};
use crate::memory::{InMemoryWorkspace, ResourceInfo};
use crate::types::Relocation;

/// One resource in a [`WorkspaceSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub path: ResourcePath,
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relocation: Option<Relocation>,
    #[serde(default)]
    pub children_unknown: bool,
}

/// A point-in-time copy of a workspace's resources.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSnapshot {
    pub resources: Vec<SnapshotEntry>,
}

impl WorkspaceSnapshot {
    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> ModelResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ModelError::Serialization(e.to_string()))
    }

    /// Decode from JSON.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        serde_json::from_str(json).map_err(|e| ModelError::Serialization(e.to_string()))
    }
}

impl InMemoryWorkspace {
    /// Capture every resource except the root.
    pub fn snapshot(&self) -> WorkspaceSnapshot {
        let resources = self.with_entries(|entries| {
            entries
                .iter()
                .filter(|(path, _)| !path.is_root())
                .map(|(path, info)| SnapshotEntry {
                    path: path.clone(),
                    kind: info.kind,
                    location: info.location.clone(),
                    relocation: info.relocation.clone(),
                    children_unknown: info.children_unknown,
                })
                .collect()
        });
        WorkspaceSnapshot { resources }
    }

    /// Rebuild a workspace from a snapshot.
    pub fn from_snapshot(snapshot: &WorkspaceSnapshot) -> ModelResult<Self> {
        let workspace = Self::new();
        let mut entries: Vec<&SnapshotEntry> = snapshot.resources.iter().collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));

        for entry in entries {
            let info = ResourceInfo {
                kind: entry.kind,
                children: Default::default(),
                children_unknown: entry.children_unknown,
                location: entry.location.clone(),
                relocation: entry.relocation.clone(),
            };
            workspace.insert(&entry.path, info)?;
        }
        Ok(workspace)
    }
}
