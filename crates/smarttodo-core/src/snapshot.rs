//! Loading task snapshots from JSON.
//!
//! Accepts either a bare array of task documents or an object with a
//! `tasks` array (the shape written by store exports).

use serde::Deserialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Result, SnapshotError};
use crate::store::{TaskSnapshot, TaskSource};
use crate::task::Task;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotDocument {
    List(Vec<Task>),
    Wrapped { tasks: Vec<Task> },
}

impl SnapshotDocument {
    fn into_tasks(self) -> Vec<Task> {
        match self {
            SnapshotDocument::List(tasks) | SnapshotDocument::Wrapped { tasks } => tasks,
        }
    }
}

/// Parse a snapshot from JSON text.
///
/// The revision is a hash of the text, so identical content yields an
/// identical revision.
pub fn from_str(content: &str) -> Result<TaskSnapshot, SnapshotError> {
    let document: SnapshotDocument = serde_json::from_str(content)?;
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);

    Ok(TaskSnapshot {
        revision: hasher.finish(),
        tasks: document.into_tasks(),
    })
}

/// Parse a snapshot from any reader (e.g. stdin).
pub fn from_reader<R: Read>(mut reader: R) -> Result<TaskSnapshot, SnapshotError> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .map_err(|source| SnapshotError::ReadFailed {
            path: PathBuf::from("-"),
            source,
        })?;
    from_str(&content)
}

/// Parse a snapshot file.
pub fn load_path(path: &Path) -> Result<TaskSnapshot, SnapshotError> {
    let content = std::fs::read_to_string(path).map_err(|source| SnapshotError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    let snapshot = from_str(&content)?;
    tracing::debug!(path = %path.display(), tasks = snapshot.tasks.len(), "loaded snapshot");
    Ok(snapshot)
}

/// A task source backed by a JSON file, re-read on every snapshot.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TaskSource for FileSource {
    fn snapshot(&self) -> Result<TaskSnapshot> {
        Ok(load_path(&self.path)?)
    }
}
