//! Task store seam.
//!
//! The scoring and analytics engines only ever see a [`TaskSnapshot`]. Where
//! the snapshot comes from is the job of a [`TaskSource`]: a JSON file for
//! the CLI, or [`InMemoryTaskStore`] for embedding and tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::task::{Importance, Task};

/// An ordered, point-in-time copy of a user's tasks.
///
/// `revision` changes whenever the underlying collection changes, so it can
/// key memoized results (see [`crate::stats::ReportCache`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub revision: u64,
    pub tasks: Vec<Task>,
}

/// Anything that can hand out task snapshots.
pub trait TaskSource: Send + Sync {
    /// Current snapshot, newest task first.
    fn snapshot(&self) -> Result<TaskSnapshot>;
}

/// Partial update for [`InMemoryTaskStore::update_task`].
#[derive(Debug, Clone, Default)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub importance: Option<Importance>,
    /// `Some(None)` clears the due date.
    pub due_at: Option<Option<DateTime<Utc>>>,
    pub completed: Option<bool>,
}

/// Reference task store kept in memory.
///
/// Applies the same rules the hosted store does: new tasks start open with
/// numeric importance folded into a category, `completed_at` follows the
/// completion toggle, and every mutation bumps the revision.
#[derive(Debug, Default)]
pub struct InMemoryTaskStore {
    tasks: Vec<Task>,
    revision: u64,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks, revision: 1 }
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Create an open task.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidValue`] when the title is blank.
    pub fn add_task(
        &mut self,
        title: &str,
        description: &str,
        importance: Importance,
        due_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<Task, StoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidValue {
                field: "title".into(),
                message: "must not be empty".into(),
            });
        }

        let importance = match importance {
            Importance::Numeric(value) => Importance::from_slider(value),
            other => other,
        };

        let mut task = Task::new(Uuid::new_v4().to_string(), title, importance, now)
            .with_description(description);
        task.due_at = due_at;

        self.tasks.push(task.clone());
        self.bump();
        tracing::debug!(id = %task.id, "task added");
        Ok(task)
    }

    /// Flip the completion flag of a task.
    ///
    /// # Errors
    /// Returns [`StoreError::TaskNotFound`] for an unknown id.
    pub fn toggle_complete(&mut self, id: &str, now: DateTime<Utc>) -> Result<&Task, StoreError> {
        let index = self.index_of(id)?;
        let completed = !self.tasks[index].completed;
        self.tasks[index].set_completed(completed, now);
        self.bump();
        Ok(&self.tasks[index])
    }

    /// Apply a partial update.
    ///
    /// # Errors
    /// Returns [`StoreError::TaskNotFound`] for an unknown id and
    /// [`StoreError::InvalidValue`] for a blank title.
    pub fn update_task(
        &mut self,
        id: &str,
        update: TaskUpdate,
        now: DateTime<Utc>,
    ) -> Result<&Task, StoreError> {
        let index = self.index_of(id)?;
        if let Some(title) = &update.title {
            if title.trim().is_empty() {
                return Err(StoreError::InvalidValue {
                    field: "title".into(),
                    message: "must not be empty".into(),
                });
            }
        }

        let task = &mut self.tasks[index];
        if let Some(title) = update.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = update.description {
            task.description = description;
        }
        if let Some(importance) = update.importance {
            task.importance = importance;
        }
        if let Some(due_at) = update.due_at {
            task.due_at = due_at;
        }
        match update.completed {
            Some(completed) => task.set_completed(completed, now),
            None => task.updated_at = Some(now),
        }

        self.bump();
        Ok(&self.tasks[index])
    }

    /// Delete a task.
    ///
    /// # Errors
    /// Returns [`StoreError::TaskNotFound`] for an unknown id.
    pub fn remove_task(&mut self, id: &str) -> Result<Task, StoreError> {
        let index = self.index_of(id)?;
        let task = self.tasks.remove(index);
        self.bump();
        Ok(task)
    }

    fn index_of(&self, id: &str) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or_else(|| StoreError::TaskNotFound { id: id.to_string() })
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}

impl TaskSource for InMemoryTaskStore {
    fn snapshot(&self) -> Result<TaskSnapshot> {
        let mut tasks = self.tasks.clone();
        // Newest first; undated records last.
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(TaskSnapshot {
            revision: self.revision,
            tasks,
        })
    }
}
