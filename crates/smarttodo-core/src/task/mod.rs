//! Task record as delivered by the task store.
//!
//! The core never owns tasks; it reads snapshots of them. The only mutation
//! helper here, [`Task::set_completed`], exists so that stores can apply the
//! completion toggle with the `completed_at` bookkeeping in one place.

mod importance;

pub use importance::{Importance, ImportanceLevel};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A single task.
///
/// Field names follow the store's camelCase document shape (`dueAt`,
/// `createdAt`, `completedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub importance: Importance,
    #[serde(default)]
    pub due_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Set exactly when `completed` flips to true, cleared when it flips back.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create an open task stamped with `now`.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        importance: impl Into<Importance>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            importance: importance.into(),
            due_at: None,
            completed: false,
            created_at: Some(now),
            updated_at: Some(now),
            completed_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_due(mut self, due_at: DateTime<Utc>) -> Self {
        self.due_at = Some(due_at);
        self
    }

    /// Mark completed at `at`, keeping `completed_at` in step.
    pub fn finished_at(mut self, at: DateTime<Utc>) -> Self {
        self.set_completed(true, at);
        self
    }

    /// Apply a completion toggle.
    ///
    /// `completed_at` is stamped only on the open -> done transition and
    /// cleared on done -> open. Setting the current value again is a no-op
    /// apart from `updated_at`.
    pub fn set_completed(&mut self, completed: bool, now: DateTime<Utc>) {
        if completed != self.completed {
            self.completed = completed;
            self.completed_at = completed.then_some(now);
        }
        self.updated_at = Some(now);
    }

    /// Time from creation to completion, when both are known.
    pub fn completion_latency(&self) -> Option<Duration> {
        let created = self.created_at?;
        let done = self.completed_at?;
        Some(done.signed_duration_since(created))
    }

    /// Whether a completed task finished strictly after its due date.
    /// `None` when the task has no due date or is not completed.
    pub fn finished_late(&self) -> Option<bool> {
        let due = self.due_at?;
        let done = self.completed_at?;
        Some(done > due)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
