//! Task priority calculation module.
//!
//! Scores open tasks from two factors:
//! - User-defined importance (weight on the 1-10 scale, multiplied by 5)
//! - Due date proximity (overdue or due today = 50, then a linear decay that
//!   reaches 0 thirty days out)
//!
//! The current time is always supplied by the caller; nothing in here reads
//! the system clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Priority calculation weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityWeights {
    /// Multiplier applied to the importance weight (default 5.0)
    #[serde(default = "default_importance_multiplier")]
    pub importance_multiplier: f64,
    /// Score for tasks due today or overdue (default 50.0)
    #[serde(default = "default_overdue_score")]
    pub overdue_score: f64,
    /// Days until the due-date score decays to zero (default 30)
    #[serde(default = "default_due_horizon_days")]
    pub due_horizon_days: i64,
}

fn default_importance_multiplier() -> f64 {
    5.0
}
fn default_overdue_score() -> f64 {
    50.0
}
fn default_due_horizon_days() -> i64 {
    30
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            importance_multiplier: default_importance_multiplier(),
            overdue_score: default_overdue_score(),
            due_horizon_days: default_due_horizon_days(),
        }
    }
}

/// Priority calculation configuration
#[derive(Debug, Clone)]
pub struct PriorityConfig {
    /// Weights for each factor
    pub weights: PriorityWeights,
    /// Current time for due date calculations
    pub current_time: DateTime<Utc>,
}

impl PriorityConfig {
    /// Default weights evaluated at `now`.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            weights: PriorityWeights::default(),
            current_time: now,
        }
    }
}

/// The two components of a task's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub importance_score: f64,
    pub due_score: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.importance_score + self.due_score
    }
}

/// An open task annotated with its priority score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredTask {
    #[serde(flatten)]
    pub task: Task,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
}

/// Priority calculator for tasks
#[derive(Debug, Clone)]
pub struct PriorityCalculator {
    config: PriorityConfig,
}

impl PriorityCalculator {
    /// Calculator with default weights evaluated at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            config: PriorityConfig::at(now),
        }
    }

    /// Create with custom config
    pub fn with_config(config: PriorityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PriorityConfig {
        &self.config
    }

    /// Importance component: weight (1-10) times the multiplier.
    pub fn importance_score(&self, task: &Task) -> f64 {
        task.importance.weight() * self.config.weights.importance_multiplier
    }

    /// Due date component.
    ///
    /// Whole days until due are truncated toward zero, so anything due
    /// within the next 24 hours counts as due today.
    ///
    /// - No due date: 0
    /// - Due today or overdue: `overdue_score`
    /// - Otherwise: `horizon - days`, floored at 0
    pub fn due_score(&self, task: &Task) -> f64 {
        let Some(due_at) = task.due_at else {
            return 0.0;
        };

        let days_until = due_at
            .signed_duration_since(self.config.current_time)
            .num_days();

        if days_until <= 0 {
            self.config.weights.overdue_score
        } else {
            self.config
                .weights
                .due_horizon_days
                .saturating_sub(days_until)
                .max(0) as f64
        }
    }

    pub fn breakdown(&self, task: &Task) -> ScoreBreakdown {
        ScoreBreakdown {
            importance_score: self.importance_score(task),
            due_score: self.due_score(task),
        }
    }

    /// Calculate the priority score for a task.
    pub fn score(&self, task: &Task) -> f64 {
        self.breakdown(task).total()
    }

    /// Open tasks with scores, highest first.
    ///
    /// Completed tasks are dropped. Equal scores keep their input order.
    pub fn prioritize(&self, tasks: &[Task]) -> Vec<ScoredTask> {
        let mut scored: Vec<ScoredTask> = tasks
            .iter()
            .filter(|task| !task.completed)
            .map(|task| {
                let breakdown = self.breakdown(task);
                ScoredTask {
                    task: task.clone(),
                    score: breakdown.total(),
                    breakdown,
                }
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        tracing::debug!(
            input = tasks.len(),
            open = scored.len(),
            now = %self.config.current_time,
            "prioritized tasks"
        );
        scored
    }
}

/// Convenience function: prioritize with default weights at `now`.
pub fn prioritize(tasks: &[Task], now: DateTime<Utc>) -> Vec<ScoredTask> {
    PriorityCalculator::new(now).prioritize(tasks)
}

/// Plain task list ordering: importance tier first (High, Medium, Low),
/// then earliest due date within a tier.
///
/// Only tasks that both carry a due date are ordered against each other;
/// undated tasks keep their position within the tier. Completed tasks are
/// included.
pub fn sort_by_importance(tasks: &[Task]) -> Vec<Task> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| b.importance.rank().cmp(&a.importance.rank()));

    let mut start = 0;
    while start < sorted.len() {
        let rank = sorted[start].importance.rank();
        let end = sorted[start..]
            .iter()
            .position(|task| task.importance.rank() != rank)
            .map_or(sorted.len(), |offset| start + offset);

        let tier = &mut sorted[start..end];
        let slots: Vec<usize> = tier
            .iter()
            .enumerate()
            .filter(|(_, task)| task.due_at.is_some())
            .map(|(index, _)| index)
            .collect();
        let mut dated: Vec<Task> = slots.iter().map(|&index| tier[index].clone()).collect();
        dated.sort_by_key(|task| task.due_at);
        for (slot, task) in slots.into_iter().zip(dated) {
            tier[slot] = task;
        }

        start = end;
    }

    sorted
}
