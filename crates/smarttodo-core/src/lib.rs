//! # Smart Todo Core Library
//!
//! This library provides the computational core of the Smart Todo task
//! tracker. Task storage, sign-in and the chat assistant live elsewhere; the
//! core reads snapshots of a user's tasks and derives two things from them.
//!
//! ## Architecture
//!
//! - **Priority Scorer**: importance and due-date heuristics that order the
//!   open-task list, plus the plain importance-tier ordering
//! - **Analytics Aggregator**: completion counts by date, weekday and hour,
//!   completion velocity, average completion time and procrastination score
//! - **Task Store seam**: the [`TaskSource`] trait, an in-memory reference
//!   store and a JSON snapshot loader
//! - **Storage**: TOML-based configuration
//!
//! Both engines are pure: they take `&[Task]` plus any explicit parameters
//! (such as the current time) and never touch the clock, disk or network.
//!
//! ## Key Components
//!
//! - [`PriorityCalculator`]: task scoring and ordering
//! - [`AnalyticsAggregator`]: completion analytics
//! - [`InMemoryTaskStore`]: reference task store
//! - [`Config`]: application configuration management

pub mod error;
pub mod priority;
pub mod snapshot;
pub mod stats;
pub mod storage;
pub mod store;
pub mod task;

pub use error::{ConfigError, CoreError, SnapshotError, StoreError};
pub use priority::{
    prioritize, sort_by_importance, PriorityCalculator, PriorityConfig, PriorityWeights,
    ScoreBreakdown, ScoredTask,
};
pub use stats::{
    aggregate, AnalyticsAggregator, AnalyticsReport, DayBucket, HourBucket, ReportCache,
    VelocityBucket, VelocityEntry, WeekdayBucket,
};
pub use storage::Config;
pub use store::{InMemoryTaskStore, TaskSnapshot, TaskSource, TaskUpdate};
pub use task::{Importance, ImportanceLevel, Task};
