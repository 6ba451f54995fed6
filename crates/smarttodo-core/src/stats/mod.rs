//! Statistics module for Smart Todo
//!
//! This module provides completion analytics over task snapshots: per-day,
//! per-weekday and per-hour completion counts, completion velocity, average
//! completion time and the procrastination score.

mod cache;
mod completion;
mod velocity;

pub use cache::ReportCache;

pub use completion::{
    aggregate, AnalyticsAggregator, AnalyticsReport, DayBucket, HourBucket, VelocityEntry,
    WeekdayBucket, WEEKDAY_NAMES,
};

pub use velocity::VelocityBucket;
