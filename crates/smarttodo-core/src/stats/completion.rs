//! Completion analytics.
//!
//! Buckets completed tasks by calendar date, weekday, hour of day and
//! creation-to-completion latency, and derives the summary figures shown on
//! the analytics dashboard.

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Offset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::velocity::VelocityBucket;
use crate::task::Task;

/// Weekday names, Sunday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Tasks completed on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayBucket {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: usize,
    /// Completed tasks for drill-down, in input order
    pub tasks: Vec<Task>,
}

/// Completions on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayBucket {
    pub day: String,
    pub count: usize,
}

/// Completions within one hour of the day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBucket {
    /// `H:00`, e.g. `9:00`, `14:00`
    pub hour: String,
    pub count: usize,
}

/// One non-empty velocity bucket.
///
/// Serialized as `{ days, count }`; `bucket` is recovered from the label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "VelocityRow")]
pub struct VelocityEntry {
    #[serde(skip_serializing)]
    pub bucket: VelocityBucket,
    /// Chart label for `bucket`
    pub days: String,
    pub count: usize,
}

#[derive(Deserialize)]
struct VelocityRow {
    days: String,
    count: usize,
}

impl TryFrom<VelocityRow> for VelocityEntry {
    type Error = String;

    fn try_from(row: VelocityRow) -> Result<Self, Self::Error> {
        let bucket = VelocityBucket::from_label(&row.days)
            .ok_or_else(|| format!("unknown velocity label: {}", row.days))?;
        Ok(Self {
            bucket,
            days: row.days,
            count: row.count,
        })
    }
}

/// Analytics payload consumed by the dashboard charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// One entry per date with completions, ascending
    pub per_day: Vec<DayBucket>,
    /// Always seven entries, Sunday to Saturday
    #[serde(rename = "perDOW")]
    pub per_dow: Vec<WeekdayBucket>,
    /// Only hours with at least one completion, ascending
    pub per_hour: Vec<HourBucket>,
    pub avg_completion_days: f64,
    /// Percentage of dated completions that finished after their due date
    pub procrastination_score: u32,
    pub total_completed: usize,
    /// Non-empty buckets in chart order
    pub completion_velocity: Vec<VelocityEntry>,
}

impl AnalyticsReport {
    /// Weekday with the most completions. First wins on ties.
    pub fn busiest_day(&self) -> Option<&WeekdayBucket> {
        self.per_dow
            .iter()
            .filter(|bucket| bucket.count > 0)
            .fold(None, |best: Option<&WeekdayBucket>, bucket| match best {
                Some(b) if b.count >= bucket.count => Some(b),
                _ => Some(bucket),
            })
    }

    /// Hour buckets sorted by count, highest first.
    pub fn peak_hours(&self, limit: usize) -> Vec<&HourBucket> {
        let mut peaks: Vec<_> = self.per_hour.iter().collect();
        peaks.sort_by(|a, b| b.count.cmp(&a.count));
        peaks.into_iter().take(limit).collect()
    }

    /// Tasks completed on `date` (`YYYY-MM-DD`).
    pub fn tasks_on(&self, date: &str) -> &[Task] {
        self.per_day
            .iter()
            .find(|bucket| bucket.date == date)
            .map(|bucket| bucket.tasks.as_slice())
            .unwrap_or(&[])
    }

    /// Plain-text dashboard.
    pub fn render_text(&self) -> String {
        let mut output = String::new();

        output.push_str("\nCompletion Analytics\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        if self.total_completed == 0 {
            output.push_str("No completed tasks yet.\n");
            return output;
        }

        output.push_str(&format!(
            "Average completion time: {:.1} days\n",
            self.avg_completion_days
        ));
        output.push_str(&format!(
            "Procrastination score:   {}% late\n",
            self.procrastination_score
        ));
        output.push_str(&format!("Total completed tasks:   {}\n", self.total_completed));

        let max = self
            .per_day
            .iter()
            .map(|b| b.count)
            .chain(self.per_dow.iter().map(|b| b.count))
            .chain(self.per_hour.iter().map(|b| b.count))
            .chain(self.completion_velocity.iter().map(|b| b.count))
            .max()
            .unwrap_or(1);

        let section = |output: &mut String, title: &str, rows: Vec<(&str, usize)>| {
            output.push_str(&format!("\n{title}\n"));
            for (label, count) in rows {
                output.push_str(&format!("  {:<10} {:<30} {}\n", label, bar(count, max), count));
            }
        };

        section(
            &mut output,
            "Per day",
            self.per_day.iter().map(|b| (b.date.as_str(), b.count)).collect(),
        );
        section(
            &mut output,
            "By day of week",
            self.per_dow.iter().map(|b| (b.day.as_str(), b.count)).collect(),
        );
        section(
            &mut output,
            "Power hours",
            self.per_hour.iter().map(|b| (b.hour.as_str(), b.count)).collect(),
        );
        section(
            &mut output,
            "Completion velocity",
            self.completion_velocity
                .iter()
                .map(|b| (b.days.as_str(), b.count))
                .collect(),
        );

        output
    }
}

fn bar(count: usize, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (count * 30).div_ceil(max);
    "█".repeat(width)
}

/// Completion analytics aggregator.
///
/// Date parts (calendar date, weekday, hour) are read in `offset`.
#[derive(Debug, Clone, Copy)]
pub struct AnalyticsAggregator {
    offset: FixedOffset,
}

impl Default for AnalyticsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsAggregator {
    /// Aggregator reading date parts in UTC.
    pub fn new() -> Self {
        Self {
            offset: Utc.fix(),
        }
    }

    /// Aggregator reading date parts in a fixed offset from UTC.
    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Build the analytics report.
    ///
    /// Only completed tasks with a `completed_at` stamp are counted. Tasks
    /// without `created_at` still count towards the date buckets but not
    /// towards average duration or velocity.
    pub fn aggregate(&self, tasks: &[Task]) -> AnalyticsReport {
        let mut by_date: BTreeMap<NaiveDate, Vec<Task>> = BTreeMap::new();
        let mut by_weekday = [0usize; 7];
        let mut by_hour = [0usize; 24];
        let mut by_velocity = [0usize; VelocityBucket::ALL.len()];

        let mut total_completed = 0usize;
        let mut duration_days_sum = 0.0f64;
        let mut duration_count = 0usize;
        let mut late = 0usize;
        let mut on_time = 0usize;

        for (task, completed_at) in completed(tasks) {
            total_completed += 1;
            let local = completed_at.with_timezone(&self.offset);

            by_date.entry(local.date_naive()).or_default().push(task.clone());
            by_weekday[local.weekday().num_days_from_sunday() as usize] += 1;
            by_hour[local.hour() as usize] += 1;

            if let Some(latency) = task.completion_latency() {
                duration_days_sum += latency.num_hours() as f64 / 24.0;
                duration_count += 1;
                by_velocity[VelocityBucket::from_latency(latency).index()] += 1;
            }

            match task.finished_late() {
                Some(true) => late += 1,
                Some(false) => on_time += 1,
                None => {}
            }
        }

        let per_day = by_date
            .into_iter()
            .map(|(date, tasks)| DayBucket {
                date: date.format("%Y-%m-%d").to_string(),
                count: tasks.len(),
                tasks,
            })
            .collect();

        let per_dow = WEEKDAY_NAMES
            .iter()
            .zip(by_weekday)
            .map(|(day, count)| WeekdayBucket {
                day: (*day).to_string(),
                count,
            })
            .collect();

        let per_hour = by_hour
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(hour, count)| HourBucket {
                hour: format!("{hour}:00"),
                count: *count,
            })
            .collect();

        let avg_completion_days = if duration_count > 0 {
            duration_days_sum / duration_count as f64
        } else {
            0.0
        };

        let procrastination_score = if late + on_time > 0 {
            (late as f64 / (late + on_time) as f64 * 100.0).round() as u32
        } else {
            0
        };

        let completion_velocity = VelocityBucket::ALL
            .iter()
            .zip(by_velocity)
            .filter(|(_, count)| *count > 0)
            .map(|(bucket, count)| VelocityEntry {
                bucket: *bucket,
                days: bucket.label().to_string(),
                count,
            })
            .collect();

        tracing::debug!(
            input = tasks.len(),
            completed = total_completed,
            late,
            on_time,
            "aggregated completion analytics"
        );

        AnalyticsReport {
            per_day,
            per_dow,
            per_hour,
            avg_completion_days,
            procrastination_score,
            total_completed,
            completion_velocity,
        }
    }
}

/// Completed tasks paired with their completion stamp.
fn completed(tasks: &[Task]) -> impl Iterator<Item = (&Task, DateTime<Utc>)> {
    tasks
        .iter()
        .filter(|task| task.completed)
        .filter_map(|task| task.completed_at.map(|at| (task, at)))
}

/// Convenience function: aggregate in UTC.
pub fn aggregate(tasks: &[Task]) -> AnalyticsReport {
    AnalyticsAggregator::new().aggregate(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::ImportanceLevel;
    use chrono::{Duration, TimeZone};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        // 2025-06-01 is a Sunday
        Utc.with_ymd_and_hms(2025, 6, day, hour, 0, 0).unwrap()
    }

    fn done(id: &str, created: DateTime<Utc>, finished: DateTime<Utc>) -> Task {
        Task::new(id, format!("Task {id}"), ImportanceLevel::Medium, created).finished_at(finished)
    }

    #[test]
    fn test_empty_input() {
        let report = aggregate(&[]);
        assert_eq!(report.total_completed, 0);
        assert!(report.per_day.is_empty());
        assert_eq!(report.per_dow.len(), 7);
        assert!(report.per_dow.iter().all(|b| b.count == 0));
        assert!(report.per_hour.is_empty());
        assert_eq!(report.avg_completion_days, 0.0);
        assert_eq!(report.procrastination_score, 0);
        assert!(report.completion_velocity.is_empty());
    }

    #[test]
    fn test_ignores_open_and_unstamped_tasks() {
        let open = Task::new("open", "Open", ImportanceLevel::High, at(1, 9));
        let mut unstamped = Task::new("legacy", "Legacy", ImportanceLevel::High, at(1, 9));
        unstamped.completed = true;

        let report = aggregate(&[open, unstamped, done("d", at(1, 9), at(2, 10))]);
        assert_eq!(report.total_completed, 1);
    }

    #[test]
    fn test_per_day_groups_and_sorts_dates() {
        let tasks = vec![
            done("late", at(1, 8), at(3, 9)),
            done("a", at(1, 8), at(2, 10)),
            done("b", at(1, 8), at(2, 22)),
        ];

        let report = aggregate(&tasks);
        let dates: Vec<_> = report.per_day.iter().map(|b| (b.date.as_str(), b.count)).collect();
        assert_eq!(dates, vec![("2025-06-02", 2), ("2025-06-03", 1)]);

        let drill: Vec<_> = report.tasks_on("2025-06-02").iter().map(|t| t.id.as_str()).collect();
        assert_eq!(drill, vec!["a", "b"]);
        assert!(report.tasks_on("2025-01-01").is_empty());
    }

    #[test]
    fn test_per_dow_is_dense_and_ordered() {
        let tasks = vec![
            done("sun", at(1, 8), at(1, 9)),
            done("mon", at(1, 8), at(2, 9)),
            done("mon2", at(1, 8), at(9, 9)),
            done("sat", at(1, 8), at(7, 9)),
        ];

        let report = aggregate(&tasks);
        let days: Vec<_> = report.per_dow.iter().map(|b| (b.day.as_str(), b.count)).collect();
        assert_eq!(
            days,
            vec![
                ("Sunday", 1),
                ("Monday", 2),
                ("Tuesday", 0),
                ("Wednesday", 0),
                ("Thursday", 0),
                ("Friday", 0),
                ("Saturday", 1),
            ]
        );
        assert_eq!(report.busiest_day().map(|b| b.day.as_str()), Some("Monday"));
    }

    #[test]
    fn test_per_hour_is_sparse() {
        let tasks = vec![
            done("a", at(1, 0), at(1, 14)),
            done("b", at(1, 0), at(2, 9)),
            done("c", at(1, 0), at(3, 14)),
        ];

        let report = aggregate(&tasks);
        let hours: Vec<_> = report.per_hour.iter().map(|b| (b.hour.as_str(), b.count)).collect();
        assert_eq!(hours, vec![("9:00", 1), ("14:00", 2)]);

        let peaks = report.peak_hours(1);
        assert_eq!(peaks[0].hour, "14:00");
    }

    #[test]
    fn test_offset_shifts_date_parts() {
        // 23:00 UTC on Sunday is 08:00 Monday in UTC+9
        let tasks = vec![done("a", at(1, 8), at(1, 23))];
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();

        let report = AnalyticsAggregator::with_offset(tokyo).aggregate(&tasks);
        assert_eq!(report.per_day[0].date, "2025-06-02");
        assert_eq!(report.per_dow[1].count, 1);
        assert_eq!(report.per_hour[0].hour, "8:00");
    }

    #[test]
    fn test_velocity_and_average_example() {
        let day0 = at(2, 10);
        let tasks = vec![done("same", day0, day0), done("two", day0, day0 + Duration::days(2))];

        let report = aggregate(&tasks);
        let velocity: Vec<_> = report
            .completion_velocity
            .iter()
            .map(|e| (e.days.as_str(), e.count))
            .collect();
        assert_eq!(velocity, vec![("same day", 1), ("2 days", 1)]);
        assert_eq!(report.avg_completion_days, 1.0);
    }

    #[test]
    fn test_average_uses_whole_hours() {
        let created = at(2, 10);
        let finished = created + Duration::hours(30) + Duration::minutes(59);
        let report = aggregate(&[done("a", created, finished)]);
        assert_eq!(report.avg_completion_days, 30.0 / 24.0);
    }

    #[test]
    fn test_missing_created_at_skips_duration_stats() {
        let mut task = done("a", at(1, 8), at(2, 9));
        task.created_at = None;

        let report = aggregate(&[task]);
        assert_eq!(report.total_completed, 1);
        assert_eq!(report.avg_completion_days, 0.0);
        assert!(report.completion_velocity.is_empty());
    }

    #[test]
    fn test_procrastination_score() {
        let on_time = done("on", at(1, 8), at(2, 9)).with_due(at(2, 9));
        let late = done("late", at(1, 8), at(4, 9)).with_due(at(3, 9));
        let late2 = done("late2", at(1, 8), at(5, 9)).with_due(at(3, 9));
        let undated = done("free", at(1, 8), at(5, 9));

        let report = aggregate(&[on_time, late, late2, undated]);
        // 2 late of 3 dated
        assert_eq!(report.procrastination_score, 67);
    }

    #[test]
    fn test_render_text() {
        let tasks = vec![done("a", at(1, 8), at(2, 9)), done("b", at(1, 8), at(2, 15))];
        let text = aggregate(&tasks).render_text();
        assert!(text.contains("Completion Analytics"));
        assert!(text.contains("Total completed tasks:   2"));
        assert!(text.contains("2025-06-02"));
        assert!(text.contains("Monday"));
        assert!(text.contains("15:00"));
        assert!(text.contains("1 days"));

        let empty = aggregate(&[]).render_text();
        assert!(empty.contains("No completed tasks yet."));
    }

    #[test]
    fn test_report_serializes_chart_field_names() {
        let report = aggregate(&[done("a", at(1, 8), at(2, 9))]);
        let json = serde_json::to_value(&report).unwrap();
        for key in [
            "perDay",
            "perDOW",
            "perHour",
            "avgCompletionDays",
            "procrastinationScore",
            "totalCompleted",
            "completionVelocity",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["perDay"][0]["tasks"][0]["id"], "a");
    }

    #[test]
    fn test_velocity_entries_serialize_label_and_count_only() {
        let report = aggregate(&[done("a", at(1, 8), at(3, 9))]);
        let json = serde_json::to_value(&report.completion_velocity).unwrap();
        assert_eq!(json, serde_json::json!([{ "days": "2 days", "count": 1 }]));

        let back: Vec<VelocityEntry> = serde_json::from_value(json).unwrap();
        assert_eq!(back, report.completion_velocity);
        assert_eq!(back[0].bucket, VelocityBucket::TwoDays);

        let bad = serde_json::json!([{ "days": "fortnight", "count": 1 }]);
        assert!(serde_json::from_value::<Vec<VelocityEntry>>(bad).is_err());
    }
}
