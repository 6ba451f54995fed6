//! Integration tests for task prioritization.
//!
//! This test file verifies:
//! - Completed tasks never appear in the prioritized list
//! - Scores are non-negative and monotonic in importance
//! - Due-date score boundaries (due today, overdue, 30+ days out)
//! - Idempotence over identical snapshots

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use smarttodo_core::{
    prioritize, sort_by_importance, Importance, ImportanceLevel, PriorityCalculator, Task,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 15, 10, 30, 0).unwrap()
}

fn importance_strategy() -> impl Strategy<Value = Importance> {
    prop_oneof![
        Just(Importance::Categorical(ImportanceLevel::High)),
        Just(Importance::Categorical(ImportanceLevel::Medium)),
        Just(Importance::Categorical(ImportanceLevel::Low)),
        (1u8..=10).prop_map(|v| Importance::Numeric(v as f64)),
        "[a-z ]{0,12}".prop_map(Importance::Label),
    ]
}

prop_compose! {
    fn task_strategy()(
        id in 0u32..10_000,
        importance in importance_strategy(),
        due_hours in proptest::option::of(-24 * 60i64..24 * 60),
        completed in any::<bool>(),
    ) -> Task {
        let mut task = Task::new(format!("t-{id}"), "generated", importance, now() - Duration::days(7));
        if let Some(hours) = due_hours {
            task = task.with_due(now() + Duration::hours(hours));
        }
        if completed {
            task = task.finished_at(now() - Duration::hours(1));
        }
        task
    }
}

proptest! {
    #[test]
    fn prioritized_list_excludes_completed(tasks in proptest::collection::vec(task_strategy(), 1..40)) {
        let ranked = prioritize(&tasks, now());
        prop_assert!(ranked.iter().all(|s| !s.task.completed));
        prop_assert_eq!(ranked.len(), tasks.iter().filter(|t| !t.completed).count());
    }

    #[test]
    fn prioritized_list_is_descending_and_non_negative(tasks in proptest::collection::vec(task_strategy(), 0..40)) {
        let ranked = prioritize(&tasks, now());
        prop_assert!(ranked.iter().all(|s| s.score >= 0.0));
        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn score_is_monotonic_in_importance(
        low in 1u8..=10,
        bump in 0u8..=9,
        due_hours in proptest::option::of(-24 * 60i64..24 * 60),
    ) {
        let high = (low + bump).min(10);
        let calculator = PriorityCalculator::new(now());
        let build = |value: u8| {
            let task = Task::new("t", "t", Importance::Numeric(value as f64), now());
            match due_hours {
                Some(hours) => task.with_due(now() + Duration::hours(hours)),
                None => task,
            }
        };
        prop_assert!(calculator.score(&build(high)) >= calculator.score(&build(low)));
    }

    #[test]
    fn prioritize_is_idempotent(tasks in proptest::collection::vec(task_strategy(), 0..30)) {
        prop_assert_eq!(prioritize(&tasks, now()), prioritize(&tasks, now()));
        prop_assert_eq!(sort_by_importance(&tasks), sort_by_importance(&tasks));
    }

    #[test]
    fn overdue_always_scores_fifty(hours_overdue in 0i64..10_000) {
        let calculator = PriorityCalculator::new(now());
        let task = Task::new("t", "t", ImportanceLevel::Low, now())
            .with_due(now() - Duration::hours(hours_overdue));
        prop_assert_eq!(calculator.due_score(&task), 50.0);
    }

    #[test]
    fn thirty_days_or_more_scores_zero(days in 30i64..400) {
        let calculator = PriorityCalculator::new(now());
        let task = Task::new("t", "t", ImportanceLevel::Low, now())
            .with_due(now() + Duration::days(days));
        prop_assert_eq!(calculator.due_score(&task), 0.0);
    }
}

#[test]
fn test_documented_example() {
    let tasks = vec![
        Task::new("task1", "Due today", ImportanceLevel::High, now()).with_due(now()),
        Task::new("task2", "Far away", ImportanceLevel::Low, now()).with_due(now() + Duration::days(40)),
    ];

    let ranked = prioritize(&tasks, now());
    let summary: Vec<_> = ranked.iter().map(|s| (s.task.id.as_str(), s.score)).collect();
    assert_eq!(summary, vec![("task1", 100.0), ("task2", 10.0)]);
}

#[test]
fn test_snapshot_json_to_prioritized_json() {
    let snapshot = smarttodo_core::snapshot::from_str(indoc::indoc! {r#"
        [
          {"id": "a", "title": "Taxes", "importance": "Medium", "dueAt": "2025-09-16T09:00:00Z"},
          {"id": "b", "title": "Gym", "importance": 3},
          {"id": "c", "title": "Report", "importance": "high", "completed": true,
           "createdAt": "2025-09-01T09:00:00Z", "completedAt": "2025-09-02T09:00:00Z"}
        ]
    "#})
    .unwrap();

    let ranked = prioritize(&snapshot.tasks, now());
    let json = serde_json::to_value(&ranked).unwrap();

    // Taxes: 25 + 50 (under 24h away), Gym: 15
    assert_eq!(json[0]["id"], "a");
    assert_eq!(json[0]["score"], 75.0);
    assert_eq!(json[0]["breakdown"]["dueScore"], 50.0);
    assert_eq!(json[1]["id"], "b");
    assert_eq!(json[1]["importance"], 3.0);
    assert_eq!(json.as_array().unwrap().len(), 2);
}
