//! Priority-based task scheduling core.
//!
//! Given a flat list of task descriptors carrying effort estimates,
//! optional due dates, and named dependencies, this crate recommends an
//! execution order: it builds the dependency graph, rejects cycles,
//! propagates dependency depth and earliest-start times, scores each task
//! on urgency, effort, and dependency structure, and ranks by the weighted
//! composite. A legacy day-bucket scheduler consumes the ranking to produce
//! calendar assignments under a daily hour capacity.
//!
//! The whole computation is a pure function of the task set and an injected
//! reference time: no I/O, no shared state, nothing cached across calls.

pub mod api;
mod config;
mod day_schedule;
mod graph;
pub mod logging;
mod models;
mod ranking;
mod scoring;

pub use config::SchedulerConfig;
pub use day_schedule::assign_days;
pub use graph::{GraphError, TaskGraph};
pub use models::{DependencyInfo, ScheduledTask, TaskDescriptor, TaskPriorityInfo};
pub use ranking::rank_tasks;
pub use scoring::{
    composite_score, dependency_score, effort_score, priority_reason, score_task, urgency_score,
};

use chrono::NaiveDateTime;

/// Rank a task set by priority.
///
/// Resolves the dependency graph anchored at `now`, scores every task, and
/// returns the full breakdowns sorted into recommended execution order.
/// An empty task set yields an empty ranking.
///
/// # Errors
/// [`GraphError::CircularDependency`] if the dependency graph has a cycle;
/// no partial ranking is returned.
pub fn schedule_tasks_with_priority(
    tasks: &[TaskDescriptor],
    now: NaiveDateTime,
    config: &SchedulerConfig,
) -> Result<Vec<TaskPriorityInfo>, GraphError> {
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let graph = TaskGraph::new(tasks);
    let infos = graph.resolve(now)?;

    let scored: Vec<TaskPriorityInfo> = tasks
        .iter()
        .enumerate()
        .map(|(id, task)| score_task(task, infos[id], graph.dependent_count(id), now, config))
        .collect();

    Ok(rank_tasks(scored))
}

/// Legacy entry point: rank, then assign calendar days.
///
/// Kept for backward compatibility with the legacy scheduling endpoint.
/// `start` doubles as the ranking reference time; assignments begin on its
/// date.
pub fn schedule_tasks(
    tasks: &[TaskDescriptor],
    start: NaiveDateTime,
    available_hours_per_day: f64,
    config: &SchedulerConfig,
) -> Result<Vec<ScheduledTask>, GraphError> {
    let prioritized = schedule_tasks_with_priority(tasks, start, config)?;
    Ok(assign_days(
        &prioritized,
        start.date(),
        available_hours_per_day,
        config.verbosity,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn make_task(title: &str, hours: f64, deps: &[&str]) -> TaskDescriptor {
        TaskDescriptor {
            title: title.to_string(),
            estimated_hours: hours,
            due_date: None,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_empty_task_set() {
        let ranked =
            schedule_tasks_with_priority(&[], t0(), &SchedulerConfig::default()).unwrap();
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_every_task_appears_exactly_once() {
        let tasks = vec![
            make_task("a", 2.0, &[]),
            make_task("b", 6.0, &["a"]),
            make_task("c", 40.0, &["b"]),
            make_task("d", 1.0, &["a", "c"]),
        ];
        let ranked = schedule_tasks_with_priority(&tasks, t0(), &SchedulerConfig::default())
            .unwrap();

        let mut titles: Vec<&str> = ranked.iter().map(|i| i.task.title.as_str()).collect();
        titles.sort_unstable();
        assert_eq!(titles, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_levels_follow_longest_chain() {
        let tasks = vec![
            make_task("a", 2.0, &[]),
            make_task("b", 2.0, &["a"]),
            make_task("c", 2.0, &["a", "b"]),
        ];
        let ranked = schedule_tasks_with_priority(&tasks, t0(), &SchedulerConfig::default())
            .unwrap();

        let level_of = |title: &str| {
            ranked
                .iter()
                .find(|i| i.task.title == title)
                .map(|i| i.dependency_level)
        };
        assert_eq!(level_of("a"), Some(0));
        assert_eq!(level_of("b"), Some(1));
        assert_eq!(level_of("c"), Some(2));
    }

    #[test]
    fn test_deterministic_over_repeated_calls() {
        let tasks = vec![
            make_task("alpha", 8.0, &[]),
            make_task("beta", 8.0, &["alpha"]),
            make_task("gamma", 8.0, &[]),
        ];
        let config = SchedulerConfig::default();

        let first = schedule_tasks_with_priority(&tasks, t0(), &config).unwrap();
        let second = schedule_tasks_with_priority(&tasks, t0(), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_cycle_aborts_whole_request() {
        let tasks = vec![
            make_task("standalone", 2.0, &[]),
            make_task("a", 2.0, &["b"]),
            make_task("b", 2.0, &["a"]),
        ];
        let err =
            schedule_tasks_with_priority(&tasks, t0(), &SchedulerConfig::default()).unwrap_err();
        assert!(matches!(err, GraphError::CircularDependency(_)));
    }

    #[test]
    fn test_legacy_scheduling_respects_dependencies_via_earliest_start() {
        // 26 hours of prerequisite work finishes early on day two, pushing
        // the dependent there even though the day capacity has room left
        let tasks = vec![
            make_task("prep", 26.0, &[]),
            make_task("launch", 2.0, &["prep"]),
        ];
        let start = t0().date().and_hms_opt(0, 0, 0).unwrap();
        let scheduled =
            schedule_tasks(&tasks, start, 30.0, &SchedulerConfig::default()).unwrap();

        let launch = scheduled.iter().find(|s| s.title == "launch").unwrap();
        assert_eq!(launch.scheduled_date, t0().date() + Duration::days(1));
    }

    #[test]
    fn test_legacy_scheduling_carries_rounded_priority() {
        let tasks = vec![make_task("only", 2.0, &[])];
        let scheduled =
            schedule_tasks(&tasks, t0(), 8.0, &SchedulerConfig::default()).unwrap();

        // Composite 52.00 rounds to 52
        assert_eq!(scheduled[0].priority, 52);
        assert_eq!(scheduled[0].scheduled_date, t0().date());
    }
}
