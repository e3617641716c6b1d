//! Legacy day-bucket scheduler.
//!
//! Kept for backward compatibility with the legacy scheduling endpoint:
//! walks the priority ranking in order and greedily assigns each task a
//! calendar date under a daily hour capacity. Tasks are never split across
//! days; a single task larger than the capacity still gets a day to itself.

use chrono::{Days, NaiveDate};

use crate::log_decisions;
use crate::models::{ScheduledTask, TaskPriorityInfo};

/// Assign calendar dates to an already-ranked task list.
///
/// A task that would overflow a partially filled day moves to the next day.
/// The assigned date is the later of the running date and the task's
/// earliest start (date-truncated), and the running date advances to the
/// assigned date for subsequent tasks.
pub fn assign_days(
    ranked: &[TaskPriorityInfo],
    start_date: NaiveDate,
    available_hours_per_day: f64,
    verbosity: u8,
) -> Vec<ScheduledTask> {
    let mut result: Vec<ScheduledTask> = Vec::with_capacity(ranked.len());
    let mut current_date = start_date;
    let mut hours_scheduled_today = 0.0f64;

    for info in ranked {
        let task_hours = info.task.estimated_hours;

        if hours_scheduled_today + task_hours > available_hours_per_day
            && hours_scheduled_today > 0.0
        {
            current_date = current_date
                .checked_add_days(Days::new(1))
                .unwrap_or(current_date);
            hours_scheduled_today = 0.0;
            log_decisions!(verbosity, "day full, advancing to {}", current_date);
        }

        let scheduled_date = info.earliest_start_date.date().max(current_date);
        log_decisions!(
            verbosity,
            "placing {:?} on {} ({} h)",
            info.task.title,
            scheduled_date,
            task_hours
        );

        result.push(ScheduledTask {
            title: info.task.title.clone(),
            scheduled_date,
            priority: info.priority_score.round() as i32,
        });

        hours_scheduled_today += task_hours;
        current_date = scheduled_date;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskDescriptor;
    use chrono::{Duration, NaiveDateTime};

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn make_info(title: &str, hours: f64, score: f64, earliest: NaiveDateTime) -> TaskPriorityInfo {
        TaskPriorityInfo {
            task: TaskDescriptor {
                title: title.to_string(),
                estimated_hours: hours,
                due_date: None,
                dependencies: vec![],
            },
            priority_score: score,
            dependency_level: 0,
            urgency_score: 0.0,
            effort_score: 0.0,
            dependency_score: 0.0,
            earliest_start_date: earliest,
            priority_reason: String::new(),
        }
    }

    fn midnight() -> NaiveDateTime {
        start().and_hms_opt(0, 0, 0).unwrap()
    }

    #[test]
    fn test_fills_day_then_advances() {
        let ranked = vec![
            make_info("a", 4.0, 80.0, midnight()),
            make_info("b", 4.0, 70.0, midnight()),
            make_info("c", 4.0, 60.0, midnight()),
        ];
        let scheduled = assign_days(&ranked, start(), 8.0, 0);

        assert_eq!(scheduled[0].scheduled_date, start());
        assert_eq!(scheduled[1].scheduled_date, start());
        assert_eq!(scheduled[2].scheduled_date, start() + Duration::days(1));
    }

    #[test]
    fn test_oversized_task_gets_a_day_alone() {
        // The first task exceeds capacity on an empty day and is placed
        // anyway; the next task then rolls over.
        let ranked = vec![
            make_info("big", 12.0, 80.0, midnight()),
            make_info("small", 2.0, 70.0, midnight()),
        ];
        let scheduled = assign_days(&ranked, start(), 8.0, 0);

        assert_eq!(scheduled[0].scheduled_date, start());
        assert_eq!(scheduled[1].scheduled_date, start() + Duration::days(1));
    }

    #[test]
    fn test_earliest_start_pushes_assignment() {
        let blocked_from = (start() + Duration::days(3)).and_hms_opt(10, 0, 0).unwrap();
        let ranked = vec![
            make_info("blocked", 2.0, 80.0, blocked_from),
            make_info("free", 2.0, 70.0, midnight()),
        ];
        let scheduled = assign_days(&ranked, start(), 8.0, 0);

        assert_eq!(scheduled[0].scheduled_date, start() + Duration::days(3));
        // The running date moved forward with the blocked task
        assert_eq!(scheduled[1].scheduled_date, start() + Duration::days(3));
    }

    #[test]
    fn test_priority_is_rounded_composite() {
        let ranked = vec![make_info("a", 2.0, 52.49, midnight())];
        let scheduled = assign_days(&ranked, start(), 8.0, 0);

        assert_eq!(scheduled[0].priority, 52);
    }

    #[test]
    fn test_empty_ranking() {
        assert!(assign_days(&[], start(), 8.0, 0).is_empty());
    }
}
