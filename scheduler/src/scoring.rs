//! Priority scoring: urgency, effort, and dependency sub-scores blended
//! into a weighted composite, plus the human-readable reason text.
//!
//! All functions are pure over the task, its resolved dependency info, and
//! the injected reference time. Score tables and reason thresholds are
//! policy constants; the blend weights live in [`SchedulerConfig`].

use chrono::NaiveDateTime;

use crate::config::SchedulerConfig;
use crate::log_debug;
use crate::models::{DependencyInfo, TaskDescriptor, TaskPriorityInfo};

// Urgency tiers, driven by days until the due date.
pub const URGENCY_NO_DUE_DATE: f64 = 30.0;
pub const URGENCY_OVERDUE: f64 = 100.0;
pub const URGENCY_DUE_TODAY: f64 = 95.0;
pub const URGENCY_NOT_ENOUGH_TIME: f64 = 90.0;
pub const URGENCY_TIGHT_DEADLINE: f64 = 75.0;
pub const URGENCY_WITHIN_WEEK: f64 = 60.0;
pub const URGENCY_WITHIN_FORTNIGHT: f64 = 40.0;
pub const URGENCY_WITHIN_MONTH: f64 = 25.0;
pub const URGENCY_LATER: f64 = 10.0;

/// Headroom multiplier on the completion estimate below which a deadline
/// still counts as tight.
const TIGHT_DEADLINE_FACTOR: f64 = 1.5;

// Effort tiers: shorter tasks score higher, but trivially short tasks are
// slightly discounted relative to short-but-substantial ones.
pub const EFFORT_TRIVIAL: f64 = 70.0;
pub const EFFORT_SHORT: f64 = 80.0;
pub const EFFORT_HALF_DAY: f64 = 75.0;
pub const EFFORT_TWO_DAYS: f64 = 60.0;
pub const EFFORT_WEEK: f64 = 45.0;
pub const EFFORT_LONG: f64 = 30.0;

// Dependency score shape.
const DEPENDENCY_BASE: f64 = 50.0;
const NO_DEPENDENCIES_BONUS: f64 = 20.0;
const PER_DEPENDENCY_PENALTY: f64 = 5.0;
const MAX_DEPENDENCY_PENALTY: f64 = 25.0;
const PER_DEPENDENT_BONUS: f64 = 10.0;
const MAX_DEPENDENT_BONUS: f64 = 30.0;
const PER_LEVEL_PENALTY: f64 = 5.0;
const MAX_LEVEL_PENALTY: f64 = 25.0;

// Reason thresholds.
const REASON_CRITICAL_DEADLINE: f64 = 90.0;
const REASON_URGENT_DEADLINE: f64 = 75.0;
const REASON_APPROACHING_DEADLINE: f64 = 60.0;
const REASON_QUICK_TO_COMPLETE: f64 = 75.0;
const REASON_COMPLEX_TASK: f64 = 35.0;
const REASON_BLOCKS_OTHERS: f64 = 70.0;
const REASON_MANY_DEPENDENCIES: f64 = 30.0;
const REASON_DEEP_CHAIN_LEVEL: u32 = 3;

/// Score deadline pressure on a 10..=100 scale.
///
/// The completion estimate assumes `config.hours_per_day` working hours per
/// calendar day; days until due are counted from the date part of `now`.
pub fn urgency_score(task: &TaskDescriptor, now: NaiveDateTime, config: &SchedulerConfig) -> f64 {
    let Some(due_date) = task.due_date else {
        return URGENCY_NO_DUE_DATE;
    };

    let days_until_due = (due_date - now.date()).num_days();
    let estimated_days = (task.estimated_hours / config.hours_per_day).ceil();

    if days_until_due < 0 {
        return URGENCY_OVERDUE;
    }
    if days_until_due == 0 {
        return URGENCY_DUE_TODAY;
    }

    let days = days_until_due as f64;
    if days <= estimated_days {
        URGENCY_NOT_ENOUGH_TIME
    } else if days <= estimated_days * TIGHT_DEADLINE_FACTOR {
        URGENCY_TIGHT_DEADLINE
    } else if days_until_due <= 7 {
        URGENCY_WITHIN_WEEK
    } else if days_until_due <= 14 {
        URGENCY_WITHIN_FORTNIGHT
    } else if days_until_due <= 30 {
        URGENCY_WITHIN_MONTH
    } else {
        URGENCY_LATER
    }
}

/// Score task size on a 30..=80 scale; smaller is generally better.
pub fn effort_score(task: &TaskDescriptor) -> f64 {
    let hours = task.estimated_hours;
    if hours <= 1.0 {
        EFFORT_TRIVIAL
    } else if hours <= 4.0 {
        EFFORT_SHORT
    } else if hours <= 8.0 {
        EFFORT_HALF_DAY
    } else if hours <= 16.0 {
        EFFORT_TWO_DAYS
    } else if hours <= 40.0 {
        EFFORT_WEEK
    } else {
        EFFORT_LONG
    }
}

/// Score a task's position in the dependency structure, floored at 0.
///
/// The dependency count is the raw length of the task's dependency list,
/// unresolvable titles included. `dependent_count` is the number of other
/// tasks in the set whose dependency list names this task.
pub fn dependency_score(task: &TaskDescriptor, dependency_level: u32, dependent_count: u32) -> f64 {
    let mut score = DEPENDENCY_BASE;

    if task.dependencies.is_empty() {
        score += NO_DEPENDENCIES_BONUS;
    } else {
        let penalty = task.dependencies.len() as f64 * PER_DEPENDENCY_PENALTY;
        score -= penalty.min(MAX_DEPENDENCY_PENALTY);
    }

    score += (f64::from(dependent_count) * PER_DEPENDENT_BONUS).min(MAX_DEPENDENT_BONUS);
    score -= (f64::from(dependency_level) * PER_LEVEL_PENALTY).min(MAX_LEVEL_PENALTY);

    score.max(0.0)
}

/// Blend the sub-scores into the composite, rounded to 2 decimals.
pub fn composite_score(
    urgency: f64,
    dependency: f64,
    effort: f64,
    config: &SchedulerConfig,
) -> f64 {
    round2(
        urgency * config.urgency_weight
            + dependency * config.dependency_weight
            + effort * config.effort_weight,
    )
}

/// Assemble the reason text from threshold crossings, comma-separated.
/// When nothing fires the task is "Standard priority".
pub fn priority_reason(urgency: f64, effort: f64, dependency: f64, dependency_level: u32) -> String {
    let mut reasons: Vec<&str> = Vec::new();

    if urgency >= REASON_CRITICAL_DEADLINE {
        reasons.push("Critical deadline");
    } else if urgency >= REASON_URGENT_DEADLINE {
        reasons.push("Urgent deadline");
    } else if urgency >= REASON_APPROACHING_DEADLINE {
        reasons.push("Approaching deadline");
    }

    if effort >= REASON_QUICK_TO_COMPLETE {
        reasons.push("Quick to complete");
    } else if effort <= REASON_COMPLEX_TASK {
        reasons.push("Complex task");
    }

    if dependency >= REASON_BLOCKS_OTHERS {
        reasons.push("Blocks other tasks");
    } else if dependency <= REASON_MANY_DEPENDENCIES {
        reasons.push("Has many dependencies");
    }

    if dependency_level == 0 {
        reasons.push("Can start immediately");
    } else if dependency_level >= REASON_DEEP_CHAIN_LEVEL {
        reasons.push("Deep dependency chain");
    }

    if reasons.is_empty() {
        "Standard priority".to_string()
    } else {
        reasons.join(", ")
    }
}

/// Compute the full priority breakdown for one task.
pub fn score_task(
    task: &TaskDescriptor,
    info: DependencyInfo,
    dependent_count: u32,
    now: NaiveDateTime,
    config: &SchedulerConfig,
) -> TaskPriorityInfo {
    let urgency = urgency_score(task, now, config);
    let effort = effort_score(task);
    let dependency = dependency_score(task, info.level, dependent_count);
    let priority = composite_score(urgency, dependency, effort, config);

    log_debug!(
        config.verbosity,
        "{:?}: priority={} urgency={} effort={} dependency={} level={}",
        task.title,
        priority,
        urgency,
        effort,
        dependency,
        info.level
    );

    TaskPriorityInfo {
        task: task.clone(),
        priority_score: priority,
        dependency_level: info.level,
        urgency_score: round2(urgency),
        effort_score: round2(effort),
        dependency_score: round2(dependency),
        earliest_start_date: info.earliest_start,
        priority_reason: priority_reason(urgency, effort, dependency, info.level),
    }
}

/// Round to 2 decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
