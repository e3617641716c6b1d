//! Core data types for the scheduling core.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A task submitted for scheduling.
///
/// Tasks are identified by `title` within one request; entries in
/// `dependencies` refer to other tasks in the same set by exact string
/// match. A reference that matches no task in the set is treated as already
/// satisfied, not as an error.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub title: String,
    pub estimated_hours: f64,
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Derived dependency information for one task.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DependencyInfo {
    /// Longest chain of resolvable dependency edges reaching this task.
    pub level: u32,
    /// Time before which the task cannot begin, bounded by its
    /// dependencies' estimated finish times.
    pub earliest_start: NaiveDateTime,
}

/// A task together with its computed priority breakdown.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskPriorityInfo {
    pub task: TaskDescriptor,
    /// Weighted composite of the three sub-scores, rounded to 2 decimals.
    pub priority_score: f64,
    pub dependency_level: u32,
    pub urgency_score: f64,
    pub effort_score: f64,
    pub dependency_score: f64,
    pub earliest_start_date: NaiveDateTime,
    /// Human-readable explanation assembled from threshold crossings.
    pub priority_reason: String,
}

/// A calendar assignment produced by the legacy day-bucket scheduler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScheduledTask {
    pub title: String,
    pub scheduled_date: NaiveDate,
    /// Composite priority score rounded to the nearest integer.
    pub priority: i32,
}
