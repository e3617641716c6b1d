//! Request/response surface consumed by the hosting HTTP endpoint.
//!
//! The endpoint deserializes a task list from the request body, calls
//! [`build_schedule`] with the current time, and serializes the result back
//! to JSON. Validation and cycle failures are distinct [`ScheduleError`]
//! variants so the endpoint can map both to client errors (the cycle one
//! naming the offending task) and anything else to a generic failure.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SchedulerConfig;
use crate::graph::GraphError;
use crate::models::{TaskDescriptor, TaskPriorityInfo};
use crate::schedule_tasks_with_priority;

/// Maximum accepted title length, in characters.
pub const MAX_TITLE_CHARS: usize = 200;
/// Accepted estimated-hours range: one hour up to one week of wall time.
pub const MIN_ESTIMATED_HOURS: u32 = 1;
pub const MAX_ESTIMATED_HOURS: u32 = 168;

/// Rejected request payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one task is required")]
    EmptyTaskList,
    #[error("task title must be between 1 and 200 characters: {0:?}")]
    TitleLength(String),
    #[error("estimated hours must be between 1 and 168, got {hours} for task {title:?}")]
    HoursOutOfRange { title: String, hours: u32 },
    #[error("duplicate task title: {0:?}")]
    DuplicateTitle(String),
}

/// Failure surfaced to the hosting endpoint.
///
/// Both variants are client-side problems with the submitted task set; the
/// endpoint discriminates them from unexpected server-side failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// One task in a scheduling request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTaskDto {
    pub title: String,
    pub estimated_hours: u32,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A scheduling request: the flat task list to rank.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub tasks: Vec<ScheduleTaskDto>,
}

/// Per-task priority breakdown in the response.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPriorityDto {
    pub title: String,
    pub priority_score: f64,
    pub urgency_score: f64,
    pub effort_score: f64,
    pub dependency_score: f64,
    pub dependency_level: u32,
    pub priority_reason: String,
    pub earliest_start_date: NaiveDateTime,
}

impl TaskPriorityDto {
    fn from_info(info: &TaskPriorityInfo) -> Self {
        Self {
            title: info.task.title.clone(),
            priority_score: info.priority_score,
            urgency_score: info.urgency_score,
            effort_score: info.effort_score,
            dependency_score: info.dependency_score,
            dependency_level: info.dependency_level,
            priority_reason: info.priority_reason.clone(),
            earliest_start_date: info.earliest_start_date,
        }
    }
}

/// The ranked schedule returned to the endpoint.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    /// Task titles in recommended execution order.
    pub recommended_order: Vec<String>,
    /// Reference time plus the whole-team completion estimate.
    pub estimated_completion: NaiveDateTime,
    pub task_priorities: Vec<TaskPriorityDto>,
}

/// Validate, rank, and package a scheduling request.
pub fn build_schedule(
    request: &ScheduleRequest,
    now: NaiveDateTime,
    config: &SchedulerConfig,
) -> Result<ScheduleResponse, ScheduleError> {
    validate(request)?;

    let tasks: Vec<TaskDescriptor> = request.tasks.iter().map(to_descriptor).collect();
    let prioritized = schedule_tasks_with_priority(&tasks, now, config)?;

    let recommended_order = prioritized
        .iter()
        .map(|info| info.task.title.clone())
        .collect();

    let total_hours: u32 = request.tasks.iter().map(|t| t.estimated_hours).sum();
    let completion_days = (f64::from(total_hours) / config.hours_per_day).ceil() as i64;

    Ok(ScheduleResponse {
        recommended_order,
        estimated_completion: now + Duration::days(completion_days),
        task_priorities: prioritized.iter().map(TaskPriorityDto::from_info).collect(),
    })
}

fn validate(request: &ScheduleRequest) -> Result<(), ValidationError> {
    if request.tasks.is_empty() {
        return Err(ValidationError::EmptyTaskList);
    }

    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for task in &request.tasks {
        let title_chars = task.title.chars().count();
        if title_chars == 0 || title_chars > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleLength(task.title.clone()));
        }
        if !(MIN_ESTIMATED_HOURS..=MAX_ESTIMATED_HOURS).contains(&task.estimated_hours) {
            return Err(ValidationError::HoursOutOfRange {
                title: task.title.clone(),
                hours: task.estimated_hours,
            });
        }
        if !seen.insert(task.title.as_str()) {
            return Err(ValidationError::DuplicateTitle(task.title.clone()));
        }
    }

    Ok(())
}

fn to_descriptor(dto: &ScheduleTaskDto) -> TaskDescriptor {
    TaskDescriptor {
        title: dto.title.clone(),
        estimated_hours: f64::from(dto.estimated_hours),
        due_date: dto.due_date,
        dependencies: dto.dependencies.clone(),
    }
}
