//! Ranking of scored tasks into the recommended execution order.

use chrono::NaiveDate;
use std::cmp::Ordering;

use crate::models::TaskPriorityInfo;

/// Sort key for the priority ranking.
///
/// Orders by composite score descending, then dependency level ascending,
/// then due date ascending with missing due dates last. This is a priority
/// ranking, not a topological order: a task may rank ahead of one of its
/// own dependencies when the composite scores differ enough.
#[derive(Debug, Clone, PartialEq)]
pub struct RankKey {
    priority_score: f64,
    dependency_level: u32,
    due_date: NaiveDate,
}

impl RankKey {
    pub fn for_task(info: &TaskPriorityInfo) -> Self {
        Self {
            priority_score: info.priority_score,
            dependency_level: info.dependency_level,
            due_date: info.task.due_date.unwrap_or(NaiveDate::MAX),
        }
    }
}

/// Compare f64 values for sorting. Scores are finite by construction.
fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

impl Eq for RankKey {}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        cmp_f64(other.priority_score, self.priority_score)
            .then(self.dependency_level.cmp(&other.dependency_level))
            .then(self.due_date.cmp(&other.due_date))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Sort scored tasks into the recommended order.
///
/// The sort is stable: tasks whose keys compare equal keep their input
/// order, so repeated invocations over the same input rank identically.
pub fn rank_tasks(mut tasks: Vec<TaskPriorityInfo>) -> Vec<TaskPriorityInfo> {
    tasks.sort_by(|a, b| RankKey::for_task(a).cmp(&RankKey::for_task(b)));
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskDescriptor;
    use chrono::{NaiveDate, NaiveDateTime};

    fn t0() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn make_info(
        title: &str,
        score: f64,
        level: u32,
        due_date: Option<NaiveDate>,
    ) -> TaskPriorityInfo {
        TaskPriorityInfo {
            task: TaskDescriptor {
                title: title.to_string(),
                estimated_hours: 2.0,
                due_date,
                dependencies: vec![],
            },
            priority_score: score,
            dependency_level: level,
            urgency_score: 0.0,
            effort_score: 0.0,
            dependency_score: 0.0,
            earliest_start_date: t0(),
            priority_reason: String::new(),
        }
    }

    fn titles(ranked: &[TaskPriorityInfo]) -> Vec<&str> {
        ranked.iter().map(|i| i.task.title.as_str()).collect()
    }

    #[test]
    fn test_higher_score_first() {
        let ranked = rank_tasks(vec![
            make_info("low", 40.0, 0, None),
            make_info("high", 80.0, 5, None),
        ]);
        assert_eq!(titles(&ranked), vec!["high", "low"]);
    }

    #[test]
    fn test_tie_broken_by_level_then_due_date() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let later = NaiveDate::from_ymd_opt(2025, 4, 20).unwrap();
        let ranked = rank_tasks(vec![
            make_info("no_due", 50.0, 1, None),
            make_info("later_due", 50.0, 1, Some(later)),
            make_info("deep", 50.0, 2, Some(due)),
            make_info("shallow", 50.0, 0, None),
            make_info("early_due", 50.0, 1, Some(due)),
        ]);
        // Level ascending; within level 1, due date ascending with None last
        assert_eq!(
            titles(&ranked),
            vec!["shallow", "early_due", "later_due", "no_due", "deep"]
        );
    }

    #[test]
    fn test_full_tie_keeps_input_order() {
        let ranked = rank_tasks(vec![
            make_info("first", 50.0, 1, None),
            make_info("second", 50.0, 1, None),
        ]);
        assert_eq!(titles(&ranked), vec!["first", "second"]);
    }
}
