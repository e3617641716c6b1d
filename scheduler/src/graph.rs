//! Task graph construction and dependency resolution.
//!
//! Builds an interned, index-addressed view of one task set, then resolves
//! each task's dependency level and earliest start with a depth-first walk
//! over enum-tagged per-node state. A cycle anywhere fails the whole
//! resolution; an unresolvable dependency title is skipped silently.

use chrono::{Duration, NaiveDateTime};
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;

use crate::models::{DependencyInfo, TaskDescriptor};

/// Errors that can occur during graph resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The dependency graph contains a cycle. Carries a title on the cycle.
    #[error("Circular dependency detected involving task: {0}")]
    CircularDependency(String),
}

/// Traversal state for one node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum NodeState {
    Unvisited,
    InProgress,
    Done,
}

/// Index-addressed view of one task set.
///
/// Titles are interned to positional ids. Dependency edges keep only titles
/// that resolve to a task in the set; the raw dependency list (including
/// unresolvable titles) stays on the descriptor itself. If two tasks share
/// a title, the later one wins the title lookup.
pub struct TaskGraph<'a> {
    tasks: &'a [TaskDescriptor],
    /// Resolvable dependency edges, indexed by task id.
    deps: Vec<Vec<u32>>,
    /// Number of tasks whose dependency list names this task.
    dependent_counts: Vec<u32>,
}

impl<'a> TaskGraph<'a> {
    /// Build the adjacency view. Dependency titles absent from the set are
    /// dropped from the edge list. A task naming the same dependency twice
    /// produces a duplicate edge (harmless to resolution) but counts as a
    /// single dependent of that dependency.
    pub fn new(tasks: &'a [TaskDescriptor]) -> Self {
        let mut index: FxHashMap<&str, u32> =
            FxHashMap::with_capacity_and_hasher(tasks.len(), Default::default());
        for (id, task) in tasks.iter().enumerate() {
            index.insert(task.title.as_str(), id as u32);
        }

        let mut deps: Vec<Vec<u32>> = vec![Vec::new(); tasks.len()];
        let mut dependent_counts = vec![0u32; tasks.len()];
        let mut named: FxHashSet<u32> = FxHashSet::default();

        for (id, task) in tasks.iter().enumerate() {
            named.clear();
            for dep_title in &task.dependencies {
                let Some(&dep_id) = index.get(dep_title.as_str()) else {
                    continue;
                };
                deps[id].push(dep_id);
                if named.insert(dep_id) {
                    dependent_counts[dep_id as usize] += 1;
                }
            }
        }

        Self {
            tasks,
            deps,
            dependent_counts,
        }
    }

    /// Number of tasks in the set.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of tasks whose dependency list names the task at `id`.
    pub fn dependent_count(&self, id: usize) -> u32 {
        self.dependent_counts[id]
    }

    /// Resolve every task's dependency level and earliest start.
    ///
    /// `now` anchors earliest-start for every node in every chain: each task
    /// starts no earlier than `now`, advanced past the computed finish time
    /// of each resolvable dependency. Returns one entry per input task, in
    /// input order.
    ///
    /// Fails with [`GraphError::CircularDependency`] on the first node
    /// revisited while still in progress; no partial results are returned.
    pub fn resolve(&self, now: NaiveDateTime) -> Result<Vec<DependencyInfo>, GraphError> {
        let n = self.tasks.len();
        let mut states = vec![NodeState::Unvisited; n];
        let mut infos = vec![
            DependencyInfo {
                level: 0,
                earliest_start: now,
            };
            n
        ];

        for id in 0..n {
            self.visit(id, now, &mut states, &mut infos)?;
        }

        Ok(infos)
    }

    fn visit(
        &self,
        id: usize,
        now: NaiveDateTime,
        states: &mut [NodeState],
        infos: &mut [DependencyInfo],
    ) -> Result<(), GraphError> {
        match states[id] {
            NodeState::Done => return Ok(()),
            NodeState::InProgress => {
                return Err(GraphError::CircularDependency(self.tasks[id].title.clone()))
            }
            NodeState::Unvisited => {}
        }
        states[id] = NodeState::InProgress;

        let mut level = 0u32;
        let mut earliest_start = now;

        for &dep_id in &self.deps[id] {
            let dep = dep_id as usize;
            self.visit(dep, now, states, infos)?;

            level = level.max(infos[dep].level + 1);

            // The dependency finishes at its own earliest start plus its
            // estimated duration; this task cannot begin before then.
            let dep_finish =
                infos[dep].earliest_start + hours_to_duration(self.tasks[dep].estimated_hours);
            if dep_finish > earliest_start {
                earliest_start = dep_finish;
            }
        }

        states[id] = NodeState::Done;
        infos[id] = DependencyInfo {
            level,
            earliest_start,
        };
        Ok(())
    }
}

/// Convert an hour estimate to a chrono duration with second precision.
fn hours_to_duration(hours: f64) -> Duration {
    Duration::seconds((hours * 3600.0).round() as i64)
}
