//! Task graph construction: id interning, duration resolution and the
//! predecessor/successor adjacency used by both passes.

use chrono::NaiveDate;

use crate::error::ScheduleError;
use crate::interner::{TaskIdInterner, TaskIdx};
use crate::log_tasks;
use crate::models::{resolve_duration, DurationOverrides, WbsTask};

/// Immutable dependency graph for one scheduling request.
///
/// All per-task data is stored in vectors indexed by [`TaskIdx`], and the
/// index order is the order in which tasks were supplied.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    index: TaskIdInterner,
    /// Resolved duration in days.
    durations: Vec<i64>,
    /// Direct predecessors, deduplicated, in declaration order.
    deps: Vec<Vec<TaskIdx>>,
    /// Direct successors, in task order.
    successors: Vec<Vec<TaskIdx>>,
    start_date: NaiveDate,
    deadline: NaiveDate,
}

impl TaskGraph {
    /// Build a graph from task definitions and committed-duration overrides.
    ///
    /// Fails on duplicate ids, unknown dependency ids and negative resolved
    /// durations. Cycles are not detected here; the topological sort does that.
    pub fn new(
        tasks: &[WbsTask],
        overrides: &DurationOverrides,
        start_date: NaiveDate,
        deadline: NaiveDate,
    ) -> Result<Self, ScheduleError> {
        Self::build(tasks, overrides, start_date, deadline, 0)
    }

    pub(crate) fn build(
        tasks: &[WbsTask],
        overrides: &DurationOverrides,
        start_date: NaiveDate,
        deadline: NaiveDate,
        verbosity: u8,
    ) -> Result<Self, ScheduleError> {
        let n = tasks.len();
        let mut index = TaskIdInterner::with_capacity(n);
        let mut durations = Vec::with_capacity(n);

        for task in tasks {
            if index.insert_new(&task.id).is_none() {
                return Err(ScheduleError::DuplicateTask(task.id.clone()));
            }
            let days = resolve_duration(task, overrides);
            if days < 0 {
                return Err(ScheduleError::NegativeDuration {
                    task: task.id.clone(),
                    days,
                });
            }
            durations.push(days);
        }

        for id in overrides.keys() {
            if index.get(id).is_none() {
                log_tasks!(verbosity, "ignoring override for unknown task {:?}", id);
            }
        }

        let mut deps: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];
        let mut successors: Vec<Vec<TaskIdx>> = vec![Vec::new(); n];

        for (idx, task) in tasks.iter().enumerate() {
            for dep_id in &task.dependencies {
                let dep = index
                    .get(dep_id)
                    .ok_or_else(|| ScheduleError::UnknownDependency {
                        task: task.id.clone(),
                        dependency: dep_id.clone(),
                    })?;
                if deps[idx].contains(&dep) {
                    continue;
                }
                deps[idx].push(dep);
                successors[dep as usize].push(idx as TaskIdx);
            }
        }

        Ok(Self {
            index,
            durations,
            deps,
            successors,
            start_date,
            deadline,
        })
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    /// Task ids in declaration order.
    pub fn task_ids(&self) -> &[String] {
        self.index.names()
    }

    pub fn index_of(&self, id: &str) -> Option<TaskIdx> {
        self.index.get(id)
    }

    pub fn id(&self, idx: TaskIdx) -> &str {
        self.index.name(idx)
    }

    /// Resolved duration in days.
    pub fn duration(&self, idx: TaskIdx) -> i64 {
        self.durations[idx as usize]
    }

    pub fn dependencies(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.deps[idx as usize]
    }

    pub fn successors(&self, idx: TaskIdx) -> &[TaskIdx] {
        &self.successors[idx as usize]
    }

    /// Number of distinct predecessors (in-degree for Kahn's algorithm).
    pub fn in_degree(&self, idx: TaskIdx) -> usize {
        self.deps[idx as usize].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn build(tasks: &[WbsTask], overrides: &DurationOverrides) -> Result<TaskGraph, ScheduleError> {
        TaskGraph::new(tasks, overrides, date(2025, 1, 1), date(2025, 1, 20))
    }

    #[test]
    fn test_builds_adjacency_in_both_directions() {
        let tasks = vec![
            WbsTask::locked("a", 2),
            WbsTask::locked("b", 3).with_dependencies(["a"]),
            WbsTask::locked("c", 4).with_dependencies(["a", "b"]),
        ];
        let graph = build(&tasks, &DurationOverrides::new()).unwrap();

        let a = graph.index_of("a").unwrap();
        let b = graph.index_of("b").unwrap();
        let c = graph.index_of("c").unwrap();

        assert_eq!(graph.len(), 3);
        assert_eq!(graph.dependencies(c), &[a, b]);
        assert_eq!(graph.successors(a), &[b, c]);
        assert_eq!(graph.successors(c), &[] as &[TaskIdx]);
        assert_eq!(graph.in_degree(c), 2);
        assert_eq!(graph.task_ids(), &["a", "b", "c"]);
    }

    #[test]
    fn test_resolves_durations_with_overrides() {
        let tasks = vec![
            WbsTask::locked("t1", 5),
            WbsTask::negotiable("t2", 3).with_dependencies(["t1"]),
        ];
        let overrides = DurationOverrides::from([("t2".to_string(), 2)]);
        let graph = build(&tasks, &overrides).unwrap();

        assert_eq!(graph.duration(0), 5);
        assert_eq!(graph.duration(1), 2);
    }

    #[test]
    fn test_unknown_dependency_rejected() {
        let tasks = vec![WbsTask::locked("a", 1).with_dependencies(["ghost"])];
        let err = build(&tasks, &DurationOverrides::new()).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::UnknownDependency {
                task: "a".to_string(),
                dependency: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_task_rejected() {
        let tasks = vec![WbsTask::locked("a", 1), WbsTask::locked("a", 2)];
        let err = build(&tasks, &DurationOverrides::new()).unwrap_err();
        assert_eq!(err, ScheduleError::DuplicateTask("a".to_string()));
    }

    #[test]
    fn test_negative_override_rejected() {
        let tasks = vec![WbsTask::negotiable("n", 4)];
        let overrides = DurationOverrides::from([("n".to_string(), -1)]);
        let err = build(&tasks, &overrides).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::NegativeDuration {
                task: "n".to_string(),
                days: -1,
            }
        );
    }

    #[test]
    fn test_negative_unused_field_is_not_checked() {
        // Only the resolved duration matters.
        let mut task = WbsTask::locked("a", 3);
        task.baseline_duration = -7;
        assert!(build(&[task], &DurationOverrides::new()).is_ok());
    }

    #[test]
    fn test_repeated_dependency_collapsed() {
        let tasks = vec![
            WbsTask::locked("a", 1),
            WbsTask::locked("b", 1).with_dependencies(["a", "a"]),
        ];
        let graph = build(&tasks, &DurationOverrides::new()).unwrap();
        assert_eq!(graph.in_degree(1), 1);
        assert_eq!(graph.successors(0), &[1]);
    }

    #[test]
    fn test_override_for_unknown_task_ignored() {
        let tasks = vec![WbsTask::locked("a", 1)];
        let overrides = DurationOverrides::from([("zzz".to_string(), 10)]);
        let graph = build(&tasks, &overrides).unwrap();
        assert_eq!(graph.duration(0), 1);
    }

    #[test]
    fn test_empty_graph() {
        let graph = build(&[], &DurationOverrides::new()).unwrap();
        assert!(graph.is_empty());
        assert_eq!(graph.start_date(), date(2025, 1, 1));
        assert_eq!(graph.deadline(), date(2025, 1, 20));
    }
}
