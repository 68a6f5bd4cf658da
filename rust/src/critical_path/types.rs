//! Result types for timeline calculation.

use chrono::NaiveDate;
use pyo3::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

/// Per-task view of a computed timeline.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaskTiming {
    #[pyo3(get)]
    pub earliest_start: NaiveDate,
    #[pyo3(get)]
    pub earliest_finish: NaiveDate,
    #[pyo3(get)]
    pub latest_start: NaiveDate,
    #[pyo3(get)]
    pub latest_finish: NaiveDate,
    /// latest_start - earliest_start in days. Negative when the deadline
    /// cannot be met through this task.
    #[pyo3(get)]
    pub slack: i64,
}

#[pymethods]
impl TaskTiming {
    pub fn is_critical(&self) -> bool {
        self.slack == 0
    }

    fn __repr__(&self) -> String {
        format!(
            "TaskTiming(es={}, ef={}, ls={}, lf={}, slack={})",
            self.earliest_start,
            self.earliest_finish,
            self.latest_start,
            self.latest_finish,
            self.slack
        )
    }
}

/// Complete outcome of one CPM calculation.
///
/// Every map holds exactly one entry per task in the graph. Dates serialize
/// as `YYYY-MM-DD`.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimelineResult {
    #[pyo3(get)]
    pub earliest_start: HashMap<String, NaiveDate>,
    #[pyo3(get)]
    pub earliest_finish: HashMap<String, NaiveDate>,
    #[pyo3(get)]
    pub latest_start: HashMap<String, NaiveDate>,
    #[pyo3(get)]
    pub latest_finish: HashMap<String, NaiveDate>,
    #[pyo3(get)]
    pub slack: HashMap<String, i64>,
    /// Zero-slack task ids in declaration order.
    #[pyo3(get)]
    pub critical_path: Vec<String>,
    #[pyo3(get)]
    pub start_date: NaiveDate,
    #[pyo3(get)]
    pub deadline: NaiveDate,
    #[pyo3(get)]
    #[serde(rename = "projected_completion_date")]
    pub projected_completion: NaiveDate,
    #[pyo3(get)]
    pub meets_deadline: bool,
    #[pyo3(get)]
    pub total_duration_days: i64,
}

impl TimelineResult {
    /// Trivial timeline of a project with no tasks.
    pub fn empty(start_date: NaiveDate, deadline: NaiveDate) -> Self {
        Self {
            earliest_start: HashMap::new(),
            earliest_finish: HashMap::new(),
            latest_start: HashMap::new(),
            latest_finish: HashMap::new(),
            slack: HashMap::new(),
            critical_path: Vec::new(),
            start_date,
            deadline,
            projected_completion: start_date,
            meets_deadline: start_date <= deadline,
            total_duration_days: 0,
        }
    }

    /// Flat JSON document of the whole result.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[pymethods]
impl TimelineResult {
    /// Days of margin between projected completion and the deadline.
    /// Negative when the project finishes late.
    pub fn days_before_deadline(&self) -> i64 {
        (self.deadline - self.projected_completion).num_days()
    }

    pub fn is_critical(&self, task_id: &str) -> bool {
        self.slack.get(task_id) == Some(&0)
    }

    /// All timing values for one task, or `None` for an unknown id.
    pub fn timing(&self, task_id: &str) -> Option<TaskTiming> {
        Some(TaskTiming {
            earliest_start: *self.earliest_start.get(task_id)?,
            earliest_finish: *self.earliest_finish.get(task_id)?,
            latest_start: *self.latest_start.get(task_id)?,
            latest_finish: *self.latest_finish.get(task_id)?,
            slack: *self.slack.get(task_id)?,
        })
    }

    fn to_json(&self) -> PyResult<String> {
        self.to_json_string()
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __len__(&self) -> usize {
        self.slack.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "TimelineResult(tasks={}, critical={}, completion={}, meets_deadline={})",
            self.slack.len(),
            self.critical_path.len(),
            self.projected_completion,
            self.meets_deadline
        )
    }
}
