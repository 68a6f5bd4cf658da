//! Core data types: WBS tasks, negotiated commitments and duration overrides.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// Note: We use std HashMap here for PyO3 interface compatibility

/// Sparse map of committed durations (task id -> days).
pub type DurationOverrides = HashMap<String, i64>;

/// A work-breakdown-structure item.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WbsTask {
    #[pyo3(get, set)]
    pub id: String,
    #[pyo3(get, set)]
    #[serde(default)]
    pub name: Option<String>,
    /// Predecessors that must finish before this task can start.
    #[pyo3(get, set)]
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Negotiable tasks use `baseline_duration`, locked ones `locked_duration`.
    #[pyo3(get, set)]
    #[serde(default)]
    pub is_negotiable: bool,
    #[pyo3(get, set)]
    #[serde(default)]
    pub locked_duration: i64,
    #[pyo3(get, set)]
    #[serde(default)]
    pub baseline_duration: i64,
    #[pyo3(get, set)]
    #[serde(default)]
    pub locked_cost: Option<f64>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub baseline_cost: Option<f64>,
}

impl WbsTask {
    /// Locked task with a fixed duration.
    pub fn locked(id: impl Into<String>, duration: i64) -> Self {
        Self {
            id: id.into(),
            name: None,
            dependencies: Vec::new(),
            is_negotiable: false,
            locked_duration: duration,
            baseline_duration: 0,
            locked_cost: None,
            baseline_cost: None,
        }
    }

    /// Negotiable task with a baseline duration.
    pub fn negotiable(id: impl Into<String>, baseline_duration: i64) -> Self {
        Self {
            is_negotiable: true,
            locked_duration: 0,
            baseline_duration,
            ..Self::locked(id, 0)
        }
    }

    /// Sets the predecessor list.
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Duration used when no override exists.
    pub fn default_duration(&self) -> i64 {
        if self.is_negotiable {
            self.baseline_duration
        } else {
            self.locked_duration
        }
    }
}

#[pymethods]
impl WbsTask {
    #[new]
    #[pyo3(signature = (
        id,
        dependencies=None,
        is_negotiable=false,
        locked_duration=0,
        baseline_duration=0,
        name=None,
        locked_cost=None,
        baseline_cost=None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: String,
        dependencies: Option<Vec<String>>,
        is_negotiable: bool,
        locked_duration: i64,
        baseline_duration: i64,
        name: Option<String>,
        locked_cost: Option<f64>,
        baseline_cost: Option<f64>,
    ) -> Self {
        Self {
            id,
            name,
            dependencies: dependencies.unwrap_or_default(),
            is_negotiable,
            locked_duration,
            baseline_duration,
            locked_cost,
            baseline_cost,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "WbsTask(id={:?}, negotiable={}, duration={}, deps={})",
            self.id,
            self.is_negotiable,
            self.default_duration(),
            self.dependencies.len()
        )
    }
}

/// A commitment accepted during negotiation.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Commitment {
    #[pyo3(get, set)]
    pub wbs_item_id: String,
    /// Committed duration in days; `None` leaves the baseline in force.
    #[pyo3(get, set)]
    #[serde(default)]
    pub duration: Option<i64>,
    #[pyo3(get, set)]
    #[serde(default)]
    pub cost: Option<f64>,
}

impl Commitment {
    pub fn with_duration(wbs_item_id: impl Into<String>, duration: i64) -> Self {
        Self {
            wbs_item_id: wbs_item_id.into(),
            duration: Some(duration),
            cost: None,
        }
    }
}

#[pymethods]
impl Commitment {
    #[new]
    #[pyo3(signature = (wbs_item_id, duration=None, cost=None))]
    fn new(wbs_item_id: String, duration: Option<i64>, cost: Option<f64>) -> Self {
        Self {
            wbs_item_id,
            duration,
            cost,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "Commitment(wbs_item_id={:?}, duration={:?}, cost={:?})",
            self.wbs_item_id, self.duration, self.cost
        )
    }
}

/// Build the override map from a list of commitments.
///
/// Commitments without a duration are skipped. A zero duration is kept.
/// When several commitments name the same task, the last one wins.
pub fn overrides_from_commitments(commitments: &[Commitment]) -> DurationOverrides {
    commitments
        .iter()
        .filter_map(|c| c.duration.map(|d| (c.wbs_item_id.clone(), d)))
        .collect()
}

/// Authoritative duration of `task` for this calculation.
///
/// An override always wins; otherwise the negotiable flag picks the baseline
/// or the locked duration. Negative values pass through unchanged and are
/// rejected by graph construction.
pub fn resolve_duration(task: &WbsTask, overrides: &DurationOverrides) -> i64 {
    overrides
        .get(&task.id)
        .copied()
        .unwrap_or_else(|| task.default_duration())
}
