//! Project scheduling engine for WBS negotiation sessions.
//!
//! Computes a Critical Path Method timeline (earliest/latest dates, slack,
//! critical path, deadline verdict) from WBS tasks and negotiated duration
//! commitments, and exposes it to the Python session layer.

// Allow clippy warning triggered by PyO3 macro expansion
#![allow(clippy::useless_conversion)]

use chrono::NaiveDate;
use pyo3::prelude::*;
use std::collections::HashMap;

mod config;
pub mod critical_path;
mod error;
pub mod graph;
mod interner;
pub mod logging;
mod models;
pub mod topology;
pub mod validation;
pub mod wbs;

pub use config::{BackwardAnchor, BudgetConfig, ScheduleConfig};
pub use critical_path::{
    calculate_critical_path, calculate_timeline, calculate_with_overrides, TaskTiming,
    TimelineResult,
};
pub use error::ScheduleError;
pub use graph::TaskGraph;
pub use interner::TaskIdx;
pub use models::{
    overrides_from_commitments, resolve_duration, Commitment, DurationOverrides, WbsTask,
};
pub use topology::topological_order;
pub use validation::{check_commitment_budget, BudgetError, BudgetStatus, PlanVerdict};
pub use wbs::{WbsDocument, WbsError};

/// Calculate the critical path for WBS items with commitments.
///
/// # Arguments
/// * `wbs_items` - WBS tasks with id, dependencies and durations
/// * `commitments` - Negotiated commitments; those with a duration override the task's
/// * `start_date` - Project start (defaults to the config's start date)
/// * `deadline` - Project deadline (defaults to the config's deadline)
/// * `config` - Schedule configuration (backward anchor, verbosity)
///
/// # Returns
/// * TimelineResult with ES/EF/LS/LF, slack, critical path and deadline verdict
///
/// # Raises
/// * ValueError on unknown dependency, duplicate task, negative duration or cycle
#[pyfunction]
#[pyo3(
    name = "calculate_critical_path",
    signature = (wbs_items, commitments, start_date=None, deadline=None, config=None)
)]
fn py_calculate_critical_path(
    wbs_items: Vec<WbsTask>,
    commitments: Vec<Commitment>,
    start_date: Option<NaiveDate>,
    deadline: Option<NaiveDate>,
    config: Option<ScheduleConfig>,
) -> PyResult<TimelineResult> {
    let mut config = config.unwrap_or_default();
    if let Some(start_date) = start_date {
        config.start_date = start_date;
    }
    if let Some(deadline) = deadline {
        config.deadline = deadline;
    }

    match calculate_critical_path(&wbs_items, &commitments, &config) {
        Ok(result) => Ok(result),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Duration a task would be scheduled with, given the override map.
#[pyfunction]
#[pyo3(name = "resolve_duration")]
fn py_resolve_duration(task: WbsTask, overrides: HashMap<String, i64>) -> i64 {
    resolve_duration(&task, &overrides)
}

/// Combine a timeline with the session's budget position.
///
/// The plan is valid only if the deadline is met and spending stays within
/// `total_budget` (defaults to the standard session budget).
#[pyfunction]
#[pyo3(signature = (timeline, budget_used, total_budget=None))]
fn validate_plan(
    timeline: TimelineResult,
    budget_used: f64,
    total_budget: Option<f64>,
) -> PlanVerdict {
    let total_budget = total_budget.unwrap_or(BudgetConfig::default().total_budget);
    PlanVerdict::new(timeline, BudgetStatus::evaluate(budget_used, total_budget))
}

/// Check a new commitment against the negotiable budget.
///
/// # Returns
/// * Spending after the commitment
///
/// # Raises
/// * ValueError if the commitment would exceed `available_budget`
#[pyfunction]
#[pyo3(name = "check_commitment_budget")]
fn py_check_commitment_budget(budget_used: f64, available_budget: f64, cost: f64) -> PyResult<f64> {
    match check_commitment_budget(budget_used, available_budget, cost) {
        Ok(new_used) => Ok(new_used),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// Load the WBS elements from a JSON document on disk.
///
/// # Raises
/// * OSError if the file cannot be read
/// * ValueError if the document is malformed
#[pyfunction]
fn load_wbs(path: String) -> PyResult<Vec<WbsTask>> {
    match WbsDocument::from_path(&path) {
        Ok(doc) => Ok(doc.wbs_elements),
        Err(e @ WbsError::Io { .. }) => Err(pyo3::exceptions::PyOSError::new_err(e.to_string())),
        Err(e) => Err(pyo3::exceptions::PyValueError::new_err(e.to_string())),
    }
}

/// The wbs_schedule Python module.
#[pymodule]
fn wbs_schedule(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Core data types
    m.add_class::<WbsTask>()?;
    m.add_class::<Commitment>()?;
    m.add_class::<TaskTiming>()?;
    m.add_class::<TimelineResult>()?;
    m.add_class::<BudgetStatus>()?;
    m.add_class::<PlanVerdict>()?;

    // Config types
    m.add_class::<ScheduleConfig>()?;
    m.add_class::<BudgetConfig>()?;
    m.add_class::<BackwardAnchor>()?;

    // Algorithms
    m.add_function(wrap_pyfunction!(py_calculate_critical_path, m)?)?;
    m.add_function(wrap_pyfunction!(py_resolve_duration, m)?)?;
    m.add_function(wrap_pyfunction!(validate_plan, m)?)?;
    m.add_function(wrap_pyfunction!(py_check_commitment_budget, m)?)?;
    m.add_function(wrap_pyfunction!(load_wbs, m)?)?;

    Ok(())
}
