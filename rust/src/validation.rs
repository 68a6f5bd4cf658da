//! Plan verdict: combines the timeline's deadline check with a budget check.

use pyo3::prelude::*;
use serde::Serialize;
use thiserror::Error;

use crate::critical_path::TimelineResult;

/// Errors raised by budget checks on incoming commitments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BudgetError {
    #[error("Budget exceeded: remaining {remaining:.0}, attempted commitment {attempted:.0}")]
    Exceeded { remaining: f64, attempted: f64 },
}

/// Budget position of a session.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetStatus {
    #[pyo3(get)]
    pub budget_used: f64,
    #[pyo3(get)]
    pub budget_remaining: f64,
    #[pyo3(get)]
    pub budget_valid: bool,
}

#[pymethods]
impl BudgetStatus {
    /// Compare spending against the total budget ceiling.
    #[staticmethod]
    pub fn evaluate(budget_used: f64, total_budget: f64) -> Self {
        Self {
            budget_used,
            budget_remaining: total_budget - budget_used,
            budget_valid: budget_used <= total_budget,
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "BudgetStatus(used={}, remaining={}, valid={})",
            self.budget_used, self.budget_remaining, self.budget_valid
        )
    }
}

/// Final verdict on a negotiated plan.
///
/// Serializes as one flat document: the timeline fields, the budget fields
/// and the combined `valid` flag.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlanVerdict {
    #[pyo3(get)]
    #[serde(flatten)]
    pub timeline: TimelineResult,
    #[pyo3(get)]
    #[serde(flatten)]
    pub budget: BudgetStatus,
    /// `meets_deadline && budget_valid`.
    #[pyo3(get)]
    pub valid: bool,
}

impl PlanVerdict {
    pub fn new(timeline: TimelineResult, budget: BudgetStatus) -> Self {
        let valid = timeline.meets_deadline && budget.budget_valid;
        Self {
            timeline,
            budget,
            valid,
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[pymethods]
impl PlanVerdict {
    fn to_json(&self) -> PyResult<String> {
        self.to_json_string()
            .map_err(|e| pyo3::exceptions::PyValueError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "PlanVerdict(valid={}, meets_deadline={}, budget_valid={})",
            self.valid, self.timeline.meets_deadline, self.budget.budget_valid
        )
    }
}

/// Check that a new commitment fits in the negotiable budget.
///
/// # Returns
/// * `Ok(new_used)` - spending after the commitment
/// * `Err(BudgetError::Exceeded)` if `used + cost` would exceed `available`
pub fn check_commitment_budget(used: f64, available: f64, cost: f64) -> Result<f64, BudgetError> {
    let new_used = used + cost;
    if new_used > available {
        return Err(BudgetError::Exceeded {
            remaining: available - used,
            attempted: cost,
        });
    }
    Ok(new_used)
}
