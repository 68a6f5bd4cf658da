//! Configuration types for timeline calculation and budget checks.

use chrono::NaiveDate;
use pyo3::prelude::*;

/// Project start used when the caller does not supply one.
pub const DEFAULT_START_DATE: (i32, u32, u32) = (2025, 1, 15);
/// Contractual deadline used when the caller does not supply one.
pub const DEFAULT_DEADLINE: (i32, u32, u32) = (2026, 5, 15);

fn ymd((year, month, day): (i32, u32, u32)) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

/// Finish date given to tasks without successors in the backward pass.
#[pyclass(eq, eq_int)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackwardAnchor {
    /// The contractual deadline: slack is margin-to-deadline and may be negative.
    #[default]
    Deadline,
    /// The forward-pass completion date (classical CPM float, never negative).
    ProjectedCompletion,
}

/// Configuration for one timeline calculation.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduleConfig {
    /// First calendar day of the project (inclusive).
    #[pyo3(get, set)]
    pub start_date: NaiveDate,
    /// Contractual deadline checked by the verdict.
    #[pyo3(get, set)]
    pub deadline: NaiveDate,
    #[pyo3(get, set)]
    pub anchor: BackwardAnchor,
    /// Verbosity level: 0=silent, 1=summary, 2=tasks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start_date: ymd(DEFAULT_START_DATE),
            deadline: ymd(DEFAULT_DEADLINE),
            anchor: BackwardAnchor::Deadline,
            verbosity: 0,
        }
    }
}

impl ScheduleConfig {
    /// Same configuration with the given project window.
    pub fn with_window(mut self, start_date: NaiveDate, deadline: NaiveDate) -> Self {
        self.start_date = start_date;
        self.deadline = deadline;
        self
    }
}

#[pymethods]
impl ScheduleConfig {
    #[new]
    #[pyo3(signature = (start_date=None, deadline=None, anchor=None, verbosity=None))]
    fn new(
        start_date: Option<NaiveDate>,
        deadline: Option<NaiveDate>,
        anchor: Option<BackwardAnchor>,
        verbosity: Option<u8>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            start_date: start_date.unwrap_or(defaults.start_date),
            deadline: deadline.unwrap_or(defaults.deadline),
            anchor: anchor.unwrap_or(defaults.anchor),
            verbosity: verbosity.unwrap_or(defaults.verbosity),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "ScheduleConfig(start_date={}, deadline={}, anchor={:?}, verbosity={})",
            self.start_date, self.deadline, self.anchor, self.verbosity
        )
    }
}

/// Budget envelope of a negotiation session, in NOK.
#[pyclass]
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetConfig {
    /// Total project budget (ceiling for the final verdict).
    #[pyo3(get, set)]
    pub total_budget: f64,
    /// Portion already bound to locked (non-negotiable) work.
    #[pyo3(get, set)]
    pub locked_budget: f64,
    /// Portion available for negotiated commitments.
    #[pyo3(get, set)]
    pub available_budget: f64,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            total_budget: 700_000_000.0,
            locked_budget: 390_000_000.0,
            available_budget: 310_000_000.0,
        }
    }
}

#[pymethods]
impl BudgetConfig {
    #[new]
    #[pyo3(signature = (total_budget=None, locked_budget=None, available_budget=None))]
    fn new(
        total_budget: Option<f64>,
        locked_budget: Option<f64>,
        available_budget: Option<f64>,
    ) -> Self {
        let defaults = Self::default();
        Self {
            total_budget: total_budget.unwrap_or(defaults.total_budget),
            locked_budget: locked_budget.unwrap_or(defaults.locked_budget),
            available_budget: available_budget.unwrap_or(defaults.available_budget),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "BudgetConfig(total_budget={}, locked_budget={}, available_budget={})",
            self.total_budget, self.locked_budget, self.available_budget
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_config_defaults() {
        let config = ScheduleConfig::default();
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(config.deadline, NaiveDate::from_ymd_opt(2026, 5, 15).unwrap());
        assert_eq!(config.anchor, BackwardAnchor::Deadline);
        assert_eq!(config.verbosity, 0);
    }

    #[test]
    fn test_with_window_keeps_verbosity() {
        let config = ScheduleConfig {
            verbosity: 2,
            ..Default::default()
        };
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let deadline = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let config = config.with_window(start, deadline);

        assert_eq!(config.start_date, start);
        assert_eq!(config.deadline, deadline);
        assert_eq!(config.verbosity, 2);
    }

    #[test]
    fn test_budget_config_defaults_partition_total() {
        let budget = BudgetConfig::default();
        assert!((budget.locked_budget + budget.available_budget - budget.total_budget).abs() < 1e-6);
    }
}
