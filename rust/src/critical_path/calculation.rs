//! Critical path calculation using forward and backward passes.

use chrono::{Days, NaiveDate};
use std::collections::HashMap;

use crate::config::{BackwardAnchor, ScheduleConfig};
use crate::error::ScheduleError;
use crate::graph::TaskGraph;
use crate::interner::TaskIdx;
use crate::models::{overrides_from_commitments, Commitment, DurationOverrides, WbsTask};
use crate::topology::topological_order;
use crate::{log_debug, log_summary, log_tasks};

use super::types::TimelineResult;

/// Earliest start/finish per task, indexed by [`TaskIdx`].
struct ForwardPass {
    earliest_start: Vec<NaiveDate>,
    earliest_finish: Vec<NaiveDate>,
}

/// Latest start/finish per task, indexed by [`TaskIdx`].
struct BackwardPass {
    latest_start: Vec<NaiveDate>,
    latest_finish: Vec<NaiveDate>,
}

fn days(graph: &TaskGraph, idx: TaskIdx) -> Days {
    // Non-negative: graph construction rejects negative durations.
    Days::new(graph.duration(idx).unsigned_abs())
}

fn out_of_range(graph: &TaskGraph, idx: TaskIdx) -> ScheduleError {
    ScheduleError::DateOutOfRange {
        task: graph.id(idx).to_string(),
    }
}

/// ES = max EF of direct dependencies (start date for roots), EF = ES + duration.
///
/// `order` must be topological so every dependency is final before it is read.
fn forward_pass(
    graph: &TaskGraph,
    order: &[TaskIdx],
    verbosity: u8,
) -> Result<ForwardPass, ScheduleError> {
    let n = graph.len();
    let mut earliest_start = vec![graph.start_date(); n];
    let mut earliest_finish = vec![graph.start_date(); n];

    for &idx in order {
        let es = graph
            .dependencies(idx)
            .iter()
            .map(|&dep| earliest_finish[dep as usize])
            .max()
            .unwrap_or(graph.start_date());

        let ef = es
            .checked_add_days(days(graph, idx))
            .ok_or_else(|| out_of_range(graph, idx))?;

        log_debug!(
            verbosity,
            "forward {}: es={} ef={} ({}d)",
            graph.id(idx),
            es,
            ef,
            graph.duration(idx)
        );

        earliest_start[idx as usize] = es;
        earliest_finish[idx as usize] = ef;
    }

    Ok(ForwardPass {
        earliest_start,
        earliest_finish,
    })
}

/// LF = min LS of direct successors (`anchor` for sinks), LS = LF - duration.
///
/// With the deadline as anchor, slack is margin-to-deadline and goes negative
/// for an infeasible plan.
fn backward_pass(
    graph: &TaskGraph,
    order: &[TaskIdx],
    anchor: NaiveDate,
    verbosity: u8,
) -> Result<BackwardPass, ScheduleError> {
    let n = graph.len();
    let mut latest_start = vec![anchor; n];
    let mut latest_finish = vec![anchor; n];

    for &idx in order.iter().rev() {
        let lf = graph
            .successors(idx)
            .iter()
            .map(|&succ| latest_start[succ as usize])
            .min()
            .unwrap_or(anchor);

        let ls = lf
            .checked_sub_days(days(graph, idx))
            .ok_or_else(|| out_of_range(graph, idx))?;

        log_debug!(verbosity, "backward {}: lf={} ls={}", graph.id(idx), lf, ls);

        latest_start[idx as usize] = ls;
        latest_finish[idx as usize] = lf;
    }

    Ok(BackwardPass {
        latest_start,
        latest_finish,
    })
}

/// Run the full CPM calculation over a prepared graph.
///
/// `anchor` selects the finish date of tasks without successors in the
/// backward pass; the deadline verdict always compares against the deadline.
///
/// # Returns
/// * `Ok(TimelineResult)` with one entry per task in every map
/// * `Err(ScheduleError::CircularDependency)` if the graph has a cycle
/// * `Err(ScheduleError::DateOutOfRange)` if a date leaves chrono's range
pub fn calculate_timeline(
    graph: &TaskGraph,
    anchor: BackwardAnchor,
    verbosity: u8,
) -> Result<TimelineResult, ScheduleError> {
    log_summary!(
        verbosity,
        "timeline: {} tasks, start={}, deadline={}",
        graph.len(),
        graph.start_date(),
        graph.deadline()
    );

    if graph.is_empty() {
        return Ok(TimelineResult::empty(graph.start_date(), graph.deadline()));
    }

    let order = topological_order(graph)?;
    log_debug!(
        verbosity,
        "topological order: {:?}",
        order.iter().map(|&idx| graph.id(idx)).collect::<Vec<_>>()
    );

    let forward = forward_pass(graph, &order, verbosity)?;
    let projected_completion = forward
        .earliest_finish
        .iter()
        .copied()
        .max()
        .unwrap_or(graph.start_date());
    let anchor_date = match anchor {
        BackwardAnchor::Deadline => graph.deadline(),
        BackwardAnchor::ProjectedCompletion => projected_completion,
    };
    let backward = backward_pass(graph, &order, anchor_date, verbosity)?;

    let n = graph.len();
    let mut earliest_start = HashMap::with_capacity(n);
    let mut earliest_finish = HashMap::with_capacity(n);
    let mut latest_start = HashMap::with_capacity(n);
    let mut latest_finish = HashMap::with_capacity(n);
    let mut slack = HashMap::with_capacity(n);
    let mut critical_path = Vec::new();

    for (i, id) in graph.task_ids().iter().enumerate() {
        let task_slack =
            (backward.latest_start[i] - forward.earliest_start[i]).num_days();
        log_tasks!(verbosity, "{}: slack {}d", id, task_slack);

        if task_slack == 0 {
            critical_path.push(id.clone());
        }
        earliest_start.insert(id.clone(), forward.earliest_start[i]);
        earliest_finish.insert(id.clone(), forward.earliest_finish[i]);
        latest_start.insert(id.clone(), backward.latest_start[i]);
        latest_finish.insert(id.clone(), backward.latest_finish[i]);
        slack.insert(id.clone(), task_slack);
    }

    let meets_deadline = projected_completion <= graph.deadline();
    let total_duration_days = (projected_completion - graph.start_date()).num_days();

    log_summary!(
        verbosity,
        "projected completion {} ({} days), meets deadline: {}, critical: {:?}",
        projected_completion,
        total_duration_days,
        meets_deadline,
        critical_path
    );

    Ok(TimelineResult {
        earliest_start,
        earliest_finish,
        latest_start,
        latest_finish,
        slack,
        critical_path,
        start_date: graph.start_date(),
        deadline: graph.deadline(),
        projected_completion,
        meets_deadline,
        total_duration_days,
    })
}

/// Build the graph from task definitions and overrides, then run CPM.
pub fn calculate_with_overrides(
    tasks: &[WbsTask],
    overrides: &DurationOverrides,
    config: &ScheduleConfig,
) -> Result<TimelineResult, ScheduleError> {
    let graph = TaskGraph::build(
        tasks,
        overrides,
        config.start_date,
        config.deadline,
        config.verbosity,
    )?;
    calculate_timeline(&graph, config.anchor, config.verbosity)
}

/// Calculate the critical path for WBS items with negotiated commitments.
///
/// Commitments carrying a duration override the task's baseline or locked
/// duration; the rest are ignored.
pub fn calculate_critical_path(
    tasks: &[WbsTask],
    commitments: &[Commitment],
    config: &ScheduleConfig,
) -> Result<TimelineResult, ScheduleError> {
    let overrides = overrides_from_commitments(commitments);
    calculate_with_overrides(tasks, &overrides, config)
}
