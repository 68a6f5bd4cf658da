//! Topological ordering of the task graph using Kahn's algorithm.

use std::collections::VecDeque;

use crate::error::ScheduleError;
use crate::graph::TaskGraph;
use crate::interner::TaskIdx;

/// Order tasks so that every task comes after all of its dependencies.
///
/// Ready tasks are released first-in first-out: the queue is seeded in
/// declaration order and successors are enqueued in declaration order, so the
/// result depends only on the input sequence.
///
/// # Returns
/// * `Ok(order)` containing every task exactly once
/// * `Err(ScheduleError::CircularDependency)` naming the tasks that could not
///   be ordered
pub fn topological_order(graph: &TaskGraph) -> Result<Vec<TaskIdx>, ScheduleError> {
    let n = graph.len();
    let mut in_degree: Vec<usize> = (0..n as TaskIdx).map(|idx| graph.in_degree(idx)).collect();

    let mut queue: VecDeque<TaskIdx> = (0..n as TaskIdx)
        .filter(|&idx| in_degree[idx as usize] == 0)
        .collect();

    let mut order: Vec<TaskIdx> = Vec::with_capacity(n);

    while let Some(idx) = queue.pop_front() {
        order.push(idx);

        for &succ in graph.successors(idx) {
            let degree = &mut in_degree[succ as usize];
            *degree -= 1;
            if *degree == 0 {
                queue.push_back(succ);
            }
        }
    }

    if order.len() != n {
        let stuck = (0..n as TaskIdx)
            .filter(|&idx| in_degree[idx as usize] > 0)
            .map(|idx| graph.id(idx).to_string())
            .collect();
        return Err(ScheduleError::CircularDependency(stuck));
    }

    Ok(order)
}
