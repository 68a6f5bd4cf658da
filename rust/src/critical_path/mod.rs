//! Critical Path Method over a [`TaskGraph`](crate::graph::TaskGraph).
//!
//! A forward pass computes earliest start/finish, a backward pass computes
//! latest start/finish, and zero-slack tasks form the critical path.

mod calculation;
mod types;

pub use calculation::{calculate_critical_path, calculate_timeline, calculate_with_overrides};
pub use types::{TaskTiming, TimelineResult};
