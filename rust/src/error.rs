//! Error types for graph construction and timeline calculation.

use thiserror::Error;

/// Fatal conditions that stop a timeline calculation.
///
/// No partial result is ever returned alongside one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Task {task:?} depends on unknown task {dependency:?}")]
    UnknownDependency { task: String, dependency: String },
    #[error("Task {0:?} is defined more than once")]
    DuplicateTask(String),
    #[error("Task {task:?} resolved to a negative duration of {days} days")]
    NegativeDuration { task: String, days: i64 },
    #[error("Circular dependency detected among tasks: {}", .0.join(", "))]
    CircularDependency(Vec<String>),
    #[error("Date arithmetic for task {task:?} leaves the supported calendar range")]
    DateOutOfRange { task: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ScheduleError::UnknownDependency {
            task: "1.2".to_string(),
            dependency: "9.9".to_string(),
        };
        assert_eq!(err.to_string(), "Task \"1.2\" depends on unknown task \"9.9\"");

        let err = ScheduleError::CircularDependency(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(
            err.to_string(),
            "Circular dependency detected among tasks: a, b"
        );

        let err = ScheduleError::NegativeDuration {
            task: "x".to_string(),
            days: -3,
        };
        assert!(err.to_string().contains("-3 days"));
    }
}
