//! Logging macros for the timeline engine with verbosity level control.
//!
//! Zero-cost when disabled (verbosity=0). Output goes to stderr so it never
//! mixes with results handed back to the caller.
//! - 0: SILENT (nothing)
//! - 1: SUMMARY (graph size, completion date, deadline verdict)
//! - 2: TASKS (per-task decisions: ignored overrides, slack values)
//! - 3: DEBUG (pass internals: topological order, ES/LF values)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_SUMMARY: u8 = 1;
pub const VERBOSITY_TASKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at SUMMARY level (verbosity >= 1).
#[macro_export]
macro_rules! log_summary {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_SUMMARY {
            eprintln!("[wbs_schedule] {}", format_args!($($arg)*));
        }
    };
}

/// Log at TASKS level (verbosity >= 2).
#[macro_export]
macro_rules! log_tasks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_TASKS {
            eprintln!("[wbs_schedule]   {}", format_args!($($arg)*));
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!("[wbs_schedule]     {}", format_args!($($arg)*));
        }
    };
}
