//! Error types for the fallible edges of the crate.
//!
//! The simulation core itself is total: scheduling, energy and thermal
//! operations never fail on well-formed inputs. Errors only arise while
//! loading configuration or task records and writing reports.

use std::path::PathBuf;

use thiserror::Error;

/// Invalid or unreadable run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown scheduler '{0}' (expected RR, Priority, FCFS or DVFS)")]
    UnknownScheduler(String),

    #[error("task count must be positive")]
    NoTasks,

    #[error("simulation duration must be positive")]
    ZeroDuration,

    #[error("minimum task duration {min} exceeds maximum {max}")]
    DurationRange { min: u32, max: u32 },

    #[error("priority range {min}..={max} is empty")]
    PriorityRange { min: i32, max: i32 },

    #[error("round-robin quantum must be positive")]
    ZeroQuantum,

    #[error("category weights must be non-negative with a positive sum")]
    CategoryWeights,

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A task record whose fields contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("task {id}: remaining work {remaining} exceeds duration {duration}")]
    RemainingExceedsDuration {
        id: u32,
        remaining: u32,
        duration: u32,
    },

    #[error("task {id}: end tick {end} precedes start tick {start}")]
    EndBeforeStart { id: u32, start: u64, end: u64 },

    #[error("task {id}: end tick set but {remaining} work units remain")]
    EndedWithWorkLeft { id: u32, remaining: u32 },
}

/// Failure writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
