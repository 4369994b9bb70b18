//! Task model.
//!
//! A task is a single unit of CPU work with a finite remaining-work counter.
//! It is created by a task source with `remaining == duration`, owned by a
//! scheduler while it is pending or active, and handed to the driver's
//! completed list once its remaining work reaches zero.
//!
//! # Time Representation
//! Durations and tick stamps are counted in simulation ticks (1 tick = 1 ms).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TaskError;

/// Task identifier, unique within one workload.
pub type TaskId = u32;

/// Simulation tick counter.
pub type Tick = u64;

/// Workload category of a task.
///
/// Drives the energy model's activity multiplier and the DVFS policy's
/// frequency choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    /// Compute-dominated work.
    CpuBound,
    /// Work that mostly waits on devices.
    IoBound,
    /// Work dominated by memory traffic.
    MemoryHeavy,
}

impl TaskCategory {
    /// All categories, in declaration order.
    pub const ALL: [TaskCategory; 3] = [Self::CpuBound, Self::IoBound, Self::MemoryHeavy];

    /// Canonical upper-case name (`CPU_BOUND`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CpuBound => "CPU_BOUND",
            Self::IoBound => "IO_BOUND",
            Self::MemoryHeavy => "MEMORY_HEAVY",
        }
    }
}

impl fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work to be scheduled.
///
/// `duration`, `category` and `priority` are fixed at creation. Only
/// `remaining` and the two tick stamps change over a run.
///
/// # Invariants
/// - `0 <= remaining <= duration`
/// - `is_completed() == (remaining == 0)`
/// - `start_tick` and `end_tick` are each written at most once
///
/// Deserialization checks these invariants; `remaining` defaults to
/// `duration` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord")]
pub struct Task {
    id: TaskId,
    duration: u32,
    remaining: u32,
    category: TaskCategory,
    priority: i32,
    start_tick: Option<Tick>,
    end_tick: Option<Tick>,
}

/// Unchecked wire form of [`Task`].
#[derive(Deserialize)]
struct TaskRecord {
    id: TaskId,
    duration: u32,
    #[serde(default)]
    remaining: Option<u32>,
    category: TaskCategory,
    #[serde(default)]
    priority: i32,
    #[serde(default)]
    start_tick: Option<Tick>,
    #[serde(default)]
    end_tick: Option<Tick>,
}

impl TryFrom<TaskRecord> for Task {
    type Error = TaskError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let remaining = record.remaining.unwrap_or(record.duration);
        if remaining > record.duration {
            return Err(TaskError::RemainingExceedsDuration {
                id: record.id,
                remaining,
                duration: record.duration,
            });
        }
        if let Some(end) = record.end_tick {
            if remaining > 0 {
                return Err(TaskError::EndedWithWorkLeft {
                    id: record.id,
                    remaining,
                });
            }
            if let Some(start) = record.start_tick.filter(|&start| start > end) {
                return Err(TaskError::EndBeforeStart {
                    id: record.id,
                    start,
                    end,
                });
            }
        }
        Ok(Self {
            id: record.id,
            duration: record.duration,
            remaining,
            category: record.category,
            priority: record.priority,
            start_tick: record.start_tick,
            end_tick: record.end_tick,
        })
    }
}

impl Task {
    /// Creates a task with full remaining work and priority 0.
    pub fn new(id: TaskId, duration: u32, category: TaskCategory) -> Self {
        Self {
            id,
            duration,
            remaining: duration,
            category,
            priority: 0,
            start_tick: None,
            end_tick: None,
        }
    }

    /// Sets the scheduling priority (higher = more urgent).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    /// Total work units.
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// Work units still to run.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn category(&self) -> TaskCategory {
        self.category
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Tick of first execution, if the task has run.
    pub fn start_tick(&self) -> Option<Tick> {
        self.start_tick
    }

    /// Tick at which the task finished, if it has.
    pub fn end_tick(&self) -> Option<Tick> {
        self.end_tick
    }

    /// Runs `amount` work units. Remaining work saturates at zero.
    pub fn execute(&mut self, amount: u32) {
        self.remaining = self.remaining.saturating_sub(amount);
    }

    /// Whether all work has been done.
    pub fn is_completed(&self) -> bool {
        self.remaining == 0
    }

    /// Records the first-execution tick. Returns `false` (and leaves the
    /// stamp untouched) if it was already set.
    pub fn set_start_tick(&mut self, tick: Tick) -> bool {
        if self.start_tick.is_some() {
            return false;
        }
        self.start_tick = Some(tick);
        true
    }

    /// Records the completion tick. Returns `false` if it was already set.
    pub fn set_end_tick(&mut self, tick: Tick) -> bool {
        if self.end_tick.is_some() {
            return false;
        }
        self.end_tick = Some(tick);
        true
    }

    /// `end_tick - start_tick` when both are known.
    pub fn turnaround(&self) -> Option<Tick> {
        match (self.start_tick, self.end_tick) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }

    /// Restores the task to its freshly generated state.
    pub fn reset(&mut self) {
        self.remaining = self.duration;
        self.start_tick = None;
        self.end_tick = None;
    }
}
