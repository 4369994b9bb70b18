//! Scheduling policies.
//!
//! Every policy implements the [`Scheduler`] contract: the driver submits
//! tasks, asks once per tick which task runs, reports completions, and
//! advances the policy's clock.
//!
//! | Policy | Queue | Preemption | Frequency |
//! |--------|-------|------------|-----------|
//! | FCFS | FIFO | none | fixed 1.0 GHz |
//! | Round-Robin | FIFO | quantum expiry | fixed 1.0 GHz |
//! | Priority | max-heap, FIFO on ties | on higher-priority arrival (optional) | fixed 1.0 GHz |
//! | DVFS-aware | FIFO | none | category/load tiers |
//!
//! # Ownership
//!
//! A policy owns every task it has admitted until the driver reports the
//! task complete, at which point [`Scheduler::notify_completed`] hands it
//! back. Tasks are looked up by id on every access; policies never keep
//! references into their task store.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pering et al. (1998), "The Simulation and Evaluation of Dynamic
//!   Voltage Scaling Algorithms"

mod dvfs;
mod fcfs;
mod policy;
mod priority;
mod round_robin;
mod table;

pub use dvfs::{DvfsScheduler, FrequencyStep};
pub use fcfs::FcfsScheduler;
pub use policy::{Policy, SchedulerKind};
pub use priority::PriorityScheduler;
pub use round_robin::{RoundRobinScheduler, DEFAULT_QUANTUM};
pub use table::TaskTable;

use crate::models::{Task, TaskId, Tick};

/// Frequency reported by policies that do not scale the clock (GHz).
pub const DEFAULT_FREQUENCY_GHZ: f64 = 1.0;

/// Contract shared by all scheduling policies.
///
/// # Call Order
/// Per tick the driver calls `select_for_tick`, then `execute` on the
/// selected task, then `notify_completed` if it finished, then
/// `advance_tick`.
///
/// No operation fails: unknown ids are ignored and an empty policy
/// simply selects nothing.
pub trait Scheduler {
    /// Display name (e.g., "FCFS", "Round-Robin").
    fn name(&self) -> &'static str;

    /// Admits a task into the pending queue.
    ///
    /// A task whose id is already owned by this scheduler is dropped and
    /// `false` is returned.
    fn submit(&mut self, task: Task) -> bool;

    /// Returns the task that runs during the current tick, or `None` when
    /// idle.
    ///
    /// Idempotent within a tick: repeated calls before `advance_tick`
    /// return the same id.
    fn select_for_tick(&mut self) -> Option<TaskId>;

    /// Runs `amount` work units on an owned task.
    fn execute(&mut self, id: TaskId, amount: u32) -> Option<&Task>;

    /// Releases a finished task, returning it to the caller.
    ///
    /// Clears the selection if it pointed at `id`. Unknown ids are a no-op.
    fn notify_completed(&mut self, id: TaskId) -> Option<Task>;

    /// Advances the scheduler clock and any quantum bookkeeping.
    fn advance_tick(&mut self);

    /// Restores construction-time state, dropping all owned tasks.
    fn reset(&mut self);

    /// Read access to the owned tasks.
    fn table(&self) -> &TaskTable;

    /// Current clock frequency (GHz).
    fn current_frequency_ghz(&self) -> f64 {
        DEFAULT_FREQUENCY_GHZ
    }

    /// Whether any task is pending or active.
    fn has_pending_or_active_work(&self) -> bool {
        !self.table().is_empty()
    }

    /// Number of pending plus active tasks.
    fn load(&self) -> usize {
        self.table().len()
    }

    /// Looks up an owned task.
    fn task(&self, id: TaskId) -> Option<&Task> {
        self.table().get(id)
    }

    /// The currently selected task id.
    fn selected(&self) -> Option<TaskId> {
        self.table().selected()
    }

    /// Ticks advanced since construction or the last reset.
    fn current_tick(&self) -> Tick {
        self.table().tick()
    }
}
