//! Round-Robin.
//!
//! FIFO with a fixed time quantum. When the running task exhausts its
//! quantum with work left, it goes to the tail of the queue and the head
//! runs with a fresh quantum.

use std::collections::VecDeque;

use log::{debug, warn};

use super::{Scheduler, TaskTable};
use crate::models::{Task, TaskId};

/// Default quantum (ticks).
pub const DEFAULT_QUANTUM: u32 = 10;

/// Time-sliced FIFO scheduler.
#[derive(Debug, Clone)]
pub struct RoundRobinScheduler {
    table: TaskTable,
    queue: VecDeque<TaskId>,
    quantum: u32,
    quantum_left: u32,
}

impl RoundRobinScheduler {
    pub const NAME: &'static str = "Round-Robin";

    /// Creates a scheduler with the given quantum (clamped to ≥ 1).
    pub fn new(quantum: u32) -> Self {
        let quantum = quantum.max(1);
        Self {
            table: TaskTable::new(),
            queue: VecDeque::new(),
            quantum,
            quantum_left: quantum,
        }
    }

    pub fn quantum(&self) -> u32 {
        self.quantum
    }

    /// Ticks left in the running task's quantum.
    pub fn quantum_left(&self) -> u32 {
        self.quantum_left
    }
}

impl Default for RoundRobinScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_QUANTUM)
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn submit(&mut self, task: Task) -> bool {
        let id = task.id();
        if !self.table.admit(task) {
            warn!("{}: ignoring duplicate task {}", Self::NAME, id);
            return false;
        }
        self.queue.push_back(id);
        true
    }

    fn select_for_tick(&mut self) -> Option<TaskId> {
        if let Some(id) = self.table.selected() {
            if self.quantum_left > 0 || !self.table.selected_has_work() {
                return Some(id);
            }
            self.table.deselect();
            self.queue.push_back(id);
            debug!(
                "{}: quantum expired for task {} at tick {}",
                Self::NAME,
                id,
                self.table.tick()
            );
        }

        let id = self.queue.pop_front()?;
        self.table.activate(id);
        self.quantum_left = self.quantum;
        debug!("{}: activated task {} at tick {}", Self::NAME, id, self.table.tick());
        Some(id)
    }

    fn execute(&mut self, id: TaskId, amount: u32) -> Option<&Task> {
        self.table.execute(id, amount)
    }

    fn notify_completed(&mut self, id: TaskId) -> Option<Task> {
        self.table.remove(id)
    }

    fn advance_tick(&mut self) {
        self.table.advance_tick();
        self.quantum_left = self.quantum_left.saturating_sub(1);
    }

    fn reset(&mut self) {
        self.table.clear();
        self.queue.clear();
        self.quantum_left = self.quantum;
    }

    fn table(&self) -> &TaskTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskCategory;

    /// Runs the scheduler, returning (tick, selected id) per tick and the
    /// completed tasks with their end ticks stamped.
    fn drive(s: &mut RoundRobinScheduler, ticks: u64) -> (Vec<Option<TaskId>>, Vec<Task>) {
        let mut trace = Vec::new();
        let mut done = Vec::new();
        for tick in 0..ticks {
            let selected = s.select_for_tick();
            trace.push(selected);
            if let Some(id) = selected {
                let finished = s.execute(id, 1).is_some_and(|t| t.is_completed());
                if finished {
                    if let Some(mut task) = s.notify_completed(id) {
                        task.set_end_tick(tick + 1);
                        done.push(task);
                    }
                }
            }
            s.advance_tick();
        }
        (trace, done)
    }

    #[test]
    fn test_single_task_spans_multiple_quanta() {
        let mut s = RoundRobinScheduler::new(10);
        s.submit(Task::new(1, 25, TaskCategory::CpuBound));

        let (_, done) = drive(&mut s, 40);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].start_tick(), Some(0));
        assert_eq!(done[0].turnaround(), Some(25));
    }

    #[test]
    fn test_rotation() {
        let mut s = RoundRobinScheduler::new(2);
        s.submit(Task::new(1, 3, TaskCategory::CpuBound));
        s.submit(Task::new(2, 3, TaskCategory::IoBound));

        let (trace, done) = drive(&mut s, 8);
        assert_eq!(
            trace,
            vec![Some(1), Some(1), Some(2), Some(2), Some(1), Some(2), None, None]
        );
        let order: Vec<_> = done.iter().map(|t| t.id()).collect();
        assert_eq!(order, vec![1, 2]);
        assert_eq!(done[1].start_tick(), Some(2));
    }

    #[test]
    fn test_select_idempotent_at_quantum_boundary() {
        let mut s = RoundRobinScheduler::new(1);
        s.submit(Task::new(1, 5, TaskCategory::CpuBound));
        s.submit(Task::new(2, 5, TaskCategory::CpuBound));

        assert_eq!(s.select_for_tick(), Some(1));
        s.execute(1, 1);
        s.advance_tick();

        assert_eq!(s.select_for_tick(), Some(2));
        assert_eq!(s.select_for_tick(), Some(2));
        assert_eq!(s.quantum_left(), 1);
    }

    #[test]
    fn test_zero_quantum_clamped() {
        let s = RoundRobinScheduler::new(0);
        assert_eq!(s.quantum(), 1);
    }

    #[test]
    fn test_reset_restores_quantum() {
        let mut s = RoundRobinScheduler::new(4);
        s.submit(Task::new(1, 10, TaskCategory::CpuBound));
        s.select_for_tick();
        s.advance_tick();
        assert_eq!(s.quantum_left(), 3);

        s.reset();
        assert_eq!(s.quantum_left(), 4);
        assert_eq!(s.current_tick(), 0);
        assert!(!s.has_pending_or_active_work());
    }
}
