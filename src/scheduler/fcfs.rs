//! First-Come, First-Served.
//!
//! Strict FIFO, non-preemptive: the head of the queue runs until it
//! completes.

use std::collections::VecDeque;

use log::{debug, warn};

use super::{Scheduler, TaskTable};
use crate::models::{Task, TaskId};

/// FIFO, run-to-completion scheduler.
///
/// # Example
/// ```
/// use u_powersim::models::{Task, TaskCategory};
/// use u_powersim::scheduler::{FcfsScheduler, Scheduler};
///
/// let mut s = FcfsScheduler::new();
/// s.submit(Task::new(1, 5, TaskCategory::CpuBound));
/// s.submit(Task::new(2, 5, TaskCategory::IoBound));
/// assert_eq!(s.select_for_tick(), Some(1));
/// assert_eq!(s.select_for_tick(), Some(1));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FcfsScheduler {
    table: TaskTable,
    queue: VecDeque<TaskId>,
}

impl FcfsScheduler {
    pub const NAME: &'static str = "FCFS";

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting in the queue.
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }
}

impl Scheduler for FcfsScheduler {
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
            return Some(id);
        }
        let id = self.queue.pop_front()?;
        self.table.activate(id);
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
    }

    fn reset(&mut self) {
        self.table.clear();
        self.queue.clear();
    }

    fn table(&self) -> &TaskTable {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskCategory;

    fn run_to_completion(s: &mut FcfsScheduler, max_ticks: u32) -> Vec<Task> {
        let mut done = Vec::new();
        for _ in 0..max_ticks {
            if let Some(id) = s.select_for_tick() {
                let finished = s.execute(id, 1).is_some_and(|t| t.is_completed());
                if finished {
                    done.extend(s.notify_completed(id));
                }
            }
            s.advance_tick();
        }
        done
    }

    #[test]
    fn test_fifo_order() {
        let mut s = FcfsScheduler::new();
        for id in 1..=3 {
            s.submit(Task::new(id, 5, TaskCategory::CpuBound));
        }

        let done = run_to_completion(&mut s, 20);
        let ids: Vec<_> = done.iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let starts: Vec<_> = done.iter().map(|t| t.start_tick().unwrap()).collect();
        assert_eq!(starts, vec![0, 5, 10]);
        assert!(!s.has_pending_or_active_work());
    }

    #[test]
    fn test_no_preemption() {
        let mut s = FcfsScheduler::new();
        s.submit(Task::new(1, 10, TaskCategory::IoBound).with_priority(1));
        assert_eq!(s.select_for_tick(), Some(1));
        s.execute(1, 1);
        s.advance_tick();

        s.submit(Task::new(2, 1, TaskCategory::CpuBound).with_priority(100));
        assert_eq!(s.select_for_tick(), Some(1));
        assert_eq!(s.load(), 2);
        assert_eq!(s.pending_len(), 1);
    }

    #[test]
    fn test_idle_when_empty() {
        let mut s = FcfsScheduler::new();
        assert_eq!(s.select_for_tick(), None);
        assert!(!s.has_pending_or_active_work());
        assert_eq!(s.current_frequency_ghz(), 1.0);
    }

    #[test]
    fn test_notify_unknown_is_noop() {
        let mut s = FcfsScheduler::new();
        s.submit(Task::new(1, 3, TaskCategory::CpuBound));
        s.select_for_tick();
        assert!(s.notify_completed(99).is_none());
        assert_eq!(s.selected(), Some(1));
    }

    #[test]
    fn test_duplicate_submit_ignored() {
        let mut s = FcfsScheduler::new();
        assert!(s.submit(Task::new(1, 3, TaskCategory::CpuBound)));
        assert!(!s.submit(Task::new(1, 3, TaskCategory::CpuBound)));
        assert_eq!(s.load(), 1);
        assert_eq!(s.pending_len(), 1);
    }

    #[test]
    fn test_reset() {
        let mut s = FcfsScheduler::new();
        s.submit(Task::new(1, 3, TaskCategory::CpuBound));
        s.select_for_tick();
        s.advance_tick();

        s.reset();
        assert_eq!(s.load(), 0);
        assert_eq!(s.current_tick(), 0);
        assert_eq!(s.selected(), None);
        assert_eq!(s.select_for_tick(), None);
    }
}
