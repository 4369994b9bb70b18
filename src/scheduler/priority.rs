//! Priority-based scheduling.
//!
//! The pending queue is a max-heap on priority; equal priorities leave in
//! the order they entered the queue. In preemptive mode an arrival with
//! strictly higher priority than the running task sends the running task
//! back to the queue.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use log::{debug, warn};

use super::{Scheduler, TaskTable};
use crate::models::{Task, TaskId};

/// Heap entry: priority first, then earlier enqueue sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    priority: i32,
    seq: Reverse<u64>,
    id: TaskId,
}

impl Ord for Pending {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Pending {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Highest-priority-first scheduler.
///
/// # Example
/// ```
/// use u_powersim::models::{Task, TaskCategory};
/// use u_powersim::scheduler::{PriorityScheduler, Scheduler};
///
/// let mut s = PriorityScheduler::new(false);
/// s.submit(Task::new(1, 5, TaskCategory::CpuBound).with_priority(2));
/// s.submit(Task::new(2, 5, TaskCategory::CpuBound).with_priority(7));
/// assert_eq!(s.select_for_tick(), Some(2));
/// ```
#[derive(Debug, Clone)]
pub struct PriorityScheduler {
    table: TaskTable,
    queue: BinaryHeap<Pending>,
    next_seq: u64,
    preemptive: bool,
}

impl PriorityScheduler {
    pub const NAME: &'static str = "Priority-Based";

    pub fn new(preemptive: bool) -> Self {
        Self {
            table: TaskTable::new(),
            queue: BinaryHeap::new(),
            next_seq: 0,
            preemptive,
        }
    }

    pub fn is_preemptive(&self) -> bool {
        self.preemptive
    }

    /// Number of tasks waiting in the queue.
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    fn enqueue(&mut self, id: TaskId, priority: i32) {
        self.queue.push(Pending {
            priority,
            seq: Reverse(self.next_seq),
            id,
        });
        self.next_seq += 1;
    }
}

impl Default for PriorityScheduler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Scheduler for PriorityScheduler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn submit(&mut self, task: Task) -> bool {
        let id = task.id();
        let priority = task.priority();
        if !self.table.admit(task) {
            warn!("{}: ignoring duplicate task {}", Self::NAME, id);
            return false;
        }
        self.enqueue(id, priority);

        if !self.preemptive {
            return true;
        }
        let running = self
            .table
            .selected()
            .and_then(|sel| self.table.get(sel))
            .map(|t| (t.id(), t.priority()));
        if let Some((running_id, running_priority)) = running {
            if priority > running_priority {
                self.table.deselect();
                self.enqueue(running_id, running_priority);
                debug!(
                    "{}: task {} (p={}) preempted by task {} (p={}) at tick {}",
                    Self::NAME,
                    running_id,
                    running_priority,
                    id,
                    priority,
                    self.table.tick()
                );
            }
        }
        true
    }

    fn select_for_tick(&mut self) -> Option<TaskId> {
        if let Some(id) = self.table.selected() {
            return Some(id);
        }
        let next = self.queue.pop()?;
        self.table.activate(next.id);
        debug!(
            "{}: activated task {} (p={}) at tick {}",
            Self::NAME,
            next.id,
            next.priority,
            self.table.tick()
        );
        Some(next.id)
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
        self.next_seq = 0;
    }

    fn table(&self) -> &TaskTable {
        &self.table
    }
}
