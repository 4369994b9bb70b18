//! Id-keyed task store shared by every policy.
//!
//! Holds each admitted task exactly once, keyed by id. Pending queues and
//! the "currently selected" slot hold ids only and look tasks up fresh,
//! so no reference into the map outlives a mutation.

use std::collections::HashMap;

use log::debug;

use crate::models::{Task, TaskId, Tick};

/// Admitted tasks plus the per-scheduler tick counter and selection slot.
///
/// A task in the table is either pending (its id sits in the policy's
/// queue) or active (admitted and taken off the queue). `selected` is
/// always an active task.
#[derive(Debug, Clone, Default)]
pub struct TaskTable {
    tasks: HashMap<TaskId, Task>,
    selected: Option<TaskId>,
    tick: Tick,
}

impl TaskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes ownership of `task`. Returns `false` if the id is already held.
    pub fn admit(&mut self, task: Task) -> bool {
        if self.tasks.contains_key(&task.id()) {
            return false;
        }
        self.tasks.insert(task.id(), task);
        true
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    /// Runs `amount` work units on an owned task.
    pub fn execute(&mut self, id: TaskId, amount: u32) -> Option<&Task> {
        let task = self.tasks.get_mut(&id)?;
        task.execute(amount);
        Some(task)
    }

    /// Makes `id` the selected task, stamping its start tick if unset.
    pub fn activate(&mut self, id: TaskId) {
        let tick = self.tick;
        if let Some(task) = self.tasks.get_mut(&id) {
            if task.set_start_tick(tick) {
                debug!("task {} started at tick {}", id, tick);
            }
            self.selected = Some(id);
        }
    }

    pub fn selected(&self) -> Option<TaskId> {
        self.selected
    }

    /// Whether the selected task still has work left.
    pub fn selected_has_work(&self) -> bool {
        self.selected
            .and_then(|id| self.tasks.get(&id))
            .is_some_and(|t| !t.is_completed())
    }

    /// Clears and returns the selection.
    pub fn deselect(&mut self) -> Option<TaskId> {
        self.selected.take()
    }

    /// Drops a finished task from the table, clearing the selection if it
    /// pointed at it. Unknown ids are ignored.
    pub fn remove(&mut self, id: TaskId) -> Option<Task> {
        let task = self.tasks.remove(&id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(task)
    }

    /// Number of owned (pending + active) tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
        self.selected = None;
        self.tick = 0;
    }
}
