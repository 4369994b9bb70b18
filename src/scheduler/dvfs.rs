//! DVFS-aware scheduling.
//!
//! Queueing is FIFO and non-preemptive, as in FCFS. The clock frequency
//! moves along a fixed six-step ladder:
//!
//! - when a task is activated, its category picks the step
//!   (CPU-bound → High, memory-heavy → Nominal, I/O-bound → Low);
//! - on every submission and completion, system load picks the step
//!   (0 → Minimum, 1–4 → Nominal, 5–9 → High, ≥10 → Maximum);
//! - when nothing is selectable the clock drops to Minimum.
//!
//! Frequencies always snap to a ladder step; nothing is interpolated.
//!
//! # Reference
//! Pering et al. (1998), "The Simulation and Evaluation of Dynamic
//! Voltage Scaling Algorithms"

use std::collections::VecDeque;

use log::{debug, warn};

use super::{Scheduler, TaskTable};
use crate::models::{Task, TaskCategory, TaskId};

/// Discrete clock frequency step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FrequencyStep {
    /// 0.5 GHz
    Minimum,
    /// 0.8 GHz
    Low,
    /// 1.0 GHz
    Nominal,
    /// 1.2 GHz
    Elevated,
    /// 1.5 GHz
    High,
    /// 2.0 GHz
    Maximum,
}

impl FrequencyStep {
    /// The full ladder, slowest first.
    pub const LADDER: [FrequencyStep; 6] = [
        Self::Minimum,
        Self::Low,
        Self::Nominal,
        Self::Elevated,
        Self::High,
        Self::Maximum,
    ];

    pub fn ghz(self) -> f64 {
        match self {
            Self::Minimum => 0.5,
            Self::Low => 0.8,
            Self::Nominal => 1.0,
            Self::Elevated => 1.2,
            Self::High => 1.5,
            Self::Maximum => 2.0,
        }
    }

    /// Step for running a task of `category`.
    pub fn for_category(category: TaskCategory) -> Self {
        match category {
            TaskCategory::CpuBound => Self::High,
            TaskCategory::IoBound => Self::Low,
            TaskCategory::MemoryHeavy => Self::Nominal,
        }
    }

    /// Step for `load` pending plus active tasks.
    pub fn for_load(load: usize) -> Self {
        match load {
            0 => Self::Minimum,
            1..=4 => Self::Nominal,
            5..=9 => Self::High,
            _ => Self::Maximum,
        }
    }
}

/// FIFO scheduler with category- and load-driven frequency scaling.
#[derive(Debug, Clone)]
pub struct DvfsScheduler {
    table: TaskTable,
    queue: VecDeque<TaskId>,
    frequency: FrequencyStep,
}

impl DvfsScheduler {
    pub const NAME: &'static str = "DVFS-Aware";

    /// Frequency step before any task is seen.
    pub const INITIAL_STEP: FrequencyStep = FrequencyStep::Nominal;

    pub fn new() -> Self {
        Self {
            table: TaskTable::new(),
            queue: VecDeque::new(),
            frequency: Self::INITIAL_STEP,
        }
    }

    pub fn frequency_step(&self) -> FrequencyStep {
        self.frequency
    }

    fn set_frequency(&mut self, step: FrequencyStep, reason: &str) {
        if step != self.frequency {
            debug!(
                "{}: {:.1} GHz → {:.1} GHz ({}) at tick {}",
                Self::NAME,
                self.frequency.ghz(),
                step.ghz(),
                reason,
                self.table.tick()
            );
        }
        self.frequency = step;
    }

    fn apply_load_step(&mut self) {
        self.set_frequency(FrequencyStep::for_load(self.table.len()), "load");
    }
}

impl Default for DvfsScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for DvfsScheduler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn submit(&mut self, task: Task) -> bool {
        let id = task.id();
        let admitted = self.table.admit(task);
        if admitted {
            self.queue.push_back(id);
        } else {
            warn!("{}: ignoring duplicate task {}", Self::NAME, id);
        }
        self.apply_load_step();
        admitted
    }

    fn select_for_tick(&mut self) -> Option<TaskId> {
        if let Some(id) = self.table.selected() {
            return Some(id);
        }
        let Some(id) = self.queue.pop_front() else {
            self.set_frequency(FrequencyStep::Minimum, "idle");
            return None;
        };
        self.table.activate(id);
        debug!("{}: activated task {} at tick {}", Self::NAME, id, self.table.tick());
        if let Some(category) = self.table.get(id).map(|t| t.category()) {
            self.set_frequency(FrequencyStep::for_category(category), category.as_str());
        }
        Some(id)
    }

    fn execute(&mut self, id: TaskId, amount: u32) -> Option<&Task> {
        self.table.execute(id, amount)
    }

    fn notify_completed(&mut self, id: TaskId) -> Option<Task> {
        let task = self.table.remove(id);
        self.apply_load_step();
        task
    }

    fn advance_tick(&mut self) {
        self.table.advance_tick();
    }

    fn reset(&mut self) {
        self.table.clear();
        self.queue.clear();
        self.frequency = Self::INITIAL_STEP;
    }

    fn table(&self) -> &TaskTable {
        &self.table
    }

    fn current_frequency_ghz(&self) -> f64 {
        self.frequency.ghz()
    }
}
