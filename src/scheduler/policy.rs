//! Closed set of scheduling policies.
//!
//! [`SchedulerKind`] names a policy (parsed from CLI/config strings);
//! [`Policy`] holds a constructed one and dispatches the [`Scheduler`]
//! contract by `match`, so drivers can hold any policy without boxing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{
    DvfsScheduler, FcfsScheduler, PriorityScheduler, RoundRobinScheduler, Scheduler, TaskTable,
};
use crate::error::ConfigError;
use crate::models::{Task, TaskId};

/// Policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SchedulerKind {
    #[serde(rename = "RR")]
    RoundRobin,
    #[serde(rename = "Priority")]
    Priority,
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "DVFS")]
    Dvfs,
}

impl SchedulerKind {
    /// Comparison order used by multi-policy runs.
    pub const ALL: [SchedulerKind; 4] = [Self::RoundRobin, Self::Priority, Self::Fcfs, Self::Dvfs];

    /// Short CLI name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RoundRobin => "RR",
            Self::Priority => "Priority",
            Self::Fcfs => "FCFS",
            Self::Dvfs => "DVFS",
        }
    }
}

impl fmt::Display for SchedulerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulerKind {
    type Err = ConfigError;

    /// Case-insensitive; accepts the short names and the display names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RR" | "ROUNDROBIN" | "ROUND-ROBIN" => Ok(Self::RoundRobin),
            "PRIORITY" | "PRIORITY-BASED" => Ok(Self::Priority),
            "FCFS" => Ok(Self::Fcfs),
            "DVFS" | "DVFS-AWARE" => Ok(Self::Dvfs),
            _ => Err(ConfigError::UnknownScheduler(s.to_string())),
        }
    }
}

/// A constructed scheduling policy.
#[derive(Debug, Clone)]
pub enum Policy {
    Fcfs(FcfsScheduler),
    RoundRobin(RoundRobinScheduler),
    Priority(PriorityScheduler),
    Dvfs(DvfsScheduler),
}

impl Policy {
    /// Builds the policy named by `kind`.
    ///
    /// `quantum` applies to Round-Robin, `preemptive` to Priority.
    pub fn build(kind: SchedulerKind, quantum: u32, preemptive: bool) -> Self {
        match kind {
            SchedulerKind::RoundRobin => Self::RoundRobin(RoundRobinScheduler::new(quantum)),
            SchedulerKind::Priority => Self::Priority(PriorityScheduler::new(preemptive)),
            SchedulerKind::Fcfs => Self::Fcfs(FcfsScheduler::new()),
            SchedulerKind::Dvfs => Self::Dvfs(DvfsScheduler::new()),
        }
    }

    pub fn kind(&self) -> SchedulerKind {
        match self {
            Self::Fcfs(_) => SchedulerKind::Fcfs,
            Self::RoundRobin(_) => SchedulerKind::RoundRobin,
            Self::Priority(_) => SchedulerKind::Priority,
            Self::Dvfs(_) => SchedulerKind::Dvfs,
        }
    }

    fn inner(&self) -> &dyn Scheduler {
        match self {
            Self::Fcfs(s) => s,
            Self::RoundRobin(s) => s,
            Self::Priority(s) => s,
            Self::Dvfs(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Scheduler {
        match self {
            Self::Fcfs(s) => s,
            Self::RoundRobin(s) => s,
            Self::Priority(s) => s,
            Self::Dvfs(s) => s,
        }
    }
}

impl From<FcfsScheduler> for Policy {
    fn from(s: FcfsScheduler) -> Self {
        Self::Fcfs(s)
    }
}

impl From<RoundRobinScheduler> for Policy {
    fn from(s: RoundRobinScheduler) -> Self {
        Self::RoundRobin(s)
    }
}

impl From<PriorityScheduler> for Policy {
    fn from(s: PriorityScheduler) -> Self {
        Self::Priority(s)
    }
}

impl From<DvfsScheduler> for Policy {
    fn from(s: DvfsScheduler) -> Self {
        Self::Dvfs(s)
    }
}

impl Scheduler for Policy {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn submit(&mut self, task: Task) -> bool {
        self.inner_mut().submit(task)
    }

    fn select_for_tick(&mut self) -> Option<TaskId> {
        self.inner_mut().select_for_tick()
    }

    fn execute(&mut self, id: TaskId, amount: u32) -> Option<&Task> {
        self.inner_mut().execute(id, amount)
    }

    fn notify_completed(&mut self, id: TaskId) -> Option<Task> {
        self.inner_mut().notify_completed(id)
    }

    fn advance_tick(&mut self) {
        self.inner_mut().advance_tick()
    }

    fn reset(&mut self) {
        self.inner_mut().reset()
    }

    fn table(&self) -> &TaskTable {
        self.inner().table()
    }

    fn current_frequency_ghz(&self) -> f64 {
        self.inner().current_frequency_ghz()
    }
}
