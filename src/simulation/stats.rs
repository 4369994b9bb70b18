//! Run statistics.

use serde::{Deserialize, Serialize};

use crate::models::{Task, TaskCategory, TaskId, Tick, TICKS_PER_SECOND};

/// One completed task as recorded at the end of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTask {
    pub id: TaskId,
    /// Tick of first execution.
    pub start_tick: Option<Tick>,
    /// Exclusive end: the tick after the last work unit ran.
    pub end_tick: Option<Tick>,
    pub duration: u32,
    pub category: TaskCategory,
    pub scheduler_name: String,
}

impl CompletedTask {
    /// Snapshot of a finished task.
    pub fn from_task(task: &Task, scheduler_name: &str) -> Self {
        Self {
            id: task.id(),
            start_tick: task.start_tick(),
            end_tick: task.end_tick(),
            duration: task.duration(),
            category: task.category(),
            scheduler_name: scheduler_name.to_string(),
        }
    }

    /// `end_tick - start_tick` when both are known.
    pub fn turnaround(&self) -> Option<Tick> {
        match (self.start_tick, self.end_tick) {
            (Some(start), Some(end)) => Some(end.saturating_sub(start)),
            _ => None,
        }
    }
}

/// Aggregate result of one simulation run.
///
/// Built once, when the run terminates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Tasks submitted to the scheduler.
    pub total_tasks: usize,
    /// Ticks elapsed before termination.
    pub total_execution_time_ticks: Tick,
    /// Ticks on which no task ran.
    pub idle_ticks: Tick,
    /// Energy integrated over all ticks (J).
    pub total_energy_joules: f64,
    /// `total_energy / elapsed seconds`, 0 when no tick elapsed (W).
    pub average_power_watts: f64,
    /// Highest temperature reached (°C).
    pub peak_temperature_celsius: f64,
    pub scheduler_name: String,
    /// Completed tasks in completion order.
    pub completed_tasks: Vec<CompletedTask>,
}

impl SimulationStats {
    /// Average power for `energy_joules` spread over `ticks`.
    pub fn average_power(energy_joules: f64, ticks: Tick) -> f64 {
        if ticks == 0 {
            0.0
        } else {
            energy_joules / (ticks as f64 / TICKS_PER_SECOND)
        }
    }

    /// Number of tasks that finished.
    pub fn completed_count(&self) -> usize {
        self.completed_tasks.len()
    }

    /// Mean turnaround over tasks with both stamps known.
    pub fn average_turnaround(&self) -> Option<f64> {
        let turnarounds: Vec<Tick> = self
            .completed_tasks
            .iter()
            .filter_map(CompletedTask::turnaround)
            .collect();
        if turnarounds.is_empty() {
            return None;
        }
        Some(turnarounds.iter().sum::<Tick>() as f64 / turnarounds.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(id: TaskId, start: Option<Tick>, end: Option<Tick>) -> CompletedTask {
        CompletedTask {
            id,
            start_tick: start,
            end_tick: end,
            duration: 10,
            category: TaskCategory::CpuBound,
            scheduler_name: "FCFS".into(),
        }
    }

    #[test]
    fn test_average_power() {
        assert_eq!(SimulationStats::average_power(5.0, 0), 0.0);
        assert!((SimulationStats::average_power(2.0, 500) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_average_turnaround_skips_unknown() {
        let stats = SimulationStats {
            total_tasks: 3,
            total_execution_time_ticks: 100,
            idle_ticks: 0,
            total_energy_joules: 1.0,
            average_power_watts: 10.0,
            peak_temperature_celsius: 30.0,
            scheduler_name: "FCFS".into(),
            completed_tasks: vec![
                completed(1, Some(0), Some(10)),
                completed(2, Some(10), Some(40)),
                completed(3, None, Some(50)),
            ],
        };
        assert_eq!(stats.completed_count(), 3);
        assert!((stats.average_turnaround().unwrap() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_task() {
        let mut task = Task::new(4, 12, TaskCategory::MemoryHeavy);
        task.set_start_tick(3);
        task.execute(12);
        task.set_end_tick(15);

        let c = CompletedTask::from_task(&task, "DVFS-Aware");
        assert_eq!(c.id, 4);
        assert_eq!(c.turnaround(), Some(12));
        assert_eq!(c.category, TaskCategory::MemoryHeavy);
        assert_eq!(c.scheduler_name, "DVFS-Aware");
    }
}
