//! Run quality metrics (KPIs).
//!
//! Derives comparison metrics from a finished run's statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Completion Rate | completed / submitted |
//! | Avg Turnaround | Mean (end − start) over completed tasks |
//! | Max Turnaround | Largest single turnaround |
//! | Utilization | Busy ticks / elapsed ticks |
//! | Energy per Task | Total energy / completed tasks |
//! | Energy-Delay Product | Total energy × elapsed seconds |
//!
//! # Reference
//! Gonzalez & Horowitz (1996), "Energy Dissipation in General Purpose
//! Microprocessors" (energy-delay product)

use serde::{Deserialize, Serialize};

use super::{CompletedTask, SimulationStats};
use crate::models::{Tick, TICKS_PER_SECOND};

/// Derived run metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunKpi {
    pub scheduler_name: String,
    /// Number of tasks that finished.
    pub completed: usize,
    /// Fraction of submitted tasks that finished (0.0..1.0).
    pub completion_rate: f64,
    /// Mean turnaround (ticks), 0 when nothing finished.
    pub avg_turnaround_ticks: f64,
    /// Largest turnaround (ticks).
    pub max_turnaround_ticks: Tick,
    /// Fraction of elapsed ticks that executed a task (0.0..1.0).
    pub utilization: f64,
    /// Energy per completed task (J), 0 when nothing finished.
    pub energy_per_task_joules: f64,
    /// Energy × elapsed time (J·s).
    pub energy_delay_product: f64,
}

impl RunKpi {
    /// Computes KPIs from run statistics.
    pub fn calculate(stats: &SimulationStats) -> Self {
        let completed = stats.completed_tasks.len();
        let turnarounds: Vec<Tick> = stats
            .completed_tasks
            .iter()
            .filter_map(CompletedTask::turnaround)
            .collect();

        let completion_rate = if stats.total_tasks == 0 {
            1.0
        } else {
            completed as f64 / stats.total_tasks as f64
        };

        let avg_turnaround_ticks = if turnarounds.is_empty() {
            0.0
        } else {
            turnarounds.iter().sum::<Tick>() as f64 / turnarounds.len() as f64
        };

        let elapsed = stats.total_execution_time_ticks;
        let utilization = if elapsed == 0 {
            0.0
        } else {
            elapsed.saturating_sub(stats.idle_ticks) as f64 / elapsed as f64
        };

        let energy_per_task_joules = if completed == 0 {
            0.0
        } else {
            stats.total_energy_joules / completed as f64
        };

        Self {
            scheduler_name: stats.scheduler_name.clone(),
            completed,
            completion_rate,
            avg_turnaround_ticks,
            max_turnaround_ticks: turnarounds.iter().copied().max().unwrap_or(0),
            utilization,
            energy_per_task_joules,
            energy_delay_product: stats.total_energy_joules * (elapsed as f64 / TICKS_PER_SECOND),
        }
    }

    /// Index of the run with the lowest energy per completed task.
    ///
    /// Runs that completed nothing are skipped.
    pub fn most_efficient(kpis: &[RunKpi]) -> Option<usize> {
        kpis.iter()
            .enumerate()
            .filter(|(_, k)| k.completed > 0)
            .min_by(|(_, a), (_, b)| {
                a.energy_per_task_joules
                    .partial_cmp(&b.energy_per_task_joules)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i)
    }
}
