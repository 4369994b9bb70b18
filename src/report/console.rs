//! Console reports.

use std::fmt;

use crate::models::{Tick, TICKS_PER_SECOND};
use crate::simulation::SimulationStats;

/// `"1500 ticks (1.50s)"`.
pub fn format_duration(ticks: Tick) -> String {
    format!("{} ticks ({:.2}s)", ticks, ticks as f64 / TICKS_PER_SECOND)
}

/// Energy with an SI prefix chosen by magnitude (µJ, mJ, J).
pub fn format_energy(joules: f64) -> String {
    scaled(joules, "J")
}

/// Power with an SI prefix chosen by magnitude (µW, mW, W).
pub fn format_power(watts: f64) -> String {
    scaled(watts, "W")
}

/// `"42.00 °C"`.
pub fn format_temperature(celsius: f64) -> String {
    format!("{:.2} °C", celsius)
}

fn scaled(value: f64, unit: &str) -> String {
    if value < 1e-3 {
        format!("{:.3} µ{}", value * 1e6, unit)
    } else if value < 1.0 {
        format!("{:.3} m{}", value * 1e3, unit)
    } else {
        format!("{:.3} {}", value, unit)
    }
}

/// Single-run report block.
///
/// # Example
/// ```
/// use u_powersim::models::{Task, TaskCategory};
/// use u_powersim::report::ConsoleReport;
/// use u_powersim::scheduler::FcfsScheduler;
/// use u_powersim::simulation::SimulationEngine;
///
/// let stats = SimulationEngine::new(FcfsScheduler::new())
///     .run(&[Task::new(0, 10, TaskCategory::IoBound)], 100);
/// let text = ConsoleReport(&stats).to_string();
/// assert!(text.contains("Scheduler: FCFS"));
/// ```
pub struct ConsoleReport<'a>(pub &'a SimulationStats);

impl fmt::Display for ConsoleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;
        let rule = "=".repeat(50);

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "         SIMULATION RESULTS")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Scheduler: {}", stats.scheduler_name)?;
        writeln!(f, "Total Tasks: {}", stats.total_tasks)?;
        writeln!(f, "Completed Tasks: {}", stats.completed_tasks.len())?;
        writeln!(
            f,
            "Total Execution Time: {}",
            format_duration(stats.total_execution_time_ticks)
        )?;
        writeln!(f, "Idle Time: {}", format_duration(stats.idle_ticks))?;
        writeln!(
            f,
            "Total Energy Consumption: {}",
            format_energy(stats.total_energy_joules)
        )?;
        writeln!(f, "Average Power: {}", format_power(stats.average_power_watts))?;
        writeln!(
            f,
            "Peak Temperature: {}",
            format_temperature(stats.peak_temperature_celsius)
        )?;
        if let Some(avg) = stats.average_turnaround() {
            writeln!(f, "Average Turnaround Time: {}", format_duration(avg as Tick))?;
        }
        writeln!(f, "{rule}")
    }
}

/// Side-by-side comparison of several runs.
pub struct ComparisonTable<'a>(pub &'a [SimulationStats]);

impl fmt::Display for ComparisonTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        let rule = "=".repeat(80);

        writeln!(f)?;
        writeln!(f, "{rule}")?;
        writeln!(f, "                    SCHEDULER COMPARISON")?;
        writeln!(f, "{rule}")?;
        writeln!(
            f,
            "{:<15}{:<12}{:<14}{:<15}{:<15}{:<12}",
            "Scheduler", "Tasks", "Time (ticks)", "Energy (J)", "Avg Power (W)", "Peak Temp (°C)"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;
        for stats in self.0 {
            writeln!(
                f,
                "{:<15}{:<12}{:<14}{:<15.6}{:<15.3}{:<12.2}",
                stats.scheduler_name,
                stats.completed_tasks.len(),
                stats.total_execution_time_ticks,
                stats.total_energy_joules,
                stats.average_power_watts,
                stats.peak_temperature_celsius
            )?;
        }
        writeln!(f, "{rule}")
    }
}
