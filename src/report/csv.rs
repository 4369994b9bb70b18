//! CSV schemas.
//!
//! Summary: one row per run.
//!
//! ```text
//! scheduler,total_tasks,completed_tasks,execution_time_ticks,total_energy_J,average_power_W,peak_temp_C
//! ```
//!
//! Energy is printed with 6 decimals, power with 3, temperature with 2.
//!
//! Per-task: one row per completed task. Unknown ticks print as `-1`;
//! turnaround is `end_time - start_time`, or `-1` if either is unknown.
//!
//! ```text
//! task_id,start_time,end_time,duration,type,scheduler,turnaround_time
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::models::Tick;
use crate::simulation::SimulationStats;

pub const SUMMARY_HEADER: &str =
    "scheduler,total_tasks,completed_tasks,execution_time_ticks,total_energy_J,average_power_W,peak_temp_C";

pub const TASK_HEADER: &str = "task_id,start_time,end_time,duration,type,scheduler,turnaround_time";

fn tick_or_unknown(tick: Option<Tick>) -> i64 {
    tick.map_or(-1, |t| t as i64)
}

/// Renders the summary CSV for one or more runs.
pub fn summary_csv(results: &[SimulationStats]) -> String {
    let mut out = String::with_capacity(SUMMARY_HEADER.len() + 1 + results.len() * 64);
    out.push_str(SUMMARY_HEADER);
    out.push('\n');
    for stats in results {
        out.push_str(&format!(
            "{},{},{},{},{:.6},{:.3},{:.2}\n",
            stats.scheduler_name,
            stats.total_tasks,
            stats.completed_tasks.len(),
            stats.total_execution_time_ticks,
            stats.total_energy_joules,
            stats.average_power_watts,
            stats.peak_temperature_celsius
        ));
    }
    out
}

/// Renders the per-task CSV for one run.
pub fn task_csv(stats: &SimulationStats) -> String {
    let mut out = String::with_capacity(TASK_HEADER.len() + 1 + stats.completed_tasks.len() * 48);
    out.push_str(TASK_HEADER);
    out.push('\n');
    for task in &stats.completed_tasks {
        let turnaround = task.turnaround().map_or(-1, |t| t as i64);
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            task.id,
            tick_or_unknown(task.start_tick),
            tick_or_unknown(task.end_tick),
            task.duration,
            task.category,
            task.scheduler_name,
            turnaround
        ));
    }
    out
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes the summary CSV to `path`.
pub fn write_summary_csv(path: &Path, results: &[SimulationStats]) -> Result<(), ReportError> {
    write_file(path, &summary_csv(results))
}

/// Writes the per-task CSV to `path`.
pub fn write_task_csv(path: &Path, stats: &SimulationStats) -> Result<(), ReportError> {
    write_file(path, &task_csv(stats))
}

/// Companion per-task path for a summary output: `out.csv` → `out_tasks.csv`,
/// `out` → `out_tasks.csv`.
pub fn task_csv_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{}_tasks.{}", stem, ext.to_string_lossy()),
        None => format!("{}_tasks.csv", stem),
    };
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskCategory;
    use crate::simulation::CompletedTask;

    fn sample() -> SimulationStats {
        SimulationStats {
            total_tasks: 3,
            total_execution_time_ticks: 1234,
            idle_ticks: 10,
            total_energy_joules: 1.23456789,
            average_power_watts: 1.0004999,
            peak_temperature_celsius: 41.006,
            scheduler_name: "Round-Robin".into(),
            completed_tasks: vec![
                CompletedTask {
                    id: 0,
                    start_tick: Some(0),
                    end_tick: Some(120),
                    duration: 60,
                    category: TaskCategory::CpuBound,
                    scheduler_name: "Round-Robin".into(),
                },
                CompletedTask {
                    id: 2,
                    start_tick: None,
                    end_tick: Some(130),
                    duration: 10,
                    category: TaskCategory::MemoryHeavy,
                    scheduler_name: "Round-Robin".into(),
                },
            ],
        }
    }

    #[test]
    fn test_summary_csv() {
        let csv = summary_csv(&[sample()]);
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], SUMMARY_HEADER);
        assert_eq!(lines[1], "Round-Robin,3,2,1234,1.234568,1.000,41.01");
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_task_csv() {
        let csv = task_csv(&sample());
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], TASK_HEADER);
        assert_eq!(lines[1], "0,0,120,60,CPU_BOUND,Round-Robin,120");
        assert_eq!(lines[2], "2,-1,130,10,MEMORY_HEAVY,Round-Robin,-1");
    }

    #[test]
    fn test_task_csv_path() {
        assert_eq!(
            task_csv_path(Path::new("out/results.csv")),
            PathBuf::from("out/results_tasks.csv")
        );
        assert_eq!(task_csv_path(Path::new("results")), PathBuf::from("results_tasks.csv"));
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        write_summary_csv(&path, &[sample()]).unwrap();
        assert!(fs::read_to_string(&path).unwrap().starts_with(SUMMARY_HEADER));

        let bad = dir.path().join("missing").join("tasks.csv");
        assert!(matches!(write_task_csv(&bad, &sample()), Err(ReportError::Write { .. })));
    }
}
