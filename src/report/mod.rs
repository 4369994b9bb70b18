//! Rendering of run statistics.
//!
//! - **CSV**: the summary and per-task schemas consumed by downstream
//!   tooling. Column names and numeric precisions are fixed.
//! - **Console**: human-readable single-run report and multi-policy
//!   comparison table.

mod console;
mod csv;

pub use console::{
    format_duration, format_energy, format_power, format_temperature, ComparisonTable,
    ConsoleReport,
};
pub use csv::{
    summary_csv, task_csv, task_csv_path, write_summary_csv, write_task_csv, SUMMARY_HEADER,
    TASK_HEADER,
};
