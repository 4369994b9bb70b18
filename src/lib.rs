//! Energy-aware CPU scheduling simulator for the U-Engine ecosystem.
//!
//! Drives a discrete-time simulation in which tasks are admitted to a
//! pluggable scheduling policy, one task (or none) runs per tick, and
//! coupled energy and thermal models turn that choice into power draw
//! and temperature.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `TaskCategory`, `EnergyModel`,
//!   `ThermalModel`
//! - **`scheduler`**: The `Scheduler` contract and its four policies
//!   (FCFS, Round-Robin, Priority, DVFS-aware)
//! - **`simulation`**: The tick-loop driver and run statistics
//! - **`workload`**: Seeded synthetic task source
//! - **`report`**: CSV and console rendering of run statistics
//! - **`config`**: Run configuration (CLI/JSON)
//! - **`validation`**: Workload integrity checks
//!
//! # Time
//!
//! One tick is one millisecond of simulated time. Energy is integrated
//! per tick as `power × 1 ms`.
//!
//! # Example
//!
//! ```
//! use u_powersim::models::{Task, TaskCategory};
//! use u_powersim::scheduler::FcfsScheduler;
//! use u_powersim::simulation::SimulationEngine;
//!
//! let tasks = vec![
//!     Task::new(0, 20, TaskCategory::CpuBound),
//!     Task::new(1, 30, TaskCategory::IoBound),
//! ];
//! let mut engine = SimulationEngine::new(FcfsScheduler::new());
//! let stats = engine.run(&tasks, 10_000);
//! assert_eq!(stats.completed_tasks.len(), 2);
//! assert!(stats.total_energy_joules > 0.0);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Weiser et al. (1994), "Scheduling for Reduced CPU Energy"

pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod simulation;
pub mod validation;
pub mod workload;
