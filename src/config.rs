//! Run configuration.
//!
//! One [`SimulationConfig`] describes a whole invocation: which policy (or
//! all of them), how the synthetic workload is generated, and the tick
//! limits. It can be loaded from JSON, where missing fields keep their
//! defaults, and is overridden field by field by CLI flags.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::models::{Task, Tick};
use crate::scheduler::{Policy, SchedulerKind, DEFAULT_QUANTUM};
use crate::simulation::{EngineConfig, SimulationEngine, DEFAULT_MAX_IDLE_TICKS};
use crate::workload::TaskGenerator;

/// Full configuration of a simulator invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Policy for single runs.
    pub scheduler: SchedulerKind,
    /// Number of generated tasks.
    pub num_tasks: usize,
    /// Tick limit per run.
    pub simulation_duration: Tick,
    /// Workload generator seed.
    pub seed: u64,
    pub min_task_duration: u32,
    pub max_task_duration: u32,
    /// Round-Robin quantum (ticks).
    pub quantum: u32,
    /// Priority policy preempts on higher-priority arrivals.
    pub preemptive: bool,
    /// Consecutive idle ticks tolerated once all work is done.
    pub max_idle_ticks: Tick,
    /// CSV output path.
    pub output: Option<PathBuf>,
    /// Run every policy against the same workload.
    pub compare: bool,
    /// Print statistics as JSON instead of the console report.
    pub json: bool,
    pub verbose: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scheduler: SchedulerKind::RoundRobin,
            num_tasks: 50,
            simulation_duration: 10_000,
            seed: 42,
            min_task_duration: 50,
            max_task_duration: 500,
            quantum: DEFAULT_QUANTUM,
            preemptive: true,
            max_idle_ticks: DEFAULT_MAX_IDLE_TICKS,
            output: None,
            compare: false,
            json: false,
            verbose: false,
        }
    }
}

impl SimulationConfig {
    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Checks value ranges. Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_tasks == 0 {
            return Err(ConfigError::NoTasks);
        }
        if self.simulation_duration == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.min_task_duration > self.max_task_duration {
            return Err(ConfigError::DurationRange {
                min: self.min_task_duration,
                max: self.max_task_duration,
            });
        }
        if self.quantum == 0 {
            return Err(ConfigError::ZeroQuantum);
        }
        Ok(())
    }

    /// Policies this invocation runs, in order.
    pub fn policies(&self) -> Vec<SchedulerKind> {
        if self.compare {
            SchedulerKind::ALL.to_vec()
        } else {
            vec![self.scheduler]
        }
    }

    /// Generates the workload from the configured seed.
    pub fn generate_tasks(&self) -> Vec<Task> {
        TaskGenerator::new(self.seed).generate(
            self.num_tasks,
            self.min_task_duration,
            self.max_task_duration,
        )
    }

    /// Builds an engine for `kind` with this configuration's knobs.
    pub fn engine(&self, kind: SchedulerKind) -> SimulationEngine<Policy> {
        SimulationEngine::new(Policy::build(kind, self.quantum, self.preemptive)).with_config(
            EngineConfig {
                max_idle_ticks: self.max_idle_ticks,
                ..EngineConfig::default()
            },
        )
    }
}
